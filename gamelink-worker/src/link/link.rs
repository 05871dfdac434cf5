use crate::emulator::Emulator;
use crate::link::link_command::{LinkCommand, LinkHandle};
use crate::room::RoomManager;
use crate::session::SessionRegistry;
use crate::signaling::{Coordinator, LinkOutput};
use crate::transport::{MediaEvent, MediaStack};
use gamelink_core::{Packet, RoomId, SessionId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The worker side of one coordinator link.
///
/// Owns every session and room of the link and handles inbound packets, media
/// events and commands one at a time.
pub struct Link {
    pub(super) sessions: SessionRegistry,
    pub(super) rooms: RoomManager,
    pub(super) coordinator: Coordinator,
    pub(super) media: Arc<dyn MediaStack>,
    pub(super) emulator: Arc<dyn Emulator>,

    /// Cloned into every media peer; held here so the channel never closes.
    pub(super) media_tx: mpsc::Sender<MediaEvent>,
    media_rx: mpsc::Receiver<MediaEvent>,

    command_rx: mpsc::Receiver<LinkCommand>,
}

impl Link {
    pub fn new(
        output: Arc<dyn LinkOutput>,
        media: Arc<dyn MediaStack>,
        emulator: Arc<dyn Emulator>,
    ) -> (Self, LinkHandle) {
        let (media_tx, media_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(32);
        let coordinator = Coordinator::new(output);

        let link = Self {
            sessions: SessionRegistry::new(),
            rooms: RoomManager::new(coordinator.clone()),
            coordinator,
            media,
            emulator,
            media_tx,
            media_rx,
            command_rx,
        };
        (link, LinkHandle::new(command_tx))
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    /// Runs the event loop until `inbound` closes (link loss) or a shutdown
    /// command arrives, then tears down every session and room.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<Packet>) {
        info!("Link event loop started");
        let mut commands_open = true;

        loop {
            tokio::select! {
                packet = inbound.recv() => {
                    match packet {
                        Some(p) => self.dispatch(p).await,
                        None => {
                            info!("Coordinator link closed. Tearing down sessions.");
                            break;
                        }
                    }
                }

                evt = self.media_rx.recv() => {
                    if let Some(e) = evt {
                        self.handle_media_event(e);
                    }
                }

                cmd = self.command_rx.recv(), if commands_open => {
                    match cmd {
                        Some(LinkCommand::CloseRoom { room_id }) => self.close_room(&room_id).await,
                        Some(LinkCommand::Shutdown) => {
                            info!("Shutdown requested. Tearing down sessions.");
                            break;
                        }
                        None => commands_open = false,
                    }
                }
            }
        }

        self.teardown().await;
        info!("Link event loop finished");
    }

    /// Handles a local media event. Public so tests can drive it without a loop.
    ///
    /// Events of a peer that was since replaced, or of a gone session, are dropped.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        let peer = event.peer();
        let Ok(session) = self.sessions.get_mut(&peer.session_id) else {
            debug!("Dropping media event of gone session {}", peer.session_id);
            return;
        };
        if session.media_generation != peer.generation {
            debug!(
                "Dropping media event of stale peer {}, current generation {}",
                peer, session.media_generation
            );
            return;
        }

        match event {
            MediaEvent::CandidateGenerated(peer, candidate) => {
                self.coordinator.ice_candidate(&peer.session_id, candidate);
            }

            MediaEvent::Connected(peer) => match session.negotiation.establish() {
                Ok(t) => info!("Session {} negotiation {}", peer.session_id, t),
                Err(e) => debug!("Ignoring connected event for {}: {}", peer, e),
            },

            MediaEvent::Disconnected(peer) => {
                warn!("Media connection lost for {}, waiting for terminate", peer);
            }
        }
    }

    /// Administrative close: every attached session loses its game but stays
    /// registered.
    pub(super) async fn close_room(&mut self, room_id: &RoomId) {
        let Some(room) = self.rooms.close_room(room_id) else {
            warn!("Close requested for unknown room {}", room_id);
            return;
        };

        for session_id in room.into_sessions() {
            if let Err(e) = self.emulator.quit_game(&session_id).await {
                warn!("Failed to stop game of {} in {}: {}", session_id, room_id, e);
            }
            if let Ok(session) = self.sessions.get_mut(&session_id) {
                session.room_id = None;
            }
        }
    }

    /// Stops the session's game, if it has one, logging emulator failures.
    pub(super) async fn quit_quietly(&mut self, session_id: &SessionId) {
        let playing = self
            .sessions
            .get(session_id)
            .is_ok_and(|s| s.room_id.is_some());
        if !playing {
            return;
        }
        if let Err(e) = self.emulator.quit_game(session_id).await {
            warn!("Failed to quit game of session {}: {}", session_id, e);
        }
    }

    /// Closes and forgets the session, releasing its room. Idempotent.
    pub(super) async fn release_session(&mut self, session_id: &SessionId) -> bool {
        let Some(mut session) = self.sessions.remove(session_id) else {
            return false;
        };

        if let Some(t) = session.negotiation.close() {
            debug!("Session {} negotiation {}", session.id(), t);
        }
        self.media.close(session_id).await;

        if let Some(room_id) = session.room_id.take() {
            self.rooms.leave(&room_id, session_id);
        }
        info!("Session {} released", session_id);
        true
    }

    async fn teardown(&mut self) {
        for session_id in self.sessions.ids() {
            self.quit_quietly(&session_id).await;
            self.release_session(&session_id).await;
        }
        debug_assert!(self.rooms.is_empty(), "rooms outlived their sessions");
    }
}
