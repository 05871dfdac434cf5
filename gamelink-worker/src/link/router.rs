use crate::error::{DispatchError, ErrorKind};
use crate::link::link::Link;
use gamelink_core::{Packet, Request, SaveGameResponse, StartGameResponse};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Correlated reply payloads, serialized as their bare inner value.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum Reply {
    Ack,
    Offer(String),
    StartGame(StartGameResponse),
    SaveGame(SaveGameResponse),
    PlayerIndex(usize),
    Multitap(bool),
}

pub(super) type HandlerResult = Result<Option<Reply>, DispatchError>;

impl Link {
    /// Handles one inbound packet to completion.
    ///
    /// Never fails: every error is logged and, where the coordinator waits for
    /// an answer, turned into a failure reply.
    pub async fn dispatch(&mut self, packet: Packet) {
        let result = match Request::decode(&packet) {
            Ok(request) => self.route(request).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(Some(reply)) => self.coordinator.reply(&packet, &reply),
            Ok(None) => {}
            Err(e) => self.report(&packet, e),
        }
    }

    async fn route(&mut self, request: Request) -> HandlerResult {
        debug!("Routing {} for session {}", request.kind(), request.session_id());
        match request {
            Request::TerminateSession(r) => {
                info!("Received a terminate session request for {}", r.id);
                self.terminate_session(r).await
            }
            Request::WebrtcInit(r) => {
                info!("Received a request to createOffer from browser via coordinator");
                self.webrtc_init(r).await
            }
            Request::WebrtcAnswer(r) => {
                info!("Received answer SDP from browser");
                self.webrtc_answer(r).await
            }
            Request::WebrtcIceCandidate(r) => {
                info!("Received remote Ice Candidate from browser");
                self.webrtc_ice_candidate(r).await
            }
            Request::StartGame(r) => {
                info!("Received game start request");
                self.start_game(r).await
            }
            Request::QuitGame(r) => {
                info!("Received game quit request");
                self.quit_game(r).await
            }
            Request::SaveGame(r) => {
                info!("Received a save game from coordinator");
                self.save_game(r).await
            }
            Request::LoadGame(r) => {
                info!("Received load game request");
                self.load_game(r).await
            }
            Request::ChangePlayer(r) => {
                info!("Received an update player index request");
                self.change_player(r).await
            }
            Request::ToggleMultitap(r) => {
                info!("Received multitap toggle request");
                self.toggle_multitap(r).await
            }
        }
    }

    fn report(&self, packet: &Packet, error: DispatchError) {
        match error.kind() {
            ErrorKind::ProtocolAnomaly => warn!("Dropping {}: {}", packet.t, error),
            ErrorKind::Validation | ErrorKind::Collaborator => {
                warn!("Failed to handle {}: {}", packet.t, error);
                self.coordinator.fail(packet, error.to_string());
            }
        }
    }
}
