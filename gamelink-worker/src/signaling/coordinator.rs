use crate::signaling::link_output::LinkOutput;
use gamelink_core::{Packet, PacketType, RoomId, SessionId, WebrtcIceCandidateRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Everything the worker says to the coordinator goes through here.
///
/// Sends are fire-and-forget: failures are logged and never retried, the
/// coordinator reconciles stale rooms once the worker disappears.
#[derive(Clone)]
pub struct Coordinator {
    output: Arc<dyn LinkOutput>,
}

impl Coordinator {
    pub fn new(output: Arc<dyn LinkOutput>) -> Self {
        Self { output }
    }

    pub fn register_room(&self, room_id: &RoomId) {
        self.send_and_forget(PacketType::REGISTER_ROOM, room_id);
    }

    pub fn close_room(&self, room_id: &RoomId) {
        self.send_and_forget(PacketType::CLOSE_ROOM, room_id);
    }

    pub fn ice_candidate(&self, session_id: &SessionId, candidate: String) {
        let payload = WebrtcIceCandidateRequest {
            id: session_id.clone(),
            candidate,
        };
        self.send_and_forget(PacketType::ICE_CANDIDATE, &payload);
    }

    /// Replies to `request` if the coordinator expects an answer.
    pub fn reply<T: Serialize>(&self, request: &Packet, payload: &T) {
        if !request.is_correlated() {
            debug!("Dropping reply to uncorrelated {}", request.t);
            return;
        }
        match request.reply(payload) {
            Ok(packet) => self.send(packet),
            Err(e) => error!("Failed to serialize reply to {}: {}", request.t, e),
        }
    }

    pub fn fail(&self, request: &Packet, message: impl Into<String>) {
        if !request.is_correlated() {
            return;
        }
        match request.failure(message) {
            Ok(packet) => self.send(packet),
            Err(e) => error!("Failed to serialize failure reply to {}: {}", request.t, e),
        }
    }

    fn send_and_forget<T: Serialize>(&self, t: PacketType, payload: &T) {
        match Packet::notification(t, payload) {
            Ok(packet) => self.send(packet),
            Err(e) => error!("Failed to serialize {}: {}", t, e),
        }
    }

    fn send(&self, packet: Packet) {
        let t = packet.t;
        if let Err(e) = self.output.send(packet) {
            warn!("Failed to send {} to coordinator: {}", t, e);
        }
    }
}
