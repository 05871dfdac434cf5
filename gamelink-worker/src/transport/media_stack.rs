use crate::transport::media_event::{MediaEvent, PeerKey};
use async_trait::async_trait;
use gamelink_core::SessionId;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no media peer for session {0}")]
    NoPeer(SessionId),

    #[error("failed to create offer: {0}")]
    Offer(String),

    #[error("failed to apply remote answer: {0}")]
    Answer(String),

    #[error("failed to add ice candidate: {0}")]
    Candidate(String),
}

/// Local WebRTC stack terminating the browser's media connection.
///
/// The link only relays signaling; everything media related stays behind this
/// trait.
#[async_trait]
pub trait MediaStack: Send + Sync + 'static {
    /// Creates (or replaces) the session's peer and returns a local SDP offer.
    /// Gathered candidates and state changes are reported on `events`, tagged
    /// with `peer`.
    async fn produce_offer(
        &self,
        peer: &PeerKey,
        events: mpsc::Sender<MediaEvent>,
    ) -> Result<String, MediaError>;

    async fn apply_answer(&self, session_id: &SessionId, sdp: String) -> Result<(), MediaError>;

    async fn add_ice_candidate(
        &self,
        session_id: &SessionId,
        candidate: String,
    ) -> Result<(), MediaError>;

    /// Closes the session's peer, if any.
    async fn close(&self, session_id: &SessionId);
}
