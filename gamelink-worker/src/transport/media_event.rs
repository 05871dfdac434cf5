use gamelink_core::SessionId;
use std::fmt;

/// One media peer of a session. Every offer builds a new peer with the next generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerKey {
    pub session_id: SessionId,
    pub generation: u64,
}

impl fmt::Display for PeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.session_id, self.generation)
    }
}

/// Events the media stack raises for the link actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// A local ICE candidate was gathered and must be trickled to the browser.
    CandidateGenerated(PeerKey, String),

    /// The peer connection reached the connected state.
    Connected(PeerKey),

    /// The peer connection failed or dropped.
    Disconnected(PeerKey),
}

impl MediaEvent {
    pub fn peer(&self) -> &PeerKey {
        match self {
            Self::CandidateGenerated(peer, _) | Self::Connected(peer) | Self::Disconnected(peer) => {
                peer
            }
        }
    }
}
