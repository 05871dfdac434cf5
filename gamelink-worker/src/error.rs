use crate::emulator::EmulatorError;
use crate::session::NegotiationError;
use crate::transport::MediaError;
use gamelink_core::{DecodeError, SessionId};
use thiserror::Error;

/// How the router treats a failed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Logged and dropped, nothing is sent back.
    ProtocolAnomaly,
    /// Reported to the requester as a failure reply.
    Validation,
    /// Emulator or media stack failed; reported like a validation error.
    Collaborator,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("no session {0}")]
    UnknownSession(SessionId),

    #[error("session {session_id}: {source}")]
    Negotiation {
        session_id: SessionId,
        #[source]
        source: NegotiationError,
    },

    #[error("session {0} is not in a room")]
    NoRoom(SessionId),

    #[error("player index {index} out of range, game has {count} players")]
    PlayerOutOfRange { index: i64, count: usize },

    #[error("malformed save state: {0}")]
    MalformedState(#[from] base64::DecodeError),

    #[error(transparent)]
    Emulator(#[from] EmulatorError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(DecodeError::UnknownType(_))
            | Self::UnknownSession(_)
            | Self::Negotiation { .. } => ErrorKind::ProtocolAnomaly,
            Self::Decode(DecodeError::MalformedPayload { .. })
            | Self::NoRoom(_)
            | Self::PlayerOutOfRange { .. }
            | Self::MalformedState(_) => ErrorKind::Validation,
            Self::Emulator(_) | Self::Media(_) => ErrorKind::Collaborator,
        }
    }
}
