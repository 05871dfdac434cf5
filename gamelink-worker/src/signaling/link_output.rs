use gamelink_core::Packet;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    #[error("outbound queue is full")]
    Full,

    #[error("coordinator link is closed")]
    Closed,
}

/// Outbound half of the coordinator link.
///
/// `send` only enqueues: it must return immediately so a slow coordinator can
/// never stall packet dispatch.
pub trait LinkOutput: Send + Sync {
    fn send(&self, packet: Packet) -> Result<(), SendError>;
}
