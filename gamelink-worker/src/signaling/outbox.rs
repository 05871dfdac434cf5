use crate::signaling::link_output::{LinkOutput, SendError};
use gamelink_core::Packet;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Bounded queue between the link actor and the socket writer task.
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::Sender<Packet>,
}

impl Outbox {
    /// Returns the outbox and the receiver its drain task reads from.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Packet>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl LinkOutput for Outbox {
    fn send(&self, packet: Packet) -> Result<(), SendError> {
        self.tx.try_send(packet).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }
}
