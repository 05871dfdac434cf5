use gamelink_core::RoomId;
use tokio::sync::mpsc;

/// Administrative commands for a running link, sent from outside the actor.
#[derive(Debug)]
pub enum LinkCommand {
    /// Close the room regardless of attached sessions.
    CloseRoom { room_id: RoomId },

    /// Tear everything down as on link loss and stop the event loop.
    Shutdown,
}

/// Cloneable handle for sending `LinkCommand`s to a link actor.
#[derive(Clone)]
pub struct LinkHandle {
    command_tx: mpsc::Sender<LinkCommand>,
}

impl LinkHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<LinkCommand>) -> Self {
        Self { command_tx }
    }

    /// Returns `false` if the link has already stopped.
    pub async fn close_room(&self, room_id: RoomId) -> bool {
        self.command_tx
            .send(LinkCommand::CloseRoom { room_id })
            .await
            .is_ok()
    }

    /// Returns `false` if the link has already stopped.
    pub async fn shutdown(&self) -> bool {
        self.command_tx.send(LinkCommand::Shutdown).await.is_ok()
    }
}
