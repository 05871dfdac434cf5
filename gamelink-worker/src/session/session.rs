use crate::session::negotiation::Negotiation;
use gamelink_core::{RoomId, SessionId};

/// One browser game stream hosted by this worker.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    /// Room the session plays in; `None` until a game is started.
    pub room_id: Option<RoomId>,
    pub player_index: usize,
    pub multitap: bool,
    pub negotiation: Negotiation,
    /// Generation of the current media peer; events of older peers are stale.
    pub media_generation: u64,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            room_id: None,
            player_index: 0,
            multitap: false,
            negotiation: Negotiation::default(),
            media_generation: 0,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }
}
