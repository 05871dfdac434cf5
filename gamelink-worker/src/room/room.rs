use gamelink_core::{RoomId, SessionId};
use std::collections::HashSet;

/// One running emulator instance and the sessions attached to it.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    sessions: HashSet<SessionId>,
}

impl Room {
    pub(crate) fn new(id: RoomId) -> Self {
        Self {
            id,
            sessions: HashSet::new(),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn sessions(&self) -> impl Iterator<Item = &SessionId> {
        self.sessions.iter()
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.contains(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub(crate) fn attach(&mut self, session_id: SessionId) -> bool {
        self.sessions.insert(session_id)
    }

    pub(crate) fn detach(&mut self, session_id: &SessionId) -> bool {
        self.sessions.remove(session_id)
    }

    pub(crate) fn into_sessions(self) -> HashSet<SessionId> {
        self.sessions
    }
}
