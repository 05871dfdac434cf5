use crate::error::DispatchError;
use crate::session::session::Session;
use gamelink_core::SessionId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Sessions of one link, keyed by coordinator-assigned id.
///
/// Owned by the link actor and only touched from its dispatch loop, so a plain
/// `HashMap` is enough.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, id: &SessionId) -> &mut Session {
        match self.sessions.entry(id.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Creating session {}", id);
                entry.insert(Session::new(id.clone()))
            }
        }
    }

    pub fn get(&self, id: &SessionId) -> Result<&Session, DispatchError> {
        self.sessions
            .get(id)
            .ok_or_else(|| DispatchError::UnknownSession(id.clone()))
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Result<&mut Session, DispatchError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| DispatchError::UnknownSession(id.clone()))
    }

    /// Idempotent: removing an absent session is a no-op.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.keys().cloned().collect()
    }
}
