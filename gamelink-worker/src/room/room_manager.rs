use crate::room::room::Room;
use crate::signaling::Coordinator;
use gamelink_core::{RoomId, SessionId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Tracks the rooms of one link and announces their lifecycle upstream.
///
/// A room is present exactly while it has attached sessions: the last
/// `leave` closes it in the same call.
pub struct RoomManager {
    rooms: HashMap<RoomId, Room>,
    coordinator: Coordinator,
}

impl RoomManager {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            rooms: HashMap::new(),
            coordinator,
        }
    }

    /// Attaches the session, creating and registering the room on first use.
    /// Returns `true` if the room was created by this call.
    pub fn open_room(&mut self, room_id: &RoomId, session_id: &SessionId) -> bool {
        let created = !self.rooms.contains_key(room_id);

        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::new(room_id.clone())
        });
        room.attach(session_id.clone());

        if created {
            self.coordinator.register_room(room_id);
        }
        created
    }

    /// Detaches the session and closes the room if it became empty.
    /// Returns `true` if the room was closed.
    pub fn leave(&mut self, room_id: &RoomId, session_id: &SessionId) -> bool {
        let Some(room) = self.rooms.get_mut(room_id) else {
            debug!("Session {} left unknown room {}", session_id, room_id);
            return false;
        };
        room.detach(session_id);

        if !room.is_empty() {
            return false;
        }
        self.close_room(room_id).is_some()
    }

    /// Announces and removes the room, handing back whatever was still attached.
    pub fn close_room(&mut self, room_id: &RoomId) -> Option<Room> {
        let room = self.rooms.remove(room_id)?;

        info!("Closing room {} ({} sessions attached)", room_id, room.len());
        self.coordinator.close_room(room_id);
        Some(room)
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }
}
