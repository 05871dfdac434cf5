use async_trait::async_trait;
use bytes::Bytes;
use gamelink_core::{RoomId, SessionId};
use thiserror::Error;

/// What a start-game request asks the emulator to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParams {
    pub game: String,
    pub player_index: usize,
}

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("no game running for session {0}")]
    NotRunning(SessionId),

    #[error("unknown game {0:?}")]
    UnknownGame(String),

    #[error("invalid save state: {0}")]
    InvalidState(String),

    #[error("emulator core failure: {0}")]
    Core(String),
}

/// Emulator core hosting the rooms of this worker.
///
/// Calls are made from the link's dispatch loop, one at a time.
#[async_trait]
pub trait Emulator: Send + Sync + 'static {
    /// Number of controller ports the game in `room_id` exposes.
    fn player_count(&self, room_id: &RoomId) -> usize;

    async fn start_game(
        &self,
        session_id: &SessionId,
        room_id: &RoomId,
        params: &GameParams,
    ) -> Result<(), EmulatorError>;

    async fn quit_game(&self, session_id: &SessionId) -> Result<(), EmulatorError>;

    async fn save(&self, session_id: &SessionId) -> Result<Bytes, EmulatorError>;

    async fn load(&self, session_id: &SessionId, state: Bytes) -> Result<(), EmulatorError>;

    async fn set_player_index(
        &self,
        session_id: &SessionId,
        index: usize,
    ) -> Result<(), EmulatorError>;

    async fn set_multitap(&self, session_id: &SessionId, enabled: bool)
    -> Result<(), EmulatorError>;
}
