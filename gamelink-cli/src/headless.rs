use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use gamelink::model::{RoomId, SessionId};
use gamelink::worker::{Emulator, EmulatorError, GameParams};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct HeadlessGame {
    room_id: RoomId,
    game: String,
    player_index: usize,
    multitap: bool,
    state: Bytes,
}

/// Emulator backend without a core: it only tracks what each session asked for.
///
/// Lets a worker join a coordinator and exercise the whole signaling path
/// with no game actually running.
pub struct HeadlessEmulator {
    player_count: usize,
    games: DashMap<SessionId, HeadlessGame>,
}

impl HeadlessEmulator {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count: player_count.max(1),
            games: DashMap::new(),
        }
    }

    fn with_game<T>(
        &self,
        session_id: &SessionId,
        f: impl FnOnce(&mut HeadlessGame) -> T,
    ) -> Result<T, EmulatorError> {
        let mut game = self
            .games
            .get_mut(session_id)
            .ok_or_else(|| EmulatorError::NotRunning(session_id.clone()))?;
        Ok(f(&mut game))
    }
}

#[async_trait]
impl Emulator for HeadlessEmulator {
    fn player_count(&self, _room_id: &RoomId) -> usize {
        self.player_count
    }

    async fn start_game(
        &self,
        session_id: &SessionId,
        room_id: &RoomId,
        params: &GameParams,
    ) -> Result<(), EmulatorError> {
        if params.game.trim().is_empty() {
            return Err(EmulatorError::UnknownGame(params.game.clone()));
        }

        info!(
            "[Headless] {} starts {:?} in room {}",
            session_id, params.game, room_id
        );
        self.games.insert(
            session_id.clone(),
            HeadlessGame {
                room_id: room_id.clone(),
                game: params.game.clone(),
                player_index: params.player_index,
                multitap: false,
                state: Bytes::new(),
            },
        );
        Ok(())
    }

    async fn quit_game(&self, session_id: &SessionId) -> Result<(), EmulatorError> {
        let (_, game) = self
            .games
            .remove(session_id)
            .ok_or_else(|| EmulatorError::NotRunning(session_id.clone()))?;
        info!(
            "[Headless] {} quits {:?} in room {} (player {}, multitap {})",
            session_id, game.game, game.room_id, game.player_index, game.multitap
        );
        Ok(())
    }

    async fn save(&self, session_id: &SessionId) -> Result<Bytes, EmulatorError> {
        self.with_game(session_id, |game| game.state.clone())
    }

    async fn load(&self, session_id: &SessionId, state: Bytes) -> Result<(), EmulatorError> {
        debug!("[Headless] {} loads {} bytes", session_id, state.len());
        self.with_game(session_id, |game| game.state = state)
    }

    async fn set_player_index(
        &self,
        session_id: &SessionId,
        index: usize,
    ) -> Result<(), EmulatorError> {
        if index >= self.player_count {
            return Err(EmulatorError::Core(format!(
                "player {} of {}",
                index, self.player_count
            )));
        }
        self.with_game(session_id, |game| game.player_index = index)
    }

    async fn set_multitap(&self, session_id: &SessionId, enabled: bool) -> Result<(), EmulatorError> {
        self.with_game(session_id, |game| game.multitap = enabled)
    }
}
