use crate::emulator::GameParams;
use crate::error::DispatchError;
use crate::link::link::Link;
use crate::link::router::{HandlerResult, Reply};
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use bytes::Bytes;
use gamelink_core::{
    ChangePlayerRequest, LoadGameRequest, RoomId, SaveGameResponse, SessionId, SessionRequest,
    StartGameRequest, StartGameResponse,
};
use tracing::{info, warn};

impl Link {
    pub(super) async fn start_game(&mut self, request: StartGameRequest) -> HandlerResult {
        let StartGameRequest {
            id,
            room_id,
            game,
            player_index,
        } = request;
        let room_id = room_id
            .filter(|r| !r.as_str().is_empty())
            .unwrap_or_else(RoomId::generate);

        let previous = self.sessions.get_or_create(&id).room_id.clone();
        let already_attached = previous.as_ref() == Some(&room_id);

        if !already_attached {
            if let Some(previous) = previous {
                info!("Session {} moves from room {} to {}", id, previous, room_id);
                self.quit_quietly(&id).await;
                self.rooms.leave(&previous, &id);
                self.sessions.get_mut(&id)?.room_id = None;
            }
        }

        // The room is only announced once a game actually runs in it.
        let params = GameParams { game, player_index };
        self.emulator.start_game(&id, &room_id, &params).await?;
        if !already_attached {
            self.rooms.open_room(&room_id, &id);
        }

        let session = self.sessions.get_mut(&id)?;
        session.room_id = Some(room_id.clone());
        session.player_index = player_index;
        info!("Session {} plays {:?} in room {}", id, params.game, room_id);

        Ok(Some(Reply::StartGame(StartGameResponse { room_id })))
    }

    pub(super) async fn quit_game(&mut self, request: SessionRequest) -> HandlerResult {
        let id = request.id;
        let room_id = self.sessions.get(&id)?.room_id.clone();

        // Released even when the emulator fails.
        if room_id.is_some() {
            if let Err(e) = self.emulator.quit_game(&id).await {
                warn!("Emulator failed to quit game of {}: {}", id, e);
            }
        }

        self.release_session(&id).await;
        Ok(Some(Reply::Ack))
    }

    pub(super) async fn save_game(&mut self, request: SessionRequest) -> HandlerResult {
        let id = request.id;
        self.room_of(&id)?;

        let state = self.emulator.save(&id).await?;

        Ok(Some(Reply::SaveGame(SaveGameResponse {
            state: BASE64_STANDARD.encode(&state),
        })))
    }

    pub(super) async fn load_game(&mut self, request: LoadGameRequest) -> HandlerResult {
        let LoadGameRequest { id, state } = request;
        self.room_of(&id)?;

        let state = BASE64_STANDARD.decode(state.as_bytes())?;
        self.emulator.load(&id, Bytes::from(state)).await?;

        Ok(Some(Reply::Ack))
    }

    pub(super) async fn change_player(&mut self, request: ChangePlayerRequest) -> HandlerResult {
        let ChangePlayerRequest { id, index } = request;
        let room_id = self.room_of(&id)?;

        let count = self.emulator.player_count(&room_id);
        let player_index = usize::try_from(index)
            .ok()
            .filter(|i| *i < count)
            .ok_or(DispatchError::PlayerOutOfRange { index, count })?;

        self.emulator.set_player_index(&id, player_index).await?;
        self.sessions.get_mut(&id)?.player_index = player_index;

        Ok(Some(Reply::PlayerIndex(player_index)))
    }

    pub(super) async fn toggle_multitap(&mut self, request: SessionRequest) -> HandlerResult {
        let id = request.id;
        self.room_of(&id)?;

        let enabled = !self.sessions.get(&id)?.multitap;
        self.emulator.set_multitap(&id, enabled).await?;
        self.sessions.get_mut(&id)?.multitap = enabled;

        Ok(Some(Reply::Multitap(enabled)))
    }

    fn room_of(&self, session_id: &SessionId) -> Result<RoomId, DispatchError> {
        self.sessions
            .get(session_id)?
            .room_id
            .clone()
            .ok_or_else(|| DispatchError::NoRoom(session_id.clone()))
    }
}
