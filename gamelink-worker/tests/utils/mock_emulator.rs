use async_trait::async_trait;
use bytes::Bytes;
use gamelink_core::{RoomId, SessionId};
use gamelink_worker::{Emulator, EmulatorError, GameParams};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmulatorCall {
    Start {
        session_id: SessionId,
        room_id: RoomId,
        game: String,
    },
    Quit(SessionId),
    Save(SessionId),
    Load(SessionId, Bytes),
    SetPlayer(SessionId, usize),
    SetMultitap(SessionId, bool),
}

/// Emulator that records calls; failures can be switched on per operation.
#[derive(Clone)]
pub struct MockEmulator {
    calls: Arc<Mutex<Vec<EmulatorCall>>>,
    player_count: Arc<AtomicUsize>,
    saved_state: Arc<Mutex<Bytes>>,
    fail_start: Arc<AtomicBool>,
    fail_save: Arc<AtomicBool>,
    fail_set_player: Arc<AtomicBool>,
    fail_multitap: Arc<AtomicBool>,
}

impl MockEmulator {
    pub fn new(player_count: usize) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            player_count: Arc::new(AtomicUsize::new(player_count)),
            saved_state: Arc::new(Mutex::new(Bytes::from_static(b"mock-state"))),
            fail_start: Arc::new(AtomicBool::new(false)),
            fail_save: Arc::new(AtomicBool::new(false)),
            fail_set_player: Arc::new(AtomicBool::new(false)),
            fail_multitap: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn calls(&self) -> Vec<EmulatorCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn quits(&self) -> Vec<SessionId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EmulatorCall::Quit(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn saved_state(&self) -> Bytes {
        self.saved_state.lock().unwrap().clone()
    }

    pub fn set_fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_set_player(&self, fail: bool) {
        self.fail_set_player.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_multitap(&self, fail: bool) {
        self.fail_multitap.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: EmulatorCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockEmulator {
    fn default() -> Self {
        Self::new(2)
    }
}

#[async_trait]
impl Emulator for MockEmulator {
    fn player_count(&self, _room_id: &RoomId) -> usize {
        self.player_count.load(Ordering::SeqCst)
    }

    async fn start_game(
        &self,
        session_id: &SessionId,
        room_id: &RoomId,
        params: &GameParams,
    ) -> Result<(), EmulatorError> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(EmulatorError::UnknownGame(params.game.clone()));
        }
        self.record(EmulatorCall::Start {
            session_id: session_id.clone(),
            room_id: room_id.clone(),
            game: params.game.clone(),
        });
        Ok(())
    }

    async fn quit_game(&self, session_id: &SessionId) -> Result<(), EmulatorError> {
        self.record(EmulatorCall::Quit(session_id.clone()));
        Ok(())
    }

    async fn save(&self, session_id: &SessionId) -> Result<Bytes, EmulatorError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(EmulatorError::Core("mock save failure".to_owned()));
        }
        self.record(EmulatorCall::Save(session_id.clone()));
        Ok(self.saved_state())
    }

    async fn load(&self, session_id: &SessionId, state: Bytes) -> Result<(), EmulatorError> {
        self.record(EmulatorCall::Load(session_id.clone(), state.clone()));
        *self.saved_state.lock().unwrap() = state;
        Ok(())
    }

    async fn set_player_index(
        &self,
        session_id: &SessionId,
        index: usize,
    ) -> Result<(), EmulatorError> {
        if self.fail_set_player.load(Ordering::SeqCst) {
            return Err(EmulatorError::Core("mock input remap failure".to_owned()));
        }
        self.record(EmulatorCall::SetPlayer(session_id.clone(), index));
        Ok(())
    }

    async fn set_multitap(
        &self,
        session_id: &SessionId,
        enabled: bool,
    ) -> Result<(), EmulatorError> {
        if self.fail_multitap.load(Ordering::SeqCst) {
            return Err(EmulatorError::Core("mock multitap failure".to_owned()));
        }
        self.record(EmulatorCall::SetMultitap(session_id.clone(), enabled));
        Ok(())
    }
}
