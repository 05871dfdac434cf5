use async_trait::async_trait;
use gamelink_core::SessionId;
use gamelink_worker::{MediaError, MediaEvent, MediaStack, PeerKey};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCall {
    Offer(SessionId),
    Answer(SessionId, String),
    Candidate(SessionId, String),
    Close(SessionId),
}

/// MediaStack that records calls and returns numbered offers.
#[derive(Clone, Default)]
pub struct MockMedia {
    calls: Arc<Mutex<Vec<MediaCall>>>,
    events: Arc<Mutex<Option<mpsc::Sender<MediaEvent>>>>,
    peers: Arc<Mutex<HashMap<SessionId, PeerKey>>>,
    fail_offer: Arc<AtomicBool>,
    fail_answer: Arc<AtomicBool>,
}

impl MockMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn offers_for(&self, session_id: &SessionId) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MediaCall::Offer(id) if id == session_id))
            .count()
    }

    pub fn candidates_for(&self, session_id: &SessionId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MediaCall::Candidate(id, candidate) if &id == session_id => Some(candidate),
                _ => None,
            })
            .collect()
    }

    pub fn closed(&self, session_id: &SessionId) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, MediaCall::Close(id) if id == session_id))
    }

    /// Key of the session's last successfully offered peer.
    pub fn peer(&self, session_id: &SessionId) -> Option<PeerKey> {
        self.peers.lock().unwrap().get(session_id).cloned()
    }

    /// Event sender handed over by the link on the last offer.
    pub fn event_sender(&self) -> Option<mpsc::Sender<MediaEvent>> {
        self.events.lock().unwrap().clone()
    }

    pub fn set_fail_offer(&self, fail: bool) {
        self.fail_offer.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_answer(&self, fail: bool) {
        self.fail_answer.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MediaStack for MockMedia {
    async fn produce_offer(
        &self,
        peer: &PeerKey,
        events: mpsc::Sender<MediaEvent>,
    ) -> Result<String, MediaError> {
        let session_id = &peer.session_id;
        // Like the real stack, the previous peer is gone even when the new offer fails.
        self.peers.lock().unwrap().remove(session_id);
        if self.fail_offer.load(Ordering::SeqCst) {
            return Err(MediaError::Offer("mock offer failure".to_owned()));
        }
        self.record(MediaCall::Offer(session_id.clone()));
        self.peers
            .lock()
            .unwrap()
            .insert(session_id.clone(), peer.clone());
        *self.events.lock().unwrap() = Some(events);
        Ok(format!("offer-{}-{}", session_id, self.offers_for(session_id)))
    }

    async fn apply_answer(&self, session_id: &SessionId, sdp: String) -> Result<(), MediaError> {
        if self.fail_answer.load(Ordering::SeqCst) {
            return Err(MediaError::Answer("mock answer failure".to_owned()));
        }
        self.record(MediaCall::Answer(session_id.clone(), sdp));
        Ok(())
    }

    async fn add_ice_candidate(
        &self,
        session_id: &SessionId,
        candidate: String,
    ) -> Result<(), MediaError> {
        self.record(MediaCall::Candidate(session_id.clone(), candidate));
        Ok(())
    }

    async fn close(&self, session_id: &SessionId) {
        self.peers.lock().unwrap().remove(session_id);
        self.record(MediaCall::Close(session_id.clone()));
    }
}
