use crate::transport::media_event::{MediaEvent, PeerKey};
use crate::transport::media_peer::MediaPeer;
use crate::transport::media_stack::{MediaError, MediaStack};
use crate::transport::transport_config::TransportConfig;
use async_trait::async_trait;
use dashmap::DashMap;
use gamelink_core::SessionId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// `MediaStack` backed by the `webrtc` crate, one peer connection per session.
pub struct WebRtcMedia {
    config: TransportConfig,
    peers: DashMap<SessionId, Arc<MediaPeer>>,
}

impl WebRtcMedia {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            peers: DashMap::new(),
        }
    }

    fn peer(&self, session_id: &SessionId) -> Result<Arc<MediaPeer>, MediaError> {
        self.peers
            .get(session_id)
            .map(|peer| peer.value().clone())
            .ok_or_else(|| MediaError::NoPeer(session_id.clone()))
    }
}

#[async_trait]
impl MediaStack for WebRtcMedia {
    async fn produce_offer(
        &self,
        key: &PeerKey,
        events: mpsc::Sender<MediaEvent>,
    ) -> Result<String, MediaError> {
        let session_id = &key.session_id;
        // Renegotiation starts from a clean peer.
        if let Some((_, old)) = self.peers.remove(session_id) {
            info!("Replacing media peer {} with {}", old.key, key);
            if let Err(e) = old.close().await {
                warn!("Failed to close old peer {}: {:#}", old.key, e);
            }
        }

        let peer = MediaPeer::new(key.clone(), &self.config, events)
            .await
            .map_err(|e| MediaError::Offer(format!("{e:#}")))?;
        let sdp = peer
            .create_offer()
            .await
            .map_err(|e| MediaError::Offer(format!("{e:#}")))?;

        self.peers.insert(session_id.clone(), Arc::new(peer));
        Ok(sdp)
    }

    async fn apply_answer(&self, session_id: &SessionId, sdp: String) -> Result<(), MediaError> {
        self.peer(session_id)?
            .set_remote_answer(sdp)
            .await
            .map_err(|e| MediaError::Answer(format!("{e:#}")))
    }

    async fn add_ice_candidate(
        &self,
        session_id: &SessionId,
        candidate: String,
    ) -> Result<(), MediaError> {
        self.peer(session_id)?
            .add_ice_candidate(candidate)
            .await
            .map_err(|e| MediaError::Candidate(format!("{e:#}")))
    }

    async fn close(&self, session_id: &SessionId) {
        let Some((_, peer)) = self.peers.remove(session_id) else {
            return;
        };
        if let Err(e) = peer.close().await {
            warn!("Failed to close media peer for {}: {:#}", session_id, e);
        }
    }
}
