use crate::transport::media_event::{MediaEvent, PeerKey};
use crate::transport::transport_config::TransportConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiverInit;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_transceiver_direction::RTCRtpTransceiverDirection;

/// Label of the data channel carrying browser input.
pub const INPUT_CHANNEL: &str = "input";

/// One WebRTC peer connection towards a browser. The worker is the offerer.
pub struct MediaPeer {
    pub key: PeerKey,
    peer_connection: Arc<RTCPeerConnection>,
}

impl MediaPeer {
    /// Builds the peer connection and wires its callbacks into `event_tx`.
    pub async fn new(
        key: PeerKey,
        config: &TransportConfig,
        event_tx: mpsc::Sender<MediaEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = event_tx.clone();
        let key_state = key.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let peer = key_state.clone();

                Box::pin(async move {
                    info!("Peer connection state changed for {}: {:?}", peer, s);
                    let event = match s {
                        RTCPeerConnectionState::Connected => MediaEvent::Connected(peer),
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => MediaEvent::Disconnected(peer),
                        _ => return,
                    };
                    let _ = tx.send(event).await;
                })
            },
        ));

        let ice_tx = event_tx.clone();
        let key_ice = key.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            let peer = key_ice.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(json_candidate) = candidate.to_json() else {
                    return;
                };
                let Ok(str_candidate) = serde_json::to_string(&json_candidate) else {
                    return;
                };
                let _ = tx
                    .send(MediaEvent::CandidateGenerated(peer, str_candidate))
                    .await;
            })
        }));

        for kind in [RTPCodecType::Video, RTPCodecType::Audio] {
            peer_connection
                .add_transceiver_from_kind(
                    kind,
                    Some(RTCRtpTransceiverInit {
                        direction: RTCRtpTransceiverDirection::Sendonly,
                        send_encodings: vec![],
                    }),
                )
                .await
                .with_context(|| format!("Failed to add {:?} transceiver", kind))?;
        }

        let input = peer_connection
            .create_data_channel(INPUT_CHANNEL, None)
            .await
            .context("Failed to create input data channel")?;
        let key_open = key.clone();
        input.on_open(Box::new(move || {
            let peer = key_open.clone();
            Box::pin(async move {
                debug!("Input channel open for {}", peer);
            })
        }));

        Ok(Self {
            key,
            peer_connection,
        })
    }

    /// Creates the local SDP offer and installs it as the local description.
    pub async fn create_offer(&self) -> Result<String> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(offer.sdp)
    }

    /// Applies the browser's SDP answer.
    pub async fn set_remote_answer(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::answer(sdp)?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    /// Adds a remote ICE candidate (trickle ICE).
    pub async fn add_ice_candidate(&self, candidate_json: String) -> Result<()> {
        let candidate: RTCIceCandidateInit =
            serde_json::from_str(&candidate_json).context("Failed to parse ICE candidate JSON")?;
        self.peer_connection.add_ice_candidate(candidate).await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
