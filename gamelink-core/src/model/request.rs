use crate::model::packet::{Packet, PacketType};
use crate::model::room::RoomId;
use crate::model::session::SessionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload of every request that only names its session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRequest {
    pub id: SessionId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebrtcAnswerRequest {
    pub id: SessionId,
    pub sdp: String,
}

/// Trickled ICE candidate. Travels in both directions with the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebrtcIceCandidateRequest {
    pub id: SessionId,
    pub candidate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartGameRequest {
    pub id: SessionId,
    /// Room to join; a fresh room is created when absent or empty.
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub player_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadGameRequest {
    pub id: SessionId,
    /// Base64 encoded save state, as previously returned by save-game.
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangePlayerRequest {
    pub id: SessionId,
    /// Signed on the wire so a negative index is a validation error, not a decode error.
    pub index: i64,
}

/// Every inbound request kind the worker understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    TerminateSession(SessionRequest),
    WebrtcInit(SessionRequest),
    WebrtcAnswer(WebrtcAnswerRequest),
    WebrtcIceCandidate(WebrtcIceCandidateRequest),
    StartGame(StartGameRequest),
    QuitGame(SessionRequest),
    SaveGame(SessionRequest),
    LoadGame(LoadGameRequest),
    ChangePlayer(ChangePlayerRequest),
    ToggleMultitap(SessionRequest),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unhandled packet type {0}")]
    UnknownType(PacketType),

    #[error("malformed {kind} payload: {source}")]
    MalformedPayload {
        kind: PacketType,
        #[source]
        source: serde_json::Error,
    },
}

impl Request {
    /// Decodes the payload according to the packet's type tag.
    pub fn decode(packet: &Packet) -> Result<Self, DecodeError> {
        let kind = packet.t;
        let malformed = |source: serde_json::Error| DecodeError::MalformedPayload { kind, source };

        let request = match kind {
            PacketType::TERMINATE_SESSION => {
                Self::TerminateSession(packet.payload().map_err(malformed)?)
            }
            PacketType::WEBRTC_INIT => Self::WebrtcInit(packet.payload().map_err(malformed)?),
            PacketType::WEBRTC_ANSWER => Self::WebrtcAnswer(packet.payload().map_err(malformed)?),
            PacketType::WEBRTC_ICE_CANDIDATE => {
                Self::WebrtcIceCandidate(packet.payload().map_err(malformed)?)
            }
            PacketType::START_GAME => Self::StartGame(packet.payload().map_err(malformed)?),
            PacketType::QUIT_GAME => Self::QuitGame(packet.payload().map_err(malformed)?),
            PacketType::SAVE_GAME => Self::SaveGame(packet.payload().map_err(malformed)?),
            PacketType::LOAD_GAME => Self::LoadGame(packet.payload().map_err(malformed)?),
            PacketType::CHANGE_PLAYER => Self::ChangePlayer(packet.payload().map_err(malformed)?),
            PacketType::TOGGLE_MULTITAP => {
                Self::ToggleMultitap(packet.payload().map_err(malformed)?)
            }
            other => return Err(DecodeError::UnknownType(other)),
        };

        Ok(request)
    }

    pub fn kind(&self) -> PacketType {
        match self {
            Self::TerminateSession(_) => PacketType::TERMINATE_SESSION,
            Self::WebrtcInit(_) => PacketType::WEBRTC_INIT,
            Self::WebrtcAnswer(_) => PacketType::WEBRTC_ANSWER,
            Self::WebrtcIceCandidate(_) => PacketType::WEBRTC_ICE_CANDIDATE,
            Self::StartGame(_) => PacketType::START_GAME,
            Self::QuitGame(_) => PacketType::QUIT_GAME,
            Self::SaveGame(_) => PacketType::SAVE_GAME,
            Self::LoadGame(_) => PacketType::LOAD_GAME,
            Self::ChangePlayer(_) => PacketType::CHANGE_PLAYER,
            Self::ToggleMultitap(_) => PacketType::TOGGLE_MULTITAP,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        match self {
            Self::TerminateSession(r)
            | Self::WebrtcInit(r)
            | Self::QuitGame(r)
            | Self::SaveGame(r)
            | Self::ToggleMultitap(r) => &r.id,
            Self::WebrtcAnswer(r) => &r.id,
            Self::WebrtcIceCandidate(r) => &r.id,
            Self::StartGame(r) => &r.id,
            Self::LoadGame(r) => &r.id,
            Self::ChangePlayer(r) => &r.id,
        }
    }
}
