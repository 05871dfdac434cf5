use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::model::response::Failure;
use serde_json::Value;
use std::fmt;

/// Numeric message kind shared with the coordinator.
///
/// Any `u16` deserializes; kinds without a constant reach the router's unknown path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct PacketType(pub u16);

impl PacketType {
    pub const WEBRTC_INIT: Self = Self(100);
    pub const WEBRTC_OFFER: Self = Self(101);
    pub const WEBRTC_ANSWER: Self = Self(102);
    pub const WEBRTC_ICE_CANDIDATE: Self = Self(103);
    pub const START_GAME: Self = Self(104);
    pub const CHANGE_PLAYER: Self = Self(105);
    pub const QUIT_GAME: Self = Self(106);
    pub const SAVE_GAME: Self = Self(107);
    pub const LOAD_GAME: Self = Self(108);
    pub const TOGGLE_MULTITAP: Self = Self(109);
    pub const REGISTER_ROOM: Self = Self(201);
    pub const CLOSE_ROOM: Self = Self(202);
    pub const TERMINATE_SESSION: Self = Self(204);

    /// Upstream ICE candidates reuse the inbound candidate tag.
    pub const ICE_CANDIDATE: Self = Self::WEBRTC_ICE_CANDIDATE;

    pub fn name(self) -> &'static str {
        match self {
            Self::WEBRTC_INIT => "webrtc-init",
            Self::WEBRTC_OFFER => "webrtc-offer",
            Self::WEBRTC_ANSWER => "webrtc-answer",
            Self::WEBRTC_ICE_CANDIDATE => "webrtc-ice-candidate",
            Self::START_GAME => "start-game",
            Self::CHANGE_PLAYER => "change-player",
            Self::QUIT_GAME => "quit-game",
            Self::SAVE_GAME => "save-game",
            Self::LOAD_GAME => "load-game",
            Self::TOGGLE_MULTITAP => "toggle-multitap",
            Self::REGISTER_ROOM => "register-room",
            Self::CLOSE_ROOM => "close-room",
            Self::TERMINATE_SESSION => "terminate-session",
            _ => "unknown",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

/// Correlates a request with its reply. Notifications carry none.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct PacketId(pub String);

impl From<&str> for PacketId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One frame on the coordinator link: `{"id": .., "t": .., "p": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Packet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PacketId>,
    pub t: PacketType,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub p: Value,
}

impl Packet {
    /// Uncorrelated packet, used for fire-and-forget notifications.
    pub fn notification<T: Serialize>(t: PacketType, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: None,
            t,
            p: serde_json::to_value(payload)?,
        })
    }

    /// Request packet carrying `id`, mostly useful on the coordinator side and in tests.
    pub fn request<T: Serialize>(
        id: impl Into<PacketId>,
        t: PacketType,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Some(id.into()),
            t,
            p: serde_json::to_value(payload)?,
        })
    }

    /// Successful reply echoing this packet's id and type.
    pub fn reply<T: Serialize>(&self, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: self.id.clone(),
            t: self.t,
            p: serde_json::to_value(payload)?,
        })
    }

    /// Failure reply echoing this packet's id and type, with a `Failure` body.
    pub fn failure(&self, message: impl Into<String>) -> Result<Self, serde_json::Error> {
        self.reply(&Failure {
            error: message.into(),
        })
    }

    pub fn is_correlated(&self) -> bool {
        self.id.is_some()
    }

    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.p)
    }
}
