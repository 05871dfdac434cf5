pub use gamelink_core::model::{Packet, PacketType, RoomId, SessionId};

pub mod model {
    pub use gamelink_core::model::*;
}

#[cfg(feature = "worker")]
pub mod worker {
    pub use gamelink_worker::*;
}
