mod packet;
mod request;
mod response;
mod room;
mod session;
mod signaling;

pub use packet::{Packet, PacketId, PacketType};
pub use request::*;
pub use response::*;
pub use room::RoomId;
pub use session::SessionId;
pub use signaling::IceServerConfig;
