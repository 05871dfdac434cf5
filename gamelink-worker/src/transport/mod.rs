mod media_event;
mod media_peer;
mod media_stack;
mod transport_config;
mod webrtc_media;
mod ws_link;

pub use media_event::*;
pub use media_peer::*;
pub use media_stack::*;
pub use transport_config::*;
pub use webrtc_media::*;
pub use ws_link::*;
