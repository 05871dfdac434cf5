mod config;
mod emulator;
mod error;
mod link;
mod room;
mod session;
mod signaling;
mod transport;

pub use config::*;
pub use emulator::*;
pub use error::*;
pub use link::*;
pub use room::*;
pub use session::*;
pub use signaling::*;
pub use transport::*;
