mod negotiation;
mod session;
mod session_registry;

pub use negotiation::*;
pub use session::*;
pub use session_registry::*;
