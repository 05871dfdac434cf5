mod game_control;
mod link;
mod link_command;
mod negotiation_relay;
mod router;

pub use link::*;
pub use link_command::*;
