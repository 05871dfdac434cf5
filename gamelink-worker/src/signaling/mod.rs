mod coordinator;
mod link_output;
mod outbox;

pub use coordinator::*;
pub use link_output::*;
pub use outbox::*;
