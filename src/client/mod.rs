//! Client session handling
//!
//! Holds per-connection session state and runs the control-channel loop.

pub mod handler;
pub mod session;

pub use handler::handle_client;
pub use session::Session;
