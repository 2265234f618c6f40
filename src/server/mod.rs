//! Server core functionality
//!
//! This module contains the listener, its configuration, and the accept loop
//! that hands each connection to its own session task.

pub mod config;
pub mod core;

pub use self::config::ServerConfig;
pub use self::core::Server;
