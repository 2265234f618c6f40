//! Jailed FTP server.
//!
//! Serves a directory subtree over FTP with active-mode data connections.
//! Each control connection gets its own `Session`; commands are handled one
//! at a time, including any data transfer they start.

pub mod client;
pub mod error;
pub mod navigate;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod transfer;

pub use server::{Server, ServerConfig};
