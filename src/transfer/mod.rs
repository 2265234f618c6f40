//! Transfer module for FTP server
//!
//! Handles transfer modes, active-mode data connections and the encoding of
//! listings and file contents on the data channel.

pub mod data_channel;
pub mod file_ops;
pub mod modes;

// Re-export key types and functions
pub use data_channel::{connect_data_channel, parse_port_argument};
pub use file_ops::{send_file, send_listing};
pub use modes::{TransferMode, parse_type_argument};
