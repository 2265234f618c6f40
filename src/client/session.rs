//! Module `session`
//!
//! Defines the `Session` struct holding the state of one control connection:
//! its jail, working directory, announced data address and transfer mode.

use std::path::{Path, PathBuf};

use crate::transfer::TransferMode;

/// Per-connection state. Owned by the task serving the connection and never
/// shared with other sessions.
#[derive(Debug, Clone)]
pub struct Session {
    jail_root: PathBuf,
    current_dir: PathBuf,
    data_address: Option<String>,
    transfer_mode: TransferMode,
}

impl Session {
    /// Starts a session in `jail_root`, which must be absolute and clean.
    pub fn new(jail_root: PathBuf) -> Self {
        Self {
            current_dir: jail_root.clone(),
            jail_root,
            data_address: None,
            transfer_mode: TransferMode::default(),
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn jail_root(&self) -> &Path {
        &self.jail_root
    }

    /// Returns the current working directory, always inside the jail.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Returns the address set by the last successful PORT, if any.
    pub fn data_address(&self) -> Option<&str> {
        self.data_address.as_deref()
    }

    pub fn transfer_mode(&self) -> TransferMode {
        self.transfer_mode
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Commits a directory already resolved and jail-checked by the caller.
    pub fn set_current_dir(&mut self, dir: PathBuf) {
        debug_assert!(dir.starts_with(&self.jail_root));
        self.current_dir = dir;
    }

    /// Replaces the data address. It stays in use until the next PORT.
    pub fn set_data_address(&mut self, addr: String) {
        self.data_address = Some(addr);
    }

    pub fn set_transfer_mode(&mut self, mode: TransferMode) {
        self.transfer_mode = mode;
    }
}
