//! File system storage access
//!
//! Read-only view of the filesystem used by directory listing, retrieval and
//! directory changes.

pub mod filesystem;

pub use filesystem::{FileStat, FileSystem, LocalFileSystem};
