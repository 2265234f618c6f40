//! Navigate module
//!
//! Resolves client paths against the session's jail and working directory,
//! and handles directory changes.

pub mod operations;
pub mod resolver;

// Re-export public types and functions
pub use operations::{change_directory, resolve_in_jail};
pub use resolver::{clean_path, is_within_jail, resolve_path};
