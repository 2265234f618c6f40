//! Navigation operations implementation

use std::path::{Path, PathBuf};

use crate::error::NavigateError;
use crate::navigate::resolver::{is_within_jail, resolve_path};
use crate::storage::FileSystem;

/// Resolves `arg` and jail-checks the result without touching the filesystem.
pub fn resolve_in_jail(
    jail_root: &Path,
    current_dir: &Path,
    arg: &str,
) -> Result<PathBuf, NavigateError> {
    let resolved = resolve_path(jail_root, current_dir, arg);
    if !is_within_jail(jail_root, &resolved) {
        return Err(NavigateError::OutOfJail(resolved));
    }
    Ok(resolved)
}

/// Computes the new working directory for a CWD to `target_path`.
///
/// The returned path has been jail-checked and is an existing directory;
/// committing it is left to the caller.
pub async fn change_directory<F: FileSystem>(
    fs: &F,
    jail_root: &Path,
    current_dir: &Path,
    target_path: &str,
) -> Result<PathBuf, NavigateError> {
    let new_dir = resolve_in_jail(jail_root, current_dir, target_path)?;

    match fs.stat(&new_dir).await {
        Ok(stat) if stat.is_dir => Ok(new_dir),
        Ok(_) => Err(NavigateError::NotADirectory(new_dir)),
        Err(source) => Err(NavigateError::NotFound {
            path: new_dir,
            source,
        }),
    }
}
