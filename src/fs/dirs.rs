use crate::error::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Create every missing ancestor directory of `path`, but not `path` itself.
///
/// Directories are created one level at a time, starting below the nearest
/// existing ancestor. A directory that appears concurrently is not an error.
pub fn ensure_dirs(path: &Path) -> Result<()> {
    let mut missing = Vec::new();
    let mut current = path.parent();

    while let Some(dir) = current {
        if dir.as_os_str().is_empty() || dir.exists() {
            break;
        }
        missing.push(dir);
        current = dir.parent();
    }

    for dir in missing.into_iter().rev() {
        create_one(dir)?;
    }

    Ok(())
}

/// Create `path` and any missing ancestors
pub fn ensure_dir(path: &Path) -> Result<()> {
    ensure_dirs(path)?;
    if !path.exists() {
        create_one(path)?;
    }
    Ok(())
}

fn create_one(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => {
            debug!("created directory '{}'", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}
