//! Source file discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Errors that stop discovery before any file is found.
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("analysis root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
}

/// Collect every file under `root` whose name ends with `suffix`.
///
/// The walk is depth-first in the order the filesystem lists entries.
/// Symlinks are followed and hidden entries are visited. Entries that
/// cannot be read are skipped along with everything beneath them.
pub fn collect_files(root: &Path, suffix: &str) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::MissingRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        // Byte comparison so non-UTF-8 names still match on their suffix
        let name = entry.file_name().as_encoded_bytes();
        if name.ends_with(suffix.as_bytes()) {
            tracing::debug!(path = %entry.path().display(), "discovered file");
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
