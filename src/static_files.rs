//! Static-File Materializer.
//!
//! Override directories, the shared template directory, and profile
//! directories may each carry a `debian/` subtree of auxiliary files to be
//! shipped verbatim (patches, install lists, lintian overrides, ...).
//! These are copied into the output `debian/` directory with two rules:
//!
//! - template sources (`.tpl`) and editor swap files (`.swp`) are never
//!   copied;
//! - an existing destination file is never overwritten, so the first layer
//!   to provide a file wins and user edits survive re-runs.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Extensions excluded from the copy.
const SKIPPED_EXTENSIONS: [&str; 2] = ["tpl", "swp"];

/// Recursively copy `src_dir` into `dst_dir`, first writer wins.
///
/// A missing `src_dir` means the layer ships no static files and is not an
/// error.
pub fn materialize(src_dir: &Path, dst_dir: &Path) -> Result<()> {
    if !src_dir.is_dir() {
        return Ok(());
    }
    for entry in WalkDir::new(src_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        let extension = path.extension().and_then(|ext| ext.to_str());
        if extension.is_some_and(|ext| SKIPPED_EXTENSIONS.contains(&ext)) {
            continue;
        }
        let relative = match path.strip_prefix(src_dir) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let destination = dst_dir.join(relative);
        if destination.exists() {
            debug!("{} already exists, not overwriting", destination.display());
            continue;
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &destination)?;
    }
    Ok(())
}
