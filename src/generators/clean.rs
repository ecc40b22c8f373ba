//! The `debian/clean` list generator.
//!
//! Merges the clean-file set accumulated during the run with whatever a
//! previous run (or a human) already persisted: existing entries are left
//! untouched and only genuinely new paths are appended, so the list never
//! grows duplicates no matter how often the pipeline runs.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::context::Context;
use crate::error::Result;

pub fn generate(dpath: &Path, ctx: &Context) -> Result<()> {
    let fpath = dpath.join("debian").join("clean");
    let existing: BTreeSet<String> = if fpath.exists() {
        fs::read_to_string(&fpath)?
            .lines()
            .map(|line| line.trim().to_string())
            .collect()
    } else {
        BTreeSet::new()
    };

    let new: Vec<&String> = ctx
        .clean_files
        .iter()
        .filter(|path| !existing.contains(*path))
        .collect();
    if new.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(fpath.parent().expect("clean path has a parent"))?;
    let mut content = if fpath.exists() {
        fs::read_to_string(&fpath)?
    } else {
        String::new()
    };
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for path in new {
        content.push_str(path);
        content.push('\n');
    }
    fs::write(&fpath, content)?;
    Ok(())
}
