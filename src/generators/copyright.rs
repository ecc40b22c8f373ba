//! The `debian/copyright` generator.
//!
//! Fills `deb_copyright` (the packaging's own copyright line),
//! `deb_license_name`, and, when the caller supplied no license text,
//! reflows the first top-level `license*` file into the inert flowed-text
//! form the copyright format expects, capturing the upstream copyright
//! holder from the first `copyright ` line along the way.

use std::fs;
use std::path::Path;

use chrono::{Datelike, Utc};

use crate::context::Context;
use crate::error::Result;
use crate::render::{render_artifact, Renderer};

/// Length of the `copyright ` prefix stripped from the holder line.
const COPYRIGHT_PREFIX_LEN: usize = 10;

pub fn generate(dpath: &Path, ctx: &mut Context, renderer: &Renderer) -> Result<()> {
    render_artifact(renderer, dpath, ctx, "copyright", augment)
}

fn augment(dpath: &Path, ctx: &mut Context) -> Result<()> {
    let creator = ctx.get_str("creator").unwrap_or_default().to_string();
    ctx.set(
        "deb_copyright",
        format!("{} © {}", Utc::now().year(), creator),
    );
    let license_name = ctx
        .get_str("license_name")
        .unwrap_or("UNKNOWN")
        .to_string();
    ctx.set("deb_license_name", license_name);
    ctx.set_default("copyright", "");

    if ctx.get_str("license").unwrap_or_default().is_empty() {
        if let Some(license_file) = find_license_file(dpath)? {
            let content = fs::read_to_string(&license_file)?;
            let mut flowed = Vec::new();
            let mut holder: Option<String> = None;
            for line in content.lines() {
                if line.trim().is_empty() {
                    flowed.push(" .".to_string());
                    continue;
                }
                flowed.push(format!(" {}", line));
                if holder.is_none() && line.to_lowercase().starts_with("copyright ") {
                    holder = Some(line[COPYRIGHT_PREFIX_LEN..].to_string());
                }
            }
            if !flowed.is_empty() {
                ctx.set("license", flowed.join("\n"));
            }
            if ctx.get_str("copyright").unwrap_or_default().is_empty() {
                if let Some(holder) = holder {
                    ctx.set("copyright", holder);
                }
            }
        }
    }

    if ctx.get_str("copyright").unwrap_or_default().is_empty() {
        let author = ctx.get_str("author").unwrap_or_default().to_string();
        ctx.set("copyright", author);
    }
    Ok(())
}

/// First top-level file whose name starts with `license`, case-insensitive.
fn find_license_file(dpath: &Path) -> Result<Option<std::path::PathBuf>> {
    let mut candidates: Vec<_> = fs::read_dir(dpath)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .starts_with("license")
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}
