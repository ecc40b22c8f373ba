//! Layered Override Resolver.
//!
//! Four optional configuration layers merge into the context in a fixed
//! precedence order, later layers winning on key collision:
//!
//! 1. the `[py2dsp]` section of the package's own `setup.cfg`;
//! 2. a profile argument pointing at an existing JSON file on disk;
//! 3. otherwise, a named profile's `ctx.json` under the profiles directory;
//! 4. always last and authoritative: the per-package override `ctx.json`,
//!    located by lower-cased package name.
//!
//! A missing file at any stage means "layer not present" and is skipped
//! silently; a file that exists but does not parse is fatal.
//!
//! After all merges, the `vcs_src`, `vcs_browser` and `uploaders` values
//! get a single, non-recursive pass of `{key}` placeholder substitution
//! against the current context. Unknown placeholders are left verbatim.

use std::path::Path;
use std::sync::OnceLock;

use ini::Ini;
use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::paths::Paths;

/// The `setup.cfg` section read as an inline override layer.
const INLINE_SECTION: &str = "py2dsp";

/// Context keys that support `{key}` placeholder interpolation.
const INTERPOLATED_KEYS: [&str; 3] = ["vcs_src", "vcs_browser", "uploaders"];

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid"))
}

/// Apply all override layers to the context.
pub fn apply(dpath: &Path, ctx: &mut Context, profile: Option<&str>, paths: &Paths) -> Result<()> {
    apply_inline_section(dpath, ctx)?;

    if let Some(profile) = profile {
        let profile_path = Path::new(profile);
        if profile_path.is_file() {
            ctx.merge(load_json(profile_path)?);
        } else {
            let fallback = paths.profiles.join(profile).join("ctx.json");
            if fallback.is_file() {
                ctx.merge(load_json(&fallback)?);
            } else {
                debug!("no ctx.json for profile {}, skipping", profile);
            }
        }
    }

    let override_path = paths
        .overrides
        .join(ctx.name().to_lowercase())
        .join("ctx.json");
    if override_path.is_file() {
        ctx.merge(load_json(&override_path)?);
    }

    interpolate(ctx);
    Ok(())
}

/// Merge the `[py2dsp]` section of `setup.cfg`, when both exist.
fn apply_inline_section(dpath: &Path, ctx: &mut Context) -> Result<()> {
    let setupcfg = dpath.join("setup.cfg");
    if !setupcfg.is_file() {
        return Ok(());
    }
    let cfg = Ini::load_from_file(&setupcfg)?;
    if let Some(section) = cfg.section(Some(INLINE_SECTION)) {
        let mut overlay = Map::new();
        for (key, value) in section.iter() {
            overlay.insert(key.to_string(), Value::String(value.to_string()));
        }
        ctx.merge(overlay);
    }
    Ok(())
}

/// Load an override document: a JSON object mapping keys to values.
fn load_json(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|err| Error::Override {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::Override {
            path: path.display().to_string(),
            message: "document must be a JSON object".to_string(),
        }),
    }
}

/// One-pass `{key}` substitution for the interpolated keys.
fn interpolate(ctx: &mut Context) {
    for key in INTERPOLATED_KEYS {
        let Some(value) = ctx.get_str(key).map(str::to_string) else {
            continue;
        };
        let replaced = placeholder_re()
            .replace_all(&value, |caps: &regex::Captures| {
                match ctx.get_str(&caps[1]) {
                    Some(substitution) => substitution.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned();
        ctx.set(key, replaced);
    }
}
