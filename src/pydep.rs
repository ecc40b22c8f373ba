//! Translating Python requirement entries into Debian dependency names.
//!
//! Both the inline `requires` context field and discovered requirement
//! manifests (`*.egg-info/requires.txt`, `requirements.txt`) funnel through
//! these helpers. A requirement line like `SQLAlchemy[asyncio] >= 1.4` maps,
//! for the `python3` interpreter, to `python3-sqlalchemy (>= 1.4)`.
//!
//! Parse failures here are recoverable by design: the control generator
//! logs a warning and omits that dependency rather than aborting the run.

use std::path::Path;
use std::sync::OnceLock;

use log::warn;
use regex::Regex;

use crate::error::{Error, Result};
use crate::interpreter::Interpreter;

fn requirement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*(.*)$")
            .expect("requirement regex is valid")
    })
}

fn specifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(==|>=|<=|~=|!=|>|<)\s*([0-9][0-9A-Za-z.*+~-]*)$")
            .expect("specifier regex is valid")
    })
}

/// Guess the Debian build dependency for one requirement line.
///
/// Returns `Ok(None)` for blank and comment lines. Option lines (`-r`,
/// `-e`, ...) and lines that do not look like a requirement are parse
/// errors the caller is expected to recover from.
pub fn guess_dependency(interpreter: Interpreter, line: &str) -> Result<Option<String>> {
    // Trailing comments and environment markers carry no dependency data.
    let line = line.split(" #").next().unwrap_or(line);
    let line = line.split(';').next().unwrap_or(line).trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.starts_with('-') {
        return Err(Error::Dependency {
            line: line.to_string(),
            message: "option lines do not name a dependency".to_string(),
        });
    }

    let caps = requirement_re()
        .captures(line)
        .ok_or_else(|| Error::Dependency {
            line: line.to_string(),
            message: "no package name found".to_string(),
        })?;
    let package = debian_name(interpreter, &caps[1]);

    let rest = caps[2].trim();
    let rest = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(rest)
        .trim();
    if rest.is_empty() {
        return Ok(Some(package));
    }

    for spec in rest.split(',') {
        let spec = spec.trim();
        let caps = specifier_re()
            .captures(spec)
            .ok_or_else(|| Error::Dependency {
                line: line.to_string(),
                message: format!("malformed version specifier {:?}", spec),
            })?;
        if let Some(constraint) = translate_specifier(&caps[1], &caps[2]) {
            return Ok(Some(format!("{} ({})", package, constraint)));
        }
    }
    // Only exclusions (`!=`) were given; they do not map to Debian relations.
    Ok(Some(package))
}

/// Map an upstream distribution name to its Debian package name for the
/// given interpreter: lower-cased, `_`/`.` folded to `-`, prefixed.
fn debian_name(interpreter: Interpreter, upstream: &str) -> String {
    let normalized = upstream.to_lowercase().replace(['_', '.'], "-");
    format!("{}-{}", interpreter.as_str(), normalized)
}

/// Translate a PEP 440 specifier into a Debian version relation.
fn translate_specifier(op: &str, version: &str) -> Option<String> {
    match op {
        "==" => match version.strip_suffix(".*") {
            Some(base) => Some(format!(">= {}", base)),
            None => Some(format!("= {}", version)),
        },
        "~=" => Some(format!(">= {}", version)),
        ">=" | "<=" | ">" | "<" => Some(format!("{} {}", op, version)),
        // Exclusions have no single-relation Debian equivalent.
        _ => None,
    }
}

/// Parse a requirement manifest, producing one Debian dependency per
/// parseable entry.
///
/// Extras sections (`[section]` headers in `requires.txt`) and everything
/// after them describe optional dependencies and are ignored. A malformed
/// line is logged and skipped; the entries around it still count.
pub fn parse_requirement_file(interpreter: Interpreter, path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let mut dependencies = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            break;
        }
        match guess_dependency(interpreter, line) {
            Ok(Some(dependency)) => dependencies.push(dependency),
            Ok(None) => {}
            Err(err) => warn!("{}: {}", path.display(), err),
        }
    }
    Ok(dependencies)
}
