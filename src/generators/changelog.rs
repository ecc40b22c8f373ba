//! The `debian/changelog` generator.
//!
//! Three outcomes:
//!
//! - an existing changelog whose first line already mentions the current
//!   version, or is marked `UNRELEASED`, needs nothing (the generator is
//!   a no-op and the `dch` helper is never invoked);
//! - any other existing changelog gets a new entry through the external
//!   `dch` helper, run with the source root as working directory; a
//!   non-zero exit is fatal and aborts the pipeline;
//! - no changelog at all means this is an initial release: the first entry
//!   is synthesized directly and the caller is told, which triggers the
//!   ITP submission notice.

use std::fs;
use std::path::Path;
use std::process::Command;

use chrono::Utc;
use log::debug;

use crate::context::Context;
use crate::error::{Error, Result};

/// Urgency stamped into synthesized entries.
const URGENCY: &str = "low";

/// Default target distribution when the caller supplies none.
const DEFAULT_DISTRIBUTION: &str = "UNRELEASED";

/// Generate or update the changelog. Returns `true` when a brand-new
/// changelog was written (an initial release).
pub fn generate(dpath: &Path, ctx: &mut Context) -> Result<bool> {
    let change = ctx
        .get_str("message")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Autogenerated by py2deb v{}", env!("CARGO_PKG_VERSION")));
    let version = format!(
        "{}-{}",
        ctx.version(),
        ctx.get_str("debian_revision").unwrap_or_default()
    );
    let distribution = ctx
        .get_str("distribution")
        .unwrap_or(DEFAULT_DISTRIBUTION)
        .to_string();

    let fpath = dpath.join("debian").join("changelog");
    if fpath.exists() {
        let content = fs::read_to_string(&fpath)?;
        let first_line = content.lines().next().unwrap_or_default();
        if first_line.contains(ctx.version()) || first_line.contains("UNRELEASED") {
            debug!("changelog doesn't need an update");
        } else {
            run_dch(dpath, &distribution, &version, &change)?;
        }
        return Ok(false);
    }

    let now = Utc::now();
    let entry = format!(
        "{} ({}) {}; urgency={}\n\n  * {}\n\n -- {}  {}\n",
        ctx.src_name(),
        version,
        distribution,
        URGENCY,
        change,
        ctx.get_str("creator").unwrap_or_default(),
        now.format("%a, %d %b %Y %H:%M:%S +0000"),
    );
    fs::create_dir_all(fpath.parent().expect("changelog path has a parent"))?;
    fs::write(&fpath, entry)?;
    Ok(true)
}

/// Invoke the external changelog-editing helper and wait for it.
fn run_dch(dpath: &Path, distribution: &str, version: &str, change: &str) -> Result<()> {
    let args = [
        "--force-distribution",
        "--distribution",
        distribution,
        "--newversion",
        version,
        "-m",
        change,
    ];
    let command = format!("dch {}", args.join(" "));
    let output = Command::new("dch")
        .args(args)
        .current_dir(dpath)
        .output()
        .map_err(|err| Error::Helper {
            command: command.clone(),
            stderr: err.to_string(),
        })?;
    if !output.status.success() {
        return Err(Error::Helper {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    fn context() -> Context {
        let mut values = Map::new();
        values.insert("name".to_string(), json!("Foo"));
        values.insert("src_name".to_string(), json!("foo"));
        values.insert("version".to_string(), json!("1.2.3"));
        values.insert("debian_revision".to_string(), json!("0~py2deb"));
        values.insert(
            "creator".to_string(),
            json!("Jane Doe <jane@example.org>"),
        );
        Context::new(values, vec![Interpreter::Python3]).unwrap()
    }

    #[test]
    fn test_initial_release_synthesizes_entry() {
        let tree = TempDir::new().unwrap();
        let mut ctx = context();
        ctx.set("message", "Initial packaging");
        ctx.set("distribution", "unstable");

        let initial = generate(tree.path(), &mut ctx).unwrap();
        assert!(initial);

        let changelog = fs::read_to_string(tree.path().join("debian/changelog")).unwrap();
        let first_line = changelog.lines().next().unwrap();
        assert_eq!(first_line, "foo (1.2.3-0~py2deb) unstable; urgency=low");
        assert!(changelog.contains("  * Initial packaging"));
        assert!(changelog.contains(" -- Jane Doe <jane@example.org>  "));
        assert!(changelog.ends_with("+0000\n"));
    }

    #[test]
    fn test_default_message_mentions_generator() {
        let tree = TempDir::new().unwrap();
        let mut ctx = context();
        generate(tree.path(), &mut ctx).unwrap();
        let changelog = fs::read_to_string(tree.path().join("debian/changelog")).unwrap();
        assert!(changelog.contains("Autogenerated by py2deb v"));
    }

    #[test]
    fn test_short_circuit_on_current_version() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("debian")).unwrap();
        let existing = "foo (1.2.3-1) unstable; urgency=low\n\n  * old entry\n";
        fs::write(tree.path().join("debian/changelog"), existing).unwrap();

        let mut ctx = context();
        let initial = generate(tree.path(), &mut ctx).unwrap();
        assert!(!initial);
        // Untouched: dch was not invoked, the file is byte-identical.
        assert_eq!(
            fs::read_to_string(tree.path().join("debian/changelog")).unwrap(),
            existing
        );
    }

    #[test]
    fn test_short_circuit_on_unreleased() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("debian")).unwrap();
        let existing = "foo (0.9-1) UNRELEASED; urgency=low\n\n  * wip\n";
        fs::write(tree.path().join("debian/changelog"), existing).unwrap();

        let mut ctx = context();
        let initial = generate(tree.path(), &mut ctx).unwrap();
        assert!(!initial);
        assert_eq!(
            fs::read_to_string(tree.path().join("debian/changelog")).unwrap(),
            existing
        );
    }
}
