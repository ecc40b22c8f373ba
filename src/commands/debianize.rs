//! Debianize command implementation
//!
//! Assembles the seed context from command-line flags (optionally on top
//! of a JSON context file) and runs the full scaffold pipeline on an
//! unpacked source tree.

use anyhow::{bail, Context as _, Result};
use clap::Args;
use serde_json::{Map, Value};
use std::path::PathBuf;

use py2deb::context::Context;
use py2deb::generators;
use py2deb::interpreter::Interpreter;
use py2deb::maintainer::Maintainer;
use py2deb::paths::Paths;

/// Arguments for the debianize command
#[derive(Args, Debug)]
pub struct DebianizeArgs {
    /// Path to the unpacked source tree
    pub src_dir: PathBuf,

    /// Package name as published on the package index
    #[arg(long)]
    pub name: Option<String>,

    /// Upstream version
    #[arg(long)]
    pub version: Option<String>,

    /// Debian source package name (defaults to a normalized package name)
    #[arg(long)]
    pub src_name: Option<String>,

    /// Target interpreters (repeatable)
    #[arg(long = "interpreter", value_name = "NAME", default_values = ["python3"])]
    pub interpreters: Vec<String>,

    /// Profile name or path to a profile JSON file
    #[arg(long)]
    pub profile: Option<String>,

    /// JSON file with additional seed context values
    #[arg(long, value_name = "PATH")]
    pub ctx: Option<PathBuf>,

    /// Changelog message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Target distribution (defaults to UNRELEASED)
    #[arg(long)]
    pub distribution: Option<String>,

    /// Debian revision of the generated package
    #[arg(long)]
    pub revision: Option<String>,
}

/// Execute the debianize command
pub fn execute(args: DebianizeArgs) -> Result<()> {
    if !args.src_dir.is_dir() {
        bail!("Source directory not found: {}", args.src_dir.display());
    }

    let mut seed: Map<String, Value> = match &args.ctx {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read context file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse context file {}", path.display()))?
        }
        None => Map::new(),
    };

    let flags = [
        ("name", &args.name),
        ("version", &args.version),
        ("src_name", &args.src_name),
        ("message", &args.message),
        ("distribution", &args.distribution),
        ("debian_revision", &args.revision),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            seed.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    if !seed.contains_key("src_name") {
        if let Some(name) = seed.get("name").and_then(Value::as_str) {
            let src_name = name.to_lowercase().replace(['_', '.'], "-");
            seed.insert("src_name".to_string(), Value::String(src_name));
        }
    }

    let interpreters = args
        .interpreters
        .iter()
        .map(|name| name.parse::<Interpreter>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut ctx = Context::new(seed, interpreters)?;
    generators::debianize(
        &args.src_dir,
        &mut ctx,
        args.profile.as_deref(),
        &Paths::default(),
        &Maintainer::from_env(),
    )?;
    Ok(())
}
