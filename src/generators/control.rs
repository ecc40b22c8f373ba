//! The `debian/control` manifest generator.
//!
//! Augments the context with the reflowed package description and the
//! computed build dependency set, then renders `debian/control.tpl`.
//!
//! Dependency inference has two independent branches: an explicit
//! `requires` context field is parsed line by line, otherwise the tree is
//! scanned for `*.egg-info/requires.txt` manifests and a top-level
//! `requirements.txt`. Either way a single unparseable entry is logged and
//! skipped, never fatal.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde_json::Value;

use crate::context::Context;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::pydep;
use crate::render::{render_artifact, Renderer};

/// Maximum length of the one-line synopsis in `debian/control`.
const SHORT_DESC_LIMIT: usize = 80;

/// Line prefixes that start a literal block in the long description.
const LITERAL_MARKERS: [&str; 5] = ["* ", ">>> ", "... ", ".. ", "$ "];

pub fn generate(dpath: &Path, ctx: &mut Context, renderer: &Renderer) -> Result<()> {
    render_artifact(renderer, dpath, ctx, "control", augment)
}

fn augment(dpath: &Path, ctx: &mut Context) -> Result<()> {
    let short_desc: String = ctx
        .get_str("summary")
        .unwrap_or_default()
        .chars()
        .take(SHORT_DESC_LIMIT)
        .collect();
    let long_desc = reflow_description(ctx.get_str("description").unwrap_or_default());
    // Overrides may have set these already; keep their values.
    ctx.set_default("short_desc", short_desc);
    ctx.set_default("long_desc", long_desc);

    let interpreters = ctx.interpreters().to_vec();
    if let Some(requires) = ctx.get("requires").cloned() {
        for line in requires_lines(&requires) {
            for interpreter in &interpreters {
                match pydep::guess_dependency(*interpreter, &line) {
                    Ok(Some(dependency)) => {
                        ctx.build_depends.insert(dependency);
                    }
                    Ok(None) => {}
                    Err(err) => warn!("cannot parse build dependency: {}", err),
                }
            }
        }
    } else {
        for manifest in requirement_manifests(dpath)? {
            for interpreter in &interpreters {
                match pydep::parse_requirement_file(*interpreter, &manifest) {
                    Ok(dependencies) => ctx.build_depends.extend(dependencies),
                    Err(err) => warn!("cannot parse build dependency: {}", err),
                }
            }
        }
    }

    if uses_setuptools(&dpath.join("setup.py"))? {
        for interpreter in &interpreters {
            ctx.build_depends
                .insert(format!("{}-setuptools", interpreter));
        }
    }

    let dev_suffix = if ctx.get_str("binary_arch") == Some("any") {
        "-dev"
    } else {
        ""
    };
    for interpreter in &interpreters {
        let dependency = match interpreter {
            Interpreter::Python => format!("python-all{}", dev_suffix),
            Interpreter::Python3 => format!("python3-all{}", dev_suffix),
            Interpreter::PyPy => "pypy".to_string(),
        };
        ctx.build_depends.insert(dependency);
    }
    Ok(())
}

/// Reformat the long description into the control-file continuation
/// convention: every line indented one space, blank lines become a lone
/// `.`, and literal lines (bullets, doctest prompts, shell prompts, a line
/// continuing a `>>> ` block) get one extra space so the formatting
/// survives. Tabs are expanded to four spaces.
fn reflow_description(description: &str) -> String {
    let mut out = Vec::new();
    let mut code_line = false;
    for line in description.split('\n') {
        if line.trim().is_empty() {
            out.push(" .".to_string());
            continue;
        }
        let mut line = line.to_string();
        if LITERAL_MARKERS.iter().any(|m| line.starts_with(m)) || code_line || line == "..." {
            if line.starts_with(">>> ") {
                // The doctest's output line keeps the literal indent too.
                code_line = true;
            } else if code_line {
                code_line = false;
            }
            line.insert(0, ' ');
        }
        let line = line.replace('\t', "    ");
        out.push(format!(" {}", line));
    }
    out.join("\n")
}

/// The `requires` field may be a list of requirement strings or one
/// newline-separated string.
fn requires_lines(requires: &Value) -> Vec<String> {
    match requires {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(s) => s.lines().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Requirement manifests discovered at the top level of the tree.
fn requirement_manifests(dpath: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut manifests = BTreeSet::new();
    for entry in fs::read_dir(dpath)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".egg-info") {
            let requires = entry.path().join("requires.txt");
            if requires.is_file() {
                manifests.insert(requires);
            }
        }
        if name == "requirements.txt" {
            manifests.insert(entry.path());
        }
    }
    Ok(manifests)
}

/// True when a build script imports the setuptools packaging helper
/// outside of comments.
fn uses_setuptools(setup_py: &Path) -> Result<bool> {
    if !setup_py.is_file() {
        return Ok(false);
    }
    let content = fs::read_to_string(setup_py)?;
    Ok(content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .any(|line| line.contains("setuptools")))
}
