//! Documentation detection and the `.docs`/`.examples` list files.
//!
//! Scans a fixed candidate set of relative paths for a Sphinx build
//! directory (one containing both `conf.py` and a `Makefile`), and the
//! top level of the tree for readme files and an examples directory. When
//! anything was found, derives the binary package that should ship the
//! documentation and writes its `.docs`/`.examples` list files, each a
//! newline-joined list of relative paths or glob patterns.
//!
//! These derived files are written directly rather than through a
//! template, but get the same existence guard as every other artifact.

use std::fs;
use std::path::Path;

use log::debug;

use crate::context::Context;
use crate::error::Result;
use crate::interpreter::Interpreter;

/// Candidate Sphinx directories, checked in order.
const SPHINX_DIRS: [&str; 3] = ["docs", "doc", "doc/build"];

pub fn generate(dpath: &Path, ctx: &mut Context) -> Result<()> {
    for candidate in SPHINX_DIRS {
        let dir = dpath.join(candidate);
        if dir.join("Makefile").is_file() && dir.join("conf.py").is_file() {
            ctx.docs.sphinx_dir = Some(candidate.to_string());
            ctx.build_depends.insert("python3-sphinx".to_string());
            ctx.docs.files.push(".pybuild/docs/*".to_string());
            break;
        }
    }

    // Sorted for deterministic list-file content.
    let mut entries: Vec<String> = fs::read_dir(dpath)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    for name in entries {
        let lower = name.to_lowercase();
        if lower.starts_with("readme") {
            ctx.docs.files.push(name.clone());
        }
        if lower == "examples" {
            ctx.docs.examples_dir = Some(name);
        }
    }

    if ctx.docs.is_empty() {
        return Ok(());
    }

    let docs_pkg = if ctx.docs.sphinx_dir.is_some() {
        // Sphinx output gets its own documentation package.
        format!("python-{}-doc", ctx.src_name())
    } else if ctx.has_interpreter(Interpreter::Python3) {
        format!("python3-{}", ctx.src_name())
    } else {
        format!("python-{}", ctx.src_name())
    };

    let debian_dir = dpath.join("debian");
    fs::create_dir_all(&debian_dir)?;

    if let Some(examples_dir) = &ctx.docs.examples_dir {
        let fpath = debian_dir.join(format!("{}.examples", docs_pkg));
        if fpath.exists() {
            debug!("{} already exists, skipping", fpath.display());
        } else {
            fs::write(&fpath, format!("{}/*\n", examples_dir))?;
        }
    }
    if !ctx.docs.files.is_empty() {
        let fpath = debian_dir.join(format!("{}.docs", docs_pkg));
        if fpath.exists() {
            debug!("{} already exists, skipping", fpath.display());
        } else {
            let mut content = String::new();
            for file in &ctx.docs.files {
                content.push_str(file);
                content.push('\n');
            }
            fs::write(&fpath, content)?;
        }
    }
    Ok(())
}
