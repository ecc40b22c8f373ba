//! The `debian/rules` build-driver generator.
//!
//! Sets the comma-joined `dh --with` plugin list from the interpreter set
//! (plus `sphinxdoc` when Sphinx documentation was detected) and, for
//! multi-interpreter builds of packages that install console scripts,
//! exports a post-install override so `/usr/bin` entries are shipped only
//! by the python3 binary package.

use std::fs;
use std::path::Path;

use crate::context::Context;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::render::{render_artifact, Renderer};

pub fn generate(dpath: &Path, ctx: &mut Context, renderer: &Renderer) -> Result<()> {
    render_artifact(renderer, dpath, ctx, "rules", augment)
}

fn augment(dpath: &Path, ctx: &mut Context) -> Result<()> {
    let mut with = ctx
        .interpreters()
        .iter()
        .map(|interpreter| interpreter.buildsystem())
        .collect::<Vec<_>>()
        .join(",");
    if ctx.docs.sphinx_dir.is_some() {
        with.push_str(",sphinxdoc");
    }
    ctx.set("with", with);

    let setup_py = dpath.join("setup.py");
    if setup_py.is_file() && ctx.interpreters().len() > 1 {
        let content = fs::read_to_string(&setup_py)?;
        if content.lines().any(|line| line.contains("console_scripts")) {
            for interpreter in ctx.interpreters().to_vec() {
                if interpreter == Interpreter::Python3 {
                    // python3 keeps the installed executables.
                    continue;
                }
                ctx.exports.insert(
                    format!("PYBUILD_AFTER_INSTALL_{}", interpreter.buildsystem()),
                    // {destdir} is pybuild's own placeholder, kept verbatim.
                    "rm -rf {destdir}/usr/bin/".to_string(),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    fn context(interpreters: Vec<Interpreter>) -> Context {
        let mut values = Map::new();
        values.insert("name".to_string(), json!("Foo"));
        values.insert("src_name".to_string(), json!("foo"));
        values.insert("version".to_string(), json!("1.0"));
        Context::new(values, interpreters).unwrap()
    }

    #[test]
    fn test_with_list_uses_legacy_python2_name() {
        let tree = TempDir::new().unwrap();
        let mut ctx = context(vec![Interpreter::Python, Interpreter::Python3]);
        augment(tree.path(), &mut ctx).unwrap();
        assert_eq!(ctx.get_str("with"), Some("python2,python3"));
    }

    #[test]
    fn test_sphinxdoc_plugin_appended() {
        let tree = TempDir::new().unwrap();
        let mut ctx = context(vec![Interpreter::Python3]);
        ctx.docs.sphinx_dir = Some("docs".to_string());
        augment(tree.path(), &mut ctx).unwrap();
        assert_eq!(ctx.get_str("with"), Some("python3,sphinxdoc"));
    }

    #[test]
    fn test_console_scripts_export_for_non_primary_interpreters() {
        let tree = TempDir::new().unwrap();
        fs::write(
            tree.path().join("setup.py"),
            "setup(entry_points={'console_scripts': ['foo = foo:main']})\n",
        )
        .unwrap();
        let mut ctx = context(vec![Interpreter::Python, Interpreter::Python3]);
        augment(tree.path(), &mut ctx).unwrap();
        assert_eq!(
            ctx.exports.get("PYBUILD_AFTER_INSTALL_python2").map(String::as_str),
            Some("rm -rf {destdir}/usr/bin/")
        );
        assert!(!ctx.exports.contains_key("PYBUILD_AFTER_INSTALL_python3"));
    }

    #[test]
    fn test_single_interpreter_gets_no_exports() {
        let tree = TempDir::new().unwrap();
        fs::write(
            tree.path().join("setup.py"),
            "setup(entry_points={'console_scripts': ['foo = foo:main']})\n",
        )
        .unwrap();
        let mut ctx = context(vec![Interpreter::Python3]);
        augment(tree.path(), &mut ctx).unwrap();
        assert!(ctx.exports.is_empty());
    }

    #[test]
    fn test_no_console_scripts_no_exports() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("setup.py"), "setup()\n").unwrap();
        let mut ctx = context(vec![Interpreter::Python, Interpreter::Python3]);
        augment(tree.path(), &mut ctx).unwrap();
        assert!(ctx.exports.is_empty());
    }
}
