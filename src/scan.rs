//! Context Builder: defaults plus one heuristic pass over the source tree.
//!
//! This runs exactly once, before any override layer or generator touches
//! the context. It seeds identity and revision defaults and performs the
//! single `walkdir` pass that decides whether the package is
//! architecture-dependent:
//!
//! - any `.c`, `.cpp` or `.pyx` source anywhere in the tree flips
//!   `binary_arch` from `all` to `any`;
//! - every Cython source adds the per-interpreter Cython build dependency,
//!   and its pre-generated `.c`/`.cpp` sibling (same stem, same directory)
//!   is recorded for removal before a fresh build.
//!
//! Nothing in here fails on a missing optional input; unreadable tree
//! entries are simply not visited.

use std::path::Path;

use walkdir::WalkDir;

use crate::context::Context;
use crate::maintainer::Maintainer;

/// Fallback Debian revision for packages without an explicit one.
const DEFAULT_REVISION: &str = "0~py2deb";

/// Seed defaults and run the source-tree inspection pass.
pub fn update_context(dpath: &Path, ctx: &mut Context, maintainer: &Maintainer) {
    // `creator` is always the invoking identity; `maintainer` only defaults.
    ctx.set("creator", maintainer.to_string());
    ctx.set_default("maintainer", maintainer.to_string());
    ctx.set_default("debian_revision", DEFAULT_REVISION);

    let mut binary_arch = "all";
    for entry in WalkDir::new(dpath)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        let extension = path.extension().and_then(|ext| ext.to_str());
        if matches!(extension, Some("c") | Some("cpp") | Some("pyx")) {
            binary_arch = "any";
        }
        if extension == Some("pyx") {
            for interpreter in ctx.interpreters().to_vec() {
                if let Some(package) = interpreter.cython_package() {
                    ctx.build_depends.insert(package.to_string());
                }
            }
            for generated_ext in ["c", "cpp"] {
                let sibling = path.with_extension(generated_ext);
                if sibling.is_file() {
                    if let Ok(relative) = sibling.strip_prefix(dpath) {
                        ctx.clean_files
                            .insert(format!("./{}", relative.display()));
                    }
                }
            }
        }
    }
    ctx.set("binary_arch", binary_arch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;
    use serde_json::{json, Map};
    use std::fs;
    use tempfile::TempDir;

    fn context(interpreters: Vec<Interpreter>) -> Context {
        let mut values = Map::new();
        values.insert("name".to_string(), json!("Foo"));
        values.insert("src_name".to_string(), json!("foo"));
        values.insert("version".to_string(), json!("1.0"));
        Context::new(values, interpreters).unwrap()
    }

    fn maintainer() -> Maintainer {
        Maintainer::new("Jane Doe", "jane@example.org")
    }

    #[test]
    fn test_pure_python_tree_is_arch_all() {
        let tree = TempDir::new().unwrap();
        fs::create_dir(tree.path().join("foo")).unwrap();
        fs::write(tree.path().join("foo/__init__.py"), "").unwrap();
        fs::write(tree.path().join("setup.py"), "from setuptools import setup").unwrap();

        let mut ctx = context(vec![Interpreter::Python3]);
        update_context(tree.path(), &mut ctx, &maintainer());

        assert_eq!(ctx.get_str("binary_arch"), Some("all"));
        assert!(ctx.build_depends.is_empty());
        assert!(ctx.clean_files.is_empty());
    }

    #[test]
    fn test_c_source_anywhere_is_arch_any() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("src/ext")).unwrap();
        fs::write(tree.path().join("src/ext/speedups.c"), "/* c */").unwrap();

        let mut ctx = context(vec![Interpreter::Python3]);
        update_context(tree.path(), &mut ctx, &maintainer());

        assert_eq!(ctx.get_str("binary_arch"), Some("any"));
    }

    #[test]
    fn test_cython_source_adds_interpreter_build_deps() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("fast.pyx"), "").unwrap();

        let mut ctx = context(vec![Interpreter::Python, Interpreter::Python3]);
        update_context(tree.path(), &mut ctx, &maintainer());

        assert!(ctx.build_depends.contains("cython"));
        assert!(ctx.build_depends.contains("cython3"));
        assert_eq!(ctx.get_str("binary_arch"), Some("any"));
    }

    #[test]
    fn test_cython_sibling_is_scheduled_for_cleanup() {
        let tree = TempDir::new().unwrap();
        fs::create_dir(tree.path().join("pkg")).unwrap();
        fs::write(tree.path().join("pkg/fast.pyx"), "").unwrap();
        fs::write(tree.path().join("pkg/fast.c"), "/* generated */").unwrap();

        let mut ctx = context(vec![Interpreter::Python3]);
        update_context(tree.path(), &mut ctx, &maintainer());

        assert!(ctx.clean_files.contains("./pkg/fast.c"));
    }

    #[test]
    fn test_cython_without_sibling_leaves_clean_files_alone() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("fast.pyx"), "").unwrap();

        let mut ctx = context(vec![Interpreter::Python3]);
        update_context(tree.path(), &mut ctx, &maintainer());

        assert!(ctx.clean_files.is_empty());
    }

    #[test]
    fn test_identity_defaults() {
        let tree = TempDir::new().unwrap();
        let mut ctx = context(vec![Interpreter::Python3]);
        ctx.set("maintainer", "Upstream Maintainer <up@example.org>");
        update_context(tree.path(), &mut ctx, &maintainer());

        // creator is always reset; maintainer keeps the caller's value.
        assert_eq!(ctx.get_str("creator"), Some("Jane Doe <jane@example.org>"));
        assert_eq!(
            ctx.get_str("maintainer"),
            Some("Upstream Maintainer <up@example.org>")
        );
        assert_eq!(ctx.get_str("debian_revision"), Some("0~py2deb"));
    }
}
