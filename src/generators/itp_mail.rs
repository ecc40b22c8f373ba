//! The ITP (Intent To Package) submission-notice generator.
//!
//! Runs only when the changelog generator reported an initial release. The
//! output lands next to the source tree (or under the `root` context key
//! when set), named `<src_name>_<version>-<revision>.mail`, so it does not
//! fit the generic `debian/<name>` gate and carries its own existence
//! check.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::context::Context;
use crate::error::Result;
use crate::render::Renderer;

pub fn generate(dpath: &Path, ctx: &mut Context, renderer: &Renderer) -> Result<()> {
    let root = ctx
        .get_str("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| dpath.parent().unwrap_or(dpath).to_path_buf());
    let fname = format!(
        "{}_{}-{}.mail",
        ctx.src_name(),
        ctx.version(),
        ctx.get_str("debian_revision").unwrap_or_default()
    );
    let fpath = root.join(fname);
    if fpath.exists() {
        debug!("{} already exists, skipping", fpath.display());
        return Ok(());
    }
    let rendered = renderer.render("itp.mail", ctx)?;
    fs::write(&fpath, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    fn context(root: &Path) -> Context {
        let mut values = Map::new();
        values.insert("name".to_string(), json!("Foo"));
        values.insert("src_name".to_string(), json!("foo"));
        values.insert("version".to_string(), json!("1.0"));
        values.insert("debian_revision".to_string(), json!("0~py2deb"));
        values.insert("root".to_string(), json!(root.to_string_lossy()));
        Context::new(values, vec![Interpreter::Python3]).unwrap()
    }

    fn renderer() -> (TempDir, Renderer) {
        let templates = TempDir::new().unwrap();
        fs::write(
            templates.path().join("itp.mail"),
            "Subject: ITP: {{ src_name }}\n",
        )
        .unwrap();
        let renderer = Renderer::new(&[templates.path()]).unwrap();
        (templates, renderer)
    }

    #[test]
    fn test_mail_written_under_root() {
        let (_templates, renderer) = renderer();
        let tree = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let mut ctx = context(root.path());

        generate(tree.path(), &mut ctx, &renderer).unwrap();
        let mail = fs::read_to_string(root.path().join("foo_1.0-0~py2deb.mail")).unwrap();
        assert_eq!(mail, "Subject: ITP: foo\n");
    }

    #[test]
    fn test_existing_mail_is_kept() {
        let (_templates, renderer) = renderer();
        let tree = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let fpath = root.path().join("foo_1.0-0~py2deb.mail");
        fs::write(&fpath, "already sent\n").unwrap();

        let mut ctx = context(root.path());
        generate(tree.path(), &mut ctx, &renderer).unwrap();
        assert_eq!(fs::read_to_string(&fpath).unwrap(), "already sent\n");
    }

    #[test]
    fn test_defaults_to_parent_of_source_tree() {
        let (_templates, renderer) = renderer();
        let parent = TempDir::new().unwrap();
        let tree = parent.path().join("foo-1.0");
        fs::create_dir(&tree).unwrap();

        let mut values = Map::new();
        values.insert("name".to_string(), json!("Foo"));
        values.insert("src_name".to_string(), json!("foo"));
        values.insert("version".to_string(), json!("1.0"));
        values.insert("debian_revision".to_string(), json!("1"));
        let mut ctx = Context::new(values, vec![Interpreter::Python3]).unwrap();

        generate(&tree, &mut ctx, &renderer).unwrap();
        assert!(parent.path().join("foo_1.0-1.mail").exists());
    }
}
