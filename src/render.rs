//! Template environment assembly and the Idempotence Gate.
//!
//! ## Template resolution
//!
//! [`Renderer::new`] registers the fixed set of artifact template names
//! the pipeline renders, resolving each against an ordered list of search
//! directories. The first directory to provide a name wins, which gives
//! the same precedence behavior as a Jinja `FileSystemLoader` list: a
//! package tree can ship its own `debian/control.tpl`, which beats the
//! per-package override directory, which beats the shared template set.
//! Only those known names are ever parsed; unrelated `.tpl` files a
//! source package happens to carry, in whatever syntax, are not touched.
//!
//! ## Idempotence Gate
//!
//! [`render_artifact`] wraps every template-based generator: when the
//! target file already exists the generator's context-augmentation logic is
//! not even invoked, so user hand-edits are never clobbered and expensive
//! heuristic scans are skipped once an artifact is finalized. Re-running
//! the pipeline on a populated tree is therefore safe and cheap.

use std::fs;
use std::path::Path;

use log::debug;
use tera::Tera;

use crate::context::Context;
use crate::error::Result;

/// The one template that is not a `debian/` artifact.
const MAIL_TEMPLATE: &str = "itp.mail";

/// The template names the pipeline renders. Nothing else gets parsed.
const TEMPLATE_NAMES: [&str; 5] = [
    "debian/control.tpl",
    "debian/rules.tpl",
    "debian/copyright.tpl",
    "debian/watch.tpl",
    MAIL_TEMPLATE,
];

/// A Tera environment assembled from an ordered directory list.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Build the environment; earlier directories shadow later ones.
    ///
    /// A missing template name in a directory falls through to the next
    /// one; a known template that fails to parse is fatal.
    pub fn new<P: AsRef<Path>>(search_dirs: &[P]) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for name in TEMPLATE_NAMES {
            for dir in search_dirs {
                let path = dir.as_ref().join(name);
                if path.is_file() {
                    tera.add_template_file(&path, Some(name))?;
                    break;
                }
            }
        }
        Ok(Renderer { tera })
    }

    /// Render a registered template against a context snapshot.
    pub fn render(&self, template: &str, ctx: &Context) -> Result<String> {
        Ok(self.tera.render(template, &ctx.to_tera())?)
    }
}

/// The Idempotence Gate: render `debian/<name>` at most once.
///
/// When the target exists this is a no-op; otherwise `augment` may update
/// the context, after which `debian/<name>.tpl` is rendered and written.
pub fn render_artifact<F>(
    renderer: &Renderer,
    dpath: &Path,
    ctx: &mut Context,
    name: &str,
    augment: F,
) -> Result<()>
where
    F: FnOnce(&Path, &mut Context) -> Result<()>,
{
    let fpath = dpath.join("debian").join(name);
    if fpath.exists() {
        debug!("debian/{} already exists, skipping", name);
        return Ok(());
    }
    augment(dpath, ctx)?;
    let rendered = renderer.render(&format!("debian/{}.tpl", name), ctx)?;
    if let Some(parent) = fpath.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&fpath, rendered)?;
    Ok(())
}
