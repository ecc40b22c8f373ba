//! Section generators and the pipeline orchestrator.
//!
//! Each submodule owns one output artifact of the `debian/` scaffold. The
//! orchestrator runs them in a fixed order because later generators read
//! context fields set by earlier ones (the rules generator reads the
//! sphinx detection done by docs, the ITP mail reads the short description
//! computed by control, the clean list is written only after every scan has
//! accumulated its entries).

pub mod changelog;
pub mod clean;
pub mod control;
pub mod copyright;
pub mod docs;
pub mod itp_mail;
pub mod rules;
pub mod watch;

use std::path::Path;

use crate::context::Context;
use crate::error::Result;
use crate::maintainer::Maintainer;
use crate::overrides;
use crate::paths::Paths;
use crate::render::Renderer;
use crate::scan;
use crate::static_files;

/// Run the whole scaffold pipeline on an unpacked source tree.
///
/// 1. Context Builder (defaults + source-tree heuristics)
/// 2. Layered Override Resolver
/// 3. Static-File Materializer (override, shared, profile layers)
/// 4. Section generators in fixed order; the ITP mail only when the
///    changelog generator reports an initial release.
///
/// Every template-based artifact is behind the Idempotence Gate, so
/// re-running on a populated tree never clobbers existing files.
pub fn debianize(
    dpath: &Path,
    ctx: &mut Context,
    profile: Option<&str>,
    paths: &Paths,
    maintainer: &Maintainer,
) -> Result<()> {
    scan::update_context(dpath, ctx, maintainer);
    overrides::apply(dpath, ctx, profile, paths)?;

    let debian_dir = dpath.join("debian");
    let override_dir = paths.overrides.join(ctx.name().to_lowercase());
    static_files::materialize(&override_dir.join("debian"), &debian_dir)?;
    static_files::materialize(&paths.templates.join("debian"), &debian_dir)?;
    if let Some(profile) = profile {
        static_files::materialize(&paths.profiles.join(profile).join("debian"), &debian_dir)?;
    }

    let renderer = Renderer::new(&[
        dpath.to_path_buf(),
        override_dir,
        paths.templates.clone(),
    ])?;

    // Order matters: see module docs.
    docs::generate(dpath, ctx)?;
    control::generate(dpath, ctx, &renderer)?;
    rules::generate(dpath, ctx, &renderer)?;
    let initial_release = changelog::generate(dpath, ctx)?;
    if initial_release {
        itp_mail::generate(dpath, ctx, &renderer)?;
    }
    copyright::generate(dpath, ctx, &renderer)?;
    watch::generate(dpath, ctx, &renderer)?;
    clean::generate(dpath, ctx)?;
    Ok(())
}
