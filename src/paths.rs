//! Search-path defaults for overrides, profiles, and templates.
//!
//! This module centralizes the well-known locations py2deb reads its data
//! files from, ensuring consistency and avoiding duplication. Every
//! location can be overridden through an environment variable, which is
//! also what the test suite uses to point the pipeline at fixture
//! directories.

use std::env;
use std::path::PathBuf;

/// Base directory for py2deb data files on a regular installation.
const DATA_DIR: &str = "/usr/share/py2deb";

/// The set of directories the pipeline reads data from.
///
/// - `overrides`: per-package override directories, keyed by lower-cased
///   package name, each optionally holding a `ctx.json` and a `debian/`
///   static subtree.
/// - `profiles`: named profile directories with the same layout.
/// - `templates`: the shared template set (`debian/*.tpl`, `itp.mail`) and
///   its `debian/` static subtree.
#[derive(Debug, Clone)]
pub struct Paths {
    pub overrides: PathBuf,
    pub profiles: PathBuf,
    pub templates: PathBuf,
}

impl Default for Paths {
    /// Resolve the data directories from the environment.
    ///
    /// `PY2DEB_OVERRIDES`, `PY2DEB_PROFILES` and `PY2DEB_TEMPLATES` take
    /// precedence over the fixed locations under `/usr/share/py2deb`.
    fn default() -> Self {
        Paths {
            overrides: env_path("PY2DEB_OVERRIDES", "overrides"),
            profiles: env_path("PY2DEB_PROFILES", "profiles"),
            templates: env_path("PY2DEB_TEMPLATES", "templates"),
        }
    }
}

fn env_path(var: &str, subdir: &str) -> PathBuf {
    env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DATA_DIR).join(subdir))
}
