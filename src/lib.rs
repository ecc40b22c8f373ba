//! # py2deb
//!
//! This library generates the `debian/` packaging scaffold for an unpacked
//! Python source package. Given a source tree and a context of known facts
//! (package name, version, author, dependencies, supported interpreters),
//! it synthesizes the control files a Debian package build consumes:
//! manifest, build rules, changelog entry, copyright statement, watch rule,
//! clean list, documentation lists, and (for brand-new packages) an ITP
//! submission mail.
//!
//! ## Quick Example
//!
//! ```no_run
//! use py2deb::context::Context;
//! use py2deb::generators;
//! use py2deb::interpreter::Interpreter;
//! use py2deb::maintainer::Maintainer;
//! use py2deb::paths::Paths;
//! use serde_json::{json, Map};
//!
//! let mut seed = Map::new();
//! seed.insert("name".to_string(), json!("Foo"));
//! seed.insert("src_name".to_string(), json!("foo"));
//! seed.insert("version".to_string(), json!("1.0"));
//! let mut ctx = Context::new(seed, vec![Interpreter::Python3]).unwrap();
//!
//! generators::debianize(
//!     "./foo-1.0".as_ref(),
//!     &mut ctx,
//!     None,
//!     &Paths::default(),
//!     &Maintainer::from_env(),
//! )
//! .unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **Context (`context`)**: the shared key/value state threaded through
//!   every stage of one packaging run.
//! - **Context Builder (`scan`)**: defaults plus one heuristic pass over
//!   the source tree (compiled-extension detection, Cython cleanup
//!   pairing).
//! - **Override layers (`overrides`)**: inline `setup.cfg` section,
//!   profile documents, and per-package overrides merged in a fixed
//!   precedence order.
//! - **Rendering (`render`)**: a Tera environment assembled from ordered
//!   search directories, wrapped in the Idempotence Gate: an artifact
//!   that already exists on disk is never regenerated, so hand edits
//!   survive re-runs.
//! - **Generators (`generators`)**: one module per output artifact,
//!   executed in a fixed order by `generators::debianize`.
//!
//! ## Execution Flow
//!
//! 1. Context Builder seeds defaults and scans the tree.
//! 2. Override layers merge into the context, later layers winning.
//! 3. Static auxiliary files are copied, never overwriting.
//! 4. Section generators run in order; the changelog step may block on the
//!    external `dch` helper, and an initial release triggers the ITP mail.

pub mod context;
pub mod error;
pub mod generators;
pub mod interpreter;
pub mod maintainer;
pub mod overrides;
pub mod paths;
pub mod pydep;
pub mod render;
pub mod scan;
pub mod static_files;
