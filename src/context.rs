//! # The shared packaging Context
//!
//! A single `Context` value is threaded by mutable reference through every
//! stage of the pipeline: the Context Builder seeds it, the override layers
//! merge into it, and each section generator reads and augments it before
//! rendering its artifact.
//!
//! ## Shape
//!
//! Override layers are free-form JSON documents, so the bulk of the context
//! is an open `serde_json` object map. The parts that carry invariants get
//! typed fields instead:
//!
//! - `build_depends` and `clean_files` are `BTreeSet`s: deduplicated,
//!   append-only within a run, and iterated in a stable order so rendered
//!   output is deterministic.
//! - `exports` maps build-system environment-variable names to values.
//! - `docs` collects detected documentation artifacts and is only exposed
//!   to templates when something was actually found.
//! - `interpreters` is the ordered, non-empty interpreter list supplied by
//!   the caller.
//!
//! `name`, `src_name` and `version` are validated at construction time;
//! a context without them is refused with [`Error::MissingKey`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::interpreter::Interpreter;

/// Documentation artifacts detected in the source tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocsInfo {
    /// Relative path of the Sphinx documentation directory, when one was
    /// recognized (`conf.py` plus `Makefile`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sphinx_dir: Option<String>,
    /// Relative paths or glob patterns destined for the `.docs` list file.
    pub files: Vec<String>,
    /// Name of a top-level examples directory, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples_dir: Option<String>,
}

impl DocsInfo {
    /// True when no documentation artifact was detected.
    pub fn is_empty(&self) -> bool {
        self.sphinx_dir.is_none() && self.files.is_empty() && self.examples_dir.is_none()
    }
}

/// The key/value state shared by all generators for one packaging run.
#[derive(Debug, Clone)]
pub struct Context {
    values: Map<String, Value>,
    interpreters: Vec<Interpreter>,
    /// Build dependencies accumulated by the scan and the generators.
    pub build_depends: BTreeSet<String>,
    /// Source-relative paths slated for removal before a fresh build.
    pub clean_files: BTreeSet<String>,
    /// Build-system environment-variable overrides for `debian/rules`.
    pub exports: BTreeMap<String, String>,
    /// Detected documentation layout.
    pub docs: DocsInfo,
}

/// Context keys the caller must supply with non-empty string values.
const REQUIRED_KEYS: [&str; 3] = ["name", "src_name", "version"];

impl Context {
    /// Create a context from caller-supplied seed values and an ordered
    /// interpreter list.
    ///
    /// Fails with [`Error::MissingKey`] when `name`, `src_name` or
    /// `version` is absent or empty, or when no interpreter is given.
    pub fn new(values: Map<String, Value>, interpreters: Vec<Interpreter>) -> Result<Self> {
        for key in REQUIRED_KEYS {
            match values.get(key).and_then(Value::as_str) {
                Some(s) if !s.is_empty() => {}
                _ => {
                    return Err(Error::MissingKey {
                        key: key.to_string(),
                    })
                }
            }
        }
        if interpreters.is_empty() {
            return Err(Error::MissingKey {
                key: "interpreters".to_string(),
            });
        }
        Ok(Context {
            values,
            interpreters,
            build_depends: BTreeSet::new(),
            clean_files: BTreeSet::new(),
            exports: BTreeMap::new(),
            docs: DocsInfo::default(),
        })
    }

    /// The package name as known on the package index.
    pub fn name(&self) -> &str {
        self.values["name"].as_str().unwrap_or_default()
    }

    /// The Debian source package name.
    pub fn src_name(&self) -> &str {
        self.values["src_name"].as_str().unwrap_or_default()
    }

    /// The upstream version string.
    pub fn version(&self) -> &str {
        self.values["version"].as_str().unwrap_or_default()
    }

    /// The ordered interpreter list for this run.
    pub fn interpreters(&self) -> &[Interpreter] {
        &self.interpreters
    }

    pub fn has_interpreter(&self, interpreter: Interpreter) -> bool {
        self.interpreters.contains(&interpreter)
    }

    /// All free-form values, for callers that need to scan keys.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of a key, when present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Set `key` only when it has no value yet.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        if !self.values.contains_key(key) {
            self.values.insert(key.to_string(), value.into());
        }
    }

    /// Merge an override layer; keys in `overlay` win on collision.
    pub fn merge(&mut self, overlay: Map<String, Value>) {
        for (key, value) in overlay {
            self.values.insert(key, value);
        }
    }

    /// Snapshot the context for template rendering.
    ///
    /// The typed fields are exposed under their documented names:
    /// `build_depends` and `clean_files` as sorted lists, `exports` as a
    /// map, `interpreters` as identifier strings, and `docs` only when
    /// something was detected.
    pub fn to_tera(&self) -> tera::Context {
        let mut out = tera::Context::new();
        for (key, value) in &self.values {
            out.insert(key, value);
        }
        out.insert(
            "interpreters",
            &self
                .interpreters
                .iter()
                .map(|i| i.as_str())
                .collect::<Vec<_>>(),
        );
        out.insert(
            "build_depends",
            &self.build_depends.iter().collect::<Vec<_>>(),
        );
        out.insert("clean_files", &self.clean_files.iter().collect::<Vec<_>>());
        out.insert("exports", &self.exports);
        if !self.docs.is_empty() {
            out.insert("docs", &self.docs);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn seed(name: &str, version: &str) -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("name".to_string(), json!(name));
        values.insert("src_name".to_string(), json!(name.to_lowercase()));
        values.insert("version".to_string(), json!(version));
        values
    }

    #[test]
    fn test_new_requires_name_src_name_version() {
        let mut values = seed("Foo", "1.0");
        values.remove("src_name");
        let err = Context::new(values, vec![Interpreter::Python3]).unwrap_err();
        assert!(err.to_string().contains("src_name"));
    }

    #[test]
    fn test_new_rejects_empty_version() {
        let mut values = seed("Foo", "1.0");
        values.insert("version".to_string(), json!(""));
        let err = Context::new(values, vec![Interpreter::Python3]).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_new_requires_interpreters() {
        let err = Context::new(seed("Foo", "1.0"), vec![]).unwrap_err();
        assert!(err.to_string().contains("interpreters"));
    }

    #[test]
    fn test_accessors() {
        let ctx = Context::new(seed("Foo", "1.0"), vec![Interpreter::Python3]).unwrap();
        assert_eq!(ctx.name(), "Foo");
        assert_eq!(ctx.src_name(), "foo");
        assert_eq!(ctx.version(), "1.0");
        assert!(ctx.has_interpreter(Interpreter::Python3));
        assert!(!ctx.has_interpreter(Interpreter::PyPy));
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut ctx = Context::new(seed("Foo", "1.0"), vec![Interpreter::Python3]).unwrap();
        ctx.set("homepage", "https://a.example.org");
        let mut overlay = Map::new();
        overlay.insert("homepage".to_string(), json!("https://b.example.org"));
        overlay.insert("uploaders".to_string(), json!("Someone <s@example.org>"));
        ctx.merge(overlay);
        assert_eq!(ctx.get_str("homepage"), Some("https://b.example.org"));
        assert_eq!(ctx.get_str("uploaders"), Some("Someone <s@example.org>"));
    }

    #[test]
    fn test_set_default_does_not_overwrite() {
        let mut ctx = Context::new(seed("Foo", "1.0"), vec![Interpreter::Python3]).unwrap();
        ctx.set("maintainer", "Explicit <e@example.org>");
        ctx.set_default("maintainer", "Default <d@example.org>");
        assert_eq!(ctx.get_str("maintainer"), Some("Explicit <e@example.org>"));
        ctx.set_default("debian_revision", "0~py2deb");
        assert_eq!(ctx.get_str("debian_revision"), Some("0~py2deb"));
    }

    #[test]
    fn test_build_depends_deduplicate() {
        let mut ctx = Context::new(seed("Foo", "1.0"), vec![Interpreter::Python3]).unwrap();
        ctx.build_depends.insert("python3-all".to_string());
        ctx.build_depends.insert("python3-all".to_string());
        assert_eq!(ctx.build_depends.len(), 1);
    }

    #[test]
    fn test_to_tera_exposes_typed_fields() {
        let mut ctx = Context::new(seed("Foo", "1.0"), vec![Interpreter::Python3]).unwrap();
        ctx.build_depends.insert("python3-all".to_string());
        ctx.exports
            .insert("PYBUILD_NAME".to_string(), "foo".to_string());
        let tera_ctx = ctx.to_tera();
        let value = tera_ctx.into_json();
        assert_eq!(value["name"], json!("Foo"));
        assert_eq!(value["interpreters"], json!(["python3"]));
        assert_eq!(value["build_depends"], json!(["python3-all"]));
        assert_eq!(value["exports"]["PYBUILD_NAME"], json!("foo"));
        // No docs were detected, so templates must not see the key at all.
        assert!(value.get("docs").is_none());
    }

    #[test]
    fn test_to_tera_includes_docs_when_detected() {
        let mut ctx = Context::new(seed("Foo", "1.0"), vec![Interpreter::Python3]).unwrap();
        ctx.docs.sphinx_dir = Some("docs".to_string());
        ctx.docs.files.push(".pybuild/docs/*".to_string());
        let value = ctx.to_tera().into_json();
        assert_eq!(value["docs"]["sphinx_dir"], json!("docs"));
    }
}
