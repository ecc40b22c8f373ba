//! Supported Python interpreter identifiers.
//!
//! Dependency names, buildsystem plugin names, and per-interpreter build
//! flags all key off the interpreter set supplied by the caller. The
//! identifiers form a small closed set, so they are modeled as an enum
//! rather than free-form strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A supported Python runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpreter {
    /// CPython 2 (`python`)
    Python,
    /// CPython 3 (`python3`)
    Python3,
    /// PyPy (`pypy`)
    PyPy,
}

impl Interpreter {
    /// The canonical identifier, as it appears in context data and
    /// dependency prefixes (`python-foo`, `python3-foo`, `pypy-foo`).
    pub fn as_str(self) -> &'static str {
        match self {
            Interpreter::Python => "python",
            Interpreter::Python3 => "python3",
            Interpreter::PyPy => "pypy",
        }
    }

    /// The `dh --with` buildsystem plugin name.
    ///
    /// Legacy remap: the CPython 2 plugin is named `python2`, not `python`.
    pub fn buildsystem(self) -> &'static str {
        match self {
            Interpreter::Python => "python2",
            Interpreter::Python3 => "python3",
            Interpreter::PyPy => "pypy",
        }
    }

    /// The Cython build dependency for this interpreter, if any.
    pub fn cython_package(self) -> Option<&'static str> {
        match self {
            Interpreter::Python => Some("cython"),
            Interpreter::Python3 => Some("cython3"),
            Interpreter::PyPy => None,
        }
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpreter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Interpreter::Python),
            "python3" => Ok(Interpreter::Python3),
            "pypy" => Ok(Interpreter::PyPy),
            other => Err(Error::UnknownInterpreter {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_identifiers() {
        for interp in [Interpreter::Python, Interpreter::Python3, Interpreter::PyPy] {
            assert_eq!(interp.as_str().parse::<Interpreter>().unwrap(), interp);
        }
    }

    #[test]
    fn test_buildsystem_legacy_remap() {
        assert_eq!(Interpreter::Python.buildsystem(), "python2");
        assert_eq!(Interpreter::Python3.buildsystem(), "python3");
        assert_eq!(Interpreter::PyPy.buildsystem(), "pypy");
    }

    #[test]
    fn test_cython_packages() {
        assert_eq!(Interpreter::Python.cython_package(), Some("cython"));
        assert_eq!(Interpreter::Python3.cython_package(), Some("cython3"));
        assert_eq!(Interpreter::PyPy.cython_package(), None);
    }

    #[test]
    fn test_unknown_interpreter_is_an_error() {
        let err = "jython".parse::<Interpreter>().unwrap_err();
        assert!(err.to_string().contains("jython"));
    }
}
