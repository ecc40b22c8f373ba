//! Maintainer identity resolution.
//!
//! The changelog and control generators need a "who is creating this
//! package" identity. Reading it from ambient global state would make the
//! pipeline hard to test, so the identity is a plain value constructed once
//! (normally from the environment, the same variables `dch` honors) and
//! injected into the Context Builder.

use std::env;
use std::fmt;

/// The identity stamped into generated changelog entries and used as the
/// default package maintainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maintainer {
    pub name: String,
    pub email: String,
}

impl Maintainer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Maintainer {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Resolve the identity from the environment.
    ///
    /// Checks `DEBFULLNAME`, then `NAME`, and `DEBEMAIL`, then `EMAIL`,
    /// the same lookup order the Debian devscripts use. Falls back to a
    /// neutral placeholder so construction never fails.
    pub fn from_env() -> Self {
        let name = env::var("DEBFULLNAME")
            .or_else(|_| env::var("NAME"))
            .unwrap_or_else(|_| "py2deb".to_string());
        let email = env::var("DEBEMAIL")
            .or_else(|_| env::var("EMAIL"))
            .unwrap_or_else(|_| "py2deb@localhost".to_string());
        Maintainer { name, email }
    }
}

impl fmt::Display for Maintainer {
    /// Formats as the RFC-822 style `Name <email>` used in control files.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
