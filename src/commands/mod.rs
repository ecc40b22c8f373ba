//! Command implementations for the py2deb CLI

pub mod debianize;
