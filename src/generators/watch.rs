//! The `debian/watch` generator: a pure template render, no context
//! augmentation beyond what earlier stages already set.

use std::path::Path;

use crate::context::Context;
use crate::error::Result;
use crate::render::{render_artifact, Renderer};

pub fn generate(dpath: &Path, ctx: &mut Context, renderer: &Renderer) -> Result<()> {
    render_artifact(renderer, dpath, ctx, "watch", |_, _| Ok(()))
}
