pub mod agents;
pub mod config;
pub mod detect;
pub mod init;
pub mod resolve;
pub mod rules;

use anyhow::Context;
use std::path::Path;
use steer_core::Catalog;

/// Load the full catalog or fail with the first build error.
pub fn load_catalog(root: &Path) -> anyhow::Result<Catalog> {
    Catalog::load(root).with_context(|| format!("failed to load catalog from {}", root.display()))
}
