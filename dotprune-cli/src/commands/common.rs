use std::path::Path;

use anyhow::Context;
use dotprune::{
    config::Configuration,
    metadata::{
        loader::{JsonModelProvider, ModelProvider},
        module::AssemblyDef,
    },
};

/// Load and validate a policy document.
pub fn load_config(path: &Path) -> anyhow::Result<Configuration> {
    Configuration::from_file(path)
        .with_context(|| format!("failed to load policy: {}", path.display()))
}

/// Load a model document.
pub fn load_model(path: &Path) -> anyhow::Result<AssemblyDef> {
    JsonModelProvider::new()
        .load(path)
        .with_context(|| format!("failed to load model document: {}", path.display()))
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
