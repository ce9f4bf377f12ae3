//! TOML configuration.
//!
//! ```toml
//! [vocabulary]
//! item-tag = "Node"
//! unique-names = false
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use itemtree_store::Vocabulary;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeConfig {
    #[serde(default, skip_serializing_if = "Vocabulary::is_default")]
    pub vocabulary: Vocabulary,
}

impl TreeConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unexpected types.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }
}

/// Loads a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>) -> Result<TreeConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    TreeConfig::parse(&content).with_context(|| format!("in {}", path.display()))
}
