//! Preparation config helpers.
//!
//! The config only renames the literals the resolver and classifier look for;
//! the order of the decision gates is fixed.
use crate::resolve::ResolveRules;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_DOCUMENT_MARKER: &str = "\\documentclass";
pub const DEFAULT_COMPANION_EXTENSION: &str = "bbl";
pub const TEX_SUFFIX: &str = ".tex";

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_conventional_names() -> Vec<String> {
    vec!["ms.tex".to_string(), "main.tex".to_string()]
}

fn default_document_marker() -> String {
    DEFAULT_DOCUMENT_MARKER.to_string()
}

fn default_companion_extension() -> String {
    DEFAULT_COMPANION_EXTENSION.to_string()
}

fn default_archive_suffixes() -> Vec<String> {
    vec![".tar.gz".to_string(), ".tgz".to_string()]
}

/// Literals used while staging inputs and picking the entry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// File names that win outright, checked in order.
    #[serde(default = "default_conventional_names")]
    pub conventional_names: Vec<String>,
    #[serde(default = "default_document_marker")]
    pub document_marker: String,
    /// Extension (without the dot) of the bibliography companion file.
    #[serde(default = "default_companion_extension")]
    pub companion_extension: String,
    #[serde(default = "default_archive_suffixes")]
    pub archive_suffixes: Vec<String>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            conventional_names: default_conventional_names(),
            document_marker: default_document_marker(),
            companion_extension: default_companion_extension(),
            archive_suffixes: default_archive_suffixes(),
        }
    }
}

impl PrepareConfig {
    /// Project the resolver-facing subset of the config.
    pub fn resolve_rules(&self) -> ResolveRules {
        ResolveRules {
            conventional_names: self.conventional_names.clone(),
            document_marker: self.document_marker.clone(),
            companion_extension: self.companion_extension.clone(),
        }
    }
}

/// Render a pretty JSON config stub with every default spelled out.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&PrepareConfig::default()).context("serialize config stub")
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<PrepareConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: PrepareConfig =
        serde_json::from_slice(&bytes).context("parse texprep config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate schema version and the shape of each literal.
pub fn validate_config(config: &PrepareConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported texprep config schema_version {}",
            config.schema_version
        ));
    }
    for name in &config.conventional_names {
        validate_plain_tex_name(name)?;
    }
    if config.document_marker.is_empty() {
        return Err(anyhow!("document_marker must be non-empty"));
    }
    let ext = config.companion_extension.as_str();
    if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
        return Err(anyhow!(
            "companion_extension must be a bare extension like \"bbl\" (got {ext:?})"
        ));
    }
    if config.archive_suffixes.is_empty() {
        return Err(anyhow!("archive_suffixes must list at least one suffix"));
    }
    if let Some(bad) = config
        .archive_suffixes
        .iter()
        .find(|suffix| !suffix.starts_with('.') || suffix.len() < 2)
    {
        return Err(anyhow!(
            "archive_suffixes entries must start with '.' (got {bad:?})"
        ));
    }
    Ok(())
}

fn validate_plain_tex_name(name: &str) -> Result<()> {
    let plain = !name.contains(['/', '\\']) && name != TEX_SUFFIX;
    if !plain || !name.ends_with(TEX_SUFFIX) {
        return Err(anyhow!(
            "conventional_names entries must be plain .tex file names (got {name:?})"
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
