//! Configuration handling for the biofiles CLI
//!
//! Supports loading configuration from biofiles.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use biofiles_core::{NamingConfig, SelectRequest, SelectionMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "biofiles.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub select: SelectConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Neighbour CDSs taken before each gene
    #[serde(default = "default_n_before")]
    pub n_before: usize,

    /// Neighbour CDSs taken after each gene
    #[serde(default = "default_n_after")]
    pub n_after: usize,

    /// Write the windows of all requested genes instead of the last one
    #[serde(default)]
    pub all_windows: bool,

    /// Subdirectory receiving selected CDS files
    #[serde(default = "default_out_subdir")]
    pub out_subdir: String,
}

fn default_n_before() -> usize { SelectRequest::default().n_before }
fn default_n_after() -> usize { SelectRequest::default().n_after }
fn default_out_subdir() -> String { SelectRequest::default().out_subdir }

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            n_before: default_n_before(),
            n_after: default_n_after(),
            all_windows: false,
            out_subdir: default_out_subdir(),
        }
    }
}

impl SelectConfig {
    pub fn mode(&self, all_windows_flag: bool) -> SelectionMode {
        if all_windows_flag || self.all_windows {
            SelectionMode::PerGene
        } else {
            SelectionMode::LastGene
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::debug!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::debug!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }
}
