//! Calculator configuration: where the tables live and what the form starts with.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ranking::{RankingInputs, Target};

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_catalog_file() -> String {
    "seeds.json".to_string()
}

fn default_phases_file() -> String {
    "Plant.json".to_string()
}

fn default_images_file() -> String {
    "seed_mapping.json".to_string()
}

fn default_level() -> i32 {
    70
}

fn default_plots() -> i32 {
    24
}

fn default_fertilizer() -> bool {
    true
}

fn default_top() -> usize {
    20
}

fn default_asset_base_url() -> String {
    "/".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub defaults: DefaultInputs,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
    #[serde(default = "default_phases_file")]
    pub phases_file: String,
    #[serde(default = "default_images_file")]
    pub images_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            phases_file: default_phases_file(),
            images_file: default_images_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultInputs {
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default = "default_plots")]
    pub plots: i32,
    #[serde(default = "default_fertilizer")]
    pub fertilizer: bool,
    #[serde(default)]
    pub target: Target,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            level: default_level(),
            plots: default_plots(),
            fertilizer: default_fertilizer(),
            target: Target::default(),
        }
    }
}

impl DefaultInputs {
    pub fn to_inputs(&self) -> RankingInputs {
        RankingInputs {
            level: self.level,
            plots: self.plots,
            use_fertilizer: self.fertilizer,
            target: self.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Leaderboard length.
    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top: default_top(),
            asset_base_url: default_asset_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // serde_yaml reads an empty document as null rather than an empty map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid calculator config")
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<AppConfig> {
        let path = self.base_dir.join(file);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        AppConfig::from_yaml_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Directory holding `file`. Relative paths inside the config resolve against it.
    pub fn config_dir(&self, file: impl AsRef<Path>) -> PathBuf {
        let path = self.base_dir.join(file);
        match path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.base_dir.clone(),
        }
    }

    /// Like [`ConfigLoader::load`], but a missing file means built-in defaults.
    pub fn load_or_default(&self, file: impl AsRef<Path>) -> Result<AppConfig> {
        let path = self.base_dir.join(file.as_ref());
        if path.exists() {
            self.load(file)
        } else {
            Ok(AppConfig::default())
        }
    }
}
