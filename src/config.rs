use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// User preferences from `prefs.toml`. Every field is optional; command-line flags win
/// over these, and these win over the built-in constants.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
  pub theme_name: Option<String>,
  pub player: Option<String>,
  pub player_args: Option<Vec<String>>,
  pub roots: Option<Vec<PathBuf>>,
  pub cache_file: Option<PathBuf>,
}

pub fn project_dirs() -> Option<ProjectDirs> {
  ProjectDirs::from("", "", "pimp")
}

impl Config {
  /// `<config dir>/pimp/prefs.toml`, if the platform has a config dir.
  pub fn path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("prefs.toml"))
  }

  /// Preferences from `path`; a missing or malformed file gives the defaults.
  pub fn load_from(path: &Path) -> Self {
    if let Ok(content) = std::fs::read_to_string(path) {
      match Self::parse(&content) {
        Ok(config) => return config,
        Err(e) => warn!(file = %path.display(), err = %e, "config: ignoring malformed preferences"),
      }
    }
    Self::default()
  }

  pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }

  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
      std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let content = toml::to_string(self).context("Failed to serialize preferences")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
  }
}
