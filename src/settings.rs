use crate::config::{ReseedPolicy, TreeConfig};
use crate::stage::StagePolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Optional settings file; every key may be left out
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tree: TreeSettings,
    #[serde(default)]
    pub stage: StagePolicy,
}

#[derive(Debug, Default, Deserialize)]
pub struct TreeSettings {
    pub life: Option<u32>,
    pub multiplier: Option<u32>,
    pub leaves: Option<Vec<String>>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub time_step: Option<f32>,
    pub time_wait: Option<f64>,
    pub reseed: Option<ReseedPolicy>,
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring unreadable settings");
                Self::default()
            }),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read settings");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("habitree")
            .join("config.toml")
    }

    /// Defaults with the file's tree settings applied
    pub fn tree_config(&self) -> TreeConfig {
        let defaults = TreeConfig::default();
        let tree = &self.tree;
        TreeConfig {
            life_start: tree.life.unwrap_or(defaults.life_start),
            multiplier: tree.multiplier.unwrap_or(defaults.multiplier),
            leaves: tree.leaves.clone().unwrap_or(defaults.leaves.clone()),
            width: tree.width.unwrap_or(defaults.width),
            height: tree.height.unwrap_or(defaults.height),
            time_step: tree.time_step.unwrap_or(defaults.time_step),
            time_wait: tree.time_wait.unwrap_or(defaults.time_wait),
            reseed: tree.reseed.unwrap_or(defaults.reseed),
            ..defaults
        }
    }
}
