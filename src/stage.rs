//! Habit-tracker trees: a stored seed and growth stage map to a tree.

use crate::config::TreeConfig;
use crate::error::Result;
use crate::grower::generate;
use crate::render::{render, CellFormatter};
use serde::Deserialize;

/// How a habit's stage maps to tree size
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StagePolicy {
    pub base_life: u32,
    pub life_per_stage: u32,
    pub max_life: u32,
    pub max_stage: u32,
    pub multiplier: u32,
    pub width: u16,
    pub height: u16,
    pub leaves: Vec<String>,
}

impl Default for StagePolicy {
    fn default() -> Self {
        Self {
            base_life: 5,
            life_per_stage: 2,
            max_life: 20,
            max_stage: 10,
            multiplier: 5,
            width: 30,
            height: 15,
            leaves: ["@", "#", "*", "%", "&"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StagePolicy {
    /// Stage clamped to `1..=max_stage`
    pub fn clamp_stage(&self, stage: u32) -> u32 {
        stage.clamp(1, self.max_stage.max(1))
    }

    /// Life for a stage; never decreases as the stage grows
    pub fn life_for(&self, stage: u32) -> u32 {
        let stage = self.clamp_stage(stage);
        self.base_life
            .saturating_add(stage.saturating_mul(self.life_per_stage))
            .min(self.max_life)
    }

    /// Tree configuration for a habit. A stored seed of 0 is pinned to 1, so a
    /// habit never falls back to a clock seed.
    pub fn config_for(&self, seed: u64, stage: u32) -> TreeConfig {
        TreeConfig {
            seed: seed.max(1),
            life_start: self.life_for(stage),
            multiplier: self.multiplier,
            leaves: self.leaves.clone(),
            width: self.width,
            height: self.height,
            ..TreeConfig::default()
        }
    }
}

/// Render the tree for a habit at its current stage
pub fn render_for_stage(
    seed: u64,
    stage: u32,
    policy: &StagePolicy,
    formatter: &dyn CellFormatter,
) -> Result<String> {
    let tree = generate(&policy.config_for(seed, stage))?;
    Ok(render(&tree.canvas, formatter))
}
