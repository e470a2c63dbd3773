use crate::error::{Result, TreeError};
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Leaf glyph used when none are configured
pub const DEFAULT_LEAF: &str = "&";

/// Extra work-list headroom on top of `life_start * multiplier`
const DEPTH_SLACK: usize = 16;

/// Largest starting life the growth arithmetic accepts
pub const MAX_LIFE: u32 = 10_000;

/// Largest branch multiplier the growth arithmetic accepts
pub const MAX_MULTIPLIER: u32 = 1_000;

/// Longest step or wait delay, in seconds (one day)
pub const MAX_DELAY_SECS: f64 = 86_400.0;

/// How a looping run picks the seed of its next tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReseedPolicy {
    /// Derive the next seed from the wall clock
    #[default]
    Clock,
    /// Use the previous seed plus one
    Increment,
}

impl ReseedPolicy {
    pub fn next_seed(self, previous: u64) -> u64 {
        match self {
            ReseedPolicy::Clock => clock_seed(),
            ReseedPolicy::Increment => previous.wrapping_add(1).max(1),
        }
    }
}

/// Configuration for one tree generation (or a loop of them)
#[derive(Clone, Debug)]
pub struct TreeConfig {
    /// 0 derives the seed from the current time
    pub seed: u64,
    pub life_start: u32,
    pub multiplier: u32,
    pub leaves: Vec<String>,
    pub width: u16,
    pub height: u16,
    /// Seconds between animation frames
    pub time_step: f32,
    /// Seconds between trees when looping
    pub time_wait: f64,
    pub live: bool,
    pub infinite: bool,
    pub screensaver: bool,
    pub reseed: ReseedPolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            life_start: 32,
            multiplier: 5,
            leaves: vec![DEFAULT_LEAF.to_string()],
            width: 80,
            height: 24,
            time_step: 0.03,
            time_wait: 4.0,
            live: false,
            infinite: false,
            screensaver: false,
            reseed: ReseedPolicy::Clock,
        }
    }
}

impl TreeConfig {
    /// Reject configurations that cannot grow a tree.
    pub fn validate(&self) -> Result<()> {
        if self.life_start == 0 {
            return Err(TreeError::Config("life must be greater than zero".into()));
        }
        if self.life_start > MAX_LIFE {
            return Err(TreeError::Config(format!(
                "life must be at most {MAX_LIFE} (got {})",
                self.life_start
            )));
        }
        if self.multiplier == 0 {
            return Err(TreeError::Config("multiplier must be greater than zero".into()));
        }
        if self.multiplier > MAX_MULTIPLIER {
            return Err(TreeError::Config(format!(
                "multiplier must be at most {MAX_MULTIPLIER} (got {})",
                self.multiplier
            )));
        }
        check_delay("step time", f64::from(self.time_step))?;
        check_delay("wait time", self.time_wait)?;
        if self.width == 0 || self.height == 0 {
            return Err(TreeError::Config(format!(
                "canvas must not be empty (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The configured seed, or a clock-derived one when it is 0
    pub fn resolved_seed(&self) -> u64 {
        if self.seed == 0 {
            clock_seed()
        } else {
            self.seed
        }
    }

    /// Leaves with blanks removed, falling back to the default glyph
    pub fn normalized_leaves(&self) -> Vec<String> {
        let leaves: Vec<String> = self
            .leaves
            .iter()
            .map(|leaf| leaf.trim().to_string())
            .filter(|leaf| !leaf.is_empty())
            .collect();
        if leaves.is_empty() {
            vec![DEFAULT_LEAF.to_string()]
        } else {
            leaves
        }
    }

    /// Deepest the pending-branch work list may get
    pub fn depth_limit(&self) -> usize {
        self.life_start as usize * self.multiplier as usize + DEPTH_SLACK
    }

    pub fn step_delay(&self) -> Duration {
        delay(f64::from(self.time_step))
    }

    pub fn wait_delay(&self) -> Duration {
        delay(self.time_wait)
    }
}

fn check_delay(name: &str, secs: f64) -> Result<()> {
    if !secs.is_finite() || secs > MAX_DELAY_SECS {
        return Err(TreeError::Config(format!(
            "{name} must be a finite number of seconds up to {MAX_DELAY_SECS} (got {secs})"
        )));
    }
    Ok(())
}

/// Negative delays mean no delay; anything unrepresentable saturates
fn delay(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs.min(MAX_DELAY_SECS)).unwrap_or(Duration::ZERO)
}

/// Parse a comma-separated leaf list as given on the command line
pub fn parse_leaves(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.to_string()).collect()
}

/// Seed derived from the wall clock; never 0
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(1) // Fallback seed for misconfigured system clocks
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = TreeConfig::default();
        assert_eq!(config.life_start, 32);
        assert_eq!(config.multiplier, 5);
        assert_eq!(config.leaves, vec!["&".to_string()]);
        assert_eq!((config.width, config.height), (80, 24));
        assert!((config.time_step - 0.03).abs() < f32::EPSILON);
        assert!((config.time_wait - 4.0).abs() < f64::EPSILON);
        assert!(!config.live && !config.infinite && !config.screensaver);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_life_is_rejected() {
        let config = TreeConfig { life_start: 0, ..TreeConfig::default() };
        assert!(matches!(config.validate(), Err(TreeError::Config(_))));
    }

    #[test]
    fn zero_multiplier_is_rejected() {
        let config = TreeConfig { multiplier: 0, ..TreeConfig::default() };
        assert!(matches!(config.validate(), Err(TreeError::Config(_))));
    }

    #[test]
    fn growth_values_are_capped() {
        let life = TreeConfig { life_start: MAX_LIFE + 1, ..TreeConfig::default() };
        let multiplier = TreeConfig { multiplier: 1 << 31, ..TreeConfig::default() };
        assert!(matches!(life.validate(), Err(TreeError::Config(_))));
        assert!(matches!(multiplier.validate(), Err(TreeError::Config(_))));

        let biggest = TreeConfig {
            life_start: MAX_LIFE,
            multiplier: MAX_MULTIPLIER,
            ..TreeConfig::default()
        };
        assert!(biggest.validate().is_ok());
    }

    #[test]
    fn unbounded_delays_are_rejected() {
        for time_wait in [f64::INFINITY, f64::NAN, 1e30] {
            let config = TreeConfig { time_wait, ..TreeConfig::default() };
            assert!(matches!(config.validate(), Err(TreeError::Config(_))), "{time_wait}");
            assert!(config.wait_delay() <= Duration::from_secs_f64(MAX_DELAY_SECS));
        }
        let step = TreeConfig { time_step: f32::INFINITY, ..TreeConfig::default() };
        assert!(matches!(step.validate(), Err(TreeError::Config(_))));
        assert_eq!(step.step_delay(), Duration::from_secs_f64(MAX_DELAY_SECS));
    }

    #[test]
    fn negative_delays_mean_no_pause() {
        let config = TreeConfig { time_step: -1.0, time_wait: -3.0, ..TreeConfig::default() };
        assert!(config.validate().is_ok());
        assert_eq!(config.step_delay(), Duration::ZERO);
        assert_eq!(config.wait_delay(), Duration::ZERO);
        assert_eq!(TreeConfig::default().wait_delay(), Duration::from_secs(4));
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let narrow = TreeConfig { width: 0, ..TreeConfig::default() };
        let flat = TreeConfig { height: 0, ..TreeConfig::default() };
        assert!(matches!(narrow.validate(), Err(TreeError::Config(_))));
        assert!(matches!(flat.validate(), Err(TreeError::Config(_))));
    }

    #[test]
    fn empty_leaves_fall_back_to_default() {
        let config = TreeConfig { leaves: vec![], ..TreeConfig::default() };
        assert_eq!(config.normalized_leaves(), vec!["&".to_string()]);

        let blanks = TreeConfig { leaves: parse_leaves(" , ,"), ..TreeConfig::default() };
        assert_eq!(blanks.normalized_leaves(), vec!["&".to_string()]);
    }

    #[test]
    fn leaves_are_trimmed() {
        let config = TreeConfig { leaves: parse_leaves("@, #,*"), ..TreeConfig::default() };
        assert_eq!(config.normalized_leaves(), vec!["@", "#", "*"]);
    }

    #[test]
    fn explicit_seed_is_kept() {
        let config = TreeConfig { seed: 42, ..TreeConfig::default() };
        assert_eq!(config.resolved_seed(), 42);
        assert_ne!(TreeConfig::default().resolved_seed(), 0);
    }

    #[test]
    fn increment_reseed_is_reproducible() {
        assert_eq!(ReseedPolicy::Increment.next_seed(41), 42);
        assert_eq!(ReseedPolicy::Increment.next_seed(u64::MAX), 1);
        assert_ne!(ReseedPolicy::Clock.next_seed(7), 0);
    }

    #[test]
    fn depth_limit_scales_with_growth_potential() {
        let small = TreeConfig { life_start: 4, multiplier: 2, ..TreeConfig::default() };
        let big = TreeConfig { life_start: 40, multiplier: 8, ..TreeConfig::default() };
        assert!(small.depth_limit() < big.depth_limit());
        assert_eq!(small.depth_limit(), 4 * 2 + DEPTH_SLACK);
    }
}
