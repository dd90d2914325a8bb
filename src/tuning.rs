//! Data-driven game balance
//!
//! Every number a designer would want to tweak without touching the
//! simulation code. `Tuning::default()` is the canonical rule set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TIER, SPEED_MAX, SPEED_MIN};
use crate::error::ConfigError;

/// Balance numbers for flight, pacing and run sequencing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per tick while not flapping
    pub gravity: f32,
    /// Vertical velocity is clamped to +/- this value
    pub max_vertical_speed: f32,
    /// Flap duration in ticks, indexed by tier 1..=4
    pub flap_ticks: Vec<u32>,
    /// Upward impulse per flapping tick, indexed by tier 1..=4
    pub flap_impulse: Vec<f32>,
    /// Fraction of vertical velocity kept on each flapping tick
    pub flap_decay: f32,
    /// Length of the post-collision stiff-controls window (seconds)
    pub overlay_secs: f32,
    /// How long a stage message stays on screen (seconds)
    pub message_secs: f32,
    /// Delay between death and restart/end dialog (seconds)
    pub restart_delay_secs: f32,
    /// How long each end-dialog line is shown (seconds)
    pub dialog_line_secs: f32,
    /// World speed limits
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_vertical_speed: 4.0,
            flap_ticks: vec![20, 10, 5, 5],
            flap_impulse: vec![1.0, 0.6, 0.3, 0.1],
            flap_decay: 0.5,
            overlay_secs: 2.0,
            message_secs: 2.0,
            restart_delay_secs: 2.0,
            dialog_line_secs: 3.0,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning: Tuning = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every value is inside the domain the simulation assumes
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tiers = MAX_TIER as usize;
        if self.flap_ticks.len() != tiers {
            return Err(ConfigError::Invalid(format!(
                "flap_ticks needs {} entries, got {}",
                tiers,
                self.flap_ticks.len()
            )));
        }
        if self.flap_impulse.len() != tiers {
            return Err(ConfigError::Invalid(format!(
                "flap_impulse needs {} entries, got {}",
                tiers,
                self.flap_impulse.len()
            )));
        }
        if self.max_vertical_speed <= 0.0 {
            return Err(ConfigError::Invalid("max_vertical_speed must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.flap_decay) {
            return Err(ConfigError::Invalid("flap_decay must be within 0..=1".into()));
        }
        let windows = [
            ("overlay_secs", self.overlay_secs),
            ("message_secs", self.message_secs),
            ("restart_delay_secs", self.restart_delay_secs),
            ("dialog_line_secs", self.dialog_line_secs),
        ];
        for (name, secs) in windows {
            if secs <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.speed_min <= 0.0 || self.speed_min > self.speed_max {
            return Err(ConfigError::Invalid(format!(
                "speed range {}..{} is empty",
                self.speed_min, self.speed_max
            )));
        }
        Ok(())
    }

    /// Flap duration for a flying tier (0 when idle)
    pub fn flap_ticks_for(&self, tier: u8) -> u32 {
        tier_entry(&self.flap_ticks, tier).copied().unwrap_or(0)
    }

    /// Flap impulse for a flying tier (0 when idle)
    pub fn flap_impulse_for(&self, tier: u8) -> f32 {
        tier_entry(&self.flap_impulse, tier).copied().unwrap_or(0.0)
    }
}

fn tier_entry<T>(table: &[T], tier: u8) -> Option<&T> {
    if tier == 0 || table.is_empty() {
        return None;
    }
    let index = (tier as usize - 1).min(table.len() - 1);
    table.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.flap_ticks_for(1), 20);
        assert_eq!(tuning.flap_ticks_for(4), 5);
        assert_eq!(tuning.flap_ticks_for(0), 0);
        assert!((tuning.flap_impulse_for(2) - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.flap_ticks, vec![20, 10, 5, 5]);
    }

    #[test]
    fn test_rejects_short_tables() {
        let err = Tuning::from_json(r#"{ "flap_ticks": [20, 10, 5] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ gravity: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let tuning = Tuning {
            speed_min: 3.0,
            speed_max: 1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/pacific-glide/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
