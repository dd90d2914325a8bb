//! Pacific Glide - keep a glider airborne from Tokyo to San Francisco
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight controller, director, hazards)
//! - `draw`: Display list describing what to draw each frame
//! - `audio`: Fire-and-forget sound/music seam
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod draw;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz, physics constants are per tick)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Height of the visible sea band at the bottom of the screen
    pub const SEA_LEVEL: f32 = 40.0;
    /// Y coordinate of the water surface
    pub const WATER_LINE: f32 = SCREEN_HEIGHT - SEA_LEVEL;
    /// The glider is lost once its centre sinks below this line
    pub const DEATH_LINE: f32 = WATER_LINE - 10.0;

    /// Player sprite/collider size
    pub const PLAYER_SIZE: f32 = 32.0;

    /// Flight tiers: 0 is idle, 1..=MAX_TIER are flying
    pub const MAX_TIER: u8 = 4;

    /// World scroll speed limits (pixels per tick)
    pub const SPEED_MIN: f32 = 1.0;
    pub const SPEED_MAX: f32 = 3.0;

    /// Scrolled pixels per displayed kilometre
    pub const DISTANCE_PER_KM: f32 = 2.5;
}

/// Wrap `value` into `[min, min + span)`
#[inline]
pub fn wrap_into(value: f32, min: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return min;
    }
    let wrapped = min + (value - min).rem_euclid(span);
    // rem_euclid (or the addition) may round up to exactly `min + span`
    if wrapped >= min + span { min } else { wrapped }
}

/// Animation frame for a looping cycle of `frames` at `freq` Hz
#[inline]
pub fn phase_frame(time_secs: f32, freq: f32, frames: u32) -> u32 {
    if frames == 0 {
        return 0;
    }
    ((time_secs * freq).max(0.0) as u32) % frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_into() {
        assert_eq!(wrap_into(5.0, 0.0, 10.0), 5.0);
        assert_eq!(wrap_into(12.0, 0.0, 10.0), 2.0);
        assert_eq!(wrap_into(-3.0, 0.0, 10.0), 7.0);
        assert_eq!(wrap_into(-20.0, -10.0, 10.0), -10.0);
        assert_eq!(wrap_into(3.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_phase_frame() {
        assert_eq!(phase_frame(0.0, 4.0, 2), 0);
        assert_eq!(phase_frame(0.26, 4.0, 2), 1);
        assert_eq!(phase_frame(0.5, 4.0, 2), 0);
        assert_eq!(phase_frame(1.0, 4.0, 0), 0);
    }
}
