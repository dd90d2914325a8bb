//! Player flight controller
//!
//! State machine: `Idle -> Tier1..Tier4 -> Dead`. A hazard hit layers a
//! temporary overlay tier one above the base tier; it follows the base
//! tier while active and cannot be restarted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::GameEvent;
use crate::audio::{MusicCue, SoundEffect};
use crate::consts::*;
use crate::phase_frame;
use crate::tuning::Tuning;

/// Horizontal resting position at minimum world speed
pub const PLAYER_HOME_X: f32 = SCREEN_WIDTH * 0.5;
/// How far the glider falls back per unit of extra world speed
pub const PLAYER_DRIFT: f32 = 32.0;
/// Horizontal shadow offset per pixel of height above the water
pub const SHADOW_SLANT: f32 = 0.25;

/// Wing-beat frequency by tier (index 0 is idle)
const ANIMATION_HZ: [f32; 5] = [2.0, 4.0, 6.0, 8.0, 12.0];

/// Temporary tier override after a hazard hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub tier: u8,
    pub expires_at: f32,
}

/// Shared read-only world values the player needs for one tick
#[derive(Debug, Clone, Copy)]
pub struct FlightContext {
    /// Current world scroll speed
    pub speed: f32,
    /// Simulation clock in seconds
    pub time_secs: f32,
}

/// The player's glider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre position
    pub pos: Vec2,
    pub vel_y: f32,
    /// 0 = idle (not started), 1..=MAX_TIER while flying
    pub base_tier: u8,
    /// Ticks of flap impulse remaining
    pub flap_charge: u32,
    pub overlay: Option<Overlay>,
    pub alive: bool,
    /// Simulation time of death
    pub died_at: Option<f32>,
    /// Current animation frame (0 or 1)
    pub frame: u32,
    /// Drop shadow position on the water
    pub shadow: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let pos = Vec2::new(PLAYER_HOME_X, SCREEN_HEIGHT * 0.5);
        Self {
            pos,
            vel_y: 0.0,
            base_tier: 0,
            flap_charge: 0,
            overlay: None,
            alive: true,
            died_at: None,
            frame: 0,
            shadow: shadow_for(pos),
        }
    }

    pub fn is_started(&self) -> bool {
        self.base_tier > 0
    }

    /// Tier used for physics: the overlay when active, never below base
    pub fn effective_tier(&self) -> u8 {
        match self.overlay {
            Some(overlay) => overlay.tier.max(self.base_tier),
            None => self.base_tier,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Button/pointer press (`true`) or release (`false`)
    pub fn set_flapping(&mut self, active: bool, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if !self.alive {
            return;
        }
        if active {
            if self.base_tier == 0 {
                self.base_tier = 1;
                log::info!("Take-off");
                events.push(GameEvent::Started);
                events.push(GameEvent::Music(MusicCue::Flight));
            } else if self.flap_charge == 0 {
                self.flap_charge = tuning.flap_ticks_for(self.effective_tier());
                log::debug!("Flap: {} ticks at tier {}", self.flap_charge, self.effective_tier());
                events.push(GameEvent::Sound(SoundEffect::Flap));
            }
        } else {
            self.flap_charge = 0;
        }
    }

    /// Weather-driven tier change from the director; ignored while idle or dead
    pub fn set_base_tier(&mut self, tier: u8) {
        if !self.alive || self.base_tier == 0 {
            return;
        }
        let tier = tier.clamp(1, MAX_TIER);
        if tier != self.base_tier {
            log::debug!("Base tier {} -> {}", self.base_tier, tier);
        }
        self.base_tier = tier;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.tier = (tier + 1).min(MAX_TIER);
        }
    }

    /// A hazard touched the glider
    pub fn on_collision(&mut self, now: f32, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if !self.alive || !self.is_started() || self.overlay.is_some() {
            return;
        }
        let tier = (self.base_tier + 1).min(MAX_TIER);
        self.overlay = Some(Overlay {
            tier,
            expires_at: now + tuning.overlay_secs,
        });
        log::debug!("Hit: overlay tier {} until {:.2}", tier, now + tuning.overlay_secs);
        events.push(GameEvent::Sound(SoundEffect::Hurt));
    }

    /// Advance one tick
    pub fn update(&mut self, ctx: &FlightContext, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if !self.alive {
            return;
        }
        let now = ctx.time_secs;

        if self.overlay.is_some_and(|o| now >= o.expires_at) {
            log::debug!("Overlay expired");
            self.overlay = None;
        }

        if self.is_started() {
            let tier = self.effective_tier();
            if self.flap_charge > 0 {
                self.vel_y = self.vel_y * tuning.flap_decay - tuning.flap_impulse_for(tier);
                self.flap_charge -= 1;
            } else {
                self.vel_y += tuning.gravity;
            }
            self.vel_y = self
                .vel_y
                .clamp(-tuning.max_vertical_speed, tuning.max_vertical_speed);

            let target_x = PLAYER_HOME_X - (ctx.speed - tuning.speed_min).max(0.0) * PLAYER_DRIFT;
            let fence = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
            let delta = self
                .rect()
                .clamp_move(Vec2::new(target_x - self.pos.x, self.vel_y), &fence);
            self.pos += delta;
        }

        let hz = ANIMATION_HZ[self.effective_tier().min(MAX_TIER) as usize];
        self.frame = phase_frame(now, hz, 2);

        if self.pos.y > DEATH_LINE {
            self.die(now, events);
            return;
        }

        self.shadow = shadow_for(self.pos);
    }

    fn die(&mut self, now: f32, events: &mut Vec<GameEvent>) {
        self.alive = false;
        self.died_at = Some(now);
        self.flap_charge = 0;
        self.overlay = None;
        log::info!("Splash at {:.2}s", now);
        events.push(GameEvent::Sound(SoundEffect::Splash));
        events.push(GameEvent::Music(MusicCue::Stop));
        events.push(GameEvent::PlayerDied { at: now });
    }
}

/// Shadow slides away from the glider the higher it flies
fn shadow_for(pos: Vec2) -> Vec2 {
    let height = (WATER_LINE - pos.y).max(0.0);
    Vec2::new(pos.x + height * SHADOW_SLANT, WATER_LINE)
}
