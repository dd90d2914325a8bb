//! Airborne hazards
//!
//! Every hazard drifts left at the world speed. The vertical component
//! follows a per-kind velocity law looked up in `VELOCITY_LAWS`.

use glam::Vec2;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::phase_frame;

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Erratic drifter: decaying vertical wander with random kicks
    Glider,
    /// Straight-line flyer with a fixed tilt chosen at spawn
    Aircraft,
    /// Lightning bolt: holds its course until a rare sudden jump
    Bolt,
}

/// One in `KICK_ODDS` ticks reseeds a Glider/Bolt vertical velocity
pub const KICK_ODDS: u32 = 30;
/// Glider kick range (+/-)
pub const GLIDER_KICK: f32 = 2.0;
/// Bolt kick range (+/-)
pub const BOLT_KICK: f32 = 3.0;
/// Aircraft tilt range at spawn (+/-)
pub const AIRCRAFT_TILT: f32 = 0.5;

/// Per-tick update of a hazard's vertical velocity
type VelocityLaw = fn(&mut f32, &mut dyn RngCore);

/// Indexed by `HazardKind as usize`
const VELOCITY_LAWS: [VelocityLaw; 3] = [glider_law, aircraft_law, bolt_law];

fn glider_law(vy: &mut f32, rng: &mut dyn RngCore) {
    *vy -= *vy * 0.5;
    if rng.random_range(0..KICK_ODDS) == 0 {
        *vy = rng.random_range(-GLIDER_KICK..=GLIDER_KICK);
    }
}

fn aircraft_law(_vy: &mut f32, _rng: &mut dyn RngCore) {}

fn bolt_law(vy: &mut f32, rng: &mut dyn RngCore) {
    if rng.random_range(0..KICK_ODDS) == 0 {
        *vy = rng.random_range(-BOLT_KICK..=BOLT_KICK);
    }
}

impl HazardKind {
    /// Collider size
    pub fn size(self) -> Vec2 {
        match self {
            HazardKind::Glider => Vec2::new(24.0, 16.0),
            HazardKind::Aircraft => Vec2::new(32.0, 12.0),
            HazardKind::Bolt => Vec2::new(8.0, 24.0),
        }
    }

    /// Animation frequency (frames per second)
    pub fn animation_hz(self) -> f32 {
        match self {
            HazardKind::Glider => 6.0,
            HazardKind::Aircraft => 10.0,
            HazardKind::Bolt => 15.0,
        }
    }

    /// First sprite index of the kind's two-frame animation
    pub fn sprite_base(self) -> u32 {
        match self {
            HazardKind::Glider => 4,
            HazardKind::Aircraft => 6,
            HazardKind::Bolt => 8,
        }
    }

    /// Vertical velocity at spawn
    pub fn initial_vertical<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        match self {
            HazardKind::Aircraft => rng.random_range(-AIRCRAFT_TILT..=AIRCRAFT_TILT),
            HazardKind::Glider | HazardKind::Bolt => 0.0,
        }
    }

    fn law(self) -> VelocityLaw {
        VELOCITY_LAWS[self as usize]
    }
}

/// Shared read-only world values a hazard needs for one tick
#[derive(Debug, Clone, Copy)]
pub struct HazardContext {
    /// Current world scroll speed
    pub speed: f32,
    /// Simulation clock in seconds
    pub time_secs: f32,
}

/// A hazard entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current animation frame (0 or 1)
    pub frame: u32,
}

impl Hazard {
    /// Create a hazard at `pos` with its kind's spawn velocity
    pub fn spawn<R: Rng + ?Sized>(id: u32, kind: HazardKind, pos: Vec2, speed: f32, rng: &mut R) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::new(-speed, kind.initial_vertical(rng)),
            frame: 0,
        }
    }

    /// Collider rectangle
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.kind.size())
    }

    /// Advance one tick: apply the kind's velocity law, then move
    pub fn update<R: RngCore>(&mut self, ctx: &HazardContext, rng: &mut R) {
        self.vel.x = -ctx.speed;
        (self.kind.law())(&mut self.vel.y, rng);
        self.pos += self.vel;
        self.frame = phase_frame(ctx.time_secs, self.kind.animation_hz(), 2);
    }

    /// Fully past the left screen edge
    pub fn is_offscreen(&self) -> bool {
        self.rect().max().x < 0.0
    }
}
