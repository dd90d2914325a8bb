//! Wrap-around background particle fields
//!
//! Clouds, ocean shimmer, rain and snow are all the same thing: a fixed
//! set of particles that scroll with a parallax factor and wrap around
//! their region so the scroll looks endless.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::director::Weather;
use super::geom::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SEA_LEVEL, WATER_LINE};
use crate::settings::QualityPreset;
use crate::wrap_into;

/// Slowest parallax factor (particles on the reference line)
const MIN_SCALE: f32 = 0.25;

/// One background particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Centre position
    pub pos: Vec2,
    /// Parallax factor applied to the field velocity
    pub scale: f32,
}

/// A toroidal particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarField {
    region: Rect,
    /// Particle draw size
    pub size: Vec2,
    particles: Vec<Particle>,
}

impl StarField {
    /// Scatter `count` particles over `region`.
    ///
    /// Each particle's parallax factor grows with its distance from
    /// `reference_y`, from `MIN_SCALE` on the line up to 1.0 at the
    /// farthest edge of the region.
    pub fn new<R: Rng + ?Sized>(region: Rect, count: usize, reference_y: f32, size: Vec2, rng: &mut R) -> Self {
        let span = (region.min.y - reference_y)
            .abs()
            .max((region.max().y - reference_y).abs());
        let particles = (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    region.min.x + rng.random::<f32>() * region.width(),
                    region.min.y + rng.random::<f32>() * region.height(),
                );
                let depth = if span > 0.0 {
                    ((pos.y - reference_y).abs() / span).min(1.0)
                } else {
                    1.0
                };
                Particle {
                    pos,
                    scale: MIN_SCALE + (1.0 - MIN_SCALE) * depth,
                }
            })
            .collect();
        Self {
            region,
            size,
            particles,
        }
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Move every particle by `velocity * scale`, wrapping at the edges
    pub fn scroll(&mut self, velocity: Vec2) {
        let region = self.region;
        for p in &mut self.particles {
            p.pos += velocity * p.scale;
            p.pos.x = wrap_into(p.pos.x, region.min.x, region.width());
            p.pos.y = wrap_into(p.pos.y, region.min.y, region.height());
        }
    }
}

/// Base particle counts before the quality preset is applied
pub const CLOUD_COUNT: usize = 20;
pub const OCEAN_COUNT: usize = 100;
pub const RAIN_COUNT: usize = 60;
pub const SNOW_COUNT: usize = 40;

/// All background fields of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub clouds: StarField,
    pub ocean: StarField,
    pub rain: StarField,
    pub snow: StarField,
}

impl Backdrop {
    /// Build the fields with particle counts scaled by `quality`
    pub fn new<R: Rng + ?Sized>(quality: QualityPreset, rng: &mut R) -> Self {
        let count = |base: usize| quality.particle_count(base);
        let sky = Rect::new(0.0, 0.0, SCREEN_WIDTH, WATER_LINE);
        let sea = Rect::new(0.0, WATER_LINE, SCREEN_WIDTH, SEA_LEVEL);
        let screen = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
        Self {
            clouds: StarField::new(sky, count(CLOUD_COUNT), WATER_LINE, Vec2::new(20.0, 10.0), rng),
            ocean: StarField::new(sea, count(OCEAN_COUNT), WATER_LINE, Vec2::new(8.0, 2.0), rng),
            rain: StarField::new(screen, count(RAIN_COUNT), SCREEN_HEIGHT * 2.0, Vec2::new(1.0, 6.0), rng),
            snow: StarField::new(screen, count(SNOW_COUNT), SCREEN_HEIGHT * 2.0, Vec2::new(2.0, 2.0), rng),
        }
    }

    /// Scroll for one tick. Clouds and ocean always move; rain and snow
    /// only while their weather is active.
    pub fn scroll(&mut self, speed: f32, weather: Weather) {
        self.clouds.scroll(Vec2::new(-speed, 0.0));
        self.ocean.scroll(Vec2::new(-speed * 4.0, 0.0));
        if weather.is_rainy() {
            self.rain.scroll(Vec2::new(-speed * 2.0, 8.0));
        }
        if weather == Weather::Snow {
            self.snow.scroll(Vec2::new(-speed, 1.5));
        }
    }

    /// The precipitation field visible in `weather`, if any
    pub fn precipitation(&self, weather: Weather) -> Option<&StarField> {
        match weather {
            Weather::Rain | Weather::Storm => Some(&self.rain),
            Weather::Snow => Some(&self.snow),
            Weather::Clear => None,
        }
    }
}
