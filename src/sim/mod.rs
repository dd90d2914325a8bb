//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod director;
pub mod field;
pub mod geom;
pub mod hazard;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{collide_player, overlapping_hazards};
pub use director::{Banner, Director, GOAL_DISTANCE, STAGES, Stage, Weather, stage_for_distance};
pub use field::{Backdrop, StarField};
pub use geom::Rect;
pub use hazard::{Hazard, HazardKind};
pub use player::{FlightContext, Overlay, Player};
pub use state::{Dialog, GameEvent, GamePhase, GameState};
pub use tick::{InputEvent, TickInput, tick};
