//! Broad-phase collision between the glider and hazards
//!
//! Plain AABB overlap. Hazards are not removed on contact; the overlay's
//! no-restart rule keeps a lingering hazard from hitting twice.

use super::geom::Rect;
use super::hazard::Hazard;
use super::player::Player;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// IDs of hazards whose collider overlaps `target`, in hazard order
pub fn overlapping_hazards(target: &Rect, hazards: &[Hazard]) -> Vec<u32> {
    hazards
        .iter()
        .filter(|h| h.rect().overlaps(target))
        .map(|h| h.id)
        .collect()
}

/// Report every overlapping hazard to the player. Returns the hit count.
pub fn collide_player(
    player: &mut Player,
    hazards: &[Hazard],
    now: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> usize {
    if !player.alive {
        return 0;
    }
    let hits = overlapping_hazards(&player.rect(), hazards);
    for id in &hits {
        log::trace!("Player touched hazard {}", id);
        player.on_collision(now, tuning, events);
    }
    hits.len()
}
