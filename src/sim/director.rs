//! Environment director
//!
//! Turns travelled distance into pacing: which stage we are in, the
//! weather, how the world speed drifts and when hazards spawn. Given the
//! same distance sequence and RNG stream it produces the same schedule.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::Backdrop;
use super::hazard::HazardKind;
use super::state::GameEvent;
use crate::consts::SCREEN_WIDTH;
use crate::tuning::Tuning;

/// Weather modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
    Storm,
}

impl Weather {
    /// Flight tier the weather imposes on the player
    pub fn base_tier(self) -> u8 {
        match self {
            Weather::Clear => 1,
            Weather::Rain => 2,
            Weather::Storm => 3,
            Weather::Snow => 4,
        }
    }

    pub fn is_rainy(self) -> bool {
        matches!(self, Weather::Rain | Weather::Storm)
    }
}

/// Hazard spawning rules of a stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRule {
    /// Allowed kinds with relative weights
    pub kinds: &'static [(HazardKind, u32)],
    /// Vertical band (min, max) for the spawn centre
    pub band: (f32, f32),
    /// Ticks between spawns: `min..=min + range`
    pub countdown_min: u32,
    pub countdown_range: u32,
}

/// One entry of the pacing curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub min_distance: f32,
    pub weather: Weather,
    /// Per-tick speed delta (negative decelerates)
    pub speed_bias: f32,
    pub spawn: Option<SpawnRule>,
    pub message: Option<&'static str>,
}

const ALL_KINDS: &[(HazardKind, u32)] = &[
    (HazardKind::Glider, 1),
    (HazardKind::Aircraft, 1),
    (HazardKind::Bolt, 1),
];

/// Hand-tuned pacing curve, ordered by distance
pub const STAGES: [Stage; 8] = [
    // Calm take-off
    Stage {
        min_distance: 0.0,
        weather: Weather::Clear,
        speed_bias: 0.002,
        spawn: None,
        message: None,
    },
    Stage {
        min_distance: 1500.0,
        weather: Weather::Clear,
        speed_bias: 0.001,
        spawn: Some(SpawnRule {
            kinds: &[(HazardKind::Glider, 1)],
            band: (30.0, 170.0),
            countdown_min: 60,
            countdown_range: 60,
        }),
        message: Some("BIRDS AHEAD!"),
    },
    Stage {
        min_distance: 4000.0,
        weather: Weather::Clear,
        speed_bias: -0.002,
        spawn: None,
        message: Some("CLEAR SKIES FOR NOW."),
    },
    Stage {
        min_distance: 5500.0,
        weather: Weather::Rain,
        speed_bias: 0.002,
        spawn: Some(SpawnRule {
            kinds: &[(HazardKind::Glider, 2), (HazardKind::Aircraft, 1)],
            band: (20.0, 180.0),
            countdown_min: 45,
            countdown_range: 45,
        }),
        message: Some("RAIN IS COMING."),
    },
    Stage {
        min_distance: 9000.0,
        weather: Weather::Clear,
        speed_bias: -0.003,
        spawn: None,
        message: Some("THE CLOUDS PART."),
    },
    Stage {
        min_distance: 10500.0,
        weather: Weather::Storm,
        speed_bias: 0.003,
        spawn: Some(SpawnRule {
            kinds: &[
                (HazardKind::Glider, 2),
                (HazardKind::Aircraft, 2),
                (HazardKind::Bolt, 1),
            ],
            band: (20.0, 180.0),
            countdown_min: 30,
            countdown_range: 30,
        }),
        message: Some("THUNDERSTORM!"),
    },
    Stage {
        min_distance: 15000.0,
        weather: Weather::Snow,
        speed_bias: 0.001,
        spawn: Some(SpawnRule {
            kinds: &[(HazardKind::Aircraft, 1), (HazardKind::Bolt, 1)],
            band: (20.0, 180.0),
            countdown_min: 25,
            countdown_range: 25,
        }),
        message: Some("IT'S SNOWING..."),
    },
    // Nobody is meant to survive this one
    Stage {
        min_distance: 20000.0,
        weather: Weather::Snow,
        speed_bias: 0.0,
        spawn: Some(SpawnRule {
            kinds: ALL_KINDS,
            band: (20.0, 180.0),
            countdown_min: 10,
            countdown_range: 10,
        }),
        message: Some("SAN FRANCISCO IN SIGHT!"),
    },
];

/// Reaching this distance before crashing earns the end dialog
pub const GOAL_DISTANCE: f32 = STAGES[STAGES.len() - 1].min_distance;

/// Index of the last stage whose threshold `distance` has reached
pub fn stage_for_distance(distance: f32) -> usize {
    STAGES
        .iter()
        .rposition(|s| distance >= s.min_distance)
        .unwrap_or(0)
}

/// A hazard the director wants instantiated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSpawn {
    pub kind: HazardKind,
    pub pos: Vec2,
}

/// A transient on-screen message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// Simulation time at which the banner hides
    pub hide_at: f32,
}

/// Pacing state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub distance: f32,
    pub stage: usize,
    pub weather: Weather,
    pub speed: f32,
    pub speed_bias: f32,
    pub spawn_countdown: i32,
    pub banner: Option<Banner>,
    speed_min: f32,
    speed_max: f32,
    message_secs: f32,
}

impl Director {
    pub fn new(tuning: &Tuning) -> Self {
        let first = &STAGES[0];
        Self {
            distance: 0.0,
            stage: 0,
            weather: first.weather,
            speed: tuning.speed_min,
            speed_bias: first.speed_bias,
            spawn_countdown: 0,
            banner: None,
            speed_min: tuning.speed_min,
            speed_max: tuning.speed_max,
            message_secs: tuning.message_secs,
        }
    }

    pub fn current_stage(&self) -> &'static Stage {
        &STAGES[self.stage]
    }

    /// Whether the final stage has been reached
    pub fn is_final_stage(&self) -> bool {
        self.stage == STAGES.len() - 1
    }

    /// Advance one tick by `delta` travelled distance.
    ///
    /// Returns the hazard to spawn this tick, if any.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        delta: f32,
        now: f32,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Option<HazardSpawn> {
        self.distance += delta.max(0.0);

        let resolved = stage_for_distance(self.distance);
        if resolved > self.stage {
            self.enter_stage(resolved, now, events);
        }

        self.speed = (self.speed + self.speed_bias).clamp(self.speed_min, self.speed_max);

        self.spawn_countdown -= 1;
        if self.spawn_countdown > 0 {
            return None;
        }
        let rule = self.current_stage().spawn?;
        let kind = pick_kind(rule.kinds, rng)?;
        let (lo, hi) = rule.band;
        let y = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let pos = Vec2::new(SCREEN_WIDTH + kind.size().x * 0.5, y);
        self.spawn_countdown =
            rng.random_range(rule.countdown_min..=rule.countdown_min + rule.countdown_range) as i32;
        log::debug!(
            "Spawn {:?} at y={:.1}, next in {} ticks",
            kind,
            y,
            self.spawn_countdown
        );
        Some(HazardSpawn { kind, pos })
    }

    fn enter_stage(&mut self, index: usize, now: f32, events: &mut Vec<GameEvent>) {
        if index > self.stage + 1 {
            log::warn!("Skipped from stage {} straight to {}", self.stage, index);
        }
        let stage = &STAGES[index];
        self.stage = index;
        self.weather = stage.weather;
        self.speed_bias = stage.speed_bias;
        if let Some(rule) = stage.spawn {
            // Short grace period before the first hazard of a stage
            self.spawn_countdown = self.spawn_countdown.max(rule.countdown_min as i32);
        }
        log::info!(
            "Stage {} at {:.0}: {:?}, bias {:+.3}",
            index,
            self.distance,
            stage.weather,
            stage.speed_bias
        );
        if let Some(text) = stage.message {
            self.banner = Some(Banner {
                text: text.to_string(),
                hide_at: now + self.message_secs,
            });
            events.push(GameEvent::StageMessage {
                stage: index,
                text: text.to_string(),
            });
        }
    }

    /// Hide the banner once its window has passed
    pub fn update_banner(&mut self, now: f32) {
        if self.banner.as_ref().is_some_and(|b| now >= b.hide_at) {
            self.banner = None;
        }
    }

    /// Scroll the backdrop fields matching the current weather
    pub fn drive_backdrop(&self, backdrop: &mut Backdrop) {
        backdrop.scroll(self.speed, self.weather);
    }
}

fn pick_kind<R: Rng + ?Sized>(kinds: &[(HazardKind, u32)], rng: &mut R) -> Option<HazardKind> {
    let total: u32 = kinds.iter().map(|&(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for &(kind, weight) in kinds {
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_TIER;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn director() -> Director {
        Director::new(&Tuning::default())
    }

    #[test]
    fn test_stage_table_is_ordered() {
        assert_eq!(STAGES[0].min_distance, 0.0);
        for pair in STAGES.windows(2) {
            assert!(pair[0].min_distance < pair[1].min_distance);
        }
        assert_eq!(GOAL_DISTANCE, 20000.0);
    }

    #[test]
    fn test_finale_never_eases_the_tier() {
        let last = STAGES[STAGES.len() - 1].weather.base_tier();
        assert_eq!(last, MAX_TIER);
        assert!(STAGES[STAGES.len() - 2].weather.base_tier() <= last);
        for stage in &STAGES[..STAGES.len() - 1] {
            assert!(stage.weather.base_tier() <= last);
        }
    }

    #[test]
    fn test_stage_lookup() {
        assert_eq!(stage_for_distance(0.0), 0);
        assert_eq!(stage_for_distance(1499.9), 0);
        assert_eq!(stage_for_distance(1500.0), 1);
        assert_eq!(stage_for_distance(12000.0), 5);
        assert_eq!(stage_for_distance(1.0e9), STAGES.len() - 1);
    }

    #[test]
    fn test_no_spawns_in_calm_intro() {
        let mut d = director();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        for _ in 0..500 {
            assert!(d.advance(1.0, 0.0, &mut rng, &mut events).is_none());
        }
        assert!(events.is_empty());
    }

    #[test]
    fn test_stage_change_sets_weather_and_banner() {
        let mut d = director();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        d.advance(5600.0, 10.0, &mut rng, &mut events);
        assert_eq!(d.stage, 3);
        assert_eq!(d.weather, Weather::Rain);
        assert_eq!(d.speed_bias, 0.002);
        let banner = d.banner.clone().unwrap();
        assert_eq!(banner.text, "RAIN IS COMING.");
        assert_eq!(banner.hide_at, 12.0);
        assert_eq!(
            events,
            vec![GameEvent::StageMessage {
                stage: 3,
                text: "RAIN IS COMING.".to_string()
            }]
        );

        d.update_banner(11.9);
        assert!(d.banner.is_some());
        d.update_banner(12.0);
        assert!(d.banner.is_none());
    }

    #[test]
    fn test_spawn_countdown_window() {
        let mut d = director();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        d.advance(1500.0, 0.0, &mut rng, &mut events);
        let rule = STAGES[1].spawn.unwrap();
        let mut spawns = 0;
        for _ in 0..2000 {
            if let Some(spawn) = d.advance(0.0, 0.0, &mut rng, &mut events) {
                spawns += 1;
                assert_eq!(spawn.kind, HazardKind::Glider);
                assert!(spawn.pos.x > SCREEN_WIDTH);
                assert!(spawn.pos.y >= rule.band.0 && spawn.pos.y <= rule.band.1);
                let min = rule.countdown_min as i32;
                let max = (rule.countdown_min + rule.countdown_range) as i32;
                assert!(d.spawn_countdown >= min && d.spawn_countdown <= max);
            }
        }
        // 2000 ticks with 60..=120 tick gaps
        assert!((16..=34).contains(&spawns), "spawns = {spawns}");
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let run = |seed: u64| {
            let mut d = director();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut events = Vec::new();
            let mut schedule = Vec::new();
            for tick in 0..6000 {
                let delta = d.speed;
                if let Some(s) = d.advance(delta, tick as f32 / 30.0, &mut rng, &mut events) {
                    schedule.push((tick, s.kind, s.pos.y.to_bits()));
                }
            }
            schedule
        };
        assert_eq!(run(77), run(77));
        assert!(!run(77).is_empty());
    }

    #[test]
    fn test_pick_kind_respects_weights() {
        let mut rng = Pcg32::seed_from_u64(4);
        assert_eq!(pick_kind(&[], &mut rng), None);
        assert_eq!(pick_kind(&[(HazardKind::Bolt, 0)], &mut rng), None);
        for _ in 0..100 {
            assert_eq!(
                pick_kind(&[(HazardKind::Glider, 0), (HazardKind::Bolt, 3)], &mut rng),
                Some(HazardKind::Bolt)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_speed_stays_clamped(deltas in prop::collection::vec(0.0f32..50.0, 1..3000)) {
            let mut d = director();
            let mut rng = Pcg32::seed_from_u64(0);
            let mut events = Vec::new();
            for delta in deltas {
                d.advance(delta, 0.0, &mut rng, &mut events);
                prop_assert!(d.speed >= 1.0 && d.speed <= 3.0);
            }
        }

        #[test]
        fn prop_stages_monotonic_and_messages_once(deltas in prop::collection::vec(0.0f32..400.0, 1..400)) {
            let mut d = director();
            let mut rng = Pcg32::seed_from_u64(0);
            let mut events = Vec::new();
            let mut last_stage = 0;
            for delta in deltas {
                d.advance(delta, 0.0, &mut rng, &mut events);
                prop_assert!(d.stage >= last_stage);
                last_stage = d.stage;
            }
            let mut seen = std::collections::HashSet::new();
            for event in &events {
                if let GameEvent::StageMessage { stage, .. } = event {
                    prop_assert!(seen.insert(*stage), "stage {} announced twice", stage);
                }
            }
        }
    }
}
