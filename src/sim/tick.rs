//! Fixed timestep simulation tick
//!
//! The orchestrator: folds input into the flight controller, advances the
//! director before the player so a weather change is felt the same tick,
//! then moves hazards and scrolls the backdrop. Death is polled here and
//! turned into a restart or the end dialog once the delay has passed.

use glam::Vec2;

use super::collision::collide_player;
use super::director::GOAL_DISTANCE;
use super::geom::Rect;
use super::hazard::{Hazard, HazardContext};
use super::player::FlightContext;
use super::state::{Dialog, GameEvent, GamePhase, GameState};

/// Raw input from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ButtonPressed(u32),
    ButtonReleased(u32),
    MouseDown { point: Vec2, button: u8 },
    MouseUp { point: Vec2, button: u8 },
}

impl InputEvent {
    /// Every press means "flap", every release means "stop flapping"
    pub fn flap(&self) -> bool {
        match self {
            InputEvent::ButtonPressed(_) | InputEvent::MouseDown { .. } => true,
            InputEvent::ButtonReleased(_) | InputEvent::MouseUp { .. } => false,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap edges in arrival order (`true` = press)
    pub flaps: Vec<bool>,
    /// Demo mode - autopilot flies the glider
    pub autopilot: bool,
}

impl TickInput {
    pub fn press() -> Self {
        Self {
            flaps: vec![true],
            ..Default::default()
        }
    }

    pub fn release() -> Self {
        Self {
            flaps: vec![false],
            ..Default::default()
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.flaps.push(event.flap());
    }

    fn any_press(&self) -> bool {
        self.flaps.contains(&true)
    }
}

/// Cruising altitude the autopilot aims for
const AUTOPILOT_CRUISE_Y: f32 = 110.0;
/// How far ahead the autopilot looks for hazards
const AUTOPILOT_LOOKAHEAD: f32 = 96.0;

/// Demo-mode flap decisions for this tick
fn autopilot_flaps(state: &GameState) -> Vec<bool> {
    let player = &state.player;
    if !player.is_started() {
        return vec![true];
    }

    // Dodge the nearest hazard ahead by aiming above or below it
    let window = Rect::new(
        player.pos.x - 16.0,
        player.pos.y - 40.0,
        16.0 + AUTOPILOT_LOOKAHEAD,
        80.0,
    );
    let threat = state
        .hazards
        .iter()
        .filter(|h| window.contains(h.pos))
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let target_y = match threat {
        Some(h) if h.pos.y > 70.0 => h.pos.y - 48.0,
        Some(h) => h.pos.y + 48.0,
        None => AUTOPILOT_CRUISE_Y,
    };

    if player.pos.y > target_y && player.flap_charge == 0 {
        vec![true]
    } else if player.pos.y < target_y - 12.0 && player.flap_charge > 0 {
        vec![false]
    } else {
        Vec::new()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.time_secs = (state.time_ticks as f64 * f64::from(dt)) as f32;
    let now = state.time_secs;

    state.director.update_banner(now);

    match state.phase {
        GamePhase::Crashed => {
            tick_crashed(state, now);
            return;
        }
        GamePhase::EndDialog => {
            tick_dialog(state, input, now);
            return;
        }
        GamePhase::Ready | GamePhase::Flying => {}
    }

    let flaps = if input.autopilot {
        autopilot_flaps(state)
    } else {
        input.flaps.clone()
    };
    for active in flaps {
        state
            .player
            .set_flapping(active, &state.tuning, &mut state.events);
    }
    if state.phase == GamePhase::Ready && state.player.is_started() {
        state.phase = GamePhase::Flying;
    }

    let flying = state.phase == GamePhase::Flying;

    // Director first: stage, weather and spawns for this tick
    if flying {
        let delta = state.director.speed;
        if let Some(spawn) = state
            .director
            .advance(delta, now, &mut state.rng, &mut state.events)
        {
            let id = state.next_entity_id();
            let speed = state.director.speed;
            let hazard = Hazard::spawn(id, spawn.kind, spawn.pos, speed, &mut state.rng);
            state.hazards.push(hazard);
        }
        state
            .player
            .set_base_tier(state.director.weather.base_tier());
    }

    let flight = FlightContext {
        speed: state.director.speed,
        time_secs: now,
    };
    state.player.update(&flight, &state.tuning, &mut state.events);

    if flying {
        collide_player(
            &mut state.player,
            &state.hazards,
            now,
            &state.tuning,
            &mut state.events,
        );

        let ctx = HazardContext {
            speed: state.director.speed,
            time_secs: now,
        };
        for hazard in &mut state.hazards {
            hazard.update(&ctx, &mut state.rng);
        }
        state.hazards.retain(|h| !h.is_offscreen());

        state.director.drive_backdrop(&mut state.backdrop);
    }

    if !state.player.alive {
        log::info!("Crashed after {} km", state.km());
        state.phase = GamePhase::Crashed;
    }
}

fn tick_crashed(state: &mut GameState, now: f32) {
    let died_at = state.player.died_at.unwrap_or(now);
    if now - died_at < state.tuning.restart_delay_secs {
        return;
    }
    let goal_reached = state.distance() >= GOAL_DISTANCE;
    state.events.push(GameEvent::GameOver {
        km: state.km(),
        goal_reached,
    });
    if goal_reached {
        log::info!("Goal reached, playing end dialog");
        let dialog = Dialog::new(now, state.tuning.dialog_line_secs);
        if let Some(line) = dialog.current() {
            state.events.push(GameEvent::DialogLine {
                text: line.to_string(),
            });
        }
        state.dialog = Some(dialog);
        state.phase = GamePhase::EndDialog;
    } else {
        state.restart();
    }
}

fn tick_dialog(state: &mut GameState, input: &TickInput, now: f32) {
    let Some(dialog) = state.dialog.as_mut() else {
        state.restart();
        return;
    };
    if let Some(line) = dialog.advance(now, input.any_press()) {
        state.events.push(GameEvent::DialogLine {
            text: line.to_string(),
        });
    }
    if dialog.is_finished() {
        state.restart();
    }
}
