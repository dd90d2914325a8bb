//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; it is rebuilt from zero on
//! every restart except the RNG stream and the run counter.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::director::Director;
use super::field::Backdrop;
use super::hazard::Hazard;
use super::player::Player;
use crate::audio::{MusicCue, SoundEffect};
use crate::consts::DISTANCE_PER_KM;
use crate::settings::{QualityPreset, Settings};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Glider hovering, waiting for the first press
    Ready,
    /// Active gameplay
    Flying,
    /// Splashed down, waiting out the restart delay
    Crashed,
    /// Scripted end dialog after reaching the goal
    EndDialog,
}

/// Side effects produced by a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// First press: the run is armed
    Started,
    Sound(SoundEffect),
    Music(MusicCue),
    /// A stage's one-shot narrative message
    StageMessage { stage: usize, text: String },
    PlayerDied { at: f32 },
    /// Decided after the restart delay
    GameOver { km: u32, goal_reached: bool },
    DialogLine { text: String },
    Restarted { run: u32 },
}

/// Lines of the scripted end-of-run dialog
pub const END_DIALOG: [&str; 3] = [
    "YOU CROSSED THE PACIFIC!",
    "WELCOME TO SAN FRANCISCO.",
    "THANKS FOR FLYING.",
];

/// Progress through the end dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    /// Index of the line on screen
    pub line: usize,
    /// When the current line gives way to the next
    pub next_at: f32,
    line_secs: f32,
}

impl Dialog {
    /// Start the dialog; the caller shows line 0
    pub fn new(now: f32, line_secs: f32) -> Self {
        Self {
            line: 0,
            next_at: now + line_secs,
            line_secs,
        }
    }

    pub fn current(&self) -> Option<&'static str> {
        END_DIALOG.get(self.line).copied()
    }

    /// Move on when the line's time is up or `skip` is set.
    ///
    /// Returns the newly shown line, or `None` if nothing changed.
    /// Once past the last line `current()` is `None`.
    pub fn advance(&mut self, now: f32, skip: bool) -> Option<&'static str> {
        if self.is_finished() || (!skip && now < self.next_at) {
            return None;
        }
        self.line += 1;
        self.next_at = now + self.line_secs;
        self.current()
    }

    pub fn is_finished(&self) -> bool {
        self.line >= END_DIALOG.len()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Number of restarts so far
    pub run: u32,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    /// Simulation clock in seconds (never reset)
    pub time_secs: f32,
    pub phase: GamePhase,
    pub player: Player,
    pub director: Director,
    /// Active hazards (sorted by id)
    pub hazards: Vec<Hazard>,
    pub backdrop: Backdrop,
    pub dialog: Option<Dialog>,
    pub tuning: Tuning,
    /// Pending side effects
    pub events: Vec<GameEvent>,
    /// Background particle density
    quality: QualityPreset,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default config
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), &Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let backdrop = Backdrop::new(settings.quality, &mut rng);
        Self {
            seed,
            run: 0,
            time_ticks: 0,
            time_secs: 0.0,
            phase: GamePhase::Ready,
            player: Player::new(),
            director: Director::new(&tuning),
            hazards: Vec::new(),
            backdrop,
            dialog: None,
            tuning,
            events: Vec::new(),
            quality: settings.quality,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Distance travelled this run
    pub fn distance(&self) -> f32 {
        self.director.distance
    }

    /// Distance as displayed kilometres
    pub fn km(&self) -> u32 {
        (self.director.distance / DISTANCE_PER_KM) as u32
    }

    /// Rebuild the run from zero; the RNG stream carries on
    pub fn restart(&mut self) {
        self.run += 1;
        self.phase = GamePhase::Ready;
        self.player = Player::new();
        self.director = Director::new(&self.tuning);
        self.hazards.clear();
        self.backdrop = Backdrop::new(self.quality, &mut self.rng);
        self.dialog = None;
        log::info!("Restart (run {})", self.run);
        self.events.push(GameEvent::Restarted { run: self.run });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.player.alive);
        assert_eq!(state.player.base_tier, 0);
        assert_eq!(state.km(), 0);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(1);
        state.director.distance = 5000.0;
        state.player.alive = false;
        state.phase = GamePhase::Crashed;
        state.restart();
        assert_eq!(state.run, 1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.distance(), 0.0);
        assert!(state.player.alive);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted { run: 1 }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_dialog_sequence() {
        let mut dialog = Dialog::new(0.0, 3.0);
        assert_eq!(dialog.current(), Some(END_DIALOG[0]));
        assert_eq!(dialog.advance(1.0, false), None);
        assert_eq!(dialog.advance(3.0, false), Some(END_DIALOG[1]));
        assert_eq!(dialog.advance(3.1, true), Some(END_DIALOG[2]));
        assert_eq!(dialog.advance(7.0, false), None);
        assert!(dialog.is_finished());
        assert_eq!(dialog.advance(100.0, true), None);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::Sound(SoundEffect::Flap)).unwrap();
        assert_eq!(json, r#"{"event":"sound","data":"Flap"}"#);
        let json = serde_json::to_string(&GameEvent::Started).unwrap();
        assert_eq!(json, r#"{"event":"started"}"#);
    }
}
