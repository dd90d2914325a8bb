//! Audio seam
//!
//! The simulation only names sounds and music cues; whatever plays them
//! implements `AudioOut`. Calls are fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Flap impulse granted
    Flap,
    /// Hazard hit (overlay started)
    Hurt,
    /// Glider hit the water
    Splash,
}

impl SoundEffect {
    /// Asset name
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Flap => "flap",
            SoundEffect::Hurt => "hurt",
            SoundEffect::Splash => "splash",
        }
    }
}

/// Music changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicCue {
    /// Start the looping flight track
    Flight,
    /// Silence
    Stop,
}

/// Track name, gap before start (seconds) and loop point (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicTrack {
    pub name: &'static str,
    pub gap: f32,
    pub loop_point: f32,
}

impl MusicCue {
    /// The track to play, `None` for silence
    pub fn track(self) -> Option<MusicTrack> {
        match self {
            MusicCue::Flight => Some(MusicTrack {
                name: "music",
                gap: 0.0,
                loop_point: 1.6,
            }),
            MusicCue::Stop => None,
        }
    }
}

/// Something that can make noise
pub trait AudioOut {
    fn play_sound(&mut self, name: &str, gain: f32);
    fn set_music(&mut self, track: Option<MusicTrack>, gain: f32);
}

/// Audio backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogAudio {
    /// Everything requested so far, in order
    pub played: Vec<String>,
}

impl AudioOut for LogAudio {
    fn play_sound(&mut self, name: &str, gain: f32) {
        log::debug!("play sound '{}' (gain {:.2})", name, gain);
        self.played.push(name.to_string());
    }

    fn set_music(&mut self, track: Option<MusicTrack>, gain: f32) {
        match track {
            Some(track) => {
                log::debug!(
                    "music '{}' gap {:.1}s loop at {:.1}s (gain {:.2})",
                    track.name,
                    track.gap,
                    track.loop_point,
                    gain
                );
                self.played.push(format!("music:{}", track.name));
            }
            None => {
                log::debug!("music stop");
                self.played.push("music:stop".to_string());
            }
        }
    }
}

/// Forward the audio-related events to `out`; other events are ignored
pub fn dispatch(events: &[GameEvent], settings: &Settings, out: &mut impl AudioOut) {
    for event in events {
        match event {
            GameEvent::Sound(sound) => out.play_sound(sound.name(), settings.sfx_gain()),
            GameEvent::Music(cue) => out.set_music(cue.track(), settings.music_gain()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_forwards_audio_only() {
        let events = vec![
            GameEvent::Started,
            GameEvent::Music(MusicCue::Flight),
            GameEvent::Sound(SoundEffect::Flap),
            GameEvent::PlayerDied { at: 1.0 },
            GameEvent::Sound(SoundEffect::Splash),
            GameEvent::Music(MusicCue::Stop),
        ];
        let mut out = LogAudio::default();
        dispatch(&events, &Settings::default(), &mut out);
        assert_eq!(out.played, vec!["music:music", "flap", "splash", "music:stop"]);
    }

    #[test]
    fn test_stop_has_no_track() {
        assert!(MusicCue::Stop.track().is_none());
        assert_eq!(MusicCue::Flight.track().unwrap().name, "music");
    }
}
