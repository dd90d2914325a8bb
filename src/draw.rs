//! Display list generation
//!
//! Describes what the frame contains (rects, sprite indices, text) in
//! screen space, back to front. Turning that into pixels is the host's job.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::field::StarField;
use crate::sim::{GamePhase, GameState, Rect, Weather};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

const SKY: Color = Color(80, 200, 230, 255);
const CLOUD: Color = Color(255, 255, 255, 204);
const SEA: Color = Color(0, 0, 255, 255);
const SHIMMER: Color = Color(200, 255, 255, 255);
const RAIN: Color = Color(180, 200, 255, 160);
const SNOW: Color = Color(255, 255, 255, 230);
const SHADOW: Color = Color(0, 0, 64, 128);

/// Glider sprites: two wing frames, then the hurt pose
pub const PLAYER_SPRITE: u32 = 0;
pub const PLAYER_HURT_SPRITE: u32 = 2;

/// Text alignment within its rect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCmd {
    FillRect { rect: Rect, color: Color },
    Sprite { index: u32, rect: Rect },
    Text { rect: Rect, lines: Vec<String>, align: Align },
}

fn field_rects(field: &StarField, color: Color, out: &mut Vec<DrawCmd>) {
    for p in field.particles() {
        out.push(DrawCmd::FillRect {
            rect: Rect::centered(p.pos, field.size),
            color,
        });
    }
}

/// Build the display list for the current frame
pub fn build_scene(state: &GameState) -> Vec<DrawCmd> {
    let mut out = Vec::new();
    let screen = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
    let weather = state.director.weather;

    out.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, 0.0, SCREEN_WIDTH, WATER_LINE),
        color: SKY,
    });
    field_rects(&state.backdrop.clouds, CLOUD, &mut out);
    out.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, WATER_LINE, SCREEN_WIDTH, SEA_LEVEL),
        color: SEA,
    });
    field_rects(&state.backdrop.ocean, SHIMMER, &mut out);

    let player = &state.player;
    if player.alive {
        let height = (WATER_LINE - player.pos.y).max(0.0);
        // Shadow shrinks the higher the glider flies
        let width = (PLAYER_SIZE * (1.0 - height / WATER_LINE)).max(4.0);
        out.push(DrawCmd::FillRect {
            rect: Rect::centered(player.shadow, Vec2::new(width, 4.0)),
            color: SHADOW,
        });
    }

    for hazard in &state.hazards {
        out.push(DrawCmd::Sprite {
            index: hazard.kind.sprite_base() + hazard.frame,
            rect: hazard.rect(),
        });
    }

    if player.alive {
        let index = if player.overlay.is_some() {
            PLAYER_HURT_SPRITE
        } else {
            PLAYER_SPRITE + player.frame
        };
        out.push(DrawCmd::Sprite {
            index,
            rect: player.rect(),
        });
    }

    if let Some(field) = state.backdrop.precipitation(weather) {
        let color = if weather == Weather::Snow { SNOW } else { RAIN };
        field_rects(field, color, &mut out);
    }

    out.push(DrawCmd::Text {
        rect: screen.inflate(-8.0, -8.0),
        lines: vec![format!("SCORE: {} KM", state.km())],
        align: Align::Left,
    });

    if state.phase == GamePhase::Ready {
        out.push(DrawCmd::Text {
            rect: Rect::new(2.0, 32.0, 40.0, 20.0),
            lines: vec!["<-".to_string(), "TOKYO".to_string()],
            align: Align::Left,
        });
        out.push(DrawCmd::Text {
            rect: Rect::new(SCREEN_WIDTH - 74.0, 32.0, 72.0, 20.0),
            lines: vec!["SAN ->".to_string(), "FRANCISCO".to_string()],
            align: Align::Right,
        });
    }

    if let Some(banner) = &state.director.banner {
        out.push(DrawCmd::Text {
            rect: Rect::new(0.0, 64.0, SCREEN_WIDTH, 16.0),
            lines: vec![banner.text.clone()],
            align: Align::Center,
        });
    }

    if let Some(line) = state.dialog.as_ref().and_then(|d| d.current()) {
        out.push(DrawCmd::Text {
            rect: Rect::new(0.0, SCREEN_HEIGHT * 0.5 - 8.0, SCREEN_WIDTH, 16.0),
            lines: vec![line.to_string()],
            align: Align::Center,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Banner, Hazard, HazardKind};

    fn texts(scene: &[DrawCmd]) -> Vec<String> {
        scene
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { lines, .. } => Some(lines.join(" ")),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ready_scene_shows_signs() {
        let state = GameState::new(1);
        let scene = build_scene(&state);
        let texts = texts(&scene);
        assert!(texts.contains(&"SCORE: 0 KM".to_string()));
        assert!(texts.contains(&"<- TOKYO".to_string()));
        assert!(texts.contains(&"SAN -> FRANCISCO".to_string()));
        assert!(matches!(scene[0], DrawCmd::FillRect { color: SKY, .. }));
    }

    #[test]
    fn test_flying_scene() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Flying;
        state.player.base_tier = 1;
        state.director.weather = Weather::Rain;
        state.director.banner = Some(Banner {
            text: "RAIN IS COMING.".to_string(),
            hide_at: 10.0,
        });
        state.hazards.push(Hazard {
            id: 9,
            kind: HazardKind::Aircraft,
            pos: Vec2::new(200.0, 80.0),
            vel: Vec2::ZERO,
            frame: 1,
        });
        let scene = build_scene(&state);
        let texts = texts(&scene);
        assert!(!texts.iter().any(|t| t.contains("TOKYO")));
        assert!(texts.contains(&"RAIN IS COMING.".to_string()));
        assert!(scene.contains(&DrawCmd::Sprite {
            index: HazardKind::Aircraft.sprite_base() + 1,
            rect: state.hazards[0].rect(),
        }));
        let rain = scene
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::FillRect { color: RAIN, .. }))
            .count();
        assert_eq!(rain, state.backdrop.rain.particles().len());
    }

    #[test]
    fn test_hurt_and_dead_player_sprites() {
        let mut state = GameState::new(1);
        state.player.overlay = Some(crate::sim::Overlay {
            tier: 2,
            expires_at: 1.0,
        });
        let scene = build_scene(&state);
        assert!(scene.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Sprite {
                index: PLAYER_HURT_SPRITE,
                ..
            }
        )));

        state.player.alive = false;
        let scene = build_scene(&state);
        assert!(!scene.iter().any(|cmd| matches!(cmd, DrawCmd::Sprite { .. })));
    }
}
