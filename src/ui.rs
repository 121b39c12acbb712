//! Screen layouts
//!
//! Menu, in-game HUD and game-over screens, drawn through [`Presenter`].

use glam::Vec2;

use crate::assets::Assets;
use crate::consts::*;
use crate::persistence::SaveRecord;
use crate::platform::{Color, Presenter, SpriteId};
use crate::sim::{Aabb, Session};

/// Vertical fraction of the screen
fn at_height(fraction: f32) -> f32 {
    SCREEN_HEIGHT * fraction
}

fn centered(p: &mut dyn Presenter, text: &str, fraction: f32, size: f32, color: Color) {
    p.draw_text(
        text,
        Vec2::new(SCREEN_WIDTH / 2.0, at_height(fraction)),
        size,
        color,
        true,
    );
}

pub fn draw_menu(p: &mut dyn Presenter, record: &SaveRecord) {
    p.clear(Color::BEIGE);
    centered(p, SCREEN_TITLE, 0.65, 40.0, Color::BLACK);
    centered(p, "Click to start", 0.52, 18.0, Color::DIM_GRAY);
    centered(p, "Use LEFT/RIGHT arrows or A/D to move", 0.45, 16.0, Color::DIM_GRAY);
    centered(
        p,
        "Catch the falling notes and avoid missing too many",
        0.38,
        16.0,
        Color::DIM_GRAY,
    );
    centered(
        p,
        &format!("High Score: {}", record.high_score),
        0.26,
        18.0,
        Color::DARK_GOLDENROD,
    );
    centered(
        p,
        &format!("Last Level Reached: {}", record.last_level),
        0.2,
        16.0,
        Color::DARK_GOLDENROD,
    );
}

/// Sprite when its image exists, a filled box otherwise
fn draw_entity(p: &mut dyn Presenter, assets: &Assets, sprite: SpriteId, bounds: Aabb) {
    if assets.sprite(sprite).is_some() {
        let scale = match sprite {
            SpriteId::Note => NOTE_SCALE,
            SpriteId::Player => PLAYER_SCALE,
        };
        p.draw_sprite(sprite, bounds, scale);
    } else {
        let fill = match sprite {
            SpriteId::Note => Color::NOTE_FILL,
            SpriteId::Player => Color::PLAYER_FILL,
        };
        p.draw_rect(bounds, fill);
    }
}

pub fn draw_playing(p: &mut dyn Presenter, session: &Session, record: &SaveRecord, assets: &Assets) {
    p.clear(Color::BEIGE);
    p.draw_line(
        Vec2::new(0.0, FLOOR_LINE_Y),
        Vec2::new(SCREEN_WIDTH, FLOOR_LINE_Y),
        Color::LIGHT_GRAY,
        2.0,
    );

    for note in &session.notes {
        draw_entity(p, assets, SpriteId::Note, note.bounds());
    }
    draw_entity(p, assets, SpriteId::Player, session.player.bounds());

    // HUD
    let hud_y = SCREEN_HEIGHT - 20.0;
    let hud = [
        (format!("Score: {}", session.score), 10.0, Color::BLACK),
        (format!("Level: {}", session.level), 160.0, Color::BLACK),
        (
            format!("Missed: {}/{}", session.misses, MAX_MISSES),
            290.0,
            Color::BLACK,
        ),
        (
            format!("High Score: {}", record.high_score),
            SCREEN_WIDTH - 200.0,
            Color::DARK_GOLDENROD,
        ),
    ];
    for (text, x, color) in &hud {
        p.draw_text(text, Vec2::new(*x, hud_y), 14.0, *color, false);
    }
}

pub fn draw_game_over(p: &mut dyn Presenter, session: &Session) {
    p.clear(Color::BEIGE);
    centered(p, "Game Over", 0.6, 40.0, Color::DARK_RED);
    centered(
        p,
        &format!("Final Score: {}", session.score),
        0.5,
        20.0,
        Color::BLACK,
    );
    centered(
        p,
        &format!("Level Reached: {}", session.level),
        0.44,
        18.0,
        Color::BLACK,
    );
    centered(p, "Click to play again", 0.34, 16.0, Color::DIM_GRAY);
}
