//! Platform abstraction layer
//!
//! The game never talks to a window, terminal or GPU directly. It issues
//! draw calls through [`Presenter`] and receives [`InputEvent`]s; the shell
//! behind those decides what they mean on screen.
//!
//! World coordinates are `SCREEN_WIDTH` x `SCREEN_HEIGHT` with the origin at
//! the bottom-left and y pointing up.

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

use glam::Vec2;

use crate::sim::Aabb;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BEIGE: Color = Color::rgb(245, 245, 220);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DIM_GRAY: Color = Color::rgb(105, 105, 105);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const DARK_GOLDENROD: Color = Color::rgb(184, 134, 11);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    /// Placeholder fill when the note image is missing
    pub const NOTE_FILL: Color = Color::rgb(70, 90, 200);
    /// Placeholder fill when the runner image is missing
    pub const PLAYER_FILL: Color = Color::rgb(200, 80, 60);
}

/// Sprite images the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Note,
    Player,
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Escape,
}

impl Key {
    /// Horizontal direction this key moves the runner, if any
    pub fn direction(&self) -> Option<f32> {
        match self {
            Key::Left | Key::A => Some(-1.0),
            Key::Right | Key::D => Some(1.0),
            Key::Escape => None,
        }
    }
}

/// Discrete input from the shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPress(Key),
    KeyRelease(Key),
    /// Primary pointer button, at a world position
    PointerPress { pos: Vec2 },
}

/// Draw calls consumed by the game
pub trait Presenter {
    /// Fill the whole screen
    fn clear(&mut self, color: Color);
    /// Draw an image sprite covering `bounds`; `scale` is the image scale factor
    fn draw_sprite(&mut self, sprite: SpriteId, bounds: Aabb, scale: f32);
    /// Draw text with its baseline-left (or baseline-center) at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, centered: bool);
    fn draw_rect(&mut self, rect: Aabb, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_directions() {
        assert_eq!(Key::Left.direction(), Some(-1.0));
        assert_eq!(Key::A.direction(), Some(-1.0));
        assert_eq!(Key::Right.direction(), Some(1.0));
        assert_eq!(Key::D.direction(), Some(1.0));
        assert_eq!(Key::Escape.direction(), None);
    }
}
