//! # Rendering Module
//!
//! Macroquad drawing for the map viewport and the UI panels. All drawing
//! is immediate-mode: each frame re-renders the whole screen from the
//! session state.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::Rgb;
use macroquad::prelude::Color;

/// Converts an engine color triple into a macroquad color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.0, rgb.1, rgb.2, 255)
}
