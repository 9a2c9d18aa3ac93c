//! # Display Management
//!
//! The map viewport: tiles drawn by visibility class, entities layered by
//! render tier on top. The memorized appearance of a tile is baked into
//! the tile record, so the drawing code never dims colors itself.

use crate::game::{GameState, InputMode, RenderState, TileGraphic};
use crate::rendering::{to_color, ui};
use macroquad::prelude::*;

/// Pixel geometry of the screen layout.
///
/// The map viewport occupies the top of the window; the bottom strip
/// holds the HP bar, the hover readout and the recent messages.
pub struct Display {
    /// Tile edge length in pixels
    pub tile_size: f32,
    /// Height of the bottom UI strip in pixels
    pub panel_height: f32,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    pub fn new() -> Self {
        Self {
            tile_size: 16.0,
            panel_height: 120.0,
        }
    }

    /// Renders one complete frame for the current session state.
    pub fn render(&self, state: &GameState) {
        clear_background(BLACK);

        match state.mode {
            InputMode::History { offset } => {
                ui::render_history(&state.log, offset, self.history_lines());
            }
            InputMode::InventoryUse => {
                self.render_world(state);
                ui::render_inventory_menu("Select an item to use", state.player_items());
            }
            InputMode::InventoryDrop => {
                self.render_world(state);
                ui::render_inventory_menu("Select an item to drop", state.player_items());
            }
            InputMode::MainGame | InputMode::GameOver => {
                self.render_world(state);
            }
        }

        if state.mode == InputMode::GameOver {
            ui::render_game_over_banner();
        }
    }

    fn render_world(&self, state: &GameState) {
        self.render_map(state);
        self.render_entities(state);
        let hover = self
            .mouse_tile(state)
            .map(|(x, y)| state.names_at(x, y))
            .unwrap_or_default();
        ui::render_panel(state, self.panel_top(), &hover);
    }

    /// Draws every tile in its visibility class; shrouded cells stay black.
    fn render_map(&self, state: &GameState) {
        for y in 0..state.map.height {
            for x in 0..state.map.width {
                let graphic = match state.map.render_state(x, y) {
                    RenderState::Lit => state.map.tile(x, y).map(|tile| tile.lit),
                    RenderState::Memorized => state.map.tile(x, y).map(|tile| tile.memorized),
                    RenderState::Shroud => None,
                };
                if let Some(graphic) = graphic {
                    self.draw_cell(x, y, graphic);
                }
            }
        }
    }

    /// Draws visible entities, lowest render tier first so actors end up
    /// on top of items and corpses sharing their cell.
    fn render_entities(&self, state: &GameState) {
        let mut visible: Vec<_> = state
            .map
            .entities
            .iter()
            .filter(|entity| {
                state.map.in_bounds(entity.position.x, entity.position.y)
                    && state.map.visible[state.map.idx(entity.position.x, entity.position.y)]
            })
            .collect();
        visible.sort_by_key(|entity| entity.render_tier);

        for entity in visible {
            let px = entity.position.x as f32 * self.tile_size;
            let py = entity.position.y as f32 * self.tile_size;
            draw_text(
                &entity.glyph.to_string(),
                px + 2.0,
                py + self.tile_size - 3.0,
                self.tile_size,
                to_color(entity.color),
            );
        }
    }

    fn draw_cell(&self, x: i32, y: i32, graphic: TileGraphic) {
        let px = x as f32 * self.tile_size;
        let py = y as f32 * self.tile_size;
        draw_rectangle(px, py, self.tile_size, self.tile_size, to_color(graphic.bg));
        if graphic.glyph != ' ' {
            draw_text(
                &graphic.glyph.to_string(),
                px + 2.0,
                py + self.tile_size - 3.0,
                self.tile_size,
                to_color(graphic.fg),
            );
        }
    }

    /// The pixel y where the bottom UI strip begins.
    fn panel_top(&self) -> f32 {
        screen_height() - self.panel_height
    }

    /// How many history lines fit on screen in the history view.
    pub fn history_lines(&self) -> usize {
        ((screen_height() - 60.0) / ui::LINE_HEIGHT).max(1.0) as usize
    }

    /// The map cell under the mouse cursor, if the cursor is over the
    /// viewport.
    pub fn mouse_tile(&self, state: &GameState) -> Option<(i32, i32)> {
        let (mx, my) = mouse_position();
        if my >= self.panel_top() {
            return None;
        }
        let x = (mx / self.tile_size) as i32;
        let y = (my / self.tile_size) as i32;
        if state.map.in_bounds(x, y) {
            Some((x, y))
        } else {
            None
        }
    }
}
