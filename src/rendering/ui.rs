//! # UI Panels
//!
//! The bottom status strip (HP bar, mouse-hover readout, recent messages)
//! and the overlay views for the inventory menus and the scrollable
//! message history. Layout math is kept in pure helpers so it can be
//! tested without a window.

use crate::game::{Entity, GameState, MessageLog};
use crate::rendering::to_color;
use macroquad::prelude::*;

/// Vertical advance per text line in the UI panels.
pub const LINE_HEIGHT: f32 = 18.0;
/// Pixel width of the HP bar.
const BAR_WIDTH: f32 = 200.0;
/// How many recent messages the status strip shows.
const PANEL_MESSAGE_LINES: usize = 5;

/// Filled width of a stat bar, clamped so an overfull or negative value
/// never draws outside the frame.
pub fn bar_fill_width(current: i32, maximum: i32, total_width: f32) -> f32 {
    if maximum <= 0 {
        return 0.0;
    }
    let fraction = (current as f32 / maximum as f32).clamp(0.0, 1.0);
    fraction * total_width
}

/// The slice of a message list shown by the history view: `lines` entries
/// ending `offset` entries before the newest.
pub fn history_window(len: usize, offset: usize, lines: usize) -> (usize, usize) {
    let end = len.saturating_sub(offset);
    let start = end.saturating_sub(lines);
    (start, end)
}

/// Applies a scroll delta to a history offset, clamped so the view never
/// runs past the oldest message.
pub fn scroll_offset(len: usize, lines: usize, offset: usize, delta: i32) -> usize {
    let max_offset = len.saturating_sub(lines);
    let moved = offset as i64 + delta as i64;
    moved.clamp(0, max_offset as i64) as usize
}

/// The `a`-`z` label for an inventory slot.
pub fn slot_label(index: usize) -> char {
    (b'a' + index as u8) as char
}

/// Draws the bottom status strip: HP bar, hover readout and the tail of
/// the message log. `hover` is the name readout for the cell under the
/// mouse, empty when there is nothing to show.
pub fn render_panel(state: &GameState, panel_top: f32, hover: &str) {
    draw_rectangle(
        0.0,
        panel_top,
        screen_width(),
        screen_height() - panel_top,
        Color::new(0.0, 0.0, 0.0, 0.9),
    );

    if let Some(fighter) = state.player().and_then(|player| player.fighter.as_ref()) {
        render_hp_bar(fighter.hp(), fighter.max_hp, 10.0, panel_top + 10.0);
    }

    if !hover.is_empty() {
        draw_text(hover, 10.0, panel_top + 50.0, 16.0, LIGHTGRAY);
    }

    let messages = &state.log.messages;
    let start = messages.len().saturating_sub(PANEL_MESSAGE_LINES);
    for (i, message) in messages[start..].iter().enumerate() {
        draw_text(
            &message.full_text(),
            BAR_WIDTH + 40.0,
            panel_top + 20.0 + i as f32 * LINE_HEIGHT,
            16.0,
            to_color(message.color),
        );
    }
}

fn render_hp_bar(current: i32, maximum: i32, x: f32, y: f32) {
    draw_rectangle(x, y, BAR_WIDTH, 22.0, to_color((64, 16, 16)));
    let fill = bar_fill_width(current, maximum, BAR_WIDTH);
    if fill > 0.0 {
        draw_rectangle(x, y, fill, 22.0, to_color((0, 96, 0)));
    }
    draw_text(
        &format!("HP: {}/{}", current, maximum),
        x + 8.0,
        y + 16.0,
        16.0,
        WHITE,
    );
}

/// Draws an inventory menu overlay with one lettered line per item.
pub fn render_inventory_menu(title: &str, items: &[Entity]) {
    let width = 360.0;
    let height = (items.len().max(1) + 2) as f32 * LINE_HEIGHT + 20.0;
    let x = (screen_width() - width) / 2.0;
    let y = 60.0;

    draw_rectangle(x, y, width, height, Color::new(0.05, 0.05, 0.1, 0.95));
    draw_rectangle_lines(x, y, width, height, 2.0, WHITE);
    draw_text(title, x + 10.0, y + LINE_HEIGHT, 18.0, YELLOW);

    if items.is_empty() {
        draw_text("(Empty)", x + 10.0, y + LINE_HEIGHT * 2.5, 16.0, GRAY);
        return;
    }
    for (i, item) in items.iter().enumerate() {
        draw_text(
            &format!("({}) {}", slot_label(i), item.name),
            x + 10.0,
            y + LINE_HEIGHT * (2.5 + i as f32),
            16.0,
            WHITE,
        );
    }
}

/// Draws the full-screen message history view.
pub fn render_history(log: &MessageLog, offset: usize, lines: usize) {
    draw_text("Message history", 10.0, 24.0, 22.0, YELLOW);
    draw_text(
        "Up/Down scroll, PgUp/PgDn page, Home/End jump, any other key closes",
        10.0,
        44.0,
        14.0,
        GRAY,
    );

    let (start, end) = history_window(log.messages.len(), offset, lines);
    for (i, message) in log.messages[start..end].iter().enumerate() {
        draw_text(
            &message.full_text(),
            10.0,
            70.0 + i as f32 * LINE_HEIGHT,
            16.0,
            to_color(message.color),
        );
    }
}

/// Draws the centered banner shown after the player dies.
pub fn render_game_over_banner() {
    let text = "YOU DIED";
    let size = 48.0;
    let metrics = measure_text(text, None, size as u16, 1.0);
    draw_text(
        text,
        (screen_width() - metrics.width) / 2.0,
        screen_height() / 3.0,
        size,
        RED,
    );
    draw_text(
        "Press V for history, Escape to quit",
        (screen_width() - 300.0) / 2.0,
        screen_height() / 3.0 + 40.0,
        18.0,
        LIGHTGRAY,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill_clamps() {
        assert_eq!(bar_fill_width(15, 30, 200.0), 100.0);
        assert_eq!(bar_fill_width(0, 30, 200.0), 0.0);
        assert_eq!(bar_fill_width(-5, 30, 200.0), 0.0);
        assert_eq!(bar_fill_width(45, 30, 200.0), 200.0);
        assert_eq!(bar_fill_width(10, 0, 200.0), 0.0);
    }

    #[test]
    fn test_history_window_tail() {
        // 10 messages, no offset: the last 4.
        assert_eq!(history_window(10, 0, 4), (6, 10));
        // Scrolled back 3: messages 3..7.
        assert_eq!(history_window(10, 3, 4), (3, 7));
        // Fewer messages than lines: everything.
        assert_eq!(history_window(2, 0, 4), (0, 2));
        // Offset past the start never underflows.
        assert_eq!(history_window(10, 50, 4), (0, 0));
    }

    #[test]
    fn test_scroll_offset_clamps_to_oldest() {
        // 10 messages, 4 visible: offsets 0..=6 are legal.
        assert_eq!(scroll_offset(10, 4, 0, 1), 1);
        assert_eq!(scroll_offset(10, 4, 6, 5), 6);
        assert_eq!(scroll_offset(10, 4, 2, -5), 0);
        // Short logs never scroll.
        assert_eq!(scroll_offset(3, 4, 0, 10), 0);
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(slot_label(0), 'a');
        assert_eq!(slot_label(25), 'z');
    }
}
