//! # Input Module
//!
//! Keyboard decoding for player interactions. The mapping from a key to a
//! [`Command`] is a pure function of the current [`InputMode`], so every
//! binding can be tested without a window; [`InputHandler`] is the thin
//! macroquad-facing wrapper that polls the pressed key each frame.

use crate::game::InputMode;
use macroquad::prelude::{get_last_key_pressed, KeyCode};

/// How many lines a PageUp/PageDown press scrolls in the history view.
const HISTORY_PAGE: usize = 10;

/// A decoded player intention, one per keypress.
///
/// Commands are UI-level: the main loop translates them into game
/// [`Action`](crate::game::Action)s or mode transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move or attack toward the adjacent cell at `(dx, dy)`.
    Bump { dx: i32, dy: i32 },
    /// Pass the turn.
    Wait,
    /// Pick up an item from the player's cell.
    PickUp,
    /// Open the inventory to use an item.
    OpenInventoryUse,
    /// Open the inventory to drop an item.
    OpenInventoryDrop,
    /// Open the scrollable message history.
    OpenHistory,
    /// Choose inventory slot `0..26` (the `a`-`z` keys).
    SelectSlot(usize),
    /// Scroll the history view; positive is toward older messages.
    ScrollHistory(i32),
    /// Jump the history view to the oldest message.
    HistoryOldest,
    /// Jump the history view back to the newest message.
    HistoryNewest,
    /// Leave the current menu and return to the main view.
    Dismiss,
    /// Quit the session.
    Quit,
}

/// Decodes one keypress under the given input mode.
///
/// Returns `None` for keys with no binding in that mode; unbound keys
/// never consume a turn.
pub fn decode_key(mode: InputMode, key: KeyCode) -> Option<Command> {
    match mode {
        InputMode::MainGame => decode_main_game(key),
        InputMode::InventoryUse | InputMode::InventoryDrop => decode_item_selection(key),
        InputMode::History { .. } => Some(decode_history(key)),
        InputMode::GameOver => decode_game_over(key),
    }
}

fn decode_main_game(key: KeyCode) -> Option<Command> {
    if let Some((dx, dy)) = movement_delta(key) {
        return Some(Command::Bump { dx, dy });
    }
    match key {
        KeyCode::Space | KeyCode::Period => Some(Command::Wait),
        KeyCode::G | KeyCode::Comma => Some(Command::PickUp),
        KeyCode::I => Some(Command::OpenInventoryUse),
        KeyCode::D => Some(Command::OpenInventoryDrop),
        KeyCode::V => Some(Command::OpenHistory),
        KeyCode::Escape => Some(Command::Quit),
        _ => None,
    }
}

/// Arrow keys and Vi-style keys, diagonals included.
fn movement_delta(key: KeyCode) -> Option<(i32, i32)> {
    match key {
        KeyCode::Up | KeyCode::K => Some((0, -1)),
        KeyCode::Down | KeyCode::J => Some((0, 1)),
        KeyCode::Left | KeyCode::H => Some((-1, 0)),
        KeyCode::Right | KeyCode::L => Some((1, 0)),
        KeyCode::Y => Some((-1, -1)),
        KeyCode::U => Some((1, -1)),
        KeyCode::B => Some((-1, 1)),
        KeyCode::N => Some((1, 1)),
        _ => None,
    }
}

/// Inventory menus: `a`-`z` picks a slot, anything else backs out.
fn decode_item_selection(key: KeyCode) -> Option<Command> {
    if let Some(slot) = slot_index(key) {
        return Some(Command::SelectSlot(slot));
    }
    Some(Command::Dismiss)
}

fn slot_index(key: KeyCode) -> Option<usize> {
    // KeyCode letter values mirror their ASCII codes.
    let code = key as u32;
    let a = KeyCode::A as u32;
    let z = KeyCode::Z as u32;
    if (a..=z).contains(&code) {
        Some((code - a) as usize)
    } else {
        None
    }
}

fn decode_history(key: KeyCode) -> Command {
    match key {
        KeyCode::Up | KeyCode::K => Command::ScrollHistory(1),
        KeyCode::Down | KeyCode::J => Command::ScrollHistory(-1),
        KeyCode::PageUp => Command::ScrollHistory(HISTORY_PAGE as i32),
        KeyCode::PageDown => Command::ScrollHistory(-(HISTORY_PAGE as i32)),
        KeyCode::Home => Command::HistoryOldest,
        KeyCode::End => Command::HistoryNewest,
        _ => Command::Dismiss,
    }
}

/// After death only the history and quitting remain available.
fn decode_game_over(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::V => Some(Command::OpenHistory),
        KeyCode::Escape => Some(Command::Quit),
        _ => None,
    }
}

/// Polls macroquad for this frame's keypress and decodes it.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns the decoded command for the key pressed this frame, if any.
    pub fn poll(&self, mode: InputMode) -> Option<Command> {
        get_last_key_pressed().and_then(|key| decode_key(mode, key))
    }
}
