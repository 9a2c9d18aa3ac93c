//! # Message Log
//!
//! Append-only ordered list of `(text, color)` entries. Consecutive
//! identical messages stack: the existing entry's counter increments and
//! it renders as "text (xN)" instead of repeating.

use crate::game::Rgb;
use serde::{Deserialize, Serialize};

/// Message colors used by the engine.
pub mod colors {
    use crate::game::Rgb;

    pub const WHITE: Rgb = (255, 255, 255);
    pub const WELCOME_TEXT: Rgb = (32, 160, 255);
    pub const PLAYER_ATK: Rgb = (224, 224, 224);
    pub const ENEMY_ATK: Rgb = (255, 192, 192);
    pub const PLAYER_DIE: Rgb = (255, 48, 48);
    pub const ENEMY_DIE: Rgb = (255, 160, 48);
    pub const HEALTH_RECOVERED: Rgb = (0, 255, 0);
    pub const IMPOSSIBLE: Rgb = (128, 128, 128);
    pub const ITEM_PICKED_UP: Rgb = (64, 128, 255);
}

/// A single log entry with its stack counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
    pub count: u32,
}

impl Message {
    fn new(text: String, color: Rgb) -> Self {
        Self {
            text,
            color,
            count: 1,
        }
    }

    /// The rendered text, including the stack counter when above one.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

/// The session's message history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    pub messages: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, stacking onto the previous entry when the text
    /// matches it exactly.
    pub fn add(&mut self, text: impl Into<String>, color: Rgb) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut() {
            if last.text == text {
                last.count += 1;
                return;
            }
        }
        self.messages.push(Message::new(text, color));
    }
}
