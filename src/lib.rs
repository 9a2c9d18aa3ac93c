//! # Delve
//!
//! A turn-based dungeon-crawler engine.
//!
//! ## Architecture Overview
//!
//! Delve is organized around a handful of core systems:
//!
//! - **Game State**: one session struct that owns the map, the entities and
//!   the message log, and drives the turn engine
//! - **Entity System**: plain data records with optional components
//!   (combat stats, inventory, consumable effect, AI)
//! - **Action System**: a closed set of action variants resolved by a single
//!   exhaustive `perform` dispatch
//! - **Generation System**: seeded room-and-corridor dungeon generation
//! - **Rendering System**: macroquad-based glyph rendering at the boundary
//!
//! The core is strictly single-threaded and turn-synchronous: one player
//! action, then every living monster acts once, then visibility is
//! recomputed.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Delve engine.
///
/// `Impossible` is the only recoverable category: an action that cannot
/// apply in the current state raises it, the turn dispatcher reports it to
/// the message log, and no enemy turn elapses. Everything else indicates a
/// broken engine contract or a failed boundary operation.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// The requested action cannot apply in the current state
    #[error("{0}")]
    Impossible(String),

    /// Game state is internally inconsistent
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DelveError {
    /// Shorthand for the recoverable action-failure variant.
    pub fn impossible(reason: impl Into<String>) -> Self {
        DelveError::Impossible(reason.into())
    }

    /// Returns true if this error is the recoverable `Impossible` kind.
    pub fn is_impossible(&self) -> bool {
        matches!(self, DelveError::Impossible(_))
    }
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
///
/// These are the static knobs a deployment wrapper supplies; `main.rs`
/// exposes them as CLI flags with these defaults.
pub mod config {
    /// Default map width in tiles
    pub const DEFAULT_MAP_WIDTH: i32 = 80;

    /// Default map height in tiles
    pub const DEFAULT_MAP_HEIGHT: i32 = 43;

    /// Default maximum number of room placement attempts
    pub const DEFAULT_MAX_ROOMS: u32 = 30;

    /// Default minimum room edge length (including walls)
    pub const DEFAULT_MIN_ROOM_SIZE: i32 = 6;

    /// Default maximum room edge length (including walls)
    pub const DEFAULT_MAX_ROOM_SIZE: i32 = 10;

    /// Default cap on monsters seeded per room
    pub const DEFAULT_MAX_MONSTERS_PER_ROOM: u32 = 2;

    /// Default cap on items seeded per room
    pub const DEFAULT_MAX_ITEMS_PER_ROOM: u32 = 2;

    /// Field-of-view radius in tiles
    pub const FOV_RADIUS: i32 = 8;

    /// Inventory slots per actor (letter-addressable, a-z)
    pub const INVENTORY_CAPACITY: usize = 26;
}
