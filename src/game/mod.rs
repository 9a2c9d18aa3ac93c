//! # Game Module
//!
//! Core game state management, world representation, and entity systems.
//!
//! This module contains the fundamental building blocks of the Delve engine:
//! - Map, tile and visibility representation
//! - Entity-component records for actors and items
//! - The closed action set and its `perform` dispatch
//! - Monster AI and the turn engine

pub mod actions;
pub mod ai;
pub mod entities;
pub mod fov;
pub mod log;
pub mod state;
pub mod world;

pub use actions::*;
pub use ai::*;
pub use entities::*;
pub use log::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An RGB color triple used for glyph foregrounds and backgrounds.
pub type Rgb = (u8, u8, u8);

/// Represents a 2D coordinate in the game world.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Chebyshev distance to another position.
    ///
    /// This is the natural metric for 8-directional movement: one step in
    /// any direction, diagonal included, covers distance 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.chebyshev_distance(pos2), 4);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x).abs().max((self.y - other.y).abs()) as u32
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.x - 1, self.y - 1), // NW
            Position::new(self.x, self.y - 1),     // N
            Position::new(self.x + 1, self.y - 1), // NE
            Position::new(self.x - 1, self.y),     // W
            Position::new(self.x + 1, self.y),     // E
            Position::new(self.x - 1, self.y + 1), // SW
            Position::new(self.x, self.y + 1),     // S
            Position::new(self.x + 1, self.y + 1), // SE
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
