//! # Generation Module
//!
//! Procedural dungeon generation: seeded room-and-corridor layout plus
//! monster and item seeding.

pub mod dungeon;

pub use dungeon::*;

use crate::config;
use crate::game::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
///
/// All values are preconditions, not runtime inputs: a configuration that
/// cannot produce a legal dungeon (rooms larger than the map, zero
/// attempts) is a programming error and fails loudly in
/// [`GenerationConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
    /// Number of room placement attempts; collisions are skipped, so the
    /// accepted count is usually lower
    pub max_rooms: u32,
    /// Minimum room edge length, walls included
    pub min_room_size: i32,
    /// Maximum room edge length, walls included
    pub max_room_size: i32,
    /// Upper bound on monsters seeded per room
    pub max_monsters_per_room: u32,
    /// Upper bound on items seeded per room
    pub max_items_per_room: u32,
}

impl GenerationConfig {
    /// Creates a configuration with the deployment defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert!(config.min_room_size <= config.max_room_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::DEFAULT_MAP_WIDTH,
            map_height: config::DEFAULT_MAP_HEIGHT,
            max_rooms: config::DEFAULT_MAX_ROOMS,
            min_room_size: config::DEFAULT_MIN_ROOM_SIZE,
            max_room_size: config::DEFAULT_MAX_ROOM_SIZE,
            max_monsters_per_room: config::DEFAULT_MAX_MONSTERS_PER_ROOM,
            max_items_per_room: config::DEFAULT_MAX_ITEMS_PER_ROOM,
        }
    }

    /// Creates a configuration for testing with a smaller, simpler map.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 40,
            map_height: 25,
            max_rooms: 10,
            min_room_size: 4,
            max_room_size: 7,
            max_monsters_per_room: 1,
            max_items_per_room: 1,
        }
    }

    /// Creates a seeded random number generator from this config.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Asserts that this configuration can produce a legal dungeon.
    ///
    /// # Panics
    ///
    /// Panics on any violated precondition; a malformed configuration is
    /// a contract violation, never a recoverable runtime case.
    pub fn validate(&self) {
        assert!(
            self.map_width > 2 && self.map_height > 2,
            "map must be at least 3x3, got {}x{}",
            self.map_width,
            self.map_height
        );
        assert!(self.max_rooms >= 1, "at least one room attempt is required");
        assert!(
            self.min_room_size >= 3,
            "rooms need a 1-tile wall border around at least one floor cell"
        );
        assert!(
            self.min_room_size <= self.max_room_size,
            "min_room_size {} exceeds max_room_size {}",
            self.min_room_size,
            self.max_room_size
        );
        assert!(
            self.max_room_size < self.map_width && self.max_room_size < self.map_height,
            "rooms of size {} cannot fit a {}x{} map",
            self.max_room_size,
            self.map_width,
            self.map_height
        );
    }
}

/// A rectangular room, used only during generation.
///
/// The rectangle spans `[x1, x2] x [y1, y2]` including its 1-tile wall
/// border; only the interior is carved to floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    /// Creates a room from its top-left corner and outer dimensions.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// The integer midpoint of the room.
    pub fn centre(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Iterates the interior cells, excluding the wall border.
    pub fn inner(&self) -> impl Iterator<Item = Position> + '_ {
        let (x1, x2) = (self.x1, self.x2);
        (self.y1 + 1..self.y2)
            .flat_map(move |y| (x1 + 1..x2).map(move |x| Position::new(x, y)))
    }

    /// Returns true if this room's bounding box overlaps another's,
    /// shared borders included. The non-strict comparison is what keeps a
    /// guaranteed 1-tile wall between any two accepted rooms.
    pub fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}
