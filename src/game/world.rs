//! # World Representation
//!
//! The tile catalog and the [`GameMap`]: a dense row-major tile grid plus
//! the two visibility grids (`visible`, recomputed every turn, and
//! `explored`, monotonic for the whole session) and the set of entities
//! currently placed on the map.
//!
//! Entity queries are linear scans; at these map sizes no spatial index is
//! warranted.

use crate::game::{Entity, EntityId, Position, Rgb};
use serde::{Deserialize, Serialize};

/// How a tile is drawn in a given visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGraphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Discriminant for the two tile kinds in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
}

/// An immutable tile record: movement and sight flags plus the lit and
/// memorized appearances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub walkable: bool,
    pub transparent: bool,
    pub lit: TileGraphic,
    pub memorized: TileGraphic,
}

impl Tile {
    /// The floor tile singleton: walkable and transparent.
    pub fn floor() -> Self {
        Self {
            kind: TileKind::Floor,
            walkable: true,
            transparent: true,
            lit: TileGraphic {
                glyph: ' ',
                fg: (255, 255, 255),
                bg: (200, 180, 50),
            },
            memorized: TileGraphic {
                glyph: ' ',
                fg: (255, 255, 255),
                bg: (50, 50, 150),
            },
        }
    }

    /// The wall tile singleton: blocks both movement and sight.
    pub fn wall() -> Self {
        Self {
            kind: TileKind::Wall,
            walkable: false,
            transparent: false,
            lit: TileGraphic {
                glyph: ' ',
                fg: (255, 255, 255),
                bg: (130, 110, 50),
            },
            memorized: TileGraphic {
                glyph: ' ',
                fg: (255, 255, 255),
                bg: (0, 0, 100),
            },
        }
    }
}

/// Visibility classification of a cell for drawing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Currently in the player's field of view
    Lit,
    /// Seen before but not currently visible
    Memorized,
    /// Never seen
    Shroud,
}

/// The dungeon map: tile grid, visibility grids and the entities on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    /// Cells currently in view. Rewritten by every FOV sweep.
    pub visible: Vec<bool>,
    /// Cells ever seen. Monotonic: once true, never reset.
    pub explored: Vec<bool>,
    pub entities: Vec<Entity>,
}

impl GameMap {
    /// Creates a map of the given dimensions filled with wall tiles.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive; a degenerate map is a
    /// caller contract violation, not a runtime condition.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "map dimensions must be positive, got {}x{}",
            width,
            height
        );
        let size = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); size],
            visible: vec![false; size],
            explored: vec![false; size],
            entities: Vec::new(),
        }
    }

    /// Returns true if `(x, y)` is within the bounds of this map.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Row-major index of an in-bounds cell.
    ///
    /// # Panics
    ///
    /// Panics on out-of-bounds coordinates. Grid access never clamps;
    /// callers guard with [`GameMap::in_bounds`].
    pub fn idx(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "map access out of bounds: ({}, {}) on {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    /// The tile at `(x, y)`, or `None` out of bounds.
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Overwrites the tile at `(x, y)`. Used only during generation.
    ///
    /// # Panics
    ///
    /// Panics out of bounds; the generator only carves cells it has
    /// already bounds-checked.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        let idx = self.idx(x, y);
        self.tiles[idx] = tile;
    }

    /// True if the tile at `(x, y)` can be walked over. Out-of-bounds
    /// cells are never walkable.
    pub fn walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map(|tile| tile.walkable).unwrap_or(false)
    }

    /// True if the tile at `(x, y)` does not block sight. Out-of-bounds
    /// cells are opaque.
    pub fn transparent(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map(|tile| tile.transparent).unwrap_or(false)
    }

    /// Classifies a cell for drawing: lit if currently visible, memorized
    /// if only explored, shroud otherwise.
    ///
    /// # Panics
    ///
    /// Panics on out-of-bounds coordinates.
    pub fn render_state(&self, x: i32, y: i32) -> RenderState {
        let idx = self.idx(x, y);
        if self.visible[idx] {
            RenderState::Lit
        } else if self.explored[idx] {
            RenderState::Memorized
        } else {
            RenderState::Shroud
        }
    }

    /// Looks up an entity by ID.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Looks up an entity by ID, mutably.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Removes an entity from the map and returns it, e.g. when an item
    /// moves into an inventory.
    pub fn take_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        Some(self.entities.remove(index))
    }

    /// The movement-blocking entity at `(x, y)`, if any.
    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.blocks_movement && entity.position == Position::new(x, y))
    }

    /// The living actor at `(x, y)`, if any. Corpses do not count.
    pub fn actor_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.is_alive() && entity.position == Position::new(x, y))
    }

    /// All items lying at `(x, y)`.
    pub fn items_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Entity> {
        let position = Position::new(x, y);
        self.entities
            .iter()
            .filter(move |entity| entity.consumable.is_some() && entity.position == position)
    }

    /// IDs of all living non-player actors, in their stable storage order.
    /// The turn engine visits each exactly once per turn.
    pub fn monster_ids(&self, player_id: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.is_alive() && entity.id != player_id)
            .map(|entity| entity.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Entity;

    #[test]
    fn test_new_map_is_all_walls() {
        let map = GameMap::new(10, 8);
        for y in 0..8 {
            for x in 0..10 {
                assert_eq!(map.tile(x, y).unwrap().kind, TileKind::Wall);
                assert!(!map.visible[map.idx(x, y)]);
                assert!(!map.explored[map.idx(x, y)]);
            }
        }
    }

    #[test]
    fn test_bounds_checks() {
        let map = GameMap::new(10, 8);
        assert!(map.in_bounds(0, 0));
        assert!(map.in_bounds(9, 7));
        assert!(!map.in_bounds(10, 7));
        assert!(!map.in_bounds(-1, 0));

        assert!(map.tile(10, 0).is_none());
        assert!(!map.walkable(-1, -1));
        assert!(!map.transparent(0, 8));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_idx_panics_out_of_bounds() {
        let map = GameMap::new(10, 8);
        map.idx(10, 0);
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn test_degenerate_dimensions_panic() {
        GameMap::new(0, 5);
    }

    #[test]
    fn test_render_state_ternary() {
        let mut map = GameMap::new(4, 4);
        assert_eq!(map.render_state(1, 1), RenderState::Shroud);

        let idx = map.idx(1, 1);
        map.visible[idx] = true;
        map.explored[idx] = true;
        assert_eq!(map.render_state(1, 1), RenderState::Lit);

        map.visible[idx] = false;
        assert_eq!(map.render_state(1, 1), RenderState::Memorized);
    }

    #[test]
    fn test_entity_queries() {
        let mut map = GameMap::new(10, 10);

        let mut orc = Entity::orc();
        orc.position = Position::new(3, 3);
        let orc_id = orc.id;
        map.entities.push(orc);

        let mut potion = Entity::health_potion();
        potion.position = Position::new(3, 3);
        map.entities.push(potion);

        assert_eq!(map.blocking_entity_at(3, 3).unwrap().id, orc_id);
        assert_eq!(map.actor_at(3, 3).unwrap().id, orc_id);
        assert_eq!(map.items_at(3, 3).count(), 1);
        assert!(map.actor_at(4, 4).is_none());

        // A dead orc stops blocking and stops being a melee target,
        // but the potion stays.
        map.entity_mut(orc_id).unwrap().take_damage(99);
        assert!(map.blocking_entity_at(3, 3).is_none());
        assert!(map.actor_at(3, 3).is_none());
        assert_eq!(map.items_at(3, 3).count(), 1);
    }

    #[test]
    fn test_monster_ids_excludes_player_and_dead() {
        let mut map = GameMap::new(10, 10);
        let player = Entity::player();
        let player_id = player.id;
        map.entities.push(player);

        let orc = Entity::orc();
        let orc_id = orc.id;
        map.entities.push(orc);

        let mut troll = Entity::troll();
        troll.take_damage(99);
        map.entities.push(troll);

        assert_eq!(map.monster_ids(player_id), vec![orc_id]);
    }
}
