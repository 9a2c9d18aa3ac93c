//! # Dungeon Generation
//!
//! Room-and-corridor layout: rooms are placed by uniform rejection
//! sampling (a candidate that would touch or overlap an accepted room is
//! skipped, not retried), carved into an all-wall map, and chained
//! together with L-shaped corridors between consecutive room centres.
//!
//! Generation never fails. If the dice are hostile it degrades to fewer
//! rooms; the first candidate is always accepted, so the returned map
//! always contains at least one room with the player at its centre.

use crate::game::{Entity, EntityId, GameMap, Position, Tile};
use crate::generation::{GenerationConfig, Room};
use crate::utils::bresenham_line;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

/// Probability that a seeded monster is an orc; the rest are trolls.
const ORC_CHANCE: f64 = 0.8;

/// Builds a dungeon map with the given player placed in the first room.
///
/// Returns the finished map; the caller keeps the player's ID from the
/// template it passed in.
///
/// # Panics
///
/// Panics if `config` fails [`GenerationConfig::validate`].
pub fn generate_dungeon(config: &GenerationConfig, rng: &mut StdRng, player: Entity) -> GameMap {
    let (map, _rooms) = generate_dungeon_with_rooms(config, rng, player);
    map
}

/// Like [`generate_dungeon`], but also returns the accepted rooms so
/// callers can check layout invariants.
pub fn generate_dungeon_with_rooms(
    config: &GenerationConfig,
    rng: &mut StdRng,
    player: Entity,
) -> (GameMap, Vec<Room>) {
    config.validate();

    let mut map = GameMap::new(config.map_width, config.map_height);
    let mut rooms: Vec<Room> = Vec::new();
    let mut player = Some(player);
    let mut rejected = 0u32;

    for _ in 0..config.max_rooms {
        let room_width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let room_height = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(0..=config.map_width - room_width - 1);
        let y = rng.gen_range(0..=config.map_height - room_height - 1);
        let room = Room::new(x, y, room_width, room_height);

        // Skip without retrying; density degrades gracefully.
        if rooms.iter().any(|other| room.intersects(other)) {
            rejected += 1;
            continue;
        }

        for cell in room.inner() {
            map.set_tile(cell.x, cell.y, Tile::floor());
        }

        if let Some(mut entity) = player.take() {
            // The first accepted room is the player's.
            entity.position = room.centre();
            map.entities.push(entity);
        } else {
            let previous_centre = rooms
                .last()
                .expect("a previous room exists once the player is placed")
                .centre();
            carve_tunnel(&mut map, rng, previous_centre, room.centre());
        }

        place_entities(&room, &mut map, rng, config);
        rooms.push(room);
    }

    info!(
        "generated dungeon: {} rooms accepted, {} candidates rejected, {} entities",
        rooms.len(),
        rejected,
        map.entities.len()
    );
    (map, rooms)
}

/// Carves an L-shaped corridor between two points, choosing uniformly
/// whether to run horizontal-then-vertical or vertical-then-horizontal.
fn carve_tunnel(map: &mut GameMap, rng: &mut StdRng, start: Position, end: Position) {
    let corner = if rng.gen_bool(0.5) {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };

    for leg in [
        bresenham_line(start, corner),
        bresenham_line(corner, end),
    ] {
        for cell in leg {
            if map.in_bounds(cell.x, cell.y) {
                map.set_tile(cell.x, cell.y, Tile::floor());
            }
        }
    }
}

/// Seeds a freshly carved room with monsters and items. A draw that
/// lands on an occupied cell is skipped without retry.
fn place_entities(room: &Room, map: &mut GameMap, rng: &mut StdRng, config: &GenerationConfig) {
    let monster_count = rng.gen_range(0..=config.max_monsters_per_room);
    let item_count = rng.gen_range(0..=config.max_items_per_room);

    for _ in 0..monster_count {
        let position = random_interior_cell(room, rng);
        if cell_occupied(map, position) {
            continue;
        }
        let mut monster = if rng.gen_bool(ORC_CHANCE) {
            Entity::orc()
        } else {
            Entity::troll()
        };
        monster.position = position;
        debug!("seeded {} at ({}, {})", monster.name, position.x, position.y);
        map.entities.push(monster);
    }

    for _ in 0..item_count {
        let position = random_interior_cell(room, rng);
        if cell_occupied(map, position) {
            continue;
        }
        let mut item = Entity::health_potion();
        item.position = position;
        map.entities.push(item);
    }
}

fn random_interior_cell(room: &Room, rng: &mut StdRng) -> Position {
    Position::new(
        rng.gen_range(room.x1 + 1..room.x2),
        rng.gen_range(room.y1 + 1..room.y2),
    )
}

fn cell_occupied(map: &GameMap, position: Position) -> bool {
    map.entities.iter().any(|entity| entity.position == position)
}

/// Finds the player entity on a freshly generated map, for callers that
/// did not keep the template ID.
pub fn find_player(map: &GameMap) -> Option<EntityId> {
    map.entities
        .iter()
        .find(|entity| entity.glyph == '@')
        .map(|entity| entity.id)
}
