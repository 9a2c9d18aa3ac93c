//! Integration tests for hostile monster behaviour: melee priority,
//! pursuit, and the memory of a path to the player's last seen cell.

use delve::game::ai;
use delve::{Action, Entity, EntityId, GameMap, GameState, Position, Tile};

fn open_session(width: i32, height: i32, x: i32, y: i32) -> GameState {
    let mut map = GameMap::new(width, height);
    for ty in 1..height - 1 {
        for tx in 1..width - 1 {
            map.set_tile(tx, ty, Tile::floor());
        }
    }
    let mut player = Entity::player();
    player.position = Position::new(x, y);
    let player_id = player.id;
    map.entities.push(player);
    GameState::new(map, player_id)
}

fn place(state: &mut GameState, mut entity: Entity, x: i32, y: i32) -> EntityId {
    entity.position = Position::new(x, y);
    let id = entity.id;
    state.map.entities.push(entity);
    id
}

#[test]
fn test_adjacent_visible_monster_always_attacks() {
    let mut state = open_session(20, 20, 10, 10);
    let orc = place(&mut state, Entity::orc(), 11, 11);
    // A stale cached path pointing away must not override the attack.
    state.map.entity_mut(orc).unwrap().ai.as_mut().unwrap().path =
        vec![Position::new(12, 11), Position::new(13, 11)];
    state.refresh_fov();

    let action = ai::hostile_act(&mut state, orc);
    assert_eq!(action, Action::Melee { dx: -1, dy: -1 });
    // The stale path was discarded.
    assert!(state
        .map
        .entity(orc)
        .unwrap()
        .ai
        .as_ref()
        .unwrap()
        .path
        .is_empty());
}

#[test]
fn test_visible_monster_closes_distance() {
    let mut state = open_session(20, 20, 10, 10);
    let orc = place(&mut state, Entity::orc(), 15, 10);
    state.refresh_fov();

    let action = ai::hostile_act(&mut state, orc);
    assert_eq!(action, Action::Move { dx: -1, dy: 0 });
}

#[test]
fn test_unseen_monster_waits() {
    // The monster is outside the field of view and has never seen the
    // player, so it has no path and stands still.
    let mut state = open_session(40, 20, 3, 10);
    let orc = place(&mut state, Entity::orc(), 35, 10);
    state.refresh_fov();
    assert!(!state.map.visible[state.map.idx(35, 10)]);

    let action = ai::hostile_act(&mut state, orc);
    assert_eq!(action, Action::Wait);
}

#[test]
fn test_monster_pursues_last_seen_position() {
    // Two rooms joined by a corridor. The orc sees the player once, then
    // the player steps out of view; the orc keeps following the cached
    // path toward where the player was.
    let mut map = GameMap::new(30, 9);
    for x in 1..13 {
        for y in 1..8 {
            map.set_tile(x, y, Tile::floor());
        }
    }
    for x in 13..29 {
        map.set_tile(x, 4, Tile::floor());
    }

    let mut player = Entity::player();
    player.position = Position::new(12, 4);
    let player_id = player.id;
    map.entities.push(player);
    let mut state = GameState::new(map, player_id);
    let orc = place(&mut state, Entity::orc(), 6, 4);
    state.refresh_fov();

    // The orc sees the player and caches a route.
    let action = ai::hostile_act(&mut state, orc);
    assert!(matches!(action, Action::Move { .. }));

    // Teleport the player far down the corridor, out of the orc's sight.
    state.map.entity_mut(player_id).unwrap().position = Position::new(28, 4);
    state.refresh_fov();
    assert!(!state.map.visible[state.map.idx(7, 4)]);

    // The orc still advances along the remembered path.
    let action = ai::hostile_act(&mut state, orc);
    assert!(matches!(action, Action::Move { .. }));
}

#[test]
fn test_monsters_converge_without_stacking() {
    // Several monsters chasing the same target never end a turn sharing
    // a cell: a step into an occupied cell fails and wastes the turn.
    let mut state = open_session(20, 20, 10, 10);
    place(&mut state, Entity::orc(), 13, 10);
    place(&mut state, Entity::orc(), 14, 10);
    place(&mut state, Entity::troll(), 13, 11);
    state.refresh_fov();

    for _ in 0..6 {
        if state.process_turn(Action::Wait).is_err() {
            break;
        }
        let mut seen = std::collections::HashSet::new();
        for entity in state.map.entities.iter().filter(|e| e.blocks_movement) {
            assert!(
                seen.insert(entity.position),
                "two blockers share {:?}",
                entity.position
            );
        }
    }
}

#[test]
fn test_dead_monster_takes_no_turns() {
    let mut state = open_session(20, 20, 10, 10);
    let orc = place(&mut state, Entity::orc(), 12, 10);
    state.map.entity_mut(orc).unwrap().take_damage(99);
    state.refresh_fov();

    state.process_turn(Action::Wait).unwrap();
    // The corpse stayed put and the player took no damage.
    assert_eq!(state.map.entity(orc).unwrap().position, Position::new(12, 10));
    let hp = state
        .player()
        .unwrap()
        .fighter
        .as_ref()
        .unwrap()
        .hp();
    assert_eq!(hp, 30);
}
