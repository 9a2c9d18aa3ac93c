//! Integration tests for the item lifecycle: pickup, use, drop, and every
//! recoverable failure along the way.

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

fn drop_potion_at(state: &mut GameState, x: i32, y: i32) -> EntityId {
    let mut potion = Entity::health_potion();
    potion.position = Position::new(x, y);
    let id = potion.id;
    state.map.entities.push(potion);
    id
}

fn player_hp(state: &GameState) -> i32 {
    state
        .player()
        .and_then(|player| player.fighter.as_ref())
        .map(|fighter| fighter.hp())
        .expect("player has fighter stats")
}

#[test]
fn test_pick_up_moves_item_off_the_map() {
    let mut state = open_session(20, 20, 10, 10);
    let potion_id = drop_potion_at(&mut state, 10, 10);

    state.process_turn(Action::PickUp).unwrap();

    assert!(state.map.entity(potion_id).is_none());
    assert_eq!(state.player_items().len(), 1);
    assert_eq!(state.player_items()[0].id, potion_id);
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "You picked up the Health Potion!"
    );
}

#[test]
fn test_pick_up_on_empty_cell_is_impossible() {
    let mut state = open_session(20, 20, 10, 10);
    let advanced = state.process_turn(Action::PickUp).unwrap();

    assert!(!advanced);
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "There is nothing here to pick up."
    );
}

#[test]
fn test_pick_up_with_full_inventory_is_impossible() {
    let mut state = open_session(20, 20, 10, 10);
    {
        let inventory = state
            .map
            .entity_mut(state.player_id)
            .unwrap()
            .inventory
            .as_mut()
            .unwrap();
        for _ in 0..inventory.capacity {
            inventory.items.push(Entity::health_potion());
        }
    }
    let potion_id = drop_potion_at(&mut state, 10, 10);

    let advanced = state.process_turn(Action::PickUp).unwrap();
    assert!(!advanced);
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "Your inventory is full."
    );
    // The potion stays on the floor.
    assert!(state.map.entity(potion_id).is_some());
}

#[test]
fn test_healing_clamps_at_max_hp() {
    let mut state = open_session(20, 20, 10, 10);
    drop_potion_at(&mut state, 10, 10);
    state.process_turn(Action::PickUp).unwrap();
    let item_id = state.player_items()[0].id;

    // At 28/30, a 4 HP potion recovers exactly 2.
    state.map.entity_mut(state.player_id).unwrap().set_hp(28);
    state.process_turn(Action::UseItem { item_id }).unwrap();

    assert_eq!(player_hp(&state), 30);
    assert!(state.player_items().is_empty());
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "You consume the Health Potion and recover 2 HP!"
    );
}

#[test]
fn test_healing_at_full_hp_keeps_the_potion() {
    let mut state = open_session(20, 20, 10, 10);
    drop_potion_at(&mut state, 10, 10);
    state.process_turn(Action::PickUp).unwrap();
    let item_id = state.player_items()[0].id;

    let advanced = state.process_turn(Action::UseItem { item_id }).unwrap();

    assert!(!advanced);
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "You are already at full HP."
    );
    // The failed use consumed nothing.
    assert_eq!(state.player_items().len(), 1);
}

#[test]
fn test_using_an_item_not_carried_is_impossible() {
    let mut state = open_session(20, 20, 10, 10);
    let stray_id = drop_potion_at(&mut state, 15, 15);

    let advanced = state.process_turn(Action::UseItem { item_id: stray_id }).unwrap();
    assert!(!advanced);
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "You do not have that item."
    );
}

#[test]
fn test_drop_returns_item_to_the_player_cell() {
    let mut state = open_session(20, 20, 10, 10);
    let potion_id = drop_potion_at(&mut state, 10, 10);
    state.process_turn(Action::PickUp).unwrap();

    state.process_turn(Action::Move { dx: 1, dy: 1 }).unwrap();
    state.process_turn(Action::Drop { item_id: potion_id }).unwrap();

    assert!(state.player_items().is_empty());
    let dropped = state.map.entity(potion_id).unwrap();
    assert_eq!(dropped.position, Position::new(11, 11));
    assert_eq!(
        state.log.messages.last().unwrap().text,
        "You dropped the Health Potion."
    );

    // And it can be picked straight back up.
    state.process_turn(Action::PickUp).unwrap();
    assert_eq!(state.player_items().len(), 1);
}
