//! End-to-end session tests: generate a dungeon, wrap it in a session and
//! play turns against the real turn engine.

use delve::{generation, Action, Entity, GameState, GenerationConfig, Position};

fn new_session(seed: u64) -> GameState {
    let config = GenerationConfig::for_testing(seed);
    let mut rng = config.create_rng();
    let player = Entity::player();
    let player_id = player.id;
    let map = generation::generate_dungeon(&config, &mut rng, player);
    GameState::new(map, player_id)
}

#[test]
fn test_session_starts_with_player_visible() {
    let state = new_session(42);
    let player = state.player().expect("player placed");
    let idx = state.map.idx(player.position.x, player.position.y);
    assert!(state.map.visible[idx]);
    assert!(state.map.explored[idx]);
    assert_eq!(state.turn_number, 0);
}

#[test]
fn test_waiting_never_fails() {
    let mut state = new_session(7);
    for _ in 0..25 {
        let advanced = state.process_turn(Action::Wait).unwrap();
        assert!(advanced);
    }
    assert_eq!(state.turn_number, 25);
}

#[test]
fn test_exploration_grows_while_walking() {
    let mut state = new_session(3);
    let explored_count =
        |state: &GameState| state.map.explored.iter().filter(|&&seen| seen).count();
    let mut previous = explored_count(&state);
    assert!(previous > 0);

    // Bump around in all four cardinal directions; whatever happens, the
    // explored set never shrinks.
    let deltas = [(1, 0), (0, 1), (-1, 0), (0, -1)];
    for turn in 0..40 {
        let (dx, dy) = deltas[turn % deltas.len()];
        let _ = state.process_turn(Action::Bump { dx, dy }).unwrap();
        let now = explored_count(&state);
        assert!(now >= previous, "explored set shrank");
        previous = now;
    }
}

#[test]
fn test_player_never_leaves_walkable_ground() {
    let mut state = new_session(11);
    let deltas = [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
    for turn in 0..60 {
        let (dx, dy) = deltas[turn % deltas.len()];
        let _ = state.process_turn(Action::Bump { dx, dy }).unwrap();
        let Some(player) = state.player() else { break };
        let Position { x, y } = player.position;
        assert!(state.map.in_bounds(x, y));
        assert!(state.map.walkable(x, y));
    }
}

#[test]
fn test_failed_action_freezes_the_world() {
    let mut state = new_session(5);
    let positions_before: Vec<Position> =
        state.map.entities.iter().map(|entity| entity.position).collect();

    // Force an impossible action regardless of layout: a far out-of-map
    // item can never be used.
    let advanced = state
        .process_turn(Action::UseItem {
            item_id: delve::new_entity_id(),
        })
        .unwrap();

    assert!(!advanced);
    assert_eq!(state.turn_number, 0);
    let positions_after: Vec<Position> =
        state.map.entities.iter().map(|entity| entity.position).collect();
    assert_eq!(positions_before, positions_after);
}
