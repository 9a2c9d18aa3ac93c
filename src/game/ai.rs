//! # Monster AI
//!
//! Per-turn decision for hostile actors: attack when adjacent to a visible
//! player, otherwise pursue along a cost-weighted shortest path.
//!
//! Path steps are consumed without re-checking occupancy. If another
//! monster moved into the cell since the path was computed, the emitted
//! movement action fails Impossible on its own and the monster's turn is
//! simply wasted; the turn engine swallows monster-side failures.

use crate::game::state::GameState;
use crate::game::{Action, EntityId, GameMap, Position};
use pathfinding::prelude::astar;

/// Movement cost multiplier for a cardinal step.
const CARDINAL_COST: u32 = 2;
/// Movement cost multiplier for a diagonal step. Strictly more than a
/// cardinal step so true distance is respected and paths don't zigzag
/// through corners for free.
const DIAGONAL_COST: u32 = 3;
/// Extra cell cost under a movement-blocking entity. Steers monsters
/// around each other without making occupied cells impassable, so they
/// still funnel through corridors instead of taking long detours.
const OCCUPIED_PENALTY: u32 = 10;

/// Decides one turn for a hostile monster and updates its cached path.
///
/// - Player visible and adjacent (Chebyshev ≤ 1): melee, drop the path.
/// - Player visible: recompute the path to the player's cell.
/// - Otherwise: keep pursuing the last computed path, if any.
/// - No path left: wait.
///
/// A monster "sees" the player when its own cell is inside the player's
/// field of view; the shadowcast is symmetric enough for that to serve as
/// mutual line of sight.
pub fn hostile_act(state: &mut GameState, monster_id: EntityId) -> Action {
    let Some(player) = state.map.entity(state.player_id) else {
        return Action::Wait;
    };
    let player_pos = player.position;

    let Some(monster) = state.map.entity(monster_id) else {
        return Action::Wait;
    };
    if !monster.is_alive() {
        return Action::Wait;
    }
    let monster_pos = monster.position;

    let delta = player_pos - monster_pos;
    let distance = monster_pos.chebyshev_distance(player_pos);
    let sees_player = state.map.visible[state.map.idx(monster_pos.x, monster_pos.y)];

    if sees_player && distance <= 1 {
        if let Some(ai) = ai_mut(state, monster_id) {
            ai.path.clear();
        }
        return Action::Melee {
            dx: delta.x,
            dy: delta.y,
        };
    }

    if sees_player {
        let path = path_to(&state.map, monster_pos, player_pos);
        if let Some(ai) = ai_mut(state, monster_id) {
            ai.path = path;
        }
    }

    if let Some(ai) = ai_mut(state, monster_id) {
        if !ai.path.is_empty() {
            let next = ai.path.remove(0);
            return Action::Move {
                dx: next.x - monster_pos.x,
                dy: next.y - monster_pos.y,
            };
        }
    }

    Action::Wait
}

fn ai_mut(state: &mut GameState, monster_id: EntityId) -> Option<&mut crate::game::HostileAi> {
    state.map.entity_mut(monster_id)?.ai.as_mut()
}

/// Computes the cheapest 8-directional path from `from` to `to`.
///
/// Walkable cells cost 1, cells under a movement-blocking entity cost
/// 1 + [`OCCUPIED_PENALTY`]; a step's price is the destination cell cost
/// times the cardinal or diagonal multiplier. The returned path excludes
/// the starting cell and is empty when no route exists.
pub fn path_to(map: &GameMap, from: Position, to: Position) -> Vec<Position> {
    let mut cell_cost = vec![0u32; (map.width * map.height) as usize];
    for y in 0..map.height {
        for x in 0..map.width {
            if map.walkable(x, y) {
                cell_cost[map.idx(x, y)] = 1;
            }
        }
    }
    for entity in &map.entities {
        let idx = map.idx(entity.position.x, entity.position.y);
        if entity.blocks_movement && cell_cost[idx] > 0 {
            cell_cost[idx] += OCCUPIED_PENALTY;
        }
    }

    let result = astar(
        &from,
        |&pos| {
            let mut successors = Vec::with_capacity(8);
            for neighbor in pos.adjacent_positions() {
                if !map.in_bounds(neighbor.x, neighbor.y) {
                    continue;
                }
                let cost = cell_cost[map.idx(neighbor.x, neighbor.y)];
                if cost == 0 {
                    continue;
                }
                let diagonal = neighbor.x != pos.x && neighbor.y != pos.y;
                let step = if diagonal { DIAGONAL_COST } else { CARDINAL_COST };
                successors.push((neighbor, cost * step));
            }
            successors
        },
        // Chebyshev distance times the cardinal multiplier never
        // overestimates, so the search stays optimal.
        |&pos| pos.chebyshev_distance(to) * CARDINAL_COST,
        |&pos| pos == to,
    );

    match result {
        Some((path, _cost)) => path.into_iter().skip(1).collect(),
        None => Vec::new(),
    }
}
