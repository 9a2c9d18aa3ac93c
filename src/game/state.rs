//! # Game State Module
//!
//! The session-state struct and the turn engine. `GameState` owns the map
//! (and with it every entity), the message log and the current input mode;
//! all turn processing flows through [`GameState::process_turn`] on a
//! single call stack.
//!
//! Turn policy: the player's action runs first. If it fails Impossible the
//! failure is logged and nothing else happens — no enemy acts, visibility
//! stays as it was. If it succeeds, every living monster acts exactly once
//! in stable order and the field of view is recomputed exactly once at the
//! end.

use crate::config;
use crate::game::log::colors;
use crate::game::{ai, fov, Action, Entity, EntityId, GameMap, MessageLog, Position};
use crate::{DelveError, DelveResult};
use log::{debug, warn};

/// Which input surface the session currently presents.
///
/// The input decoder interprets keys differently per mode; the core only
/// transitions modes (player death flips to `GameOver`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal play: movement, combat, pickup.
    MainGame,
    /// Choosing an inventory item to use.
    InventoryUse,
    /// Choosing an inventory item to drop.
    InventoryDrop,
    /// Scrolling the message history; `offset` counts lines back from the end.
    History { offset: usize },
    /// The player is dead; only dismiss/quit remain.
    GameOver,
}

/// Central session state for one dungeon run.
#[derive(Debug)]
pub struct GameState {
    pub map: GameMap,
    pub player_id: EntityId,
    pub log: MessageLog,
    pub mode: InputMode,
    pub turn_number: u64,
}

impl GameState {
    /// Wraps a generated map into a running session and performs the
    /// initial visibility sweep.
    ///
    /// # Panics
    ///
    /// Panics if the player entity is not already placed on the map; the
    /// generator's output contract guarantees it is.
    pub fn new(map: GameMap, player_id: EntityId) -> Self {
        assert!(
            map.entity(player_id).is_some(),
            "generated map must contain the player"
        );
        let mut state = Self {
            map,
            player_id,
            log: MessageLog::new(),
            mode: InputMode::MainGame,
            turn_number: 0,
        };
        state.refresh_fov();
        state
    }

    /// The player entity, if still present on the map.
    pub fn player(&self) -> Option<&Entity> {
        self.map.entity(self.player_id)
    }

    /// The items currently carried by the player, in slot order.
    pub fn player_items(&self) -> &[Entity] {
        self.player()
            .and_then(|player| player.inventory.as_ref())
            .map(|inventory| inventory.items.as_slice())
            .unwrap_or(&[])
    }

    /// Resolves one player-initiated action.
    ///
    /// Returns `Ok(true)` when a full turn elapsed (enemy actions and FOV
    /// refresh included) and `Ok(false)` when the action was impossible
    /// and consumed no turn.
    pub fn process_turn(&mut self, action: Action) -> DelveResult<bool> {
        match action.perform(self, self.player_id) {
            Ok(()) => {}
            Err(DelveError::Impossible(reason)) => {
                debug!("player action impossible: {}", reason);
                self.log.add(reason, colors::IMPOSSIBLE);
                return Ok(false);
            }
            Err(other) => return Err(other),
        }

        self.handle_enemy_turns();
        self.refresh_fov();
        self.turn_number += 1;
        Ok(true)
    }

    /// Runs one `act` per living monster, in the stable order the entity
    /// set yields them. The ID list is snapshotted first so deaths during
    /// the sweep cannot skip or revisit anyone.
    fn handle_enemy_turns(&mut self) {
        for monster_id in self.map.monster_ids(self.player_id) {
            // A monster may have died earlier in this same sweep.
            let still_alive = self
                .map
                .entity(monster_id)
                .map(|monster| monster.is_alive())
                .unwrap_or(false);
            if !still_alive {
                continue;
            }

            let action = ai::hostile_act(self, monster_id);
            if let Err(err) = action.perform(self, monster_id) {
                if err.is_impossible() {
                    // A blocked step just wastes the monster's turn.
                    debug!("monster {} turn wasted: {}", monster_id, err);
                } else {
                    warn!("monster {} action failed: {}", monster_id, err);
                }
            }
        }
    }

    /// Recomputes the field of view from the player's cell.
    pub fn refresh_fov(&mut self) {
        if let Some(position) = self.player().map(|player| player.position) {
            fov::update_fov(&mut self.map, position, config::FOV_RADIUS);
        }
    }

    /// Comma-joined names of the visible entities at a cell, for the
    /// mouse-hover readout. Empty when the cell is out of bounds or not
    /// currently visible.
    pub fn names_at(&self, x: i32, y: i32) -> String {
        if !self.map.in_bounds(x, y) || !self.map.visible[self.map.idx(x, y)] {
            return String::new();
        }
        let position = Position::new(x, y);
        let names: Vec<&str> = self
            .map
            .entities
            .iter()
            .filter(|entity| entity.position == position)
            .map(|entity| entity.name.as_str())
            .collect();
        names.join(", ")
    }
}
