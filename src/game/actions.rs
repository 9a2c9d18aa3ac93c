//! # Action System
//!
//! The closed set of things an actor can do in one turn. Every variant
//! resolves through [`Action::perform`], which either applies its full
//! effect or fails with [`DelveError::Impossible`] before mutating
//! anything. The turn engine converts an Impossible failure from the
//! player into a log message and charges no turn for it.

use crate::game::log::colors;
use crate::game::state::{GameState, InputMode};
use crate::game::{Consumable, EntityId, Position};
use crate::{DelveError, DelveResult};

/// One turn's worth of intent for a single actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Do nothing. Always succeeds.
    Wait,
    /// Step by `(dx, dy)` onto a walkable, unoccupied cell.
    Move { dx: i32, dy: i32 },
    /// Attack the actor one cell away at `(dx, dy)`.
    Melee { dx: i32, dy: i32 },
    /// Move or attack depending on what occupies the destination.
    Bump { dx: i32, dy: i32 },
    /// Pick up an item lying on the actor's own cell.
    PickUp,
    /// Use a carried item's consumable effect.
    UseItem { item_id: EntityId },
    /// Drop a carried item onto the actor's cell.
    Drop { item_id: EntityId },
}

impl Action {
    /// Resolves this action for `actor_id` against the session state.
    ///
    /// Validation happens before any mutation, so a failed action leaves
    /// the state exactly as it found it.
    pub fn perform(&self, state: &mut GameState, actor_id: EntityId) -> DelveResult<()> {
        match *self {
            Action::Wait => Ok(()),
            Action::Move { dx, dy } => perform_move(state, actor_id, dx, dy),
            Action::Melee { dx, dy } => perform_melee(state, actor_id, dx, dy),
            Action::Bump { dx, dy } => {
                let actor = lookup(state, actor_id)?;
                let dest = actor.position + Position::new(dx, dy);
                if state.map.actor_at(dest.x, dest.y).is_some() {
                    perform_melee(state, actor_id, dx, dy)
                } else {
                    perform_move(state, actor_id, dx, dy)
                }
            }
            Action::PickUp => perform_pick_up(state, actor_id),
            Action::UseItem { item_id } => perform_use_item(state, actor_id, item_id),
            Action::Drop { item_id } => perform_drop(state, actor_id, item_id),
        }
    }
}

fn lookup<'a>(state: &'a GameState, actor_id: EntityId) -> DelveResult<&'a crate::game::Entity> {
    state
        .map
        .entity(actor_id)
        .ok_or_else(|| DelveError::InvalidState(format!("Unknown actor {}", actor_id)))
}

fn perform_move(state: &mut GameState, actor_id: EntityId, dx: i32, dy: i32) -> DelveResult<()> {
    let actor = lookup(state, actor_id)?;
    let dest = actor.position + Position::new(dx, dy);

    if !state.map.in_bounds(dest.x, dest.y) || !state.map.walkable(dest.x, dest.y) {
        return Err(DelveError::impossible("That way is blocked."));
    }
    if state.map.blocking_entity_at(dest.x, dest.y).is_some() {
        return Err(DelveError::impossible("That way is blocked."));
    }

    let actor = state
        .map
        .entity_mut(actor_id)
        .ok_or_else(|| DelveError::InvalidState(format!("Unknown actor {}", actor_id)))?;
    actor.translate(dx, dy);
    Ok(())
}

fn perform_melee(state: &mut GameState, actor_id: EntityId, dx: i32, dy: i32) -> DelveResult<()> {
    let actor = lookup(state, actor_id)?;
    let dest = actor.position + Position::new(dx, dy);
    let attacker_name = actor.name.clone();
    let power = actor
        .fighter
        .as_ref()
        .ok_or_else(|| DelveError::InvalidState("Attacker has no fighter stats".to_string()))?
        .power;
    let attacker_is_player = actor_id == state.player_id;

    let target = state
        .map
        .actor_at(dest.x, dest.y)
        .ok_or_else(|| DelveError::impossible("Nothing to attack."))?;
    let target_id = target.id;
    let target_name = target.name.clone();
    let defence = target
        .fighter
        .as_ref()
        .ok_or_else(|| DelveError::InvalidState("Target has no fighter stats".to_string()))?
        .defence;

    let damage = power - defence;
    let attack_desc = format!("{} attacks {}", attacker_name, target_name);
    let attack_color = if attacker_is_player {
        colors::PLAYER_ATK
    } else {
        colors::ENEMY_ATK
    };

    if damage <= 0 {
        // The attack lands but bounces off; this still consumes the turn.
        state
            .log
            .add(format!("{} but does no damage.", attack_desc), attack_color);
        return Ok(());
    }

    state.log.add(
        format!("{} for {} hit points.", attack_desc, damage),
        attack_color,
    );

    let target = state
        .map
        .entity_mut(target_id)
        .ok_or_else(|| DelveError::InvalidState("Melee target vanished".to_string()))?;
    let died = target.take_damage(damage);

    if died {
        if target_id == state.player_id {
            state.log.add("You died!", colors::PLAYER_DIE);
            state.mode = InputMode::GameOver;
        } else {
            state
                .log
                .add(format!("{} is dead!", target_name), colors::ENEMY_DIE);
        }
    }
    Ok(())
}

fn perform_pick_up(state: &mut GameState, actor_id: EntityId) -> DelveResult<()> {
    let actor = lookup(state, actor_id)?;
    let position = actor.position;
    let inventory = actor
        .inventory
        .as_ref()
        .ok_or_else(|| DelveError::InvalidState("Actor has no inventory".to_string()))?;

    let item_id = state
        .map
        .items_at(position.x, position.y)
        .next()
        .map(|item| item.id)
        .ok_or_else(|| DelveError::impossible("There is nothing here to pick up."))?;

    if inventory.is_full() {
        return Err(DelveError::impossible("Your inventory is full."));
    }

    let item = state
        .map
        .take_entity(item_id)
        .ok_or_else(|| DelveError::InvalidState("Pickup target vanished".to_string()))?;
    let item_name = item.name.clone();

    let actor = state
        .map
        .entity_mut(actor_id)
        .ok_or_else(|| DelveError::InvalidState(format!("Unknown actor {}", actor_id)))?;
    actor
        .inventory
        .as_mut()
        .expect("inventory checked above")
        .items
        .push(item);

    state.log.add(
        format!("You picked up the {}!", item_name),
        colors::ITEM_PICKED_UP,
    );
    Ok(())
}

fn perform_use_item(state: &mut GameState, actor_id: EntityId, item_id: EntityId) -> DelveResult<()> {
    let actor = lookup(state, actor_id)?;
    let inventory = actor
        .inventory
        .as_ref()
        .ok_or_else(|| DelveError::InvalidState("Actor has no inventory".to_string()))?;
    let item = inventory
        .items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| DelveError::impossible("You do not have that item."))?;
    let item_name = item.name.clone();
    let effect = item
        .consumable
        .clone()
        .ok_or_else(|| DelveError::impossible("You cannot use that."))?;

    match effect {
        Consumable::Healing { amount } => {
            let actor = state
                .map
                .entity_mut(actor_id)
                .ok_or_else(|| DelveError::InvalidState(format!("Unknown actor {}", actor_id)))?;
            let recovered = actor.heal(amount);
            if recovered == 0 {
                return Err(DelveError::impossible("You are already at full HP."));
            }
            // The effect owns consumption: the item goes away only on success.
            actor
                .inventory
                .as_mut()
                .expect("inventory checked above")
                .remove(item_id);
            state.log.add(
                format!("You consume the {} and recover {} HP!", item_name, recovered),
                colors::HEALTH_RECOVERED,
            );
            Ok(())
        }
    }
}

fn perform_drop(state: &mut GameState, actor_id: EntityId, item_id: EntityId) -> DelveResult<()> {
    let actor = state
        .map
        .entity_mut(actor_id)
        .ok_or_else(|| DelveError::InvalidState(format!("Unknown actor {}", actor_id)))?;
    let position = actor.position;
    let mut item = actor
        .inventory
        .as_mut()
        .ok_or_else(|| DelveError::InvalidState("Actor has no inventory".to_string()))?
        .remove(item_id)
        .ok_or_else(|| DelveError::impossible("You do not have that item."))?;

    item.position = position;
    let item_name = item.name.clone();
    state.map.entities.push(item);

    state
        .log
        .add(format!("You dropped the {}.", item_name), colors::WHITE);
    Ok(())
}
