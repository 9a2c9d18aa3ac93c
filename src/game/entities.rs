//! # Entity System
//!
//! Data records for everything placed on the map: the player, monsters and
//! items. An [`Entity`] is a plain record with optional components attached;
//! which components are present determines what the entity is:
//!
//! - `fighter` + `inventory` + `ai`: a living actor
//! - `fighter` + `inventory`, no `ai`: a corpse (actors die in place)
//! - `consumable`: an item
//!
//! Fresh entities come from the template constructors (`Entity::orc()` and
//! friends) rather than by cloning live instances, so template stats can
//! never alias spawned state.

use crate::config;
use crate::game::{new_entity_id, EntityId, Position, Rgb};
use serde::{Deserialize, Serialize};

/// Draw-order priority class. Lowest tier draws first, so actors layer
/// above items and corpses sharing their cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderTier {
    Corpse,
    Item,
    Actor,
}

/// Combat statistics for an actor.
///
/// Current HP is private: all mutation goes through [`Entity::take_damage`]
/// and [`Entity::heal`] so the clamp and the death transition stay
/// centralized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    hp: i32,
    pub defence: i32,
    pub power: i32,
}

impl Fighter {
    /// Creates a fighter at full health.
    pub fn new(hp: i32, defence: i32, power: i32) -> Self {
        Self {
            max_hp: hp,
            hp,
            defence,
            power,
        }
    }

    /// Current hit points, always within `[0, max_hp]`.
    pub fn hp(&self) -> i32 {
        self.hp
    }
}

/// A bounded list of items carried by an actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<Entity>,
}

impl Inventory {
    /// Creates an empty inventory with the given slot count.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Returns true when no further item can be picked up.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Removes and returns the item with the given ID, if carried.
    pub fn remove(&mut self, item_id: EntityId) -> Option<Entity> {
        let index = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(index))
    }
}

/// Effect descriptor for a usable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    /// Restores up to `amount` HP, clamped at the consumer's maximum.
    Healing { amount: i32 },
}

/// Per-monster AI state.
///
/// Holds the cached pursuit path; the decision logic lives in
/// [`crate::game::ai`]. Presence of this component is the liveness flag:
/// an actor is alive exactly as long as its `ai` is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostileAi {
    /// Remaining steps toward the target's last pathed-to cell,
    /// excluding the monster's own cell.
    pub path: Vec<Position>,
}

/// A generic object placed on the map: the player, a monster, an item or
/// a corpse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_tier: RenderTier,
    pub fighter: Option<Fighter>,
    pub inventory: Option<Inventory>,
    pub ai: Option<HostileAi>,
    pub consumable: Option<Consumable>,
}

impl Entity {
    fn actor(name: &str, glyph: char, color: Rgb, fighter: Fighter) -> Self {
        Self {
            id: new_entity_id(),
            position: Position::new(0, 0),
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: true,
            render_tier: RenderTier::Actor,
            fighter: Some(fighter),
            inventory: Some(Inventory::new(config::INVENTORY_CAPACITY)),
            ai: Some(HostileAi::default()),
            consumable: None,
        }
    }

    fn item(name: &str, glyph: char, color: Rgb, consumable: Consumable) -> Self {
        Self {
            id: new_entity_id(),
            position: Position::new(0, 0),
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: false,
            render_tier: RenderTier::Item,
            fighter: None,
            inventory: None,
            ai: None,
            consumable: Some(consumable),
        }
    }

    /// The player template: `@`, 30 HP, 2 defence, 5 power.
    pub fn player() -> Self {
        Self::actor("Player", '@', (255, 255, 255), Fighter::new(30, 2, 5))
    }

    /// The orc template: `o`, 10 HP, 0 defence, 3 power.
    pub fn orc() -> Self {
        Self::actor("Orc", 'o', (63, 127, 63), Fighter::new(10, 0, 3))
    }

    /// The troll template: `T`, 16 HP, 1 defence, 4 power.
    pub fn troll() -> Self {
        Self::actor("Troll", 'T', (0, 127, 0), Fighter::new(16, 1, 4))
    }

    /// The health potion template: `!`, restores 4 HP.
    pub fn health_potion() -> Self {
        Self::item(
            "Health Potion",
            '!',
            (127, 0, 255),
            Consumable::Healing { amount: 4 },
        )
    }

    /// Returns true while this actor can take turns. Alive exactly when
    /// the AI component is present; corpses and items are never alive.
    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }

    /// Relocates this entity by the given delta.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Sets current HP, clamped to `[0, max_hp]`, and runs the death
    /// transition when it reaches zero on a living actor. Returns true if
    /// this call killed the actor.
    ///
    /// Death is idempotent: once the AI component is gone, further damage
    /// keeps HP at zero without re-running the transition.
    ///
    /// # Panics
    ///
    /// Panics if this entity has no fighter component; only actors (and
    /// their corpses) have hit points.
    pub fn set_hp(&mut self, value: i32) -> bool {
        let fighter = self
            .fighter
            .as_mut()
            .expect("set_hp called on an entity without a fighter");
        fighter.hp = value.clamp(0, fighter.max_hp);
        if fighter.hp == 0 && self.ai.is_some() {
            self.die();
            return true;
        }
        false
    }

    /// Applies incoming damage. Returns true if the blow was fatal.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let hp = self
            .fighter
            .as_ref()
            .expect("take_damage called on an entity without a fighter")
            .hp;
        self.set_hp(hp - amount)
    }

    /// Restores up to `amount` HP and returns the amount actually
    /// recovered, which is zero when already at full health. Corpses
    /// never recover: liveness and nonzero HP must stay in agreement.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let (hp, max_hp) = {
            let fighter = self
                .fighter
                .as_ref()
                .expect("heal called on an entity without a fighter");
            (fighter.hp, fighter.max_hp)
        };
        let recovered = (hp + amount).min(max_hp) - hp;
        if recovered > 0 {
            self.set_hp(hp + recovered);
        }
        recovered
    }

    /// Turns this actor into a corpse in place: remains keep the cell but
    /// stop blocking movement, drop out of turn order and render below
    /// items and actors.
    fn die(&mut self) {
        self.glyph = '%';
        self.color = (191, 0, 0);
        self.blocks_movement = false;
        self.render_tier = RenderTier::Corpse;
        self.ai = None;
        self.name = format!("remains of {}", self.name);
    }
}
