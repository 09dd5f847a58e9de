//! The world as seen from the custody engine.
//!
//! The engine never owns world state. It queries through [`WorldView`] and
//! issues the few commands it needs through [`WorldCommands`]. Handles may be
//! stale; every query answers for the current instant only.

use crate::types::{EntityId, ItemStack, Location, PlayerId};

/// Read-only queries against the live world.
pub trait WorldView {
    /// Whether `player` is connected.
    fn is_player_online(&self, player: PlayerId) -> bool;

    /// Whether `entity` still exists and is valid.
    fn is_entity_valid(&self, entity: EntityId) -> bool;

    /// The item stack carried by an item entity, if it is one.
    fn entity_item(&self, entity: EntityId) -> Option<ItemStack>;

    /// Every slot of `player`'s inventory, or `None` if unknown.
    fn player_inventory(&self, player: PlayerId) -> Option<Vec<Option<ItemStack>>>;

    /// The player's last known position.
    fn player_location(&self, player: PlayerId) -> Option<Location>;

    /// Players currently connected.
    fn online_players(&self) -> Vec<PlayerId>;
}

/// Commands the engine may issue to the world.
pub trait WorldCommands: WorldView {
    /// Spawn a dropped item entity carrying `item` at `at`.
    fn drop_item(&mut self, at: Location, item: ItemStack) -> EntityId;

    /// Empty one inventory slot, returning what was there.
    fn clear_slot(&mut self, player: PlayerId, slot: usize) -> Option<ItemStack>;
}
