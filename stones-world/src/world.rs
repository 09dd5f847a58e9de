//! In-memory world simulation.
//!
//! Owns players, dropped item entities, creatures and containers. It knows
//! nothing about stones; the keeper reaches it only through the core's
//! [`WorldView`] / [`WorldCommands`] traits.

use std::collections::HashMap;

use stones_core::types::{
    ContainerId, EntityId, InventoryInfo, InventoryKind, ItemStack, Location, PlayerId,
};
use stones_core::world::{WorldCommands, WorldView};

/// A connected (or formerly connected) player.
#[derive(Debug, Clone)]
pub struct SimPlayer {
    /// Display name.
    pub name: String,
    /// Whether the session is live.
    pub online: bool,
    /// Last known position.
    pub location: Location,
    /// Inventory slots.
    pub slots: Vec<Option<ItemStack>>,
    /// Index of the main-hand slot.
    pub held_slot: usize,
}

/// A dropped item lying in the world.
#[derive(Debug, Clone)]
pub struct SimItem {
    /// What it carries.
    pub item: ItemStack,
    /// Where it lies.
    pub location: Location,
    /// Ticks since it appeared.
    pub age_ticks: u64,
}

/// A storage block or entity inventory.
#[derive(Debug, Clone)]
pub struct SimContainer {
    /// Shape and ownership.
    pub info: InventoryInfo,
    /// Slots.
    pub slots: Vec<Option<ItemStack>>,
}

/// The simulated world.
#[derive(Debug, Default)]
pub struct SimWorld {
    inventory_slots: usize,
    players: HashMap<PlayerId, SimPlayer>,
    items: HashMap<EntityId, SimItem>,
    creatures: HashMap<EntityId, Location>,
    containers: HashMap<ContainerId, SimContainer>,
    next_container: u64,
}

impl SimWorld {
    /// An empty world whose players get `inventory_slots` slots each.
    #[must_use]
    pub fn new(inventory_slots: usize) -> Self {
        Self {
            inventory_slots,
            ..Self::default()
        }
    }

    // -- players ------------------------------------------------------------

    /// Connect a new player at `location`.
    pub fn join(&mut self, name: impl Into<String>, location: Location) -> PlayerId {
        let id = PlayerId::new();
        self.players.insert(
            id,
            SimPlayer {
                name: name.into(),
                online: true,
                location,
                slots: vec![None; self.inventory_slots],
                held_slot: 0,
            },
        );
        id
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&SimPlayer> {
        self.players.get(&id)
    }

    /// Mutable player access, for out-of-band edits.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut SimPlayer> {
        self.players.get_mut(&id)
    }

    /// Mark a player's session as ended.
    pub fn set_offline(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.online = false;
        }
    }

    /// Move a player.
    pub fn teleport(&mut self, id: PlayerId, to: Location) {
        if let Some(player) = self.players.get_mut(&id) {
            player.location = to;
        }
    }

    /// Put `item` in a slot, replacing its contents. Does not fire events.
    pub fn set_slot(&mut self, id: PlayerId, slot: usize, item: Option<ItemStack>) {
        if let Some(cell) = self.players.get_mut(&id).and_then(|p| p.slots.get_mut(slot)) {
            *cell = item;
        }
    }

    /// Contents of one player slot.
    #[must_use]
    pub fn slot(&self, id: PlayerId, slot: usize) -> Option<&ItemStack> {
        self.players
            .get(&id)
            .and_then(|p| p.slots.get(slot))
            .and_then(Option::as_ref)
    }

    /// First empty slot of a player's inventory.
    #[must_use]
    pub fn first_empty_slot(&self, id: PlayerId) -> Option<usize> {
        self.players
            .get(&id)
            .and_then(|p| p.slots.iter().position(Option::is_none))
    }

    /// The item in the player's main hand.
    #[must_use]
    pub fn main_hand(&self, id: PlayerId) -> Option<&ItemStack> {
        let player = self.players.get(&id)?;
        self.slot(id, player.held_slot)
    }

    /// The player's own inventory description.
    #[must_use]
    pub fn player_inventory_info(&self, id: PlayerId) -> InventoryInfo {
        InventoryInfo::player(id, self.inventory_slots)
    }

    // -- items --------------------------------------------------------------

    /// A dropped item entity.
    #[must_use]
    pub fn item(&self, id: EntityId) -> Option<&SimItem> {
        self.items.get(&id)
    }

    /// Every dropped item entity.
    pub fn items(&self) -> impl Iterator<Item = (EntityId, &SimItem)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Place an item entity without firing any event.
    pub fn insert_item(&mut self, at: Location, item: ItemStack) -> EntityId {
        let id = EntityId::new();
        self.insert_item_with_id(id, at, item);
        id
    }

    /// Place an item entity under a known id, replacing whatever held it.
    pub fn insert_item_with_id(&mut self, id: EntityId, at: Location, item: ItemStack) {
        self.items.insert(
            id,
            SimItem {
                item,
                location: at,
                age_ticks: 0,
            },
        );
    }

    /// Remove an item entity without firing any event.
    pub fn remove_item(&mut self, id: EntityId) -> Option<SimItem> {
        self.items.remove(&id)
    }

    /// Age every item entity by one tick and return the ones at `lifetime`.
    pub fn age_items(&mut self, lifetime: u64) -> Vec<EntityId> {
        let mut expired = Vec::new();
        for (id, item) in &mut self.items {
            item.age_ticks += 1;
            if item.age_ticks >= lifetime {
                expired.push(*id);
            }
        }
        expired.sort();
        expired
    }

    /// Reset an item's age (its despawn was cancelled).
    pub fn reset_age(&mut self, id: EntityId) {
        if let Some(item) = self.items.get_mut(&id) {
            item.age_ticks = 0;
        }
    }

    // -- creatures ----------------------------------------------------------

    /// Spawn a non-player living entity.
    pub fn spawn_creature(&mut self, at: Location) -> EntityId {
        let id = EntityId::new();
        self.creatures.insert(id, at);
        id
    }

    /// Whether `id` is a living creature.
    #[must_use]
    pub fn is_creature(&self, id: EntityId) -> bool {
        self.creatures.contains_key(&id)
    }

    // -- containers ---------------------------------------------------------

    /// Place a container block.
    pub fn place_container(&mut self, kind: InventoryKind, at: Location, size: usize) -> ContainerId {
        self.next_container += 1;
        let id = ContainerId(self.next_container);
        self.containers.insert(
            id,
            SimContainer {
                info: InventoryInfo::block(kind, at, size),
                slots: vec![None; size],
            },
        );
        id
    }

    /// Look up a container.
    #[must_use]
    pub fn container(&self, id: ContainerId) -> Option<&SimContainer> {
        self.containers.get(&id)
    }

    /// Mutable container access.
    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut SimContainer> {
        self.containers.get_mut(&id)
    }
}

impl WorldView for SimWorld {
    fn is_player_online(&self, player: PlayerId) -> bool {
        self.players.get(&player).is_some_and(|p| p.online)
    }

    fn is_entity_valid(&self, entity: EntityId) -> bool {
        self.items.contains_key(&entity) || self.creatures.contains_key(&entity)
    }

    fn entity_item(&self, entity: EntityId) -> Option<ItemStack> {
        self.items.get(&entity).map(|i| i.item.clone())
    }

    fn player_inventory(&self, player: PlayerId) -> Option<Vec<Option<ItemStack>>> {
        self.players.get(&player).map(|p| p.slots.clone())
    }

    fn player_location(&self, player: PlayerId) -> Option<Location> {
        self.players.get(&player).map(|p| p.location)
    }

    fn online_players(&self) -> Vec<PlayerId> {
        let mut online: Vec<_> = self
            .players
            .iter()
            .filter(|(_, p)| p.online)
            .map(|(id, _)| *id)
            .collect();
        online.sort();
        online
    }
}

impl WorldCommands for SimWorld {
    fn drop_item(&mut self, at: Location, item: ItemStack) -> EntityId {
        self.insert_item(at, item)
    }

    fn clear_slot(&mut self, player: PlayerId, slot: usize) -> Option<ItemStack> {
        self.players
            .get_mut(&player)
            .and_then(|p| p.slots.get_mut(slot))
            .and_then(Option::take)
    }
}
