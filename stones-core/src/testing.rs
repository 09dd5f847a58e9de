//! Minimal in-memory world double for unit tests.

use std::collections::HashMap;

use crate::identity::StoneResolver;
use crate::types::{EntityId, ItemStack, Location, PlayerId, StoneKind};
use crate::world::{WorldCommands, WorldView};

#[derive(Debug)]
pub(crate) struct MockPlayer {
    pub online: bool,
    pub location: Location,
    pub slots: Vec<Option<ItemStack>>,
}

#[derive(Debug, Default)]
pub(crate) struct MockWorld {
    pub players: HashMap<PlayerId, MockPlayer>,
    pub items: HashMap<EntityId, (ItemStack, Location)>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, location: Location) -> PlayerId {
        let id = PlayerId::new();
        self.players.insert(
            id,
            MockPlayer {
                online: true,
                location,
                slots: vec![None; 9],
            },
        );
        id
    }

    pub fn give(&mut self, player: PlayerId, slot: usize, item: ItemStack) {
        if let Some(p) = self.players.get_mut(&player) {
            p.slots[slot] = Some(item);
        }
    }

    pub fn give_stone(&mut self, player: PlayerId, slot: usize, kind: StoneKind) {
        let item = StoneResolver::default().make_item(kind);
        self.give(player, slot, item);
    }

    pub fn spawn_stone(&mut self, kind: StoneKind) -> EntityId {
        let item = StoneResolver::default().make_item(kind);
        self.drop_item(Location::default(), item)
    }

    pub fn disconnect(&mut self, player: PlayerId) {
        if let Some(p) = self.players.get_mut(&player) {
            p.online = false;
        }
    }

    pub fn items_at(&self, at: Location) -> Vec<&ItemStack> {
        self.items
            .values()
            .filter(|(_, loc)| *loc == at)
            .map(|(item, _)| item)
            .collect()
    }
}

impl WorldView for MockWorld {
    fn is_player_online(&self, player: PlayerId) -> bool {
        self.players.get(&player).is_some_and(|p| p.online)
    }

    fn is_entity_valid(&self, entity: EntityId) -> bool {
        self.items.contains_key(&entity)
    }

    fn entity_item(&self, entity: EntityId) -> Option<ItemStack> {
        self.items.get(&entity).map(|(item, _)| item.clone())
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

impl WorldCommands for MockWorld {
    fn drop_item(&mut self, at: Location, item: ItemStack) -> EntityId {
        let id = EntityId::new();
        self.items.insert(id, (item, at));
        id
    }

    fn clear_slot(&mut self, player: PlayerId, slot: usize) -> Option<ItemStack> {
        self.players
            .get_mut(&player)
            .and_then(|p| p.slots.get_mut(slot))
            .and_then(Option::take)
    }
}
