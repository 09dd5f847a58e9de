//! World mutation events delivered to the custody engine.
//!
//! The host simulation turns each mutation into one [`WorldEvent`] value,
//! hands it to the keeper, and honours the returned verdict before applying
//! the mutation.

use crate::types::{Actor, ContainerId, EntityId, InventoryInfo, ItemStack, PlayerId};

/// A world mutation that may concern a stone.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    /// A player is disconnecting.
    PlayerQuit {
        /// The leaving player.
        player: PlayerId,
    },

    /// A player threw an item out of their inventory.
    ItemDropped {
        /// Who dropped it.
        player: PlayerId,
        /// The new item entity.
        entity: EntityId,
        /// What it carries.
        item: ItemStack,
    },

    /// A living entity is about to pick up a dropped item.
    EntityPickup {
        /// Who is picking up.
        picker: Actor,
        /// The item entity being picked up.
        entity: EntityId,
        /// What it carries.
        item: ItemStack,
    },

    /// A container (hopper, minecart) is about to absorb a dropped item.
    ContainerPickup {
        /// The absorbing inventory.
        inventory: InventoryInfo,
        /// The item entity being absorbed.
        entity: EntityId,
        /// What it carries.
        item: ItemStack,
    },

    /// A dropped item is about to expire.
    ItemDespawn {
        /// The expiring item entity.
        entity: EntityId,
        /// What it carries.
        item: ItemStack,
    },

    /// Transfer machinery is moving an item between containers.
    ContainerTransfer {
        /// Where the item comes from.
        source: ContainerId,
        /// Where it would go.
        destination: ContainerId,
        /// The moving item.
        item: ItemStack,
    },

    /// A player clicked a slot in an open inventory view.
    InventoryClick {
        /// Who clicked.
        player: PlayerId,
        /// What is on the cursor.
        cursor: Option<ItemStack>,
        /// The inventory that was clicked; `None` when clicking outside the window.
        clicked: Option<InventoryInfo>,
        /// What was in the clicked slot.
        current: Option<ItemStack>,
        /// Where a quick-move sends the clicked slot's item; `None` for a
        /// plain click that swaps it with the cursor.
        moves_to: Option<InventoryInfo>,
    },

    /// A player dragged an item across several slots.
    InventoryDrag {
        /// Who dragged.
        player: PlayerId,
        /// The item on the cursor before the drag.
        old_cursor: ItemStack,
        /// Upper inventory of the open view.
        top: InventoryInfo,
        /// Lower inventory of the open view.
        bottom: InventoryInfo,
        /// Raw view slot indices that would receive items.
        raw_slots: Vec<usize>,
    },

    /// An entity caught fire.
    EntityCombust {
        /// The burning entity.
        entity: EntityId,
        /// Its item stack, if it is an item entity.
        item: Option<ItemStack>,
    },

    /// An entity died.
    EntityDeath {
        /// The dying entity.
        entity: EntityId,
        /// Its item stack, if it is an item entity.
        item: Option<ItemStack>,
    },

    /// A player right-clicked another entity.
    PlayerInteractEntity {
        /// The interacting player.
        player: PlayerId,
        /// The clicked entity.
        target: EntityId,
        /// What the player holds in the main hand.
        main_hand: Option<ItemStack>,
    },

    /// An item entity is about to appear in the world.
    ItemSpawn {
        /// The new item entity.
        entity: EntityId,
        /// What it carries.
        item: ItemStack,
    },
}

/// Fieldless discriminant of [`WorldEvent`], used as the handler key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// [`WorldEvent::PlayerQuit`].
    PlayerQuit,
    /// [`WorldEvent::ItemDropped`].
    ItemDropped,
    /// [`WorldEvent::EntityPickup`].
    EntityPickup,
    /// [`WorldEvent::ContainerPickup`].
    ContainerPickup,
    /// [`WorldEvent::ItemDespawn`].
    ItemDespawn,
    /// [`WorldEvent::ContainerTransfer`].
    ContainerTransfer,
    /// [`WorldEvent::InventoryClick`].
    InventoryClick,
    /// [`WorldEvent::InventoryDrag`].
    InventoryDrag,
    /// [`WorldEvent::EntityCombust`].
    EntityCombust,
    /// [`WorldEvent::EntityDeath`].
    EntityDeath,
    /// [`WorldEvent::PlayerInteractEntity`].
    PlayerInteractEntity,
    /// [`WorldEvent::ItemSpawn`].
    ItemSpawn,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [EventKind; 12] = [
        Self::PlayerQuit,
        Self::ItemDropped,
        Self::EntityPickup,
        Self::ContainerPickup,
        Self::ItemDespawn,
        Self::ContainerTransfer,
        Self::InventoryClick,
        Self::InventoryDrag,
        Self::EntityCombust,
        Self::EntityDeath,
        Self::PlayerInteractEntity,
        Self::ItemSpawn,
    ];
}

impl WorldEvent {
    /// The discriminant of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PlayerQuit { .. } => EventKind::PlayerQuit,
            Self::ItemDropped { .. } => EventKind::ItemDropped,
            Self::EntityPickup { .. } => EventKind::EntityPickup,
            Self::ContainerPickup { .. } => EventKind::ContainerPickup,
            Self::ItemDespawn { .. } => EventKind::ItemDespawn,
            Self::ContainerTransfer { .. } => EventKind::ContainerTransfer,
            Self::InventoryClick { .. } => EventKind::InventoryClick,
            Self::InventoryDrag { .. } => EventKind::InventoryDrag,
            Self::EntityCombust { .. } => EventKind::EntityCombust,
            Self::EntityDeath { .. } => EventKind::EntityDeath,
            Self::PlayerInteractEntity { .. } => EventKind::PlayerInteractEntity,
            Self::ItemSpawn { .. } => EventKind::ItemSpawn,
        }
    }

    /// The item stack this event is primarily about, if it names one.
    #[must_use]
    pub fn primary_item(&self) -> Option<&ItemStack> {
        match self {
            Self::ItemDropped { item, .. }
            | Self::EntityPickup { item, .. }
            | Self::ContainerPickup { item, .. }
            | Self::ItemDespawn { item, .. }
            | Self::ContainerTransfer { item, .. }
            | Self::ItemSpawn { item, .. } => Some(item),
            Self::InventoryDrag { old_cursor, .. } => Some(old_cursor),
            Self::InventoryClick {
                cursor, current, ..
            } => cursor.as_ref().or(current.as_ref()),
            Self::EntityCombust { item, .. } | Self::EntityDeath { item, .. } => item.as_ref(),
            Self::PlayerInteractEntity { main_hand, .. } => main_hand.as_ref(),
            Self::PlayerQuit { .. } => None,
        }
    }
}
