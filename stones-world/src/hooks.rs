//! Integration hooks: world mutations → custody events.
//!
//! Each builder captures the state the keeper needs *before* the mutation is
//! applied, so the keeper can veto it.

use stones_core::events::WorldEvent;
use stones_core::types::{Actor, ContainerId, EntityId, InventoryInfo, ItemStack, PlayerId};

/// A player is leaving.
#[must_use]
pub fn on_quit(player: PlayerId) -> WorldEvent {
    WorldEvent::PlayerQuit { player }
}

/// A player threw `item`, which became `entity`.
#[must_use]
pub fn on_drop(player: PlayerId, entity: EntityId, item: ItemStack) -> WorldEvent {
    WorldEvent::ItemDropped {
        player,
        entity,
        item,
    }
}

/// `picker` touched a dropped item.
#[must_use]
pub fn on_pickup(picker: Actor, entity: EntityId, item: ItemStack) -> WorldEvent {
    WorldEvent::EntityPickup {
        picker,
        entity,
        item,
    }
}

/// A container is absorbing a dropped item.
#[must_use]
pub fn on_container_pickup(inventory: InventoryInfo, entity: EntityId, item: ItemStack) -> WorldEvent {
    WorldEvent::ContainerPickup {
        inventory,
        entity,
        item,
    }
}

/// A dropped item reached the end of its lifetime.
#[must_use]
pub fn on_despawn(entity: EntityId, item: ItemStack) -> WorldEvent {
    WorldEvent::ItemDespawn { entity, item }
}

/// Transfer machinery is moving `item`.
#[must_use]
pub fn on_transfer(source: ContainerId, destination: ContainerId, item: ItemStack) -> WorldEvent {
    WorldEvent::ContainerTransfer {
        source,
        destination,
        item,
    }
}

/// A plain click in an open inventory view: the cursor item goes into
/// `clicked` and whatever was in the slot comes back onto the cursor.
#[must_use]
pub fn on_click(
    player: PlayerId,
    cursor: Option<ItemStack>,
    clicked: Option<InventoryInfo>,
    current: Option<ItemStack>,
) -> WorldEvent {
    WorldEvent::InventoryClick {
        player,
        cursor,
        clicked,
        current,
        moves_to: None,
    }
}

/// A shift-click with an empty cursor: `current` leaves `clicked` for
/// `moves_to`.
#[must_use]
pub fn on_quick_move(
    player: PlayerId,
    clicked: InventoryInfo,
    current: ItemStack,
    moves_to: InventoryInfo,
) -> WorldEvent {
    WorldEvent::InventoryClick {
        player,
        cursor: None,
        clicked: Some(clicked),
        current: Some(current),
        moves_to: Some(moves_to),
    }
}

/// A drag across raw view slots.
#[must_use]
pub fn on_drag(
    player: PlayerId,
    old_cursor: ItemStack,
    top: InventoryInfo,
    bottom: InventoryInfo,
    raw_slots: Vec<usize>,
) -> WorldEvent {
    WorldEvent::InventoryDrag {
        player,
        old_cursor,
        top,
        bottom,
        raw_slots,
    }
}

/// An entity caught fire.
#[must_use]
pub fn on_combust(entity: EntityId, item: Option<ItemStack>) -> WorldEvent {
    WorldEvent::EntityCombust { entity, item }
}

/// An entity died.
#[must_use]
pub fn on_death(entity: EntityId, item: Option<ItemStack>) -> WorldEvent {
    WorldEvent::EntityDeath { entity, item }
}

/// A player right-clicked `target`.
#[must_use]
pub fn on_interact(player: PlayerId, target: EntityId, main_hand: Option<ItemStack>) -> WorldEvent {
    WorldEvent::PlayerInteractEntity {
        player,
        target,
        main_hand,
    }
}

/// An item entity is about to appear.
#[must_use]
pub fn on_spawn(entity: EntityId, item: ItemStack) -> WorldEvent {
    WorldEvent::ItemSpawn { entity, item }
}
