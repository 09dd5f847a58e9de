//! The standard reconciliation rules, one function per event kind.
//!
//! Each handler first checks that the event is about a stone and returns
//! [`Outcome::Ignored`] straight away when it is not, which is by far the
//! common case.

use crate::events::{EventKind, WorldEvent};
use crate::types::{Actor, HolderRef, InventoryInfo, InventoryOwner};

use super::{Handler, Outcome, Reconciler};

/// The standard handler for `kind`.
#[must_use]
pub fn default_handler(kind: EventKind) -> Handler {
    match kind {
        EventKind::PlayerQuit => on_player_quit,
        EventKind::ItemDropped => on_item_dropped,
        EventKind::EntityPickup => on_entity_pickup,
        EventKind::ContainerPickup => on_container_pickup,
        EventKind::ItemDespawn => on_item_despawn,
        EventKind::ContainerTransfer => on_container_transfer,
        EventKind::InventoryClick => on_inventory_click,
        EventKind::InventoryDrag => on_inventory_drag,
        EventKind::EntityCombust | EventKind::EntityDeath => on_item_destroyed,
        EventKind::PlayerInteractEntity => on_player_interact_entity,
        EventKind::ItemSpawn => on_item_spawn,
    }
}

/// Eject every carried stone into the world as the player leaves.
pub fn on_player_quit(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::PlayerQuit { player } = event else {
        return Outcome::Ignored;
    };
    let changes = rec.evict_player(*player);
    if changes.is_empty() {
        Outcome::Ignored
    } else {
        Outcome::Evicted(changes)
    }
}

/// A dropped stone is now held by its item entity.
pub fn on_item_dropped(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::ItemDropped { entity, item, .. } = event else {
        return Outcome::Ignored;
    };
    let Some(stone) = rec.resolver().identity_of(item) else {
        return Outcome::Ignored;
    };
    Outcome::Recorded(rec.assign(stone, HolderRef::Entity(*entity)))
}

/// Only players may pick stones up.
pub fn on_entity_pickup(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::EntityPickup { picker, item, .. } = event else {
        return Outcome::Ignored;
    };
    let Some(stone) = rec.resolver().identity_of(item) else {
        return Outcome::Ignored;
    };
    match picker {
        Actor::Player(player) => Outcome::Recorded(rec.assign(stone, HolderRef::Player(*player))),
        Actor::Creature(_) => Outcome::Vetoed,
    }
}

/// Only player-owned containers may absorb stones.
pub fn on_container_pickup(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::ContainerPickup {
        inventory, item, ..
    } = event
    else {
        return Outcome::Ignored;
    };
    let Some(stone) = rec.resolver().identity_of(item) else {
        return Outcome::Ignored;
    };
    match inventory.owner {
        InventoryOwner::Player(player) => {
            Outcome::Recorded(rec.assign(stone, HolderRef::Player(player)))
        }
        InventoryOwner::Entity(_) | InventoryOwner::Block(_) | InventoryOwner::None => {
            Outcome::Vetoed
        }
    }
}

/// Stones never expire. The entity is reconfirmed as holder.
pub fn on_item_despawn(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::ItemDespawn { entity, item } = event else {
        return Outcome::Ignored;
    };
    let Some(stone) = rec.resolver().identity_of(item) else {
        return Outcome::Ignored;
    };
    Outcome::VetoedConfirming(rec.assign(stone, HolderRef::Entity(*entity)))
}

/// Transfer machinery may not move stones between containers.
pub fn on_container_transfer(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::ContainerTransfer {
        source,
        destination,
        item,
    } = event
    else {
        return Outcome::Ignored;
    };
    if !rec.resolver().is_stone(item) || source == destination {
        return Outcome::Ignored;
    }
    Outcome::Vetoed
}

/// A stone may only end up in a player inventory.
///
/// The cursor item lands in the clicked inventory; clicking outside every
/// inventory (which would throw it) is vetoed as well. A quick-move sends
/// the clicked slot's item to `moves_to`.
pub fn on_inventory_click(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::InventoryClick {
        cursor,
        clicked,
        current,
        moves_to,
        ..
    } = event
    else {
        return Outcome::Ignored;
    };
    let resolver = rec.resolver();
    let cursor_escapes = resolver.identity_of_slot(cursor.as_ref()).is_some()
        && !clicked.as_ref().is_some_and(InventoryInfo::is_player_inventory);
    let slot_escapes = resolver.identity_of_slot(current.as_ref()).is_some()
        && moves_to.as_ref().is_some_and(|to| !to.is_player_inventory());
    if cursor_escapes || slot_escapes {
        Outcome::Vetoed
    } else {
        Outcome::Ignored
    }
}

/// A dragged stone may not land in any slot of a non-player inventory.
pub fn on_inventory_drag(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::InventoryDrag {
        old_cursor,
        top,
        bottom,
        raw_slots,
        ..
    } = event
    else {
        return Outcome::Ignored;
    };
    if !rec.resolver().is_stone(old_cursor) {
        return Outcome::Ignored;
    }
    let lands_in_foreign = raw_slots
        .iter()
        .filter_map(|&raw| inventory_for_raw_slot(top, bottom, raw))
        .any(|inventory| !inventory.is_player_inventory());
    if lands_in_foreign {
        Outcome::Vetoed
    } else {
        Outcome::Ignored
    }
}

/// Raw view slots number the top inventory first, then the bottom one.
fn inventory_for_raw_slot<'i>(
    top: &'i InventoryInfo,
    bottom: &'i InventoryInfo,
    raw: usize,
) -> Option<&'i InventoryInfo> {
    if raw < top.size {
        Some(top)
    } else if raw - top.size < bottom.size {
        Some(bottom)
    } else {
        None
    }
}

/// A burning or dying stone item is destroyed; stop tracking it.
///
/// Only the recorded holder releases the entry. A stray copy burning up
/// leaves custody untouched.
pub fn on_item_destroyed(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let (WorldEvent::EntityCombust { entity, item } | WorldEvent::EntityDeath { entity, item }) =
        event
    else {
        return Outcome::Ignored;
    };
    let Some(stone) = rec.resolver().identity_of_slot(item.as_ref()) else {
        return Outcome::Ignored;
    };
    rec.release_if_held_by(stone, HolderRef::Entity(*entity))
        .map_or(Outcome::Ignored, Outcome::Recorded)
}

/// Holding a stone in the main hand suppresses entity interaction.
pub fn on_player_interact_entity(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::PlayerInteractEntity { main_hand, .. } = event else {
        return Outcome::Ignored;
    };
    if rec.resolver().identity_of_slot(main_hand.as_ref()).is_some() {
        Outcome::Vetoed
    } else {
        Outcome::Ignored
    }
}

/// First seen wins: a second instance of a tracked stone never spawns.
pub fn on_item_spawn(event: &WorldEvent, rec: &mut Reconciler<'_>) -> Outcome {
    let WorldEvent::ItemSpawn { entity, item } = event else {
        return Outcome::Ignored;
    };
    let Some(stone) = rec.resolver().identity_of(item) else {
        return Outcome::Ignored;
    };
    let holder = HolderRef::Entity(*entity);
    match rec.registry().get(stone) {
        Some(current) if current == holder => Outcome::Ignored,
        Some(_) => Outcome::Vetoed,
        None => Outcome::Recorded(rec.assign(stone, holder)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StoneResolver;
    use crate::reconcile::CustodyChange;
    use crate::registry::CustodyRegistry;
    use crate::testing::MockWorld;
    use crate::types::{
        ContainerId, EntityId, InventoryKind, ItemStack, Location, PlayerId, StoneKind,
    };
    use crate::world::WorldView;

    struct Fixture {
        resolver: StoneResolver,
        registry: CustodyRegistry,
        world: MockWorld,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                resolver: StoneResolver::default(),
                registry: CustodyRegistry::new(),
                world: MockWorld::new(),
            }
        }

        fn stone(&self, kind: StoneKind) -> ItemStack {
            self.resolver.make_item(kind)
        }

        fn run(&mut self, handler: Handler, event: &WorldEvent) -> Outcome {
            let mut rec = Reconciler::new(&mut self.registry, &self.resolver, &mut self.world);
            handler(event, &mut rec)
        }
    }

    fn chest() -> InventoryInfo {
        InventoryInfo::block(InventoryKind::Chest, Location::default(), 27)
    }

    // -- quit ---------------------------------------------------------------

    #[test]
    fn quit_ejects_stone_from_slot() {
        let mut fx = Fixture::new();
        let at = Location::new(1.0, 2.0, 3.0);
        let player = fx.world.join(at);
        fx.world.give_stone(player, 3, StoneKind::Space);
        fx.registry.set(StoneKind::Space, HolderRef::Player(player));

        let outcome = fx.run(on_player_quit, &WorldEvent::PlayerQuit { player });

        let Outcome::Evicted(changes) = outcome else {
            panic!("expected eviction, got {outcome:?}");
        };
        assert_eq!(changes.len(), 1);
        let slots = fx.world.player_inventory(player).expect("player known");
        assert!(slots[3].is_none());
        let Some(HolderRef::Entity(entity)) = fx.registry.get(StoneKind::Space) else {
            panic!("space stone should be on the ground");
        };
        assert_eq!(fx.world.items.get(&entity).map(|(_, loc)| *loc), Some(at));
    }

    #[test]
    fn quit_without_stones_is_ignored() {
        let mut fx = Fixture::new();
        let player = fx.world.join(Location::default());
        fx.world.give(player, 0, ItemStack::new("torch", 16));

        let outcome = fx.run(on_player_quit, &WorldEvent::PlayerQuit { player });
        assert_eq!(outcome, Outcome::Ignored);
        assert!(fx.world.items.is_empty());
    }

    // -- drop ---------------------------------------------------------------

    #[test]
    fn drop_records_item_entity() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        let event = WorldEvent::ItemDropped {
            player: PlayerId::new(),
            entity,
            item: fx.stone(StoneKind::Reality),
        };
        let outcome = fx.run(on_item_dropped, &event);
        assert!(!outcome.is_vetoed());
        assert_eq!(
            fx.registry.get(StoneKind::Reality),
            Some(HolderRef::Entity(entity))
        );
    }

    #[test]
    fn dropping_ordinary_items_changes_nothing() {
        let mut fx = Fixture::new();
        let event = WorldEvent::ItemDropped {
            player: PlayerId::new(),
            entity: EntityId::new(),
            item: ItemStack::new("cobblestone", 64),
        };
        assert_eq!(fx.run(on_item_dropped, &event), Outcome::Ignored);
        assert!(fx.registry.is_empty());
    }

    // -- pickup -------------------------------------------------------------

    #[test]
    fn player_pickup_records_player() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let entity = EntityId::new();
        fx.registry.set(StoneKind::Power, HolderRef::Entity(entity));

        let event = WorldEvent::EntityPickup {
            picker: Actor::Player(player),
            entity,
            item: fx.stone(StoneKind::Power),
        };
        let outcome = fx.run(on_entity_pickup, &event);
        assert!(!outcome.is_vetoed());
        assert_eq!(fx.registry.get(StoneKind::Power), Some(HolderRef::Player(player)));
    }

    #[test]
    fn creature_pickup_is_vetoed_and_registry_unchanged() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        fx.registry.set(StoneKind::Power, HolderRef::Entity(entity));

        let event = WorldEvent::EntityPickup {
            picker: Actor::Creature(EntityId::new()),
            entity,
            item: fx.stone(StoneKind::Power),
        };
        assert_eq!(fx.run(on_entity_pickup, &event), Outcome::Vetoed);
        assert_eq!(fx.registry.get(StoneKind::Power), Some(HolderRef::Entity(entity)));
    }

    #[test]
    fn creature_may_pick_up_ordinary_items() {
        let mut fx = Fixture::new();
        let event = WorldEvent::EntityPickup {
            picker: Actor::Creature(EntityId::new()),
            entity: EntityId::new(),
            item: ItemStack::new("rotten_flesh", 1),
        };
        assert_eq!(fx.run(on_entity_pickup, &event), Outcome::Ignored);
    }

    // -- container pickup ---------------------------------------------------

    #[test]
    fn player_owned_container_pickup_records_owner() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let event = WorldEvent::ContainerPickup {
            inventory: InventoryInfo::player(player, 36),
            entity: EntityId::new(),
            item: fx.stone(StoneKind::Mind),
        };
        let outcome = fx.run(on_container_pickup, &event);
        assert!(!outcome.is_vetoed());
        assert_eq!(fx.registry.get(StoneKind::Mind), Some(HolderRef::Player(player)));
    }

    #[test]
    fn hopper_pickup_is_vetoed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::ContainerPickup {
            inventory: InventoryInfo::block(InventoryKind::Hopper, Location::default(), 5),
            entity: EntityId::new(),
            item: fx.stone(StoneKind::Mind),
        };
        assert_eq!(fx.run(on_container_pickup, &event), Outcome::Vetoed);
        assert!(fx.registry.is_empty());
    }

    // -- despawn ------------------------------------------------------------

    #[test]
    fn despawn_is_vetoed_and_reconfirms_entity() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        let event = WorldEvent::ItemDespawn {
            entity,
            item: fx.stone(StoneKind::Time),
        };
        let outcome = fx.run(on_item_despawn, &event);
        assert_eq!(
            outcome,
            Outcome::VetoedConfirming(CustodyChange::Assigned {
                stone: StoneKind::Time,
                holder: HolderRef::Entity(entity),
            })
        );
        assert_eq!(fx.registry.get(StoneKind::Time), Some(HolderRef::Entity(entity)));
    }

    #[test]
    fn ordinary_items_may_despawn() {
        let mut fx = Fixture::new();
        let event = WorldEvent::ItemDespawn {
            entity: EntityId::new(),
            item: ItemStack::new("seeds", 3),
        };
        assert_eq!(fx.run(on_item_despawn, &event), Outcome::Ignored);
    }

    // -- container transfer -------------------------------------------------

    #[test]
    fn transfer_between_different_containers_is_vetoed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::ContainerTransfer {
            source: ContainerId(1),
            destination: ContainerId(2),
            item: fx.stone(StoneKind::Soul),
        };
        assert_eq!(fx.run(on_container_transfer, &event), Outcome::Vetoed);
        assert!(fx.registry.is_empty());
    }

    #[test]
    fn transfer_within_same_container_is_allowed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::ContainerTransfer {
            source: ContainerId(7),
            destination: ContainerId(7),
            item: fx.stone(StoneKind::Soul),
        };
        assert_eq!(fx.run(on_container_transfer, &event), Outcome::Ignored);
    }

    // -- click / drag -------------------------------------------------------

    #[test]
    fn clicking_stone_into_chest_is_vetoed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::InventoryClick {
            player: PlayerId::new(),
            cursor: Some(fx.stone(StoneKind::Reality)),
            clicked: Some(chest()),
            current: None,
            moves_to: None,
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Vetoed);
    }

    #[test]
    fn clicking_stone_into_own_inventory_is_allowed() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let event = WorldEvent::InventoryClick {
            player,
            cursor: Some(fx.stone(StoneKind::Reality)),
            clicked: Some(InventoryInfo::player(player, 36)),
            current: None,
            moves_to: None,
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Ignored);
    }

    #[test]
    fn clicking_outside_window_with_stone_is_vetoed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::InventoryClick {
            player: PlayerId::new(),
            cursor: Some(fx.stone(StoneKind::Reality)),
            clicked: None,
            current: None,
            moves_to: None,
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Vetoed);
    }

    #[test]
    fn clicking_with_empty_cursor_is_ignored() {
        let mut fx = Fixture::new();
        let event = WorldEvent::InventoryClick {
            player: PlayerId::new(),
            cursor: None,
            clicked: Some(chest()),
            current: None,
            moves_to: None,
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Ignored);
    }

    #[test]
    fn quick_moving_stone_into_chest_is_vetoed() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let event = WorldEvent::InventoryClick {
            player,
            cursor: None,
            clicked: Some(InventoryInfo::player(player, 36)),
            current: Some(fx.stone(StoneKind::Time)),
            moves_to: Some(chest()),
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Vetoed);
    }

    #[test]
    fn quick_moving_stone_out_of_chest_is_allowed() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let event = WorldEvent::InventoryClick {
            player,
            cursor: None,
            clicked: Some(chest()),
            current: Some(fx.stone(StoneKind::Time)),
            moves_to: Some(InventoryInfo::player(player, 36)),
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Ignored);
    }

    #[test]
    fn swapping_stone_onto_cursor_is_allowed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::InventoryClick {
            player: PlayerId::new(),
            cursor: Some(ItemStack::new("dirt", 1)),
            clicked: Some(chest()),
            current: Some(fx.stone(StoneKind::Time)),
            moves_to: None,
        };
        assert_eq!(fx.run(on_inventory_click, &event), Outcome::Ignored);
    }

    fn drag(fx: &Fixture, raw_slots: Vec<usize>) -> WorldEvent {
        let player = PlayerId::new();
        WorldEvent::InventoryDrag {
            player,
            old_cursor: fx.stone(StoneKind::Mind),
            top: chest(),
            bottom: InventoryInfo::player(player, 36),
            raw_slots,
        }
    }

    #[test]
    fn dragging_into_chest_half_is_vetoed() {
        let mut fx = Fixture::new();
        let event = drag(&fx, vec![30, 4]);
        assert_eq!(fx.run(on_inventory_drag, &event), Outcome::Vetoed);
    }

    #[test]
    fn dragging_within_player_half_is_allowed() {
        let mut fx = Fixture::new();
        // Chest has 27 slots, so 27.. addresses the player inventory.
        let event = drag(&fx, vec![27, 40, 62]);
        assert_eq!(fx.run(on_inventory_drag, &event), Outcome::Ignored);
    }

    #[test]
    fn dragging_into_foreign_bottom_half_is_vetoed() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let event = WorldEvent::InventoryDrag {
            player,
            old_cursor: fx.stone(StoneKind::Mind),
            top: InventoryInfo::player(player, 5),
            bottom: InventoryInfo::block(InventoryKind::Furnace, Location::default(), 3),
            // Beyond the top inventory's own size: only reachable in the bottom half.
            raw_slots: vec![7],
        };
        assert_eq!(fx.run(on_inventory_drag, &event), Outcome::Vetoed);
    }

    #[test]
    fn dragging_ordinary_item_into_chest_is_ignored() {
        let mut fx = Fixture::new();
        let player = PlayerId::new();
        let event = WorldEvent::InventoryDrag {
            player,
            old_cursor: ItemStack::new("sand", 32),
            top: chest(),
            bottom: InventoryInfo::player(player, 36),
            raw_slots: vec![0, 1, 2],
        };
        assert_eq!(fx.run(on_inventory_drag, &event), Outcome::Ignored);
    }

    // -- combust / death ----------------------------------------------------

    #[test]
    fn burning_stone_is_released() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        fx.registry.set(StoneKind::Soul, HolderRef::Entity(entity));
        let event = WorldEvent::EntityCombust {
            entity,
            item: Some(fx.stone(StoneKind::Soul)),
        };
        assert_eq!(
            fx.run(on_item_destroyed, &event),
            Outcome::Recorded(CustodyChange::Released {
                stone: StoneKind::Soul
            })
        );
        assert!(!fx.registry.contains(StoneKind::Soul));
    }

    #[test]
    fn dying_stone_item_is_released() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        fx.registry.set(StoneKind::Space, HolderRef::Entity(entity));
        let event = WorldEvent::EntityDeath {
            entity,
            item: Some(fx.stone(StoneKind::Space)),
        };
        assert!(!fx.run(on_item_destroyed, &event).is_vetoed());
        assert!(fx.registry.is_empty());
    }

    #[test]
    fn burning_stray_copy_keeps_real_holder() {
        let mut fx = Fixture::new();
        let player = fx.world.join(Location::default());
        fx.world.give_stone(player, 0, StoneKind::Mind);
        fx.registry.set(StoneKind::Mind, HolderRef::Player(player));

        let combust = WorldEvent::EntityCombust {
            entity: EntityId::new(),
            item: Some(fx.stone(StoneKind::Mind)),
        };
        assert_eq!(fx.run(on_item_destroyed, &combust), Outcome::Ignored);
        assert_eq!(fx.registry.get(StoneKind::Mind), Some(HolderRef::Player(player)));

        let spawn = WorldEvent::ItemSpawn {
            entity: EntityId::new(),
            item: fx.stone(StoneKind::Mind),
        };
        assert_eq!(fx.run(on_item_spawn, &spawn), Outcome::Vetoed);
    }

    #[test]
    fn dying_creature_is_ignored() {
        let mut fx = Fixture::new();
        fx.registry
            .set(StoneKind::Space, HolderRef::Entity(EntityId::new()));
        let event = WorldEvent::EntityDeath {
            entity: EntityId::new(),
            item: None,
        };
        assert_eq!(fx.run(on_item_destroyed, &event), Outcome::Ignored);
        assert_eq!(fx.registry.len(), 1);
    }

    // -- interact -----------------------------------------------------------

    #[test]
    fn interacting_with_stone_in_hand_is_vetoed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::PlayerInteractEntity {
            player: PlayerId::new(),
            target: EntityId::new(),
            main_hand: Some(fx.stone(StoneKind::Time)),
        };
        assert_eq!(fx.run(on_player_interact_entity, &event), Outcome::Vetoed);
    }

    #[test]
    fn interacting_empty_handed_is_allowed() {
        let mut fx = Fixture::new();
        let event = WorldEvent::PlayerInteractEntity {
            player: PlayerId::new(),
            target: EntityId::new(),
            main_hand: None,
        };
        assert_eq!(fx.run(on_player_interact_entity, &event), Outcome::Ignored);
    }

    // -- spawn --------------------------------------------------------------

    #[test]
    fn first_spawn_is_recorded() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        let event = WorldEvent::ItemSpawn {
            entity,
            item: fx.stone(StoneKind::Soul),
        };
        assert!(!fx.run(on_item_spawn, &event).is_vetoed());
        assert_eq!(fx.registry.get(StoneKind::Soul), Some(HolderRef::Entity(entity)));
    }

    #[test]
    fn duplicate_spawn_is_vetoed_and_first_wins() {
        let mut fx = Fixture::new();
        let first = EntityId::new();
        fx.registry.set(StoneKind::Mind, HolderRef::Entity(first));
        let event = WorldEvent::ItemSpawn {
            entity: EntityId::new(),
            item: fx.stone(StoneKind::Mind),
        };
        assert_eq!(fx.run(on_item_spawn, &event), Outcome::Vetoed);
        assert_eq!(fx.registry.get(StoneKind::Mind), Some(HolderRef::Entity(first)));
    }

    #[test]
    fn respawn_of_the_tracked_entity_is_ignored() {
        let mut fx = Fixture::new();
        let entity = EntityId::new();
        fx.registry.set(StoneKind::Mind, HolderRef::Entity(entity));
        let event = WorldEvent::ItemSpawn {
            entity,
            item: fx.stone(StoneKind::Mind),
        };
        let outcome = fx.run(on_item_spawn, &event);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(outcome.changes().is_empty());
        assert_eq!(fx.registry.get(StoneKind::Mind), Some(HolderRef::Entity(entity)));
    }

    #[test]
    fn mismatched_event_is_ignored_by_handler() {
        let mut fx = Fixture::new();
        let event = WorldEvent::PlayerQuit {
            player: PlayerId::new(),
        };
        assert_eq!(fx.run(on_item_spawn, &event), Outcome::Ignored);
    }
}
