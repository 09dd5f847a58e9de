//! The simulated host: world + keeper on one logical thread.
//!
//! Every action follows the same shape: build the event from the current
//! world state, ask the keeper, and apply the mutation only if it was not
//! vetoed. Periodic work (item ageing, validator sweeps, saves) happens in
//! [`Host::advance`].
//!
//! Item entities created by the keeper itself (eviction on quit or
//! shutdown) are placed directly and are never fed back as spawn events.

use stones_core::error::Result;
use stones_core::lifecycle::{ShutdownReport, TickReport};
use stones_core::persistence::CustodyStore;
use stones_core::types::{
    Actor, ContainerId, EntityId, InventoryInfo, ItemStack, Location, PlayerId, StoneKind, Tick,
};
use stones_core::world::WorldView;
use stones_core::{Outcome, StoneKeeper, WorldEvent};
use tracing::trace;

use crate::config::HostConfig;
use crate::hooks;
use crate::world::SimWorld;

/// A world with a custody keeper attached.
#[derive(Debug)]
pub struct Host {
    config: HostConfig,
    world: SimWorld,
    keeper: StoneKeeper,
    now: Tick,
}

impl Host {
    /// Start a host with an empty world.
    ///
    /// # Errors
    /// Returns `StonesError::Config` if the keeper configuration is invalid.
    pub fn new(config: HostConfig, store: Box<dyn CustodyStore>) -> Result<Self> {
        let keeper = StoneKeeper::start(config.keeper.clone(), store)?;
        Ok(Self {
            world: SimWorld::new(config.inventory_slots),
            config,
            keeper,
            now: 0,
        })
    }

    /// Host settings.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The world.
    #[must_use]
    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    /// Mutable world access, for out-of-band edits that fire no events.
    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    /// The keeper.
    #[must_use]
    pub fn keeper(&self) -> &StoneKeeper {
        &self.keeper
    }

    /// Mutable keeper access (admin overrides, manual sweeps).
    pub fn keeper_mut(&mut self) -> &mut StoneKeeper {
        &mut self.keeper
    }

    /// Current world tick.
    #[must_use]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// The canonical item for `kind`, as this host's keeper recognises it.
    #[must_use]
    pub fn stone_item(&self, kind: StoneKind) -> ItemStack {
        self.keeper.resolver().make_item(kind)
    }

    /// Deliver one event to the keeper.
    pub fn fire(&mut self, event: &WorldEvent) -> Outcome {
        let outcome = self.keeper.handle(event, &mut self.world);
        trace!(kind = ?event.kind(), ?outcome, "Event handled");
        outcome
    }

    // -- players ------------------------------------------------------------

    /// Connect a player.
    pub fn join(&mut self, name: &str, at: Location) -> PlayerId {
        self.world.join(name, at)
    }

    /// Disconnect a player. Carried stones are ejected where they stand.
    pub fn quit(&mut self, player: PlayerId) -> Outcome {
        let outcome = self.fire(&hooks::on_quit(player));
        self.world.set_offline(player);
        outcome
    }

    /// Throw the contents of `slot` on the ground in front of the player.
    pub fn drop_from_slot(&mut self, player: PlayerId, slot: usize) -> Option<EntityId> {
        let at = self.world.player_location(player)?;
        let item = self.world.slot(player, slot)?.clone();
        self.world.set_slot(player, slot, None);
        let entity = self.world.insert_item(at, item.clone());

        if self.fire(&hooks::on_drop(player, entity, item.clone())).is_vetoed() {
            self.world.remove_item(entity);
            self.world.set_slot(player, slot, Some(item));
            return None;
        }
        Some(entity)
    }

    /// `picker` walks over a dropped item. Returns whether it was picked up.
    pub fn pickup(&mut self, picker: Actor, entity: EntityId) -> bool {
        let Some(item) = self.world.item(entity).map(|i| i.item.clone()) else {
            return false;
        };
        let slot = match picker {
            Actor::Player(player) => match self.world.first_empty_slot(player) {
                Some(slot) => Some((player, slot)),
                None => return false,
            },
            Actor::Creature(creature) => {
                if !self.world.is_creature(creature) {
                    return false;
                }
                None
            }
        };

        if self.fire(&hooks::on_pickup(picker, entity, item.clone())).is_vetoed() {
            return false;
        }
        self.world.remove_item(entity);
        if let Some((player, slot)) = slot {
            self.world.set_slot(player, slot, Some(item));
        }
        true
    }

    /// A container (hopper, minecart) absorbs a dropped item.
    pub fn absorb(&mut self, container: ContainerId, entity: EntityId) -> bool {
        let Some(item) = self.world.item(entity).map(|i| i.item.clone()) else {
            return false;
        };
        let Some(target) = self.world.container(container) else {
            return false;
        };
        let Some(slot) = target.slots.iter().position(Option::is_none) else {
            return false;
        };
        let info = target.info.clone();

        if self
            .fire(&hooks::on_container_pickup(info, entity, item.clone()))
            .is_vetoed()
        {
            return false;
        }
        self.world.remove_item(entity);
        if let Some(target) = self.world.container_mut(container) {
            target.slots[slot] = Some(item);
        }
        true
    }

    /// A player's own inventory absorbs a dropped item (e.g. magnet pickup).
    pub fn absorb_into_player(&mut self, player: PlayerId, entity: EntityId) -> bool {
        let Some(item) = self.world.item(entity).map(|i| i.item.clone()) else {
            return false;
        };
        let Some(slot) = self.world.first_empty_slot(player) else {
            return false;
        };
        let info = self.world.player_inventory_info(player);

        if self
            .fire(&hooks::on_container_pickup(info, entity, item.clone()))
            .is_vetoed()
        {
            return false;
        }
        self.world.remove_item(entity);
        self.world.set_slot(player, slot, Some(item));
        true
    }

    /// Transfer machinery moves the first item of `source` into `destination`.
    pub fn transfer(&mut self, source: ContainerId, destination: ContainerId) -> bool {
        let Some((from_slot, item)) = self.world.container(source).and_then(|c| {
            c.slots
                .iter()
                .enumerate()
                .find_map(|(i, s)| s.clone().map(|item| (i, item)))
        }) else {
            return false;
        };
        let Some(to_slot) = self
            .world
            .container(destination)
            .and_then(|c| c.slots.iter().position(Option::is_none))
        else {
            return false;
        };

        if self
            .fire(&hooks::on_transfer(source, destination, item.clone()))
            .is_vetoed()
        {
            return false;
        }
        if let Some(src) = self.world.container_mut(source) {
            src.slots[from_slot] = None;
        }
        if let Some(dst) = self.world.container_mut(destination) {
            dst.slots[to_slot] = Some(item);
        }
        true
    }

    /// A player clicks with `cursor` on `clicked`. Returns whether the click
    /// was allowed; the inventory UI itself is not simulated.
    pub fn click(
        &mut self,
        player: PlayerId,
        cursor: Option<ItemStack>,
        clicked: Option<InventoryInfo>,
    ) -> bool {
        !self
            .fire(&hooks::on_click(player, cursor, clicked, None))
            .is_vetoed()
    }

    /// A player shift-clicks `slot` of their own inventory while `to` is
    /// open. Returns whether the move was allowed.
    pub fn quick_move(&mut self, player: PlayerId, slot: usize, to: InventoryInfo) -> bool {
        let Some(current) = self.world.slot(player, slot).cloned() else {
            return true;
        };
        let own = self.world.player_inventory_info(player);
        !self
            .fire(&hooks::on_quick_move(player, own, current, to))
            .is_vetoed()
    }

    /// A player drags `cursor` over raw view slots of `top` + `bottom`.
    pub fn drag(
        &mut self,
        player: PlayerId,
        cursor: ItemStack,
        top: InventoryInfo,
        bottom: InventoryInfo,
        raw_slots: Vec<usize>,
    ) -> bool {
        !self
            .fire(&hooks::on_drag(player, cursor, top, bottom, raw_slots))
            .is_vetoed()
    }

    /// A player right-clicks `target`. Returns whether it went through.
    pub fn interact(&mut self, player: PlayerId, target: EntityId) -> bool {
        let main_hand = self.world.main_hand(player).cloned();
        !self
            .fire(&hooks::on_interact(player, target, main_hand))
            .is_vetoed()
    }

    // -- item entities ------------------------------------------------------

    /// Something in the world (loot, chunk load, command) spawns an item.
    pub fn spawn_item(&mut self, item: ItemStack, at: Location) -> Option<EntityId> {
        let entity = EntityId::new();
        if self.fire(&hooks::on_spawn(entity, item.clone())).is_vetoed() {
            return None;
        }
        self.world.insert_item_with_id(entity, at, item);
        Some(entity)
    }

    /// An item entity falls into lava or fire and burns up.
    pub fn ignite(&mut self, entity: EntityId) -> Outcome {
        let item = self.world.item(entity).map(|i| i.item.clone());
        let outcome = self.fire(&hooks::on_combust(entity, item));
        if !outcome.is_vetoed() {
            self.world.remove_item(entity);
        }
        outcome
    }

    /// An item entity is destroyed (explosion, cactus).
    pub fn destroy(&mut self, entity: EntityId) -> Outcome {
        let item = self.world.item(entity).map(|i| i.item.clone());
        let outcome = self.fire(&hooks::on_death(entity, item));
        if !outcome.is_vetoed() {
            self.world.remove_item(entity);
        }
        outcome
    }

    // -- time ---------------------------------------------------------------

    /// Advance the world by `ticks`, expiring old items and running the
    /// keeper's periodic tasks. Returns the reports of ticks that did work.
    pub fn advance(&mut self, ticks: u64) -> Vec<TickReport> {
        let mut reports = Vec::new();
        for _ in 0..ticks {
            self.now += 1;
            for entity in self.world.age_items(self.config.item_lifetime_ticks) {
                self.expire(entity);
            }
            let report = self.keeper.tick(self.now, &self.world);
            if report.sweep.is_some() || report.saved {
                reports.push(report);
            }
        }
        reports
    }

    fn expire(&mut self, entity: EntityId) {
        let Some(item) = self.world.item(entity).map(|i| i.item.clone()) else {
            return;
        };
        if self.fire(&hooks::on_despawn(entity, item)).is_vetoed() {
            self.world.reset_age(entity);
        } else {
            self.world.remove_item(entity);
        }
    }

    /// Shut the keeper down: evict every stone from online players, then save.
    ///
    /// # Errors
    /// Propagates a failed final save.
    pub fn shutdown(&mut self) -> Result<ShutdownReport> {
        self.keeper.shutdown(&mut self.world)
    }
}
