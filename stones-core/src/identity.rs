//! Artifact identity resolution.
//!
//! Decides whether an item stack is one of the tracked stones and, if so,
//! which one. Pure and total: the same stack always resolves the same way,
//! and "not a stone" is the normal answer, never an error.

use crate::config::IdentityConfig;
use crate::types::{ItemStack, StoneKind};

/// Recognises stone items by material and identity tag.
#[derive(Debug, Clone)]
pub struct StoneResolver {
    material: String,
    tag_key: String,
}

impl StoneResolver {
    /// Build a resolver from the identity settings.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            material: config.material.clone(),
            tag_key: config.tag_key.clone(),
        }
    }

    /// Which stone `item` is, if any.
    ///
    /// Stones never stack, so any amount other than one resolves to `None`.
    #[must_use]
    pub fn identity_of(&self, item: &ItemStack) -> Option<StoneKind> {
        if item.amount != 1 || item.material != self.material {
            return None;
        }
        item.tags
            .get(&self.tag_key)
            .and_then(|key| StoneKind::from_key(key))
    }

    /// Convenience for optional item slots.
    #[must_use]
    pub fn identity_of_slot(&self, slot: Option<&ItemStack>) -> Option<StoneKind> {
        slot.and_then(|item| self.identity_of(item))
    }

    /// Whether `item` is any stone at all.
    #[must_use]
    pub fn is_stone(&self, item: &ItemStack) -> bool {
        self.identity_of(item).is_some()
    }

    /// The canonical item for `kind`.
    #[must_use]
    pub fn make_item(&self, kind: StoneKind) -> ItemStack {
        ItemStack::new(self.material.clone(), 1)
            .with_tag(self.tag_key.clone(), kind.key())
            .with_tag("display_name", kind.display_name())
    }

    /// Whether any slot of an inventory holds `kind`.
    #[must_use]
    pub fn inventory_contains(&self, slots: &[Option<ItemStack>], kind: StoneKind) -> bool {
        slots
            .iter()
            .any(|slot| self.identity_of_slot(slot.as_ref()) == Some(kind))
    }
}

impl Default for StoneResolver {
    fn default() -> Self {
        Self::new(&IdentityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_items_resolve_to_their_kind() {
        let resolver = StoneResolver::default();
        for kind in StoneKind::ALL {
            let item = resolver.make_item(kind);
            assert_eq!(resolver.identity_of(&item), Some(kind));
        }
    }

    #[test]
    fn ordinary_items_are_not_stones() {
        let resolver = StoneResolver::default();
        assert_eq!(resolver.identity_of(&ItemStack::new("dirt", 64)), None);
        assert!(!resolver.is_stone(&ItemStack::new("nether_star", 1)));
    }

    #[test]
    fn wrong_material_with_tag_is_not_a_stone() {
        let resolver = StoneResolver::default();
        let forged = ItemStack::new("diamond", 1).with_tag("infinity_stone", "soul");
        assert_eq!(resolver.identity_of(&forged), None);
    }

    #[test]
    fn stacked_stones_do_not_resolve() {
        let resolver = StoneResolver::default();
        let mut item = resolver.make_item(StoneKind::Mind);
        item.amount = 2;
        assert_eq!(resolver.identity_of(&item), None);
        item.amount = 0;
        assert_eq!(resolver.identity_of(&item), None);
    }

    #[test]
    fn unknown_tag_value_is_not_a_stone() {
        let resolver = StoneResolver::default();
        let item = ItemStack::new("nether_star", 1).with_tag("infinity_stone", "ego");
        assert_eq!(resolver.identity_of(&item), None);
    }

    #[test]
    fn inventory_search_finds_only_the_requested_kind() {
        let resolver = StoneResolver::default();
        let slots = vec![
            None,
            Some(ItemStack::new("bread", 3)),
            Some(resolver.make_item(StoneKind::Time)),
        ];
        assert!(resolver.inventory_contains(&slots, StoneKind::Time));
        assert!(!resolver.inventory_contains(&slots, StoneKind::Space));
    }

    #[test]
    fn custom_identity_config_is_honoured() {
        let resolver = StoneResolver::new(&IdentityConfig {
            material: "gem".to_string(),
            tag_key: "artifact".to_string(),
        });
        let item = ItemStack::new("gem", 1).with_tag("artifact", "power");
        assert_eq!(resolver.identity_of(&item), Some(StoneKind::Power));
        assert_eq!(resolver.identity_of(&StoneResolver::default().make_item(StoneKind::Power)), None);
    }
}
