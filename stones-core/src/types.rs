//! Core type definitions for the stones custody engine.
//!
//! Everything the world hands us is modelled as a plain value or an opaque
//! handle. Handles ([`PlayerId`], [`EntityId`]) may go stale at any moment;
//! staleness is only ever discovered by asking the world.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Stone identity
// ---------------------------------------------------------------------------

/// One of the six tracked artifact identities.
///
/// At most one live instance of each kind may exist in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoneKind {
    /// The Reality Stone.
    Reality,
    /// The Mind Stone.
    Mind,
    /// The Soul Stone.
    Soul,
    /// The Power Stone.
    Power,
    /// The Time Stone.
    Time,
    /// The Space Stone.
    Space,
}

impl StoneKind {
    /// Every stone kind, in registry order.
    pub const ALL: [StoneKind; 6] = [
        Self::Reality,
        Self::Mind,
        Self::Soul,
        Self::Power,
        Self::Time,
        Self::Space,
    ];

    /// Stable lowercase key, as stored in item tags.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Reality => "reality",
            Self::Mind => "mind",
            Self::Soul => "soul",
            Self::Power => "power",
            Self::Time => "time",
            Self::Space => "space",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Reality => "Reality Stone",
            Self::Mind => "Mind Stone",
            Self::Soul => "Soul Stone",
            Self::Power => "Power Stone",
            Self::Time => "Time Stone",
            Self::Space => "Space Stone",
        }
    }

    /// Parse a key case-insensitively. Unknown keys yield `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for StoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// World handles
// ---------------------------------------------------------------------------

/// Stable identity of a player session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new random player ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player:{}", self.0)
    }
}

/// Handle to a non-player world entity (dropped item, creature, minecart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

/// Who currently has a stone.
///
/// This is a weak reference: the world owns the target and may destroy it
/// without telling us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum HolderRef {
    /// Carried somewhere in a player's inventory.
    Player(PlayerId),
    /// Lying in the world as a dropped item entity.
    Entity(EntityId),
}

impl fmt::Display for HolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(id) => id.fmt(f),
            Self::Entity(id) => id.fmt(f),
        }
    }
}

/// The entity performing an item pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// A player.
    Player(PlayerId),
    /// Anything that is not a player (mob, villager, armour stand).
    Creature(EntityId),
}

// ---------------------------------------------------------------------------
// Spatial
// ---------------------------------------------------------------------------

/// A 3D position in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Location {
    /// Construct a location from its coordinates.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Items and inventories
// ---------------------------------------------------------------------------

/// An item stack as described by the world.
///
/// Opaque to everything except the [`crate::identity::StoneResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Material / item type name.
    pub material: String,
    /// Number of items in the stack.
    pub amount: u32,
    /// Custom data attached to the stack.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ItemStack {
    /// A plain, untagged stack.
    #[must_use]
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
            tags: BTreeMap::new(),
        }
    }

    /// Attach a custom tag, builder style.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// What sort of inventory a slot belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryKind {
    /// A player's own inventory.
    Player,
    /// A chest or similar storage block.
    Chest,
    /// An item-moving hopper.
    Hopper,
    /// A furnace.
    Furnace,
    /// Anything else, by name.
    Other(String),
}

/// Who owns an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InventoryOwner {
    /// Owned by a player.
    Player(PlayerId),
    /// Owned by a non-player entity (minecart, llama).
    Entity(EntityId),
    /// Belongs to a block at a location.
    Block(Location),
    /// No owner (virtual inventories).
    None,
}

/// Shape and ownership of one inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryInfo {
    /// Inventory type.
    pub kind: InventoryKind,
    /// Owner of the inventory.
    pub owner: InventoryOwner,
    /// Number of slots.
    pub size: usize,
}

impl InventoryInfo {
    /// A player's own inventory of `size` slots.
    #[must_use]
    pub fn player(player: PlayerId, size: usize) -> Self {
        Self {
            kind: InventoryKind::Player,
            owner: InventoryOwner::Player(player),
            size,
        }
    }

    /// A container block inventory.
    #[must_use]
    pub fn block(kind: InventoryKind, at: Location, size: usize) -> Self {
        Self {
            kind,
            owner: InventoryOwner::Block(at),
            size,
        }
    }

    /// Whether this is a player's own inventory.
    #[must_use]
    pub fn is_player_inventory(&self) -> bool {
        self.kind == InventoryKind::Player
    }
}

/// Identifies a container for automated transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u64);

/// World tick counter, monotonically increasing.
pub type Tick = u64;
