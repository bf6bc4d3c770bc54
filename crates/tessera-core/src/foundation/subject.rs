//! Host-facing contracts: the [`Host`] environment and the [`Subject`]s
//! placeholders are resolved against.
//!
//! Adapters for a concrete game server implement these two traits. Every
//! getter is narrow and side-effect free; a property the host cannot supply
//! is reported as `None` rather than an error.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::handle::HiddenHandle;
use crate::error::{AccessError, AccessResult};

/// The running host environment.
pub trait Host: Send + Sync {
    /// Raw version identifier of the host, e.g. `"1.16.5-R0.1-SNAPSHOT"`.
    fn version_string(&self) -> String;

    /// Looks up another online subject by name.
    fn find_player(&self, _name: &str) -> Option<Arc<dyn Subject>> {
        None
    }
}

/// An entity (usually a player) that placeholders are resolved against.
///
/// Subjects are owned by the caller and never mutated by Tessera.
pub trait Subject: Send + Sync {
    /// Display-independent name of the subject.
    fn name(&self) -> &str;

    /// Whether the subject is connected and can answer live-only queries.
    fn is_online(&self) -> bool;

    /// Reads one property, or `None` when the host cannot provide it.
    fn property(&self, property: Property) -> Option<Value>;

    /// Item held in or worn on a slot.
    fn item(&self, _slot: Slot) -> Option<ItemView> {
        None
    }

    /// Snapshot of the whole inventory.
    fn inventory(&self) -> Option<Inventory> {
        None
    }

    /// Permission check for `has_permission_<node>`.
    fn has_permission(&self, _node: &str) -> bool {
        false
    }

    /// Internal implementation handle used by legacy reflective accessors.
    fn handle(&self) -> AccessResult<&dyn HiddenHandle> {
        Err(AccessError::no_handle(self.name()))
    }
}

impl fmt::Debug for dyn Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("name", &self.name())
            .field("online", &self.is_online())
            .finish()
    }
}

// =============================================================================
// Properties
// =============================================================================

/// Every property a [`Subject`] may be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    // Available for offline subjects.
    Uuid,
    HasPlayedBefore,
    Whitelisted,
    Banned,
    Op,
    FirstPlayed,
    LastPlayed,
    BedSpawn,

    // Live-only.
    DisplayName,
    CustomName,
    GameMode,
    World,
    WorldEnvironment,
    Location,
    Biome,
    LightLevel,
    Address,
    AllowFlight,
    CanPickupItems,
    CompassTarget,
    Exp,
    Level,
    TotalExperience,
    ExpToLevel,
    FlySpeed,
    WalkSpeed,
    FoodLevel,
    Saturation,
    Health,
    HealthScale,
    LastDamage,
    MaximumAir,
    RemainingAir,
    NoDamageTicks,
    MaximumNoDamageTicks,
    PlayerTime,
    PlayerTimeOffset,
    SleepTicks,
    TicksLived,
    WorldTime,
    ThunderDuration,
    WeatherDuration,

    // Capability-gated.
    Ping,
    Locale,
    Absorption,
    MaxHealth,
    LegacyMaxHealth,
}

// =============================================================================
// Values
// =============================================================================

/// A property value as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Location(Location),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&Location> {
        match self {
            Self::Location(l) => Some(l),
            _ => None,
        }
    }

    /// Renders the value the way the host prints it.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => render_float(*f),
            Self::Text(s) => s.clone(),
            Self::Location(l) => format!("{},{},{},{}", l.world_name(), l.x, l.y, l.z),
        }
    }
}

/// Formats a float with at least one fractional digit (`20` → `"20.0"`).
pub fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Location> for Value {
    fn from(v: Location) -> Self {
        Self::Location(v)
    }
}

/// A position in a world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub world: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: Some(world.into()),
            x,
            y,
            z,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn block_x(&self) -> i64 {
        self.x.floor() as i64
    }

    pub fn block_y(&self) -> i64 {
        self.y.floor() as i64
    }

    pub fn block_z(&self) -> i64 {
        self.z.floor() as i64
    }

    /// World name, or an empty string when the world is unloaded.
    pub fn world_name(&self) -> &str {
        self.world.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Items
// =============================================================================

/// Equipment and hand slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Main hand on hosts with dual wielding.
    MainHand,
    OffHand,
    /// The single hand of hosts predating dual wielding.
    LegacyHand,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

/// Snapshot of an item stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub material: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Damage stored in item meta; `None` when the item has no meta.
    #[serde(default)]
    pub damage: Option<i32>,
    /// Legacy data/durability value.
    #[serde(default)]
    pub legacy_data: i32,
    #[serde(default)]
    pub max_durability: i32,
    #[serde(default)]
    pub enchantments: Vec<Enchantment>,
}

impl ItemView {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            ..Default::default()
        }
    }

    /// Air and its variants (`CAVE_AIR`, `VOID_AIR`) count as empty.
    pub fn is_air(&self) -> bool {
        self.material.is_empty() || self.material == "AIR" || self.material.contains("_AIR")
    }
}

/// Whether an optional item is absent or air.
pub fn is_empty_item(item: Option<&ItemView>) -> bool {
    item.is_none_or(ItemView::is_air)
}

/// An enchantment applied to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Namespaced key, e.g. `minecraft:sharpness`.
    pub key: String,
    /// Legacy enum name, e.g. `DAMAGE_ALL`.
    pub legacy_name: String,
    pub level: u32,
}

/// Snapshot of a subject's inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Storage slots; `None` is an empty slot.
    #[serde(default)]
    pub storage: Vec<Option<ItemView>>,
    #[serde(default)]
    pub helmet: Option<ItemView>,
    #[serde(default)]
    pub chestplate: Option<ItemView>,
    #[serde(default)]
    pub leggings: Option<ItemView>,
    #[serde(default)]
    pub boots: Option<ItemView>,
    #[serde(default)]
    pub off_hand: Option<ItemView>,
}

impl Inventory {
    /// Whether any storage slot is free.
    pub fn has_empty_slot(&self) -> bool {
        self.storage.iter().any(|item| is_empty_item(item.as_ref()))
    }

    /// Counts free storage and armor slots, plus the off-hand if present.
    pub fn empty_slots(&self, include_off_hand: bool) -> usize {
        let armor = [&self.helmet, &self.chestplate, &self.leggings, &self.boots];
        let storage = self
            .storage
            .iter()
            .filter(|item| is_empty_item(item.as_ref()))
            .count();
        let worn = armor
            .iter()
            .filter(|item| is_empty_item(item.as_ref()))
            .count();
        let off_hand = usize::from(include_off_hand && is_empty_item(self.off_hand.as_ref()));
        storage + worn + off_hand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_float_keeps_one_decimal() {
        assert_eq!(render_float(20.0), "20.0");
        assert_eq!(render_float(19.5), "19.5");
        assert_eq!(Value::Int(-1).render(), "-1");
    }

    #[test]
    fn test_air_variants_are_empty() {
        assert!(ItemView::new("AIR").is_air());
        assert!(ItemView::new("CAVE_AIR").is_air());
        assert!(!ItemView::new("DIAMOND_SWORD").is_air());
        assert!(is_empty_item(None));
    }

    #[test]
    fn test_empty_slots_counts_armor_and_off_hand() {
        let inventory = Inventory {
            storage: vec![None, Some(ItemView::new("STONE")), Some(ItemView::new("AIR"))],
            helmet: Some(ItemView::new("IRON_HELMET")),
            ..Default::default()
        };
        // 2 storage + chestplate, leggings, boots
        assert_eq!(inventory.empty_slots(false), 5);
        assert_eq!(inventory.empty_slots(true), 6);
        assert!(inventory.has_empty_slot());
    }

    #[test]
    fn test_block_coordinates_floor() {
        let loc = Location::new("world", -0.5, 64.9, 10.0);
        assert_eq!(loc.block_x(), -1);
        assert_eq!(loc.block_y(), 64);
        assert_eq!(loc.block_z(), 10);
    }
}
