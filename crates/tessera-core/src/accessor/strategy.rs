//! Capability-gated operations.
//!
//! [`Accessors`] picks, per operation, between the native host API and a
//! legacy path according to the detected [`Capabilities`]. Reflective legacy
//! paths are bound once through a [`BindingCell`]; every operation returns
//! a documented sentinel instead of failing.

use tracing::trace;

use super::binding::{BindingCell, BindingState};
use super::legacy::FieldAccessor;
use crate::capability::{Capabilities, Capability};
use crate::foundation::{ItemView, Property, Slot, Subject};

/// Ping returned when the latency cannot be read.
pub const PING_SENTINEL: i32 = -1;
/// Locale returned when the locale cannot be read.
pub const LOCALE_SENTINEL: &str = "en_US";
/// Absorption returned when the running version has no absorption at all.
pub const ABSORPTION_SENTINEL: f64 = -1.0;
/// Max health returned when the host reports nothing.
pub const DEFAULT_MAX_HEALTH: f64 = 20.0;

const PING_FIELD: &str = "ping";
const LOCALE_FIELD: &str = "locale";

/// The capability-gated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ping,
    Locale,
    Absorption,
    MaxHealth,
    ItemInHand,
    ItemDamage,
    EnchantmentLookup,
}

impl Operation {
    /// Capability that enables the native strategy.
    pub const fn gate(self) -> Capability {
        match self {
            Self::Ping => Capability::PlayerPing,
            Self::Locale => Capability::PlayerLocale,
            Self::Absorption => Capability::Absorption,
            Self::MaxHealth => Capability::AttributeApi,
            Self::ItemInHand => Capability::OffHand,
            Self::ItemDamage => Capability::DamageableMeta,
            Self::EnchantmentLookup => Capability::KeyedEnchantments,
        }
    }

    /// Whether the operation can fall back to a legacy path.
    pub const fn has_legacy(self) -> bool {
        !matches!(self, Self::Absorption)
    }
}

/// Strategy selected for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Native,
    Legacy,
    /// The feature does not exist on this version.
    Unsupported,
}

/// Per-process accessor set.
#[derive(Debug)]
pub struct Accessors {
    capabilities: Capabilities,
    ping: BindingCell<i32>,
    locale: BindingCell<String>,
}

impl Accessors {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ping: BindingCell::new("ping"),
            locale: BindingCell::new("locale"),
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn strategy(&self, operation: Operation) -> Strategy {
        if self.capabilities.has(operation.gate()) {
            Strategy::Native
        } else if operation.has_legacy() {
            Strategy::Legacy
        } else {
            Strategy::Unsupported
        }
    }

    /// State of the reflective binding behind `operation`, if it has one.
    pub fn binding_state(&self, operation: Operation) -> Option<BindingState> {
        match operation {
            Operation::Ping => Some(self.ping.state()),
            Operation::Locale => Some(self.locale.state()),
            _ => None,
        }
    }

    /// Network latency in milliseconds, or [`PING_SENTINEL`].
    pub fn ping(&self, subject: &dyn Subject) -> i32 {
        let ping = match self.strategy(Operation::Ping) {
            Strategy::Native => subject
                .property(Property::Ping)
                .and_then(|v| v.as_i64())
                .and_then(|v| i32::try_from(v).ok()),
            _ => self
                .ping
                .read(subject, || FieldAccessor::boxed(subject, PING_FIELD)),
        };
        ping.unwrap_or_else(|| {
            trace!(subject = subject.name(), "Ping unavailable");
            PING_SENTINEL
        })
    }

    /// Client locale such as `de_DE`, or [`LOCALE_SENTINEL`].
    pub fn locale(&self, subject: &dyn Subject) -> String {
        let locale = match self.strategy(Operation::Locale) {
            Strategy::Native => subject
                .property(Property::Locale)
                .and_then(|v| v.as_str().map(str::to_string)),
            _ => self
                .locale
                .read(subject, || FieldAccessor::boxed(subject, LOCALE_FIELD)),
        };
        locale.unwrap_or_else(|| LOCALE_SENTINEL.to_string())
    }

    /// Absorption hearts, or [`ABSORPTION_SENTINEL`] when unsupported or unreported.
    pub fn absorption(&self, subject: &dyn Subject) -> f64 {
        match self.strategy(Operation::Absorption) {
            Strategy::Native => subject
                .property(Property::Absorption)
                .and_then(|v| v.as_f64())
                .unwrap_or(ABSORPTION_SENTINEL),
            _ => ABSORPTION_SENTINEL,
        }
    }

    /// Maximum health through the attribute API or the deprecated getter.
    pub fn max_health(&self, subject: &dyn Subject) -> f64 {
        let property = match self.strategy(Operation::MaxHealth) {
            Strategy::Native => Property::MaxHealth,
            _ => Property::LegacyMaxHealth,
        };
        subject
            .property(property)
            .and_then(|v| v.as_f64())
            .unwrap_or(DEFAULT_MAX_HEALTH)
    }

    /// Item in the main hand.
    pub fn item_in_hand(&self, subject: &dyn Subject) -> Option<ItemView> {
        let slot = match self.strategy(Operation::ItemInHand) {
            Strategy::Native => Slot::MainHand,
            _ => Slot::LegacyHand,
        };
        subject.item(slot)
    }

    /// Item in the off hand; empty on versions without one.
    pub fn item_in_off_hand(&self, subject: &dyn Subject) -> Option<ItemView> {
        match self.strategy(Operation::ItemInHand) {
            Strategy::Native => subject.item(Slot::OffHand),
            _ => None,
        }
    }

    /// Damage taken by an item; `0` for empty hands.
    pub fn item_damage(&self, item: Option<&ItemView>) -> i32 {
        match item.filter(|i| !i.is_air()) {
            None => 0,
            Some(item) => match self.strategy(Operation::ItemDamage) {
                Strategy::Native => item.damage.unwrap_or(0),
                _ => item.legacy_data,
            },
        }
    }

    /// Durability left on an item; `0` for empty hands.
    pub fn item_durability(&self, item: Option<&ItemView>) -> i32 {
        match item.filter(|i| !i.is_air()) {
            None => 0,
            Some(i) => i.max_durability - self.item_damage(Some(i)),
        }
    }

    /// Level of an enchantment given by namespaced key or legacy name.
    pub fn enchantment_level(&self, item: Option<&ItemView>, name: &str) -> u32 {
        let Some(item) = item.filter(|i| !i.is_air()) else {
            return 0;
        };
        let by_legacy_name = || {
            item.enchantments
                .iter()
                .find(|e| e.legacy_name.eq_ignore_ascii_case(name))
        };
        let found = match self.strategy(Operation::EnchantmentLookup) {
            Strategy::Native => {
                let key = if name.contains(':') {
                    name.to_ascii_lowercase()
                } else {
                    format!("minecraft:{}", name.to_ascii_lowercase())
                };
                item.enchantments
                    .iter()
                    .find(|e| e.key == key)
                    .or_else(by_legacy_name)
            }
            _ => by_legacy_name(),
        };
        found.map_or(0, |e| e.level)
    }
}
