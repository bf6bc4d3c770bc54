//! Capability flags derived from the environment version.
//!
//! Each [`Capability`] is a fixed version threshold. [`Capabilities`] is
//! computed once from the detected version and passed explicitly to every
//! component that picks a strategy, never read from a global.

use std::fmt;

use tracing::debug;

use super::version::EnvironmentVersion;

/// A feature of the host API that only exists from some version onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Dual wielding: main-hand and off-hand item getters.
    OffHand,
    /// Attribute API, used for max health.
    AttributeApi,
    /// Native player locale getter.
    PlayerLocale,
    /// Damage stored in item meta.
    DamageableMeta,
    /// Enchantment lookup by namespaced key.
    KeyedEnchantments,
    /// Absorption amount getters.
    Absorption,
    /// Native player ping getter.
    PlayerPing,
}

impl Capability {
    /// Every known capability.
    pub const ALL: [Capability; 7] = [
        Self::OffHand,
        Self::AttributeApi,
        Self::PlayerLocale,
        Self::DamageableMeta,
        Self::KeyedEnchantments,
        Self::Absorption,
        Self::PlayerPing,
    ];

    /// First version that provides this capability.
    pub const fn threshold(self) -> EnvironmentVersion {
        match self {
            Self::OffHand | Self::AttributeApi => EnvironmentVersion::new(1, 9, 0),
            Self::PlayerLocale => EnvironmentVersion::new(1, 12, 0),
            Self::DamageableMeta | Self::KeyedEnchantments => EnvironmentVersion::new(1, 13, 0),
            Self::Absorption => EnvironmentVersion::new(1, 15, 0),
            Self::PlayerPing => EnvironmentVersion::new(1, 17, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::OffHand => "off_hand",
            Self::AttributeApi => "attribute_api",
            Self::PlayerLocale => "player_locale",
            Self::DamageableMeta => "damageable_meta",
            Self::KeyedEnchantments => "keyed_enchantments",
            Self::Absorption => "absorption",
            Self::PlayerPing => "player_ping",
        }
    }

    /// Whether `version` provides this capability.
    pub fn is_available(self, version: EnvironmentVersion) -> bool {
        version >= self.threshold()
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The immutable set of capabilities of the running environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    version: EnvironmentVersion,
    flags: u16,
}

impl Capabilities {
    /// Evaluates every capability against `version`. Pure.
    pub fn for_version(version: EnvironmentVersion) -> Self {
        let flags = Capability::ALL
            .iter()
            .filter(|cap| cap.is_available(version))
            .fold(0, |acc, cap| acc | cap.bit());
        let caps = Self { version, flags };
        debug!(
            version = %version,
            enabled = ?caps.iter().map(Capability::name).collect::<Vec<_>>(),
            "Computed host capabilities"
        );
        caps
    }

    pub fn version(&self) -> EnvironmentVersion {
        self.version
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.flags & capability.bit() != 0
    }

    /// Iterates the enabled capabilities.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|cap| self.has(*cap))
    }
}

/// Shorthand for [`Capabilities::for_version`].
pub fn capabilities(version: EnvironmentVersion) -> Capabilities {
    Capabilities::for_version(version)
}
