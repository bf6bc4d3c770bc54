//! Environment version detection.
//!
//! The host reports a free-form version string such as
//! `"1.16.5-R0.1-SNAPSHOT"`. The first `major.minor[.patch]` sequence in it
//! is encoded as `major * 10000 + minor * 100 + patch`, so `1.16.5` becomes
//! `11605` and `1.16` becomes `11600`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};

use crate::error::{VersionError, VersionResult};
use crate::foundation::Host;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<patch>\d+))?")
        .expect("version pattern is valid")
});

/// A comparable, encoded environment version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnvironmentVersion(u32);

impl EnvironmentVersion {
    /// Builds a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(major * 10_000 + minor * 100 + patch)
    }

    /// Parses the first version found in a raw host string.
    pub fn parse(raw: &str) -> VersionResult<Self> {
        let captures = VERSION_PATTERN
            .captures(raw)
            .ok_or_else(|| VersionError::NotFound {
                raw: raw.to_string(),
            })?;

        let component = |name: &'static str| -> VersionResult<u64> {
            match captures.name(name) {
                None => Ok(0),
                Some(m) => m.as_str().parse::<u64>().map_err(|_| VersionError::OutOfRange {
                    raw: raw.to_string(),
                    component: name,
                    value: u64::MAX,
                }),
            }
        };

        let major = component("major")?;
        let minor = component("minor")?;
        let patch = component("patch")?;

        for (name, value) in [("minor", minor), ("patch", patch)] {
            if value >= 100 {
                return Err(VersionError::OutOfRange {
                    raw: raw.to_string(),
                    component: name,
                    value,
                });
            }
        }
        let major = u32::try_from(major)
            .ok()
            .filter(|m| *m < 400_000)
            .ok_or_else(|| VersionError::OutOfRange {
                raw: raw.to_string(),
                component: "major",
                value: major,
            })?;

        Ok(Self::new(major, minor as u32, patch as u32))
    }

    /// Encoded integer form.
    pub const fn code(self) -> u32 {
        self.0
    }

    pub const fn major(self) -> u32 {
        self.0 / 10_000
    }

    pub const fn minor(self) -> u32 {
        (self.0 / 100) % 100
    }

    pub const fn patch(self) -> u32 {
        self.0 % 100
    }
}

impl fmt::Display for EnvironmentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

/// Reads and parses the host version. Runs once at startup.
///
/// Failure is fatal: every capability depends on this value.
pub fn detect(host: &dyn Host) -> VersionResult<EnvironmentVersion> {
    let raw = host.version_string();
    match EnvironmentVersion::parse(&raw) {
        Ok(version) => {
            debug!(raw = %raw, version = %version, code = version.code(), "Detected host version");
            Ok(version)
        }
        Err(e) => {
            error!(raw = %raw, error = %e, "Could not detect host version");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHost(&'static str);

    impl Host for FixedHost {
        fn version_string(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_parse_with_patch() {
        assert_eq!(EnvironmentVersion::parse("1.16.5").unwrap().code(), 11605);
    }

    #[test]
    fn test_parse_without_patch() {
        assert_eq!(EnvironmentVersion::parse("1.16").unwrap().code(), 11600);
    }

    #[test]
    fn test_parse_finds_version_inside_host_string() {
        let version = EnvironmentVersion::parse("1.8.8-R0.1-SNAPSHOT").unwrap();
        assert_eq!(version, EnvironmentVersion::new(1, 8, 8));
        assert_eq!(version.to_string(), "1.8.8");
    }

    #[test]
    fn test_components_roundtrip_for_all_small_versions() {
        for minor in 0..30 {
            for patch in 0..10 {
                let raw = format!("1.{minor}.{patch}");
                let v = EnvironmentVersion::parse(&raw).unwrap();
                assert_eq!(v.code(), 10_000 + minor * 100 + patch);
            }
        }
    }

    #[test]
    fn test_double_digit_patch_orders_correctly() {
        let older = EnvironmentVersion::parse("1.9.10").unwrap();
        let newer = EnvironmentVersion::parse("1.17").unwrap();
        assert!(older < newer);
    }

    #[test]
    fn test_unparseable_is_an_error() {
        assert!(matches!(
            EnvironmentVersion::parse("unknown"),
            Err(VersionError::NotFound { .. })
        ));
        assert!(matches!(
            EnvironmentVersion::parse("1.100"),
            Err(VersionError::OutOfRange { component: "minor", .. })
        ));
    }

    #[test]
    fn test_detect_reads_host() {
        let version = detect(&FixedHost("git-Paper-196 (MC: 1.20.4)")).unwrap();
        assert_eq!(version.code(), 12004);
        assert!(detect(&FixedHost("")).is_err());
    }
}
