//! Version comparison.
//!
//! Parses `major.minor.patch` strings and reduces a pair of them to a coarse
//! [`ComparisonResult`]. Patch differences are reported separately and, by
//! default, do not affect the result.

use contracts_core::{ComparisonResult, EnforcementError, Result, VersionRole};
use std::cmp::Ordering;
use std::fmt;

/// A parsed `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Parses a version string. `role` names the string in the error.
    ///
    /// Exactly three dot-separated components are required, each made of ASCII
    /// digits only. Surrounding whitespace is ignored.
    pub fn parse(role: VersionRole, value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(EnforcementError::version_parse(
                role,
                value,
                format!("expected major.minor.patch, found {} component(s)", parts.len()),
            ));
        }

        let component = |name: &str, raw: &str| -> Result<u64> {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EnforcementError::version_parse(
                    role,
                    value,
                    format!("{name} component '{raw}' is not a non-negative integer"),
                ));
            }
            raw.parse::<u64>().map_err(|e| {
                EnforcementError::version_parse(role, value, format!("{name} component: {e}"))
            })
        };

        Ok(Self {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Outcome of comparing two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionComparison {
    /// Coarse relationship of the actual version to the expected one
    pub result: ComparisonResult,
    /// Whether the patch components differ
    pub patch_changed: bool,
}

/// Compares a declared contract version against the expected version.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionComparator {
    patch_sensitive: bool,
}

impl VersionComparator {
    /// Creates a patch-insensitive comparator.
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, a patch difference with equal major and minor yields
    /// `MINOR_UPGRADE` (patch higher) or `DOWNGRADE` (patch lower).
    pub fn with_patch_sensitivity(mut self, patch_sensitive: bool) -> Self {
        self.patch_sensitive = patch_sensitive;
        self
    }

    /// Parses and compares two version strings.
    ///
    /// # Errors
    ///
    /// Returns `EnforcementError::VersionParse` naming whichever string failed,
    /// checking `expected` first.
    pub fn compare(&self, expected: &str, actual: &str) -> Result<VersionComparison> {
        let expected = Version::parse(VersionRole::Expected, expected)?;
        let actual = Version::parse(VersionRole::Contract, actual)?;
        Ok(self.compare_versions(expected, actual))
    }

    /// Compares two parsed versions.
    pub fn compare_versions(&self, expected: Version, actual: Version) -> VersionComparison {
        let result = match actual.major.cmp(&expected.major) {
            Ordering::Greater => ComparisonResult::MajorUpgrade,
            Ordering::Less => ComparisonResult::Downgrade,
            Ordering::Equal => match actual.minor.cmp(&expected.minor) {
                Ordering::Greater => ComparisonResult::MinorUpgrade,
                Ordering::Less => ComparisonResult::Downgrade,
                Ordering::Equal => self.compare_patch(expected.patch, actual.patch),
            },
        };

        VersionComparison {
            result,
            patch_changed: actual.patch != expected.patch,
        }
    }

    fn compare_patch(&self, expected: u64, actual: u64) -> ComparisonResult {
        if !self.patch_sensitive {
            return ComparisonResult::ExactMatch;
        }
        match actual.cmp(&expected) {
            Ordering::Greater => ComparisonResult::MinorUpgrade,
            Ordering::Less => ComparisonResult::Downgrade,
            Ordering::Equal => ComparisonResult::ExactMatch,
        }
    }
}
