//! Assembly version numbers.
//!
//! [`AssemblyVersion`] is the four-part `major.minor.build.revision` identity version of an
//! assembly. It parses the dotted forms accepted by the policy document (`NewVersion`) and
//! the version directories of installed shared frameworks, and it serializes as its
//! dotted string form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Four-part version number for .NET assemblies.
///
/// Versions compare component by component, so `8.0.10` sorts above `8.0.2`.
///
/// # Examples
///
/// ```rust
/// use dotprune::metadata::identity::AssemblyVersion;
///
/// let version = AssemblyVersion::new(1, 2, 3, 4);
/// assert_eq!(version.to_string(), "1.2.3.4");
///
/// let parsed = AssemblyVersion::parse("2.0")?;
/// assert!(parsed > version);
/// # Ok::<(), dotprune::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

impl AssemblyVersion {
    /// Sentinel value (0.0.0.0) for an unspecified version.
    pub const UNKNOWN: Self = Self {
        major: 0,
        minor: 0,
        build: 0,
        revision: 0,
    };

    /// Create a new assembly version with the specified components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Check if this version represents an unknown/unspecified version.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.build == 0 && self.revision == 0
    }

    /// Returns `true` if `self` can stand in for `requested` as a runtime shared framework:
    /// same major and minor version, and not lower.
    ///
    /// ```rust
    /// use dotprune::metadata::identity::AssemblyVersion;
    ///
    /// let requested = AssemblyVersion::new(8, 0, 0, 0);
    /// assert!(AssemblyVersion::new(8, 0, 11, 0).satisfies_feature_band(&requested));
    /// assert!(!AssemblyVersion::new(8, 1, 0, 0).satisfies_feature_band(&requested));
    /// assert!(!AssemblyVersion::new(9, 0, 0, 0).satisfies_feature_band(&requested));
    /// ```
    #[must_use]
    pub fn satisfies_feature_band(&self, requested: &AssemblyVersion) -> bool {
        self.major == requested.major && self.minor == requested.minor && self >= requested
    }

    /// Parse assembly version from string representation.
    ///
    /// Supports one to four dotted numeric components; missing components default to 0.
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the version string has an invalid format.
    pub fn parse(version_str: &str) -> Result<Self> {
        let trimmed = version_str.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();

        if trimmed.is_empty() || parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];

        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for AssemblyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssemblyVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
