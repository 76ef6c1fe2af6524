use std::fmt;

use crate::{metadata::identity::AssemblyVersion, Result};

/// Framework identifier of .NET Core and .NET 5+ assemblies
pub const NETCORE_APP: &str = ".NETCoreApp";

/// The target framework an assembly was compiled against, decoded from the argument of
/// `TargetFrameworkAttribute`, e.g. `.NETCoreApp,Version=v8.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFramework {
    /// Framework identifier, e.g. `.NETCoreApp`
    pub identifier: String,
    /// Requested framework version
    pub version: AssemblyVersion,
    /// Optional profile, e.g. `Client`
    pub profile: Option<String>,
}

impl TargetFramework {
    /// Parse a framework moniker of the form `Identifier,Version=vX.Y[,Profile=P]`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the identifier or the version is missing or invalid.
    pub fn parse(moniker: &str) -> Result<Self> {
        let mut parts = moniker.split(',').map(str::trim);
        let identifier = parts
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| malformed_error!("Empty target framework moniker"))?;

        let mut version = None;
        let mut profile = None;
        for part in parts {
            let Some((key, value)) = part.split_once('=') else {
                return Err(malformed_error!("Invalid target framework component: {}", part));
            };
            match key.trim() {
                "Version" => {
                    let value = value.trim();
                    let value = value.strip_prefix('v').unwrap_or(value);
                    version = Some(AssemblyVersion::parse(value)?);
                }
                "Profile" => profile = Some(value.trim().to_string()),
                _ => {}
            }
        }

        Ok(Self {
            identifier: identifier.to_string(),
            version: version
                .ok_or_else(|| malformed_error!("Target framework without version: {}", moniker))?,
            profile: profile.filter(|p| !p.is_empty()),
        })
    }

    /// Returns `true` for .NET Core and .NET 5+ targets
    #[must_use]
    pub fn is_netcore(&self) -> bool {
        self.identifier == NETCORE_APP
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},Version=v{}.{}",
            self.identifier, self.version.major, self.version.minor
        )?;
        if let Some(profile) = &self.profile {
            write!(f, ",Profile={profile}")?;
        }
        Ok(())
    }
}
