//! Runtime shared framework discovery.
//!
//! Assemblies targeting `.NETCoreApp` reference the shared frameworks installed under
//! `<dotnet root>/shared/<family>/<version>`. For every family the highest installed version
//! in the requested feature band (same major and minor, not lower) becomes an extra search
//! root for type resolution.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    metadata::identity::{AssemblyVersion, TargetFramework},
    Error, Result,
};

/// Directory below the dotnet root holding the shared frameworks
pub const SHARED_DIR: &str = "shared";

/// The base shared framework every `.NETCoreApp` target needs
pub const NETCORE_FAMILY: &str = "Microsoft.NETCore.App";

/// Shared framework families searched, in search-root order
pub const FRAMEWORK_FAMILIES: [&str; 3] = [
    NETCORE_FAMILY,
    "Microsoft.AspNetCore.App",
    "Microsoft.WindowsDesktop.App",
];

/// Environment variable overriding the dotnet root
pub const DOTNET_ROOT_VAR: &str = "DOTNET_ROOT";

#[cfg(windows)]
const DEFAULT_DOTNET_ROOT: &str = "C:\\Program Files\\dotnet";
#[cfg(not(windows))]
const DEFAULT_DOTNET_ROOT: &str = "/usr/share/dotnet";

/// Finds installed shared frameworks below a dotnet root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkLocator {
    dotnet_root: PathBuf,
}

impl FrameworkLocator {
    /// Create a locator for the installation at `dotnet_root`
    pub fn new(dotnet_root: impl Into<PathBuf>) -> Self {
        FrameworkLocator {
            dotnet_root: dotnet_root.into(),
        }
    }

    /// Create a locator for `DOTNET_ROOT`, or the platform default location
    #[must_use]
    pub fn from_env() -> Self {
        match env::var_os(DOTNET_ROOT_VAR) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::new(DEFAULT_DOTNET_ROOT),
        }
    }

    /// The dotnet root searched
    #[must_use]
    pub fn dotnet_root(&self) -> &Path {
        &self.dotnet_root
    }

    /// Framework directories to add to the search roots for `framework`.
    ///
    /// Targets other than `.NETCoreApp` need no shared framework and yield nothing. The
    /// optional ASP.NET Core and Windows Desktop families are skipped when not installed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameworkNotFound`] if [`NETCORE_FAMILY`] is not installed, or if an
    /// installed family has no version satisfying the requested one, and
    /// [`Error::FileError`] if a family directory cannot be read.
    pub fn locate(&self, framework: &TargetFramework) -> Result<Vec<PathBuf>> {
        if !framework.is_netcore() {
            return Ok(Vec::new());
        }

        let shared = self.dotnet_root.join(SHARED_DIR);
        let mut roots = Vec::new();
        for family in FRAMEWORK_FAMILIES {
            let family_dir = shared.join(family);
            if !family_dir.is_dir() {
                if family == NETCORE_FAMILY {
                    return Err(Error::FrameworkNotFound {
                        framework: family.to_string(),
                        version: framework.version.to_string(),
                    });
                }
                warn!(
                    "Shared framework {} is not installed under {}",
                    family,
                    shared.display()
                );
                continue;
            }

            match best_match(&family_dir, &framework.version)? {
                Some(dir) => {
                    debug!("Using shared framework {}", dir.display());
                    roots.push(dir);
                }
                None => {
                    return Err(Error::FrameworkNotFound {
                        framework: family.to_string(),
                        version: framework.version.to_string(),
                    })
                }
            }
        }
        Ok(roots)
    }
}

impl Default for FrameworkLocator {
    fn default() -> Self {
        Self::from_env()
    }
}

/// The highest version directory in `family_dir` that satisfies `requested`.
///
/// Entries whose names do not parse as a version (e.g. previews like `9.0.0-rc.1`) are
/// skipped.
///
/// # Errors
/// Returns [`Error::FileError`] if the directory cannot be read.
pub fn best_match(family_dir: &Path, requested: &AssemblyVersion) -> Result<Option<PathBuf>> {
    let mut best: Option<(AssemblyVersion, PathBuf)> = None;
    for entry in fs::read_dir(family_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(version) = name
            .to_str()
            .and_then(|name| AssemblyVersion::parse(name).ok())
        else {
            continue;
        };
        if !version.satisfies_feature_band(requested) {
            continue;
        }
        if best.as_ref().map_or(true, |(current, _)| version > *current) {
            best = Some((version, entry.path()));
        }
    }
    Ok(best.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install(root: &Path, family: &str, versions: &[&str]) {
        for version in versions {
            fs::create_dir_all(root.join(SHARED_DIR).join(family).join(version)).unwrap();
        }
    }

    fn netcore(version: &str) -> TargetFramework {
        TargetFramework::parse(&format!(".NETCoreApp,Version=v{version}")).unwrap()
    }

    #[test]
    fn test_best_match_picks_highest_in_band() {
        let dir = tempfile::tempdir().unwrap();
        install(
            dir.path(),
            FRAMEWORK_FAMILIES[0],
            &["7.0.20", "8.0.1", "8.0.11", "8.1.0", "9.0.0-rc.1", "8.0.2"],
        );
        let family = dir.path().join(SHARED_DIR).join(FRAMEWORK_FAMILIES[0]);

        let found = best_match(&family, &AssemblyVersion::new(8, 0, 0, 0)).unwrap();
        assert_eq!(found, Some(family.join("8.0.11")));
        assert_eq!(
            best_match(&family, &AssemblyVersion::new(8, 0, 12, 0)).unwrap(),
            None
        );
    }

    #[test]
    fn test_locate_skips_missing_optional_families() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), FRAMEWORK_FAMILIES[0], &["8.0.4"]);
        install(dir.path(), FRAMEWORK_FAMILIES[1], &["8.0.4", "8.0.6"]);

        let roots = FrameworkLocator::new(dir.path())
            .locate(&netcore("8.0"))
            .unwrap();
        let shared = dir.path().join(SHARED_DIR);
        assert_eq!(
            roots,
            vec![
                shared.join(FRAMEWORK_FAMILIES[0]).join("8.0.4"),
                shared.join(FRAMEWORK_FAMILIES[1]).join("8.0.6"),
            ]
        );
    }

    #[test]
    fn test_locate_requires_netcore_family() {
        let dir = tempfile::tempdir().unwrap();
        let result = FrameworkLocator::new(dir.path()).locate(&netcore("8.0"));
        assert!(matches!(
            result,
            Err(Error::FrameworkNotFound { ref framework, ref version })
                if framework == NETCORE_FAMILY && version == "8.0.0.0"
        ));

        // an optional family alone does not stand in for the base framework
        install(dir.path(), FRAMEWORK_FAMILIES[1], &["8.0.4"]);
        let result = FrameworkLocator::new(dir.path()).locate(&netcore("8.0"));
        assert!(matches!(result, Err(Error::FrameworkNotFound { .. })));
    }

    #[test]
    fn test_locate_fails_without_matching_version() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), FRAMEWORK_FAMILIES[0], &["6.0.30"]);

        let result = FrameworkLocator::new(dir.path()).locate(&netcore("8.0"));
        assert!(matches!(
            result,
            Err(Error::FrameworkNotFound { ref framework, .. }) if framework == FRAMEWORK_FAMILIES[0]
        ));
    }

    #[test]
    fn test_other_frameworks_need_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let framework = TargetFramework::parse(".NETStandard,Version=v2.0").unwrap();
        assert!(FrameworkLocator::new(dir.path())
            .locate(&framework)
            .unwrap()
            .is_empty());
    }
}
