//! Pruning policy documents.
//!
//! The policy is a JSON document with PascalCase keys. Each assembly entry carries a
//! [`Mode`] and a list of top-level types, plus per-type [`TypeConfig`] trees that reach
//! down into members and nested types:
//!
//! ```json
//! {
//!   "Assemblies": {
//!     "Contoso.Core": {
//!       "MakeReferenceAssembly": true,
//!       "Mode": "Remove",
//!       "Types": ["Contoso.Core.Legacy"],
//!       "TypeConfiguration": {
//!         "Contoso.Core.Widget": {
//!           "Mode": "Remove",
//!           "Methods": ["System.Void Reset()"],
//!           "InnerTypes": ["Cache"]
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Loading rejects unknown keys, unknown [`Mode`] values and invalid renames before any
//! assembly is touched. `RemoveObsolete` inherits downwards: an unset value takes the
//! nearest ancestor's effective value, `true` at the root. `Mode` does not inherit.
//!
//! # Examples
//!
//! ```rust
//! use dotprune::config::{Configuration, Mode};
//!
//! let config = Configuration::from_str(r#"{"Assemblies":{"A":{"Mode":"Keep"}}}"#)?;
//! assert_eq!(config.assemblies["A"].mode(), Mode::Keep);
//! assert!(Configuration::from_str(r#"{"Assemblies":{"A":{"Mode":"Drop"}}}"#).is_err());
//! # Ok::<(), dotprune::Error>(())
//! ```

mod types;

pub use types::*;

use std::{fs, path::Path};

use crate::{pruning::member_full_name, Result};

impl Configuration {
    /// Load and validate a policy document from disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read and
    /// [`crate::Error::Configuration`] if the document is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_slice(&data)
    }

    /// Parse and validate a policy document.
    ///
    /// # Errors
    /// Returns [`crate::Error::Configuration`] if the document is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(data: &str) -> Result<Self> {
        Self::from_slice(data.as_bytes())
    }

    /// Parse and validate a policy document from raw bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Configuration`] if the document is invalid.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let config: Configuration = serde_json::from_slice(data)
            .map_err(|error| config_error!("Invalid configuration: {}", error))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings serde cannot express.
    ///
    /// # Errors
    /// Returns [`crate::Error::Configuration`] for a rename with neither name nor version, or with
    /// an unparsable version.
    pub fn validate(&self) -> Result<()> {
        for (key, assembly) in &self.assemblies {
            if key.trim().is_empty() {
                return Err(config_error!("Empty assembly key"));
            }
            if let Some(rename) = &assembly.rename {
                let version = rename.version().map_err(|error| {
                    config_error!("Assembly '{}': invalid NewVersion - {}", key, error)
                })?;
                if rename.name().is_none() && version.is_none() {
                    return Err(config_error!(
                        "Assembly '{}': Rename needs NewName or NewVersion",
                        key
                    ));
                }
            }
        }
        Ok(())
    }

    /// Check the shape of every member list entry and accessor-toggle key.
    ///
    /// Processing performs the same check per assembly; this runs it up front.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for the first entry that cannot be split into a type
    /// and a member name.
    pub fn check_entries(&self) -> Result<()> {
        for assembly in self.assemblies.values() {
            assembly.check_entries()?;
        }
        Ok(())
    }
}

impl AssemblyConfig {
    /// Check the member entries of one assembly, see [`Configuration::check_entries`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for the first malformed entry.
    pub fn check_entries(&self) -> Result<()> {
        for (type_name, config) in &self.type_configuration {
            check_type_entries(type_name, config)?;
        }
        Ok(())
    }
}

fn check_type_entries(type_name: &str, config: &TypeConfig) -> Result<()> {
    let entries = config
        .methods
        .iter()
        .chain(&config.fields)
        .chain(&config.properties)
        .chain(&config.events)
        .chain(&config.interface_methods_to_keep)
        .chain(config.property_configuration.keys())
        .chain(config.event_configuration.keys());
    for entry in entries {
        member_full_name(type_name, entry)?;
    }
    for (nested, nested_config) in &config.inner_type_configuration {
        check_type_entries(&format!("{type_name}/{nested}"), nested_config)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_full_document() {
        let config = Configuration::from_str(
            r#"{
                "Assemblies": {
                    "Contoso.Core": {
                        "Mode": "Remove",
                        "RemoveObsolete": false,
                        "MakeReferenceAssembly": true,
                        "Rename": { "NewName": "Contoso.Ref", "NewVersion": "2.0" },
                        "Types": ["Contoso.Core.Legacy"],
                        "TypeConfiguration": {
                            "Contoso.Core.Widget": {
                                "Mode": "Keep",
                                "Methods": ["System.Void Reset()"],
                                "InterfaceMethodsToKeep": ["System.Void Dispose()"],
                                "PropertyConfiguration": {
                                    "System.Int32 Count()": { "Setter": false }
                                },
                                "InnerTypeConfiguration": {
                                    "Cache": { "RemoveObsolete": true }
                                }
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let assembly = &config.assemblies["Contoso.Core"];
        assert_eq!(assembly.mode(), Mode::Remove);
        assert!(!assembly.effective_remove_obsolete());
        assert!(assembly.make_reference_assembly);
        let rename = assembly.rename.as_ref().unwrap();
        assert_eq!(rename.name(), Some("Contoso.Ref"));
        assert_eq!(rename.version().unwrap().unwrap().to_string(), "2.0.0.0");

        let widget = &assembly.type_configuration["Contoso.Core.Widget"];
        assert_eq!(widget.mode(), Mode::Keep);
        assert_eq!(
            widget.property_configuration["System.Int32 Count()"].setter,
            Some(false)
        );
        let cache = &widget.inner_type_configuration["Cache"];
        assert!(cache.effective_remove_obsolete(false));
        assert!(!widget.effective_remove_obsolete(false));
        assert!(config.check_entries().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::from_str(r#"{"Assemblies":{"A":{}}}"#).unwrap();
        let assembly = &config.assemblies["A"];
        assert_eq!(assembly.mode(), Mode::None);
        assert!(assembly.effective_remove_obsolete());
        assert!(!assembly.make_reference_assembly);
    }

    #[test]
    fn test_invalid_mode_is_configuration_error() {
        let result = Configuration::from_str(
            r#"{"Assemblies":{"A":{"TypeConfiguration":{"A.B":{"Mode":"Strip"}}}}}"#,
        );
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_unknown_key_is_configuration_error() {
        let result = Configuration::from_str(r#"{"Assemblies":{"A":{"Typos":[]}}}"#);
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_invalid_rename() {
        let blank = Configuration::from_str(
            r#"{"Assemblies":{"A":{"Rename":{"NewName":" ","NewVersion":""}}}}"#,
        );
        assert!(matches!(blank, Err(Error::Configuration { .. })));

        let bad_version =
            Configuration::from_str(r#"{"Assemblies":{"A":{"Rename":{"NewVersion":"1.x"}}}}"#);
        assert!(matches!(bad_version, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_check_entries_reports_malformed_member() {
        let config = Configuration::from_str(
            r#"{"Assemblies":{"A":{"TypeConfiguration":{"A.B":{
                "InnerTypeConfiguration":{"C":{"Fields":["NoSpace"]}}}}}}}"#,
        )
        .unwrap();
        assert!(matches!(
            config.check_entries(),
            Err(Error::Malformed { .. })
        ));
    }
}
