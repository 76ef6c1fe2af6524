use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{metadata::identity::AssemblyVersion, Result};

/// `RemoveObsolete` value used when no level of the policy sets it
pub const DEFAULT_REMOVE_OBSOLETE: bool = true;

/// How an explicit name list is applied at one policy level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum Mode {
    /// No list-based pruning at this level
    #[default]
    None,
    /// Remove everything not listed
    Keep,
    /// Remove everything listed
    Remove,
}

/// The policy document: per-assembly configuration keyed by assembly lookup key
/// (the input file name without `.dll`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Configuration {
    /// Assemblies to process, in key order
    #[serde(default)]
    pub assemblies: BTreeMap<String, AssemblyConfig>,
}

/// Policy for one assembly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AssemblyConfig {
    /// How `Types` is applied to the top-level types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Remove obsolete symbols; inherited by every type configuration below
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_obsolete: Option<bool>,
    /// Produce a reference assembly: drop non-API members and stub every body
    #[serde(default)]
    pub make_reference_assembly: bool,
    /// Optional identity change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<RenameAssembly>,
    /// Full names of top-level types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Per-type policies keyed by full type name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_configuration: BTreeMap<String, TypeConfig>,
}

impl AssemblyConfig {
    /// Effective `RemoveObsolete` at assembly level
    #[must_use]
    pub fn effective_remove_obsolete(&self) -> bool {
        self.remove_obsolete.unwrap_or(DEFAULT_REMOVE_OBSOLETE)
    }

    /// The mode, `None` when absent
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }
}

/// Policy for one type and, through `InnerTypeConfiguration`, its nested types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TypeConfig {
    /// How the member and nested type lists of this level are applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Overrides the inherited `RemoveObsolete`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_obsolete: Option<bool>,
    /// Methods, as `ReturnType Name(ParamTypes)`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    /// Fields, as `FieldType Name`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    /// Properties, as `PropertyType Name(IndexParams)`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    /// Events, as `EventType Name`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    /// Implemented interfaces, by full name including generic arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Implementing methods protected from interface removal cascades
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interface_methods_to_keep: Vec<String>,
    /// Nested types, by simple name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_types: Vec<String>,
    /// Accessor toggles keyed by property
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub property_configuration: BTreeMap<String, PropertyConfig>,
    /// Accessor toggles keyed by event
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub event_configuration: BTreeMap<String, EventConfig>,
    /// Policies of nested types keyed by simple name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inner_type_configuration: BTreeMap<String, TypeConfig>,
}

impl TypeConfig {
    /// `RemoveObsolete` of this level, falling back to the inherited value
    #[must_use]
    pub fn effective_remove_obsolete(&self, inherited: bool) -> bool {
        self.remove_obsolete.unwrap_or(inherited)
    }

    /// The mode, `None` when absent
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }
}

/// Accessor toggles of a property; `Some(false)` drops the accessors of that kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PropertyConfig {
    /// Keep the getters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter: Option<bool>,
    /// Keep the setters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<bool>,
    /// Keep the other associated methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<bool>,
}

/// Accessor toggles of an event; `Some(false)` drops the accessors of that kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct EventConfig {
    /// Keep the `add` accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<bool>,
    /// Keep the `remove` accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<bool>,
    /// Keep the other associated methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<bool>,
}

/// Identity change applied to an assembly before pruning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RenameAssembly {
    /// New simple name of the assembly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// New version, dotted with 1-4 numeric components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_version: Option<String>,
}

impl RenameAssembly {
    /// The new name, if set and not blank
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.new_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// The new version, if set and not blank
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the version does not parse.
    pub fn version(&self) -> Result<Option<AssemblyVersion>> {
        match self
            .new_version
            .as_deref()
            .map(str::trim)
            .filter(|version| !version.is_empty())
        {
            Some(version) => AssemblyVersion::parse(version).map(Some),
            None => Ok(None),
        }
    }
}
