//! Assemblies and their modules.

use serde::{Deserialize, Serialize};

use crate::{
    metadata::{
        customattributes::{CustomAttribute, HasCustomAttributes, MarkerKind},
        identity::{AssemblyVersion, TargetFramework},
        typesystem::TypeDef,
    },
    Result,
};

/// A module: one file of an assembly and the types it defines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDef {
    /// File name of the module, e.g. `Contoso.Core.dll`
    pub name: String,
    /// Top-level types, in declaration order
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl ModuleDef {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        ModuleDef {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Establish the enclosing type links of every nested type
    pub fn link(&mut self) {
        for ty in &mut self.types {
            ty.link(None);
        }
    }

    /// Every type of the module in pre-order, nested types after their enclosing type
    #[must_use]
    pub fn all_types(&self) -> Vec<&TypeDef> {
        fn walk<'a>(ty: &'a TypeDef, out: &mut Vec<&'a TypeDef>) {
            out.push(ty);
            for nested in &ty.nested_types {
                walk(nested, out);
            }
        }

        let mut out = Vec::new();
        for ty in &self.types {
            walk(ty, &mut out);
        }
        out
    }

    /// Look up a type by full name, nested types included
    #[must_use]
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDef> {
        self.all_types()
            .into_iter()
            .find(|ty| ty.full_name() == full_name)
    }
}

/// An assembly: identity, assembly-level attributes and modules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyDef {
    /// Simple assembly name
    pub name: String,
    /// Assembly version
    #[serde(default)]
    pub version: AssemblyVersion,
    /// Assembly-level custom attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
    /// Modules; the first one is the manifest module
    #[serde(default)]
    pub modules: Vec<ModuleDef>,
}

impl AssemblyDef {
    /// Create an assembly without modules
    pub fn new(name: impl Into<String>, version: AssemblyVersion) -> Self {
        AssemblyDef {
            name: name.into(),
            version,
            custom_attributes: Vec::new(),
            modules: Vec::new(),
        }
    }

    /// Establish the enclosing type links of every module
    pub fn link(&mut self) {
        for module in &mut self.modules {
            module.link();
        }
    }

    /// The module carrying the assembly manifest
    #[must_use]
    pub fn manifest_module(&self) -> Option<&ModuleDef> {
        self.modules.first()
    }

    /// Mutable access to the manifest module
    pub fn manifest_module_mut(&mut self) -> Option<&mut ModuleDef> {
        self.modules.first_mut()
    }

    /// The framework the assembly was compiled against, from `TargetFrameworkAttribute`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the attribute is present but its moniker is
    /// invalid.
    pub fn target_framework(&self) -> Result<Option<TargetFramework>> {
        match self
            .marker(MarkerKind::TargetFramework)
            .and_then(|marker| marker.message)
        {
            Some(moniker) => TargetFramework::parse(&moniker).map(Some),
            None => Ok(None),
        }
    }
}

impl HasCustomAttributes for AssemblyDef {
    fn custom_attributes(&self) -> &[CustomAttribute] {
        &self.custom_attributes
    }
}
