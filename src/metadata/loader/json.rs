use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    metadata::{loader::ModelProvider, module::AssemblyDef},
    Result,
};

/// A [`ModelProvider`] for JSON model documents.
///
/// A document is an [`AssemblyDef`] serialized with `serde_json`. Writing produces one
/// document per module; the manifest module's document carries the assembly-level
/// attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelProvider {
    pretty: bool,
}

impl JsonModelProvider {
    /// Create a provider writing compact documents
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write indented documents
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Parse a model document from memory.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] for invalid JSON and [`crate::Error::Malformed`] for a
    /// document without name or modules.
    pub fn from_slice(data: &[u8]) -> Result<AssemblyDef> {
        let mut assembly: AssemblyDef = serde_json::from_slice(data)?;
        if assembly.name.trim().is_empty() {
            return Err(malformed_error!("Assembly document without a name"));
        }
        if assembly.modules.is_empty() {
            return Err(malformed_error!(
                "Assembly document '{}' has no modules",
                assembly.name
            ));
        }
        assembly.link();
        Ok(assembly)
    }

    /// Serialize `assembly` to a document
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_vec(&self, assembly: &AssemblyDef) -> Result<Vec<u8>> {
        Ok(if self.pretty {
            serde_json::to_vec_pretty(assembly)?
        } else {
            serde_json::to_vec(assembly)?
        })
    }
}

impl ModelProvider for JsonModelProvider {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn load(&self, path: &Path) -> Result<AssemblyDef> {
        debug!("Loading model document {}", path.display());
        Self::from_slice(&fs::read(path)?)
    }

    fn write(&self, assembly: &AssemblyDef, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(assembly.modules.len());
        for (index, module) in assembly.modules.iter().enumerate() {
            let document = AssemblyDef {
                name: assembly.name.clone(),
                version: assembly.version,
                custom_attributes: if index == 0 {
                    assembly.custom_attributes.clone()
                } else {
                    Vec::new()
                },
                modules: vec![module.clone()],
            };
            let path = dir.join(self.document_name(&module.name));
            fs::write(&path, self.to_vec(&document)?)?;
            written.push(path);
        }
        Ok(written)
    }
}
