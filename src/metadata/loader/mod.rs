//! Metadata Model Provider
//!
//! The pruning engine never reads or writes the binary module format itself. A
//! [`ModelProvider`] turns an on-disk module into the in-memory [`AssemblyDef`] graph and
//! writes the mutated graph back, one output file per module.
//!
//! # Modules
//! - `json`: [`JsonModelProvider`], a provider for serde-serialized model documents.
//!
//! # Usage
//! Implement [`ModelProvider`] for a file format, then hand it to
//! [`crate::project::Runner`] and [`crate::metadata::typesystem::AssemblyResolver`].

mod json;

pub use json::JsonModelProvider;

use std::path::{Path, PathBuf};

use crate::{metadata::module::AssemblyDef, Result};

/// Reads and writes assembly model graphs.
///
/// Implementations must be shareable across threads: assemblies may be processed in parallel.
pub trait ModelProvider: Send + Sync {
    /// File extension appended to a module file name to form the document name.
    ///
    /// # Returns
    /// * `&'static str` - The extension without a leading dot, e.g. `json`.
    fn extension(&self) -> &'static str;

    /// Load an assembly and link its type graph.
    ///
    /// # Arguments
    /// * `path` - Path of the document to load.
    ///
    /// # Returns
    /// * `Result<AssemblyDef>` - The loaded assembly, or an error if the file cannot be
    ///   read or does not describe a valid assembly.
    fn load(&self, path: &Path) -> Result<AssemblyDef>;

    /// Write every module of `assembly` into `dir`, one file per module, named after the
    /// module's own name.
    ///
    /// # Arguments
    /// * `assembly` - The (pruned) assembly to write.
    /// * `dir` - Output directory; it must exist.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - The paths written, in module order.
    fn write(&self, assembly: &AssemblyDef, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Name of the document holding the module file `module_file`, e.g. `Foo.dll.json`.
    fn document_name(&self, module_file: &str) -> String {
        format!("{module_file}.{}", self.extension())
    }
}
