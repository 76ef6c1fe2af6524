//! In-memory metadata model of .NET assemblies.
//!
//! This module holds the mutable object graph the pruning engine works on: assemblies,
//! modules, types, members, signatures, custom attributes and method bodies. Graphs are
//! produced and persisted by a [`loader::ModelProvider`]; references to other assemblies
//! are resolved through [`typesystem::TypeResolver`].
//!
//! # Key Components
//!
//! - [`module`] - Assemblies and modules
//! - [`typesystem`] - Type definitions and type resolution
//! - [`method`] - Methods, override records and method bodies
//! - [`members`] - Fields, properties, events and interface implementations
//! - [`signatures`] - Member signatures and their textual full names
//! - [`customattributes`] - Custom attributes and typed marker queries
//! - [`flags`] - Visibility tiers and modifier flags
//! - [`identity`] - Version numbers and target frameworks
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotprune::metadata::loader::{JsonModelProvider, ModelProvider};
//!
//! let assembly = JsonModelProvider::new().load("refs/Contoso.dll.json".as_ref())?;
//! for module in &assembly.modules {
//!     println!("{}: {} types", module.name, module.types.len());
//! }
//! # Ok::<(), dotprune::Error>(())
//! ```

/// Implementation of custom attributes and marker queries
pub mod customattributes;
/// Visibility and modifier flags of types and members
pub mod flags;
/// Assembly versions and target framework monikers
pub mod identity;
/// The Metadata Model Provider seam and the JSON document provider
pub mod loader;
/// Fields, properties, events and interface implementations
pub mod members;
/// Implementation of methods and method bodies
pub mod method;
/// Assemblies and modules
pub mod module;
/// Implementation of method and type signatures
pub mod signatures;
/// Implementation of the .NET type model and type resolution
pub mod typesystem;
