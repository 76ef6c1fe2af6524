//! # dotprune Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotprune library. Import this module to get quick access to the essential
//! types for pruning assemblies.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotprune operations
pub use crate::Error;

/// The result type used throughout dotprune
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Run orchestration over the assemblies of a policy
pub use crate::project::{AssemblyOutcome, RunOptions, RunReport, Runner};

/// The pruning driver and its statistics
pub use crate::pruning::{AssemblyPruner, PruneStats};

// ================================================================================================
// Policy
// ================================================================================================

/// The policy tree
pub use crate::config::{
    AssemblyConfig, Configuration, EventConfig, Mode, PropertyConfig, RenameAssembly, TypeConfig,
};

// ================================================================================================
// Metadata Model
// ================================================================================================

/// Assemblies, modules and types
pub use crate::metadata::{
    module::{AssemblyDef, ModuleDef},
    typesystem::TypeDef,
};

/// Members of a type
pub use crate::metadata::{
    members::{EventDef, FieldDef, InterfaceImpl, PropertyDef},
    method::{MethodBody, MethodDef},
};

/// Signatures and type references
pub use crate::metadata::signatures::{SignatureMethod, TypeRef, TypeSignature};

/// Flags
pub use crate::metadata::flags::{
    MemberAccess, MethodModifiers, TypeModifiers, TypeVisibility, VisibilityTier,
};

/// Custom attributes
pub use crate::metadata::customattributes::{CustomAttribute, HasCustomAttributes, MarkerKind};

/// Versions and frameworks
pub use crate::metadata::identity::{AssemblyVersion, TargetFramework};

// ================================================================================================
// Model Provider and Type Resolution
// ================================================================================================

/// Loading and writing model documents
pub use crate::metadata::loader::{JsonModelProvider, ModelProvider};

/// Type resolution
pub use crate::metadata::typesystem::{AssemblyResolver, TypeIndex, TypeResolver};
