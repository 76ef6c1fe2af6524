//! Accessibility tiers and modifier flags for types and members.
//!
//! Types and members carry their ECMA-335 accessibility as typed enums instead of raw
//! attribute words. The `from_flags` constructors accept the raw `TypeAttributes` /
//! `MethodAttributes` / `FieldAttributes` values so a binary-backed model provider can map
//! table rows directly.
//!
//! # Key Types
//! - [`TypeVisibility`]: top-level and nested type visibility (§II.23.1.15)
//! - [`MemberAccess`]: method and field accessibility (§II.23.1.10, §II.23.1.5)
//! - [`VisibilityTier`]: the ordered tier both collapse into
//! - [`TypeModifiers`], [`MethodModifiers`], [`FieldModifiers`]: the remaining attribute bits

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Bitmask for `VISIBILITY` extraction from `TypeAttributes`
pub const TYPE_VISIBILITY_MASK: u32 = 0x0000_0007;
/// Bitmask for `ACCESS` extraction from `MethodAttributes` / `FieldAttributes`
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;

/// Visibility of a type definition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TypeVisibility {
    /// Top-level type not visible outside its assembly
    #[default]
    NotPublic,
    /// Top-level public type
    Public,
    /// Nested type with public visibility
    NestedPublic,
    /// Nested type with private visibility
    NestedPrivate,
    /// Nested type visible to the enclosing type and its sub-types
    NestedFamily,
    /// Nested type visible within the assembly
    NestedAssembly,
    /// Nested type visible to sub-types within the assembly
    NestedFamAndAssem,
    /// Nested type visible to sub-types or within the assembly
    NestedFamOrAssem,
}

impl TypeVisibility {
    /// Extract the visibility from raw `TypeAttributes`
    #[must_use]
    pub fn from_flags(flags: u32) -> Self {
        match flags & TYPE_VISIBILITY_MASK {
            0 => Self::NotPublic,
            1 => Self::Public,
            2 => Self::NestedPublic,
            3 => Self::NestedPrivate,
            4 => Self::NestedFamily,
            5 => Self::NestedAssembly,
            6 => Self::NestedFamAndAssem,
            _ => Self::NestedFamOrAssem,
        }
    }

    /// Returns `true` for the nested visibility variants
    #[must_use]
    pub fn is_nested(self) -> bool {
        !matches!(self, Self::NotPublic | Self::Public)
    }

    /// Collapse into the ordered [`VisibilityTier`]
    #[must_use]
    pub fn tier(self) -> VisibilityTier {
        match self {
            Self::NestedPrivate => VisibilityTier::Private,
            Self::NotPublic | Self::NestedAssembly | Self::NestedFamAndAssem => {
                VisibilityTier::Assembly
            }
            Self::NestedFamily => VisibilityTier::Family,
            Self::NestedFamOrAssem => VisibilityTier::FamilyOrAssembly,
            Self::Public | Self::NestedPublic => VisibilityTier::Public,
        }
    }
}

/// Accessibility of a method or field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MemberAccess {
    /// Member not referenceable
    CompilerControlled,
    /// Accessible only by the parent type
    #[default]
    Private,
    /// Accessible by sub-types only in this assembly
    FamAndAssem,
    /// Accessible by anyone in the assembly
    Assembly,
    /// Accessible only by type and sub-types
    Family,
    /// Accessible by sub-types anywhere, plus anyone in the assembly
    FamOrAssem,
    /// Accessible by anyone who has visibility to this scope
    Public,
}

impl MemberAccess {
    /// Extract the access from raw method or field attributes
    #[must_use]
    pub fn from_flags(flags: u32) -> Self {
        match flags & MEMBER_ACCESS_MASK {
            0 => Self::CompilerControlled,
            1 => Self::Private,
            2 => Self::FamAndAssem,
            3 => Self::Assembly,
            4 => Self::Family,
            5 => Self::FamOrAssem,
            _ => Self::Public,
        }
    }

    /// Collapse into the ordered [`VisibilityTier`]
    #[must_use]
    pub fn tier(self) -> VisibilityTier {
        match self {
            Self::CompilerControlled | Self::Private => VisibilityTier::Private,
            Self::FamAndAssem | Self::Assembly => VisibilityTier::Assembly,
            Self::Family => VisibilityTier::Family,
            Self::FamOrAssem => VisibilityTier::FamilyOrAssembly,
            Self::Public => VisibilityTier::Public,
        }
    }
}

/// Accessibility tiers, ordered from least to most visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
pub enum VisibilityTier {
    /// Visible to the declaring scope only
    Private,
    /// Visible inside the declaring assembly
    Assembly,
    /// Visible to derived types (`protected`)
    Family,
    /// Visible to derived types and the assembly (`protected internal`)
    FamilyOrAssembly,
    /// Visible everywhere
    Public,
}

bitflags! {
    /// Type semantics and inheritance modifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeModifiers: u32 {
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type cannot be derived from
        const SEALED = 0x0000_0100;
        /// Type name is special
        const SPECIAL_NAME = 0x0000_0400;
        /// Type is serializable
        const SERIALIZABLE = 0x0000_2000;
        /// Type initializer may run before first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
    }
}

impl TypeModifiers {
    /// Extract modifiers from raw `TypeAttributes`
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !TYPE_VISIBILITY_MASK)
    }
}

bitflags! {
    /// Method modifiers and properties
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK)
    }
}

bitflags! {
    /// Field modifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FieldModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized
        const INIT_ONLY = 0x0020;
        /// Value is a compile time constant
        const LITERAL = 0x0040;
        /// Field name is special
        const SPECIAL_NAME = 0x0200;
    }
}

impl FieldModifiers {
    /// Extract field modifiers from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK)
    }
}
