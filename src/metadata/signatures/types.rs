use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a type definition, local to the module or in another assembly.
///
/// Nested types use `/` to separate the enclosing type from the nested name, e.g.
/// `Contoso.Outer/Inner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Fully qualified name of the referenced type definition
    pub full_name: String,
    /// Name of the defining assembly; `None` for types defined in the module itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TypeRef {
    /// A reference to a type defined in the module being processed
    pub fn local(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            scope: None,
        }
    }

    /// A reference to a type defined in another assembly
    pub fn external(full_name: impl Into<String>, assembly: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            scope: Some(assembly.into()),
        }
    }

    /// Iterate the enclosing type names from the outermost type down to the type itself.
    ///
    /// `A.Outer/Mid/Inner` yields `A.Outer`, `A.Outer/Mid`, `A.Outer/Mid/Inner`.
    pub fn enclosing_chain(&self) -> impl Iterator<Item = &str> + '_ {
        self.full_name
            .match_indices('/')
            .map(|(index, _)| &self.full_name[..index])
            .chain(std::iter::once(self.full_name.as_str()))
    }

    /// Set the scope if the reference has none
    pub fn qualify(&mut self, scope: &str) {
        if self.scope.is_none() {
            self.scope = Some(scope.to_string());
        }
    }

    /// Returns `true` if the reference points at a nested type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.full_name.contains('/')
    }
}

/// Identifies a generic parameter of a type (`!n`) or a method (`!!n`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericVar {
    /// Position in the declaring generic parameter list
    pub number: u32,
    /// Declared parameter name, rendered instead of the positional form when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Represents a type in a member signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSignature {
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// System.String
    String,
    /// System.Object
    Object,
    /// Type is referenced during runtime
    TypedByRef,
    /// CIL Class
    Class(TypeRef),
    /// CIL value-type
    ValueType(TypeRef),
    /// Generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Single dimension array
    SzArray(Box<TypeSignature>),
    /// Multi dimensional array
    Array(Box<TypeSignature>, u32),
    /// A pointer to a type
    Ptr(Box<TypeSignature>),
    /// Type by reference
    ByRef(Box<TypeSignature>),
    /// A pinned type
    Pinned(Box<TypeSignature>),
    /// Required modifier
    ModifiedRequired(TypeRef, Box<TypeSignature>),
    /// Optional modifier
    ModifiedOptional(TypeRef, Box<TypeSignature>),
    /// Generic type parameter
    GenericParamType(GenericVar),
    /// Generic method parameter
    GenericParamMethod(GenericVar),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
}

impl TypeSignature {
    /// Shorthand for a class reference to a local type
    pub fn class(full_name: impl Into<String>) -> Self {
        Self::Class(TypeRef::local(full_name))
    }

    /// Shorthand for a value-type reference to a local type
    pub fn value_type(full_name: impl Into<String>) -> Self {
        Self::ValueType(TypeRef::local(full_name))
    }

    /// Returns `true` for type and method generic parameters
    #[must_use]
    pub fn is_generic_parameter(&self) -> bool {
        matches!(
            self,
            Self::GenericParamType(_) | Self::GenericParamMethod(_)
        )
    }

    /// The type definition this signature is rooted in, after stripping arrays, pointers,
    /// by-refs, modifiers and generic instantiation.
    ///
    /// Returns `None` for primitives, generic parameters and function pointers.
    #[must_use]
    pub fn scope_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Class(reference) | Self::ValueType(reference) => Some(reference),
            Self::GenericInst(base, _)
            | Self::SzArray(base)
            | Self::Array(base, _)
            | Self::Ptr(base)
            | Self::ByRef(base)
            | Self::Pinned(base)
            | Self::ModifiedRequired(_, base)
            | Self::ModifiedOptional(_, base) => base.scope_type(),
            _ => None,
        }
    }

    /// Attach `scope` to every type reference that has none.
    ///
    /// Used when signatures taken from another assembly's documents are checked in the
    /// context of the module being processed: a scope-less reference there means "defined in
    /// that other assembly".
    pub fn qualify(&mut self, scope: &str) {
        match self {
            Self::Class(reference) | Self::ValueType(reference) => reference.qualify(scope),
            Self::ModifiedRequired(modifier, base) | Self::ModifiedOptional(modifier, base) => {
                modifier.qualify(scope);
                base.qualify(scope);
            }
            Self::GenericInst(base, args) => {
                base.qualify(scope);
                for arg in args {
                    arg.qualify(scope);
                }
            }
            Self::SzArray(base)
            | Self::Array(base, _)
            | Self::Ptr(base)
            | Self::ByRef(base)
            | Self::Pinned(base) => base.qualify(scope),
            Self::FnPtr(method) => {
                method.return_type.qualify(scope);
                for param in &mut method.params {
                    param.qualify(scope);
                }
            }
            _ => {}
        }
    }

    /// Fully qualified name, e.g. `System.Collections.Generic.List`1<System.Int32>[]`
    #[must_use]
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("System.Void"),
            Self::Boolean => f.write_str("System.Boolean"),
            Self::Char => f.write_str("System.Char"),
            Self::I1 => f.write_str("System.SByte"),
            Self::U1 => f.write_str("System.Byte"),
            Self::I2 => f.write_str("System.Int16"),
            Self::U2 => f.write_str("System.UInt16"),
            Self::I4 => f.write_str("System.Int32"),
            Self::U4 => f.write_str("System.UInt32"),
            Self::I8 => f.write_str("System.Int64"),
            Self::U8 => f.write_str("System.UInt64"),
            Self::R4 => f.write_str("System.Single"),
            Self::R8 => f.write_str("System.Double"),
            Self::I => f.write_str("System.IntPtr"),
            Self::U => f.write_str("System.UIntPtr"),
            Self::String => f.write_str("System.String"),
            Self::Object => f.write_str("System.Object"),
            Self::TypedByRef => f.write_str("System.TypedReference"),
            Self::Class(reference) | Self::ValueType(reference) => {
                f.write_str(&reference.full_name)
            }
            Self::GenericInst(base, args) => {
                write!(f, "{base}<")?;
                write_list(f, args)?;
                f.write_str(">")
            }
            Self::SzArray(base) => write!(f, "{base}[]"),
            Self::Array(base, rank) => {
                if *rank <= 1 {
                    write!(f, "{base}[*]")
                } else {
                    write!(f, "{base}[{}]", ",".repeat(*rank as usize - 1))
                }
            }
            Self::Ptr(base) => write!(f, "{base}*"),
            Self::ByRef(base) => write!(f, "{base}&"),
            Self::Pinned(base) => write!(f, "{base} pinned"),
            Self::ModifiedRequired(modifier, base) => {
                write!(f, "{base} modreq({})", modifier.full_name)
            }
            Self::ModifiedOptional(modifier, base) => {
                write!(f, "{base} modopt({})", modifier.full_name)
            }
            Self::GenericParamType(var) => match &var.name {
                Some(name) => f.write_str(name),
                None => write!(f, "!{}", var.number),
            },
            Self::GenericParamMethod(var) => match &var.name {
                Some(name) => f.write_str(name),
                None => write!(f, "!!{}", var.number),
            },
            Self::FnPtr(method) => {
                write!(f, "method {} *(", method.return_type)?;
                write_list(f, &method.params)?;
                f.write_str(")")
            }
        }
    }
}

/// Represents a method signature (II.23.2.1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureMethod {
    /// Used to encode the keyword instance in the calling convention, see §II.15.3
    #[serde(default)]
    pub has_this: bool,
    /// Number of generic parameters the method declares, `0` for non-generic methods
    #[serde(default, skip_serializing_if = "is_zero")]
    pub param_count_generic: u32,
    /// The return type of this `Method`
    pub return_type: TypeSignature,
    /// The parameters of this `Method`, without the hidden `this`
    #[serde(default)]
    pub params: Vec<TypeSignature>,
}

impl SignatureMethod {
    /// A static method signature
    #[must_use]
    pub fn new(return_type: TypeSignature, params: Vec<TypeSignature>) -> Self {
        Self {
            has_this: false,
            param_count_generic: 0,
            return_type,
            params,
        }
    }

    /// An instance method signature
    #[must_use]
    pub fn instance(return_type: TypeSignature, params: Vec<TypeSignature>) -> Self {
        Self {
            has_this: true,
            param_count_generic: 0,
            return_type,
            params,
        }
    }

    /// The same signature declaring `count` method generic parameters
    #[must_use]
    pub fn with_generic_params(mut self, count: u32) -> Self {
        self.param_count_generic = count;
        self
    }

    /// Return type followed by every parameter type
    pub fn types(&self) -> impl Iterator<Item = &TypeSignature> + '_ {
        std::iter::once(&self.return_type).chain(self.params.iter())
    }
}

/// Property signature (II.23.2.5)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureProperty {
    /// Indicates the passing of a 'this' pointer
    #[serde(default)]
    pub has_this: bool,
    /// The type of this property
    pub base: TypeSignature,
    /// Indexer parameters
    #[serde(default)]
    pub params: Vec<TypeSignature>,
}

/// A generic parameter declared by a type or method, with its constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericParam {
    /// Position in the declaring parameter list
    pub number: u32,
    /// Declared name
    pub name: String,
    /// Constraint types (`where T : IFoo`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<TypeSignature>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeSignature]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
