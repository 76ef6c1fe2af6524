use serde::{Deserialize, Serialize};
use strum::Display;

use crate::metadata::signatures::TypeRef;

/// A fixed constructor argument of a custom attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomAttributeArgument {
    /// A null string, type or array
    Null,
    /// Boolean value
    Bool(bool),
    /// Any integral value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// `typeof(...)` argument, rendered as a type name
    Type(String),
}

impl CustomAttributeArgument {
    /// The argument as a string, if it is one
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

/// A custom attribute applied to a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    /// The attribute class
    pub attribute_type: TypeRef,
    /// Fixed constructor arguments in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<CustomAttributeArgument>,
}

impl CustomAttribute {
    /// Creates an attribute instance
    #[must_use]
    pub fn new(attribute_type: TypeRef, arguments: Vec<CustomAttributeArgument>) -> Self {
        Self {
            attribute_type,
            arguments,
        }
    }

    /// `[Obsolete]` / `[Obsolete("message")]`
    #[must_use]
    pub fn obsolete(message: Option<&str>) -> Self {
        Self::new(
            TypeRef::external(MarkerKind::Obsolete.attribute_name(), "System.Runtime"),
            message
                .map(|m| vec![CustomAttributeArgument::String(m.to_string())])
                .unwrap_or_default(),
        )
    }
}

/// Attribute markers the pruning engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MarkerKind {
    /// `System.ObsoleteAttribute`
    Obsolete,
    /// `System.Runtime.Versioning.TargetFrameworkAttribute`
    TargetFramework,
}

impl MarkerKind {
    /// Fully qualified name of the attribute class backing this marker
    #[must_use]
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Obsolete => "System.ObsoleteAttribute",
            Self::TargetFramework => "System.Runtime.Versioning.TargetFrameworkAttribute",
        }
    }
}

/// A marker found on a symbol, with its leading string argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Which marker this is
    pub kind: MarkerKind,
    /// First constructor argument, when it is a string
    pub message: Option<String>,
}

/// Typed access to the custom attributes of a symbol.
pub trait HasCustomAttributes {
    /// All attributes applied to the symbol
    fn custom_attributes(&self) -> &[CustomAttribute];

    /// Look up a marker attribute. When the attribute is applied more than once, the first
    /// application wins.
    fn marker(&self, kind: MarkerKind) -> Option<Marker> {
        let name = kind.attribute_name();
        self.custom_attributes()
            .iter()
            .find(|attribute| attribute.attribute_type.full_name == name)
            .map(|attribute| Marker {
                kind,
                message: attribute
                    .arguments
                    .first()
                    .and_then(CustomAttributeArgument::as_str)
                    .map(str::to_string),
            })
    }
}
