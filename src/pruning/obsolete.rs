//! Obsolete marker detection.

use crate::metadata::customattributes::{HasCustomAttributes, MarkerKind};

/// Message of the `[Obsolete]` marker compilers put on ref structs and similar types so that
/// older compilers refuse them. It is not a deprecation and never triggers removal.
pub const EMBEDDED_REFERENCES_MESSAGE: &str =
    "Types with embedded references are not supported in this version of your compiler.";

/// Returns `true` if `symbol` is marked obsolete by a real deprecation
pub fn is_obsolete<T: HasCustomAttributes + ?Sized>(symbol: &T) -> bool {
    match symbol.marker(MarkerKind::Obsolete) {
        Some(marker) => marker.message.as_deref() != Some(EMBEDDED_REFERENCES_MESSAGE),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        customattributes::CustomAttribute, flags::MemberAccess, members::FieldDef,
        signatures::TypeSignature,
    };

    fn field(attributes: Vec<CustomAttribute>) -> FieldDef {
        let mut field = FieldDef::new("F", MemberAccess::Public, TypeSignature::I4);
        field.custom_attributes = attributes;
        field
    }

    #[test]
    fn test_obsolete_without_message() {
        assert!(is_obsolete(&field(vec![CustomAttribute::obsolete(None)])));
    }

    #[test]
    fn test_obsolete_with_message() {
        assert!(is_obsolete(&field(vec![CustomAttribute::obsolete(Some(
            "Use G instead"
        ))])));
    }

    #[test]
    fn test_embedded_references_exception() {
        assert!(!is_obsolete(&field(vec![CustomAttribute::obsolete(Some(
            EMBEDDED_REFERENCES_MESSAGE
        ))])));
    }

    #[test]
    fn test_not_obsolete() {
        assert!(!is_obsolete(&field(vec![])));
    }
}
