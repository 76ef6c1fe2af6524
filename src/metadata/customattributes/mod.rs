//! Custom attributes and typed marker queries.
//!
//! Symbols carry their custom attributes with constructor arguments already decoded.
//! The pruning engine never matches attribute names itself; it asks for a
//! [`MarkerKind`] through [`HasCustomAttributes::marker`] and receives the decoded
//! [`Marker`], if present.

mod types;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::signatures::TypeRef;

    struct Symbol(Vec<CustomAttribute>);

    impl HasCustomAttributes for Symbol {
        fn custom_attributes(&self) -> &[CustomAttribute] {
            &self.0
        }
    }

    #[test]
    fn test_marker_absent() {
        let symbol = Symbol(vec![CustomAttribute::new(
            TypeRef::local("A.SomeAttribute"),
            vec![],
        )]);
        assert!(symbol.marker(MarkerKind::Obsolete).is_none());
    }

    #[test]
    fn test_marker_with_message() {
        let symbol = Symbol(vec![CustomAttribute::obsolete(Some("use Bar"))]);
        let marker = symbol.marker(MarkerKind::Obsolete).unwrap();
        assert_eq!(marker.kind, MarkerKind::Obsolete);
        assert_eq!(marker.message.as_deref(), Some("use Bar"));
    }

    #[test]
    fn test_marker_first_application_wins() {
        let symbol = Symbol(vec![
            CustomAttribute::obsolete(None),
            CustomAttribute::obsolete(Some("second")),
        ]);
        assert_eq!(symbol.marker(MarkerKind::Obsolete).unwrap().message, None);
    }

    #[test]
    fn test_marker_non_string_argument() {
        let symbol = Symbol(vec![CustomAttribute::new(
            TypeRef::external("System.ObsoleteAttribute", "System.Runtime"),
            vec![CustomAttributeArgument::Bool(true)],
        )]);
        assert_eq!(symbol.marker(MarkerKind::Obsolete).unwrap().message, None);
    }
}
