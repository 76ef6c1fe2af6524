//! Method definitions, override records and method bodies.
//!
//! A [`MethodDef`] is identified inside its declaring type by its relative name
//! `ReturnType Name(ParamTypes)`; the fully qualified symbol name inserts the declaring type:
//! `ReturnType Namespace.Type::Name(ParamTypes)`. Generic methods carry their arity after the
//! name, `System.Void Convert`1(!!0)`, so overloads that differ only in arity stay distinct. Accessor lists of properties and events and
//! the implementation side of [`MethodOverride`] records refer to methods by relative name.

mod body;

pub use body::{ExceptionHandler, ExceptionHandlerFlags, Instruction, MethodBody, Operand};

use serde::{Deserialize, Serialize};

use crate::metadata::{
    customattributes::{CustomAttribute, HasCustomAttributes},
    flags::{MemberAccess, MethodModifiers},
    signatures::{write_list, GenericParam, SignatureMethod, TypeSignature},
};

/// A reference to a method declared on another type, e.g. the interface method an explicit
/// implementation overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    /// The declaring type (a class reference or a generic instantiation)
    pub declaring_type: TypeSignature,
    /// Method name
    pub name: String,
    /// Method signature
    pub signature: SignatureMethod,
}

impl MemberRef {
    /// `ReturnType DeclaringType::Name(ParamTypes)`
    #[must_use]
    pub fn full_name(&self) -> String {
        method_full_name(
            &self.declaring_type.full_name(),
            &self.name,
            self.signature.param_count_generic,
            &self.signature,
        )
    }
}

/// An explicit override record (`.override`) of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodOverride {
    /// The overridden declaration, usually an interface method
    pub declaration: MemberRef,
    /// Relative name of the implementing method in the declaring type
    pub body: String,
}

/// A method declared by a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    /// Method name, e.g. `get_Count` or `.ctor`
    pub name: String,
    /// Accessibility
    #[serde(default)]
    pub access: MemberAccess,
    /// Remaining `MethodAttributes`
    #[serde(default)]
    pub modifiers: MethodModifiers,
    /// Return and parameter types
    pub signature: SignatureMethod,
    /// Generic parameters declared by this method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<GenericParam>,
    /// Explicit override records carried by this method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<MethodOverride>,
    /// Implementation, `None` for abstract and extern methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MethodBody>,
    /// Custom attributes applied to the method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl MethodDef {
    /// Create a method without body, overrides or attributes
    pub fn new(name: impl Into<String>, access: MemberAccess, signature: SignatureMethod) -> Self {
        Self {
            name: name.into(),
            access,
            modifiers: MethodModifiers::HIDE_BY_SIG,
            signature,
            generic_params: Vec::new(),
            overrides: Vec::new(),
            body: None,
            custom_attributes: Vec::new(),
        }
    }

    /// Number of generic parameters, from the signature or the declared parameter list
    #[must_use]
    pub fn generic_arity(&self) -> u32 {
        let declared = u32::try_from(self.generic_params.len()).unwrap_or(u32::MAX);
        self.signature.param_count_generic.max(declared)
    }

    /// `ReturnType Name(ParamTypes)`, the name used inside the declaring type
    #[must_use]
    pub fn relative_name(&self) -> String {
        format!(
            "{} {}({})",
            self.signature.return_type,
            GenericName(&self.name, self.generic_arity()),
            ParamList(&self.signature.params)
        )
    }

    /// `ReturnType DeclaringType::Name(ParamTypes)`
    #[must_use]
    pub fn full_name(&self, declaring_type: &str) -> String {
        method_full_name(declaring_type, &self.name, self.generic_arity(), &self.signature)
    }

    /// Returns `true` if the method is a `virtual final` slot
    #[must_use]
    pub fn is_sealed_virtual(&self) -> bool {
        self.modifiers
            .contains(MethodModifiers::VIRTUAL | MethodModifiers::FINAL)
    }

    /// Returns `true` if the method carries at least one explicit override record
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Number of declared parameters, without the hidden `this`
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.signature.params.len()
    }
}

impl HasCustomAttributes for MethodDef {
    fn custom_attributes(&self) -> &[CustomAttribute] {
        &self.custom_attributes
    }
}

struct ParamList<'a>(&'a [TypeSignature]);

impl std::fmt::Display for ParamList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_list(f, self.0)
    }
}

/// Method name with its generic arity, `Name` or ``Name`N``
struct GenericName<'a>(&'a str, u32);

impl std::fmt::Display for GenericName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.1 {
            0 => f.write_str(self.0),
            arity => write!(f, "{}`{}", self.0, arity),
        }
    }
}

fn method_full_name(
    declaring_type: &str,
    name: &str,
    arity: u32,
    signature: &SignatureMethod,
) -> String {
    format!(
        "{} {}::{}({})",
        signature.return_type,
        declaring_type,
        GenericName(name, arity),
        ParamList(&signature.params)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::signatures::TypeRef;

    fn sample() -> MethodDef {
        MethodDef::new(
            "Add",
            MemberAccess::Public,
            SignatureMethod::instance(
                TypeSignature::Boolean,
                vec![TypeSignature::I4, TypeSignature::class("A.Item")],
            ),
        )
    }

    #[test]
    fn test_method_names() {
        let method = sample();
        assert_eq!(
            method.relative_name(),
            "System.Boolean Add(System.Int32,A.Item)"
        );
        assert_eq!(
            method.full_name("A.Bag"),
            "System.Boolean A.Bag::Add(System.Int32,A.Item)"
        );
        assert_eq!(method.param_count(), 2);
    }

    #[test]
    fn test_generic_arity_in_names() {
        let plain = MethodDef::new(
            "M",
            MemberAccess::Public,
            SignatureMethod::instance(TypeSignature::Void, vec![]),
        );
        let mut generic = plain.clone();
        generic.generic_params.push(GenericParam {
            number: 0,
            name: "T".to_string(),
            constraints: vec![],
        });

        assert_eq!(plain.relative_name(), "System.Void M()");
        assert_eq!(generic.relative_name(), "System.Void M`1()");
        assert_eq!(generic.full_name("A.W"), "System.Void A.W::M`1()");

        let declared = MethodDef::new(
            "M",
            MemberAccess::Public,
            SignatureMethod::instance(TypeSignature::Void, vec![]).with_generic_params(2),
        );
        assert_eq!(declared.generic_arity(), 2);
        assert_eq!(declared.relative_name(), "System.Void M`2()");
    }

    #[test]
    fn test_sealed_virtual() {
        let mut method = sample();
        assert!(!method.is_sealed_virtual());
        method.modifiers |= MethodModifiers::VIRTUAL;
        assert!(!method.is_sealed_virtual());
        method.modifiers |= MethodModifiers::FINAL;
        assert!(method.is_sealed_virtual());
    }

    #[test]
    fn test_member_ref_full_name() {
        let declaration = MemberRef {
            declaring_type: TypeSignature::Class(TypeRef::external(
                "System.IDisposable",
                "System.Runtime",
            )),
            name: "Dispose".to_string(),
            signature: SignatureMethod::instance(TypeSignature::Void, vec![]),
        };
        assert_eq!(
            declaration.full_name(),
            "System.Void System.IDisposable::Dispose()"
        );
    }

    #[test]
    fn test_stub_body() {
        let stub = MethodBody::stub();
        assert!(stub.is_stub());
        assert_eq!(stub.instructions.len(), 2);
        assert!(stub.locals.is_empty());
        assert!(!stub.init_locals);

        let mut body = MethodBody::stub();
        body.instructions.push(Instruction::ret());
        assert!(!body.is_stub());
    }
}
