//! Type definitions and type resolution.
//!
//! A [`TypeDef`] owns its members and its nested types. Nested types keep a non-owning link
//! to their declaring type (its full name), which [`TypeDef::link`] establishes after a model
//! document has been deserialized and [`TypeDef::add_nested`] maintains when a graph is built
//! in code.
//!
//! # Key Components
//!
//! - [`TypeDef`]: a type with its members, nested types and accessor bookkeeping
//! - [`TypeResolver`]: resolves a [`crate::metadata::signatures::TypeRef`] to a [`ResolvedType`]
//! - [`TypeIndex`]: snapshot of one module's own types
//! - [`AssemblyResolver`]: loads referenced assemblies from search roots on demand
//!
//! # Examples
//!
//! ```rust
//! use dotprune::metadata::{flags::TypeVisibility, typesystem::TypeDef};
//!
//! let mut outer = TypeDef::new("Contoso", "Outer", TypeVisibility::Public);
//! outer.add_nested(TypeDef::new("", "Inner", TypeVisibility::NestedPrivate));
//!
//! assert_eq!(outer.nested_types[0].full_name(), "Contoso.Outer/Inner");
//! assert_eq!(outer.nested_types[0].declaring_type(), Some("Contoso.Outer"));
//! ```

mod resolver;

pub use resolver::{AssemblyResolver, ModuleResolver, ResolvedType, TypeIndex, TypeResolver};

use serde::{Deserialize, Serialize};

use crate::metadata::{
    customattributes::{CustomAttribute, HasCustomAttributes},
    flags::{TypeModifiers, TypeVisibility},
    members::{EventDef, FieldDef, InterfaceImpl, PropertyDef},
    method::MethodDef,
    signatures::{GenericParam, TypeSignature},
};

/// Name of the pseudo type holding module-level globals
pub const MODULE_TYPE_NAME: &str = "<Module>";

/// A type defined in a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    /// `TypeNamespace`, empty for nested types and the global namespace
    #[serde(default)]
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Visibility of the type
    #[serde(default)]
    pub visibility: TypeVisibility,
    /// Remaining `TypeAttributes`
    #[serde(default)]
    pub modifiers: TypeModifiers,
    /// This types base aka 'extends'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeSignature>,
    /// All generic parameters this type declares
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<GenericParam>,
    /// All interfaces this class implements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<InterfaceImpl>,
    /// All methods this type has
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDef>,
    /// All fields this type has
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,
    /// All properties this type has
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDef>,
    /// All events this type has
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventDef>,
    /// All types that are 'contained' in this type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_types: Vec<TypeDef>,
    /// All custom attributes this type has
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
    /// Full name of the enclosing type, for nested types
    #[serde(skip)]
    declaring_type: Option<String>,
}

impl TypeDef {
    /// Create an empty type
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        visibility: TypeVisibility,
    ) -> Self {
        TypeDef {
            namespace: namespace.into(),
            name: name.into(),
            visibility,
            modifiers: TypeModifiers::empty(),
            base: None,
            generic_params: Vec::new(),
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
            nested_types: Vec::new(),
            custom_attributes: Vec::new(),
            declaring_type: None,
        }
    }

    /// `Namespace.Name`, or just `Name` in the global namespace
    #[must_use]
    pub fn simple_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Returns the full name of the type; nested types are `Outer/Inner`
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.declaring_type {
            Some(declaring) => format!("{declaring}/{}", self.simple_name()),
            None => self.simple_name(),
        }
    }

    /// Full name of the enclosing type, if this type is nested
    #[must_use]
    pub fn declaring_type(&self) -> Option<&str> {
        self.declaring_type.as_deref()
    }

    /// Returns `true` if this type is nested in another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    /// Returns `true` for interface definitions
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(TypeModifiers::INTERFACE)
    }

    /// Returns `true` for the `<Module>` pseudo type
    #[must_use]
    pub fn is_module_type(&self) -> bool {
        self.declaring_type.is_none() && self.namespace.is_empty() && self.name == MODULE_TYPE_NAME
    }

    /// Set the enclosing type link of this type and refresh the links of its whole subtree.
    pub fn link(&mut self, declaring_type: Option<String>) {
        self.declaring_type = declaring_type;
        let own = self.full_name();
        for nested in &mut self.nested_types {
            nested.link(Some(own.clone()));
        }
    }

    /// Append a nested type, linking it to this type
    pub fn add_nested(&mut self, mut nested: TypeDef) {
        nested.link(Some(self.full_name()));
        self.nested_types.push(nested);
    }

    /// Full names of this type and every type nested in it, outermost first
    #[must_use]
    pub fn subtree_names(&self) -> Vec<String> {
        let mut names = vec![self.full_name()];
        for nested in &self.nested_types {
            names.extend(nested.subtree_names());
        }
        names
    }

    /// Look up a method by relative name (`ReturnType Name(ParamTypes)`)
    #[must_use]
    pub fn method(&self, relative_name: &str) -> Option<&MethodDef> {
        self.methods
            .iter()
            .find(|method| method.relative_name() == relative_name)
    }

    /// Remove a method by relative name, detaching it from every property and event.
    ///
    /// With `cascade`, properties and events that lose their last accessor through this
    /// removal are removed as well. Returns the removed method.
    pub fn remove_method(&mut self, relative_name: &str, cascade: bool) -> Option<MethodDef> {
        let index = self
            .methods
            .iter()
            .position(|method| method.relative_name() == relative_name)?;
        let removed = self.methods.remove(index);

        self.properties
            .retain_mut(|property| !(property.detach(relative_name) && cascade && property.is_empty()));
        self.events
            .retain_mut(|event| !(event.detach(relative_name) && cascade && event.is_empty()));

        Some(removed)
    }
}

impl HasCustomAttributes for TypeDef {
    fn custom_attributes(&self) -> &[CustomAttribute] {
        &self.custom_attributes
    }
}
