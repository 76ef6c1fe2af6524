//! Fields, properties, events and interface implementations.
//!
//! Properties and events own their accessor methods by relative method name. A property or
//! event without any accessor left is empty and gets removed together with its type's
//! cascading method removal.

use serde::{Deserialize, Serialize};

use crate::metadata::{
    customattributes::{CustomAttribute, HasCustomAttributes},
    flags::{FieldModifiers, MemberAccess},
    signatures::{write_list, SignatureProperty, TypeSignature},
};

/// A field declared by a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Accessibility
    #[serde(default)]
    pub access: MemberAccess,
    /// Remaining `FieldAttributes`
    #[serde(default)]
    pub modifiers: FieldModifiers,
    /// Declared type of the field
    pub field_type: TypeSignature,
    /// Custom attributes applied to the field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl FieldDef {
    /// Create a field without attributes
    pub fn new(name: impl Into<String>, access: MemberAccess, field_type: TypeSignature) -> Self {
        Self {
            name: name.into(),
            access,
            modifiers: FieldModifiers::empty(),
            field_type,
            custom_attributes: Vec::new(),
        }
    }

    /// `FieldType Name`
    #[must_use]
    pub fn relative_name(&self) -> String {
        format!("{} {}", self.field_type, self.name)
    }

    /// `FieldType DeclaringType::Name`
    #[must_use]
    pub fn full_name(&self, declaring_type: &str) -> String {
        format!("{} {}::{}", self.field_type, declaring_type, self.name)
    }
}

/// A property and its accessor methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name
    pub name: String,
    /// Property type and indexer parameters
    pub signature: SignatureProperty,
    /// Relative names of the getter methods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub getters: Vec<String>,
    /// Relative names of the setter methods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setters: Vec<String>,
    /// Relative names of other associated methods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<String>,
    /// Custom attributes applied to the property
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl PropertyDef {
    /// Create a property without accessors
    pub fn new(name: impl Into<String>, signature: SignatureProperty) -> Self {
        Self {
            name: name.into(),
            signature,
            getters: Vec::new(),
            setters: Vec::new(),
            others: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// `PropertyType Name(IndexParams)`
    #[must_use]
    pub fn relative_name(&self) -> String {
        format!(
            "{} {}({})",
            self.signature.base,
            self.name,
            Params(&self.signature.params)
        )
    }

    /// `PropertyType DeclaringType::Name(IndexParams)`
    #[must_use]
    pub fn full_name(&self, declaring_type: &str) -> String {
        format!(
            "{} {}::{}({})",
            self.signature.base,
            declaring_type,
            self.name,
            Params(&self.signature.params)
        )
    }

    /// Every accessor, getters first, then setters and other methods
    pub fn accessors(&self) -> impl Iterator<Item = &String> + '_ {
        self.getters
            .iter()
            .chain(self.setters.iter())
            .chain(self.others.iter())
    }

    /// Returns `true` if the property has no accessor left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.getters.is_empty() && self.setters.is_empty() && self.others.is_empty()
    }

    /// Drop `method` from every accessor list. Returns `true` if it was an accessor.
    pub fn detach(&mut self, method: &str) -> bool {
        let before = self.getters.len() + self.setters.len() + self.others.len();
        self.getters.retain(|m| m != method);
        self.setters.retain(|m| m != method);
        self.others.retain(|m| m != method);
        before != self.getters.len() + self.setters.len() + self.others.len()
    }
}

/// An event and its accessor methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    /// Event name
    pub name: String,
    /// Delegate type of the event
    pub event_type: TypeSignature,
    /// Relative name of the `add` accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<String>,
    /// Relative name of the `remove` accessor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<String>,
    /// Relative names of other associated methods (e.g. `raise`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<String>,
    /// Custom attributes applied to the event
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl EventDef {
    /// Create an event without accessors
    pub fn new(name: impl Into<String>, event_type: TypeSignature) -> Self {
        Self {
            name: name.into(),
            event_type,
            add: None,
            remove: None,
            others: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// `EventType Name`
    #[must_use]
    pub fn relative_name(&self) -> String {
        format!("{} {}", self.event_type, self.name)
    }

    /// `EventType DeclaringType::Name`
    #[must_use]
    pub fn full_name(&self, declaring_type: &str) -> String {
        format!("{} {}::{}", self.event_type, declaring_type, self.name)
    }

    /// Every accessor: `add`, `remove`, then other methods
    pub fn accessors(&self) -> impl Iterator<Item = &String> + '_ {
        self.add
            .iter()
            .chain(self.remove.iter())
            .chain(self.others.iter())
    }

    /// Returns `true` if the event has no accessor left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.remove.is_none() && self.others.is_empty()
    }

    /// Drop `method` from every accessor slot. Returns `true` if it was an accessor.
    pub fn detach(&mut self, method: &str) -> bool {
        let mut found = false;
        if self.add.as_deref() == Some(method) {
            self.add = None;
            found = true;
        }
        if self.remove.as_deref() == Some(method) {
            self.remove = None;
            found = true;
        }
        let before = self.others.len();
        self.others.retain(|m| m != method);
        found || before != self.others.len()
    }
}

/// An `InterfaceImpl` row: an interface implemented by a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceImpl {
    /// The implemented interface, a class reference or a generic instantiation
    pub interface: TypeSignature,
    /// Custom attributes applied to the implementation row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl InterfaceImpl {
    /// Create an implementation row for `interface`
    #[must_use]
    pub fn new(interface: TypeSignature) -> Self {
        Self {
            interface,
            custom_attributes: Vec::new(),
        }
    }

    /// Full name of the implemented interface, including generic arguments
    #[must_use]
    pub fn full_name(&self) -> String {
        self.interface.full_name()
    }
}

macro_rules! impl_has_custom_attributes {
    ($($ty:ty),+) => {
        $(
            impl HasCustomAttributes for $ty {
                fn custom_attributes(&self) -> &[CustomAttribute] {
                    &self.custom_attributes
                }
            }
        )+
    };
}

impl_has_custom_attributes!(FieldDef, PropertyDef, EventDef, InterfaceImpl);

struct Params<'a>(&'a [TypeSignature]);

impl std::fmt::Display for Params<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_list(f, self.0)
    }
}
