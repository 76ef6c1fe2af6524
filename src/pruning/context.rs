use std::collections::HashSet;

use log::debug;

use crate::{
    metadata::{
        signatures::{TypeRef, TypeSignature},
        typesystem::{TypeDef, TypeResolver},
    },
    pruning::PruneStats,
};

/// Full names of the types removed from the module being pruned.
///
/// Grows during the type pass and is read by every reachability check of the member pass.
/// Only references into the module's own assembly can hit a removed type: local references
/// and, once the assembly name is known, references scoped to it.
#[derive(Debug, Clone, Default)]
pub struct RemovedTypeRegistry {
    names: HashSet<String>,
    scope: Option<String>,
}

impl RemovedTypeRegistry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty registry that also matches references scoped to `assembly`
    #[must_use]
    pub fn for_assembly(assembly: impl Into<String>) -> Self {
        RemovedTypeRegistry {
            names: HashSet::new(),
            scope: Some(assembly.into()),
        }
    }

    fn in_scope(&self, reference: &TypeRef) -> bool {
        match &reference.scope {
            None => true,
            Some(scope) => self.scope.as_ref() == Some(scope),
        }
    }

    /// Record a removed type. Returns `false` if it was already recorded.
    pub fn insert(&mut self, full_name: impl Into<String>) -> bool {
        self.names.insert(full_name.into())
    }

    /// Returns `true` if `full_name` was removed
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.names.contains(full_name)
    }

    /// Returns `true` if the referenced type or any type enclosing it was removed.
    ///
    /// References into other assemblies never match, whatever their name.
    #[must_use]
    pub fn covers(&self, reference: &TypeRef) -> bool {
        self.in_scope(reference)
            && reference
                .enclosing_chain()
                .any(|name| self.names.contains(name))
    }

    /// Returns `true` if `signature` mentions a removed type anywhere, generic arguments and
    /// function pointer signatures included
    #[must_use]
    pub fn mentions(&self, signature: &TypeSignature) -> bool {
        match signature {
            TypeSignature::Class(reference) | TypeSignature::ValueType(reference) => {
                self.covers(reference)
            }
            TypeSignature::GenericInst(base, args) => {
                self.mentions(base) || args.iter().any(|arg| self.mentions(arg))
            }
            TypeSignature::SzArray(base)
            | TypeSignature::Array(base, _)
            | TypeSignature::Ptr(base)
            | TypeSignature::ByRef(base)
            | TypeSignature::Pinned(base)
            | TypeSignature::ModifiedRequired(_, base)
            | TypeSignature::ModifiedOptional(_, base) => self.mentions(base),
            TypeSignature::FnPtr(method) => method.types().any(|ty| self.mentions(ty)),
            _ => false,
        }
    }

    /// Number of removed types
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing was removed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate the removed type names in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

/// State of one module's pruning run, passed explicitly through both passes.
pub struct PruneContext<'a> {
    /// Types removed so far
    pub registry: RemovedTypeRegistry,
    /// Resolves references made from the module
    pub resolver: &'a dyn TypeResolver,
    /// Drop non-API members and stub retained bodies
    pub reference_assembly: bool,
    /// Counters of this run
    pub stats: PruneStats,
}

impl<'a> PruneContext<'a> {
    /// Create the context for one module
    pub fn new(resolver: &'a dyn TypeResolver, reference_assembly: bool) -> Self {
        PruneContext {
            registry: RemovedTypeRegistry::new(),
            resolver,
            reference_assembly,
            stats: PruneStats::new(),
        }
    }

    /// Let the registry match references scoped to `assembly`, the module's own assembly
    #[must_use]
    pub fn with_scope(mut self, assembly: &str) -> Self {
        self.registry = RemovedTypeRegistry::for_assembly(assembly);
        self
    }

    /// Record the removal of `ty` and of every type nested in it
    pub fn remove_type(&mut self, ty: &TypeDef) {
        for name in ty.subtree_names() {
            if self.registry.insert(name.clone()) {
                debug!("Removed type {}", name);
                self.stats.types_removed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{flags::TypeVisibility, signatures::SignatureMethod, typesystem::TypeIndex};

    #[test]
    fn test_covers_enclosing_types() {
        let mut registry = RemovedTypeRegistry::new();
        assert!(registry.insert("A.Outer"));
        assert!(!registry.insert("A.Outer"));

        assert!(registry.covers(&TypeRef::local("A.Outer")));
        assert!(registry.covers(&TypeRef::local("A.Outer/Inner")));
        assert!(!registry.covers(&TypeRef::local("A.Outer2")));
    }

    #[test]
    fn test_covers_ignores_foreign_scopes() {
        let mut registry = RemovedTypeRegistry::for_assembly("Lib");
        registry.insert("Lib.Uri");

        assert!(registry.covers(&TypeRef::local("Lib.Uri")));
        assert!(registry.covers(&TypeRef::external("Lib.Uri", "Lib")));
        assert!(!registry.covers(&TypeRef::external("Lib.Uri", "Other")));
        assert!(!registry.mentions(&TypeSignature::Class(TypeRef::external(
            "Lib.Uri/Inner",
            "Other"
        ))));

        let unscoped = {
            let mut registry = RemovedTypeRegistry::new();
            registry.insert("Lib.Uri");
            registry
        };
        assert!(!unscoped.covers(&TypeRef::external("Lib.Uri", "Lib")));
    }

    #[test]
    fn test_mentions_walks_signatures() {
        let mut registry = RemovedTypeRegistry::new();
        registry.insert("A.Gone");

        let list = TypeSignature::GenericInst(
            Box::new(TypeSignature::Class(TypeRef::external(
                "System.Collections.Generic.List`1",
                "System.Runtime",
            ))),
            vec![TypeSignature::class("A.Gone")],
        );
        assert!(registry.mentions(&list));
        assert!(registry.mentions(&TypeSignature::ByRef(Box::new(
            TypeSignature::value_type("A.Gone")
        ))));
        let fnptr = TypeSignature::FnPtr(Box::new(SignatureMethod::new(
            TypeSignature::class("A.Gone"),
            vec![],
        )));
        assert!(registry.mentions(&fnptr));
        assert!(!registry.mentions(&TypeSignature::I4));
        assert!(!registry.mentions(&TypeSignature::class("A.Kept")));
    }

    #[test]
    fn test_remove_type_records_subtree() {
        let index = TypeIndex::default();
        let mut ctx = PruneContext::new(&index, false);
        let mut outer = TypeDef::new("A", "Outer", TypeVisibility::Public);
        outer.add_nested(TypeDef::new("", "Inner", TypeVisibility::NestedPublic));

        ctx.remove_type(&outer);
        ctx.remove_type(&outer);
        assert_eq!(ctx.stats.types_removed, 2);
        assert!(ctx.registry.contains("A.Outer/Inner"));
    }
}
