//! Signature reachability.
//!
//! A member signature is reachable when every type it mentions survives pruning and stays
//! visible outside the assembly. Generic parameters always pass. Function pointers are
//! checked through their own return and parameter types. A referenced type definition also
//! brings in the constraints of its generic parameters, which are checked the same way.

use std::collections::HashSet;

use crate::{
    metadata::{
        method::MethodDef,
        signatures::{TypeRef, TypeSignature},
        typesystem::TypeResolver,
    },
    pruning::{context::RemovedTypeRegistry, visibility::is_api_visible},
    Result,
};

/// Checks member signatures against the removed types and the visibility of what they
/// reference.
pub struct SignatureChecker<'a> {
    registry: &'a RemovedTypeRegistry,
    resolver: &'a dyn TypeResolver,
}

impl<'a> SignatureChecker<'a> {
    /// Create a checker
    #[must_use]
    pub fn new(registry: &'a RemovedTypeRegistry, resolver: &'a dyn TypeResolver) -> Self {
        SignatureChecker { registry, resolver }
    }

    /// Check the return type, the parameter types and the generic constraints of `method`.
    ///
    /// # Errors
    /// Returns the resolver's error for a type reference that cannot be resolved.
    pub fn method_ok(&self, method: &MethodDef) -> Result<bool> {
        self.all_ok(
            method.signature.types().chain(
                method
                    .generic_params
                    .iter()
                    .flat_map(|param| param.constraints.iter()),
            ),
        )
    }

    /// Check every signature of `types`.
    ///
    /// # Errors
    /// Returns the resolver's error for a type reference that cannot be resolved.
    pub fn all_ok<'s>(&self, types: impl IntoIterator<Item = &'s TypeSignature>) -> Result<bool> {
        let mut visited = HashSet::new();
        for signature in types {
            if !self.type_ok(signature, &mut visited)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn type_ok(&self, signature: &TypeSignature, visited: &mut HashSet<TypeRef>) -> Result<bool> {
        match signature {
            TypeSignature::Class(reference) | TypeSignature::ValueType(reference) => {
                self.reference_ok(reference, visited)
            }
            TypeSignature::GenericInst(base, args) => {
                if !self.type_ok(base, visited)? {
                    return Ok(false);
                }
                for arg in args {
                    if !self.type_ok(arg, visited)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            TypeSignature::SzArray(base)
            | TypeSignature::Array(base, _)
            | TypeSignature::Ptr(base)
            | TypeSignature::ByRef(base)
            | TypeSignature::Pinned(base)
            | TypeSignature::ModifiedRequired(_, base)
            | TypeSignature::ModifiedOptional(_, base) => self.type_ok(base, visited),
            TypeSignature::FnPtr(method) => {
                for inner in method.types() {
                    if !self.type_ok(inner, visited)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            // generic parameters and primitives
            _ => Ok(true),
        }
    }

    fn reference_ok(&self, reference: &TypeRef, visited: &mut HashSet<TypeRef>) -> Result<bool> {
        if self.registry.covers(reference) {
            return Ok(false);
        }
        if !visited.insert(reference.clone()) {
            return Ok(true);
        }

        let resolved = self.resolver.resolve(reference)?;
        if !is_api_visible(resolved.effective_tier) {
            return Ok(false);
        }
        for constraint in &resolved.generic_constraints {
            if !self.type_ok(constraint, visited)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
