//! Interface implementation pruning and the implementing-method cascade.
//!
//! Dropping an interface implementation from a type leaves the methods that realized the
//! interface behind. For every method the interface declares, the implementing method of the
//! type is located:
//!
//! 1. through an explicit override record naming the interface method, or
//! 2. as a `virtual final` method with the same name and parameter count.
//!
//! When neither exists, the interface provides a default implementation and nothing is
//! removed. A located method is force-removed unless `InterfaceMethodsToKeep` names it, and
//! override records pointing at it are stripped from the remaining methods.
//!
//! Generic interfaces are matched by name and arity only; generic arguments are not
//! substituted.

use std::collections::HashSet;

use log::trace;

use crate::{
    metadata::{
        members::InterfaceImpl,
        method::{MemberRef, MethodDef, MethodOverride},
        signatures::TypeSignature,
        typesystem::TypeDef,
    },
    pruning::{context::PruneContext, decisions::RemovalSet, obsolete::is_obsolete},
    Result,
};

/// What the interface pass left for the method pass to clean up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceCascade {
    /// Relative names of methods that implemented a dropped interface
    pub implementations: HashSet<String>,
    /// Full names of the dropped interface definitions
    pub dropped: HashSet<String>,
}

impl InterfaceCascade {
    /// Returns `true` if `record` points at a removed implementation or a dropped interface
    #[must_use]
    pub fn strips(&self, record: &MethodOverride) -> bool {
        self.implementations.contains(&record.body)
            || record
                .declaration
                .declaring_type
                .scope_type()
                .is_some_and(|interface| self.dropped.contains(&interface.full_name))
    }
}

/// Find the method of `ty` implementing the interface method `declaration`.
///
/// Explicit override records win over implicit slot matches. Returns `None` when the interface
/// supplies a default implementation.
#[must_use]
pub fn find_implementation<'t>(ty: &'t TypeDef, declaration: &MemberRef) -> Option<&'t MethodDef> {
    let explicit = ty
        .methods
        .iter()
        .flat_map(|method| method.overrides.iter())
        .find(|record| declaration_matches(&record.declaration, declaration))
        .and_then(|record| ty.method(&record.body));

    explicit.or_else(|| {
        ty.methods.iter().find(|method| {
            method.is_sealed_virtual()
                && method.name == declaration.name
                && method.generic_arity() == declaration.signature.param_count_generic
                && method.param_count() == declaration.signature.params.len()
        })
    })
}

fn declaration_matches(record: &MemberRef, declaration: &MemberRef) -> bool {
    let generic = matches!(record.declaring_type, TypeSignature::GenericInst(..))
        || matches!(declaration.declaring_type, TypeSignature::GenericInst(..));
    if !generic {
        return record.full_name() == declaration.full_name();
    }

    let same_interface = match (
        record.declaring_type.scope_type(),
        declaration.declaring_type.scope_type(),
    ) {
        (Some(left), Some(right)) => left.full_name == right.full_name,
        _ => false,
    };
    same_interface
        && record.name == declaration.name
        && record.signature.param_count_generic == declaration.signature.param_count_generic
        && record.signature.params.len() == declaration.signature.params.len()
}

/// Drop the interface implementations of `ty` that are listed, obsolete or mention a removed
/// type, and force-remove the methods implementing dropped interfaces.
///
/// `methods` receives the forced removals (by full method name); `keep` holds the full names
/// protected by `InterfaceMethodsToKeep`.
///
/// # Errors
/// Returns the resolver's error if a dropped or obsolete-checked interface cannot be resolved.
pub fn prune_interfaces(
    ty: &mut TypeDef,
    listed: &RemovalSet,
    remove_obsolete: bool,
    methods: &mut RemovalSet,
    keep: &HashSet<String>,
    ctx: &mut PruneContext<'_>,
) -> Result<InterfaceCascade> {
    let type_name = ty.full_name();
    let mut cascade = InterfaceCascade::default();
    let mut drop = Vec::with_capacity(ty.interfaces.len());

    for iface in &ty.interfaces {
        let Some(reference) = iface.interface.scope_type() else {
            drop.push(false);
            continue;
        };

        if ctx.registry.mentions(&iface.interface) {
            cascade.dropped.insert(reference.full_name.clone());
            drop.push(true);
            continue;
        }

        let name = iface.full_name();
        let explicit = listed.removes(&name, false);
        if !explicit && !remove_obsolete {
            drop.push(false);
            continue;
        }

        let resolved = ctx.resolver.resolve(reference)?;
        if !explicit && !is_obsolete(resolved.as_ref()) {
            drop.push(false);
            continue;
        }

        for declaration in &resolved.methods {
            let Some(implementation) = find_implementation(ty, declaration) else {
                continue;
            };
            let full_name = implementation.full_name(&type_name);
            if keep.contains(&full_name) {
                continue;
            }
            trace!("Interface {} drops implementation {}", name, full_name);
            methods.force(full_name);
            cascade
                .implementations
                .insert(implementation.relative_name());
        }
        cascade.dropped.insert(reference.full_name.clone());
        drop.push(true);
    }

    let mut flags = drop.into_iter();
    let before = ty.interfaces.len();
    ty.interfaces
        .retain(|_: &InterfaceImpl| !flags.next().unwrap_or(false));
    ctx.stats.interfaces_removed += before - ty.interfaces.len();

    Ok(cascade)
}
