//! The type pass: top-level and nested type survival.
//!
//! Nested types are decided before the type enclosing them, so every removal is in the
//! [`RemovedTypeRegistry`](crate::pruning::RemovedTypeRegistry) by the time the member pass
//! checks signatures. A removed type takes its whole subtree with it.

use std::collections::HashSet;

use crate::{
    config::{AssemblyConfig, TypeConfig},
    metadata::{
        module::ModuleDef,
        signatures::TypeRef,
        typesystem::{TypeDef, TypeResolver},
    },
    pruning::{
        context::PruneContext,
        decisions::{nested_full_name, Removal, RemovalSet},
        obsolete::is_obsolete,
        visibility::type_is_api_visible,
    },
    Error, Result,
};

/// Longest base-type chain followed when looking for `System.Attribute`
pub const MAX_BASE_DEPTH: usize = 64;

const ATTRIBUTE_BASE: &str = "System.Attribute";

/// Bases that end the walk without reaching `System.Attribute`
const TERMINAL_BASES: &[&str] = &[
    "System.Object",
    "System.ValueType",
    "System.Enum",
    "System.Delegate",
    "System.MulticastDelegate",
];

/// Returns `true` if `ty` derives from `System.Attribute`, directly or through its bases.
///
/// # Errors
/// Returns the resolver's error for a base type that cannot be resolved, and
/// [`Error::RecursionLimit`] when the chain is longer than [`MAX_BASE_DEPTH`].
pub fn is_attribute_type(ty: &TypeDef, resolver: &dyn TypeResolver) -> Result<bool> {
    let mut visited: HashSet<TypeRef> = HashSet::new();
    let mut current = ty
        .base
        .as_ref()
        .and_then(|base| base.scope_type())
        .cloned();

    while let Some(base) = current {
        if base.full_name == ATTRIBUTE_BASE {
            return Ok(true);
        }
        if TERMINAL_BASES.contains(&base.full_name.as_str()) || !visited.insert(base.clone()) {
            return Ok(false);
        }
        if visited.len() > MAX_BASE_DEPTH {
            return Err(Error::RecursionLimit(MAX_BASE_DEPTH));
        }
        current = resolver.resolve(&base)?.base.clone();
    }
    Ok(false)
}

/// Decide every type of `module` and excise the removed ones.
///
/// A top-level type with an entry in `TypeConfiguration` is never removed itself; its nested
/// types are still decided.
///
/// # Errors
/// Returns resolution errors raised by the attribute check.
pub fn prune_types(
    module: &mut ModuleDef,
    config: &AssemblyConfig,
    ctx: &mut PruneContext<'_>,
) -> Result<()> {
    let remove_obsolete = config.effective_remove_obsolete();
    let listed = RemovalSet::resolve(config.mode(), config.types.iter().cloned(), || {
        module
            .types
            .iter()
            .map(TypeDef::full_name)
            .collect::<Vec<_>>()
    });

    let mut drop = Vec::with_capacity(module.types.len());
    for ty in &module.types {
        let name = ty.full_name();
        let removed = if ty.is_module_type() || config.type_configuration.contains_key(&name) {
            false
        } else {
            top_level_removed(ty, &name, &listed, remove_obsolete, ctx)?
        };
        if removed {
            ctx.remove_type(ty);
        }
        drop.push(removed);
    }
    let mut flags = drop.into_iter();
    module.types.retain(|_| !flags.next().unwrap_or(false));

    for ty in &mut module.types {
        let type_config = config.type_configuration.get(&ty.full_name());
        prune_nested(ty, type_config, remove_obsolete, ctx)?;
    }
    Ok(())
}

fn top_level_removed(
    ty: &TypeDef,
    name: &str,
    listed: &RemovalSet,
    remove_obsolete: bool,
    ctx: &PruneContext<'_>,
) -> Result<bool> {
    if listed.is_forced(name) || (remove_obsolete && is_obsolete(ty)) {
        return Ok(true);
    }

    let hidden = ctx.reference_assembly && !type_is_api_visible(ty.visibility);
    let soft = listed.get(name) == Some(Removal::Soft);
    if hidden || soft {
        return Ok(!is_attribute_type(ty, ctx.resolver)?);
    }
    Ok(false)
}

/// Decide the nested types of `ty`, innermost first.
///
/// `inherited_remove_obsolete` is the effective flag of the enclosing level.
///
/// # Errors
/// Propagates errors from deeper levels.
pub fn prune_nested(
    ty: &mut TypeDef,
    config: Option<&TypeConfig>,
    inherited_remove_obsolete: bool,
    ctx: &mut PruneContext<'_>,
) -> Result<()> {
    if ty.nested_types.is_empty() {
        return Ok(());
    }

    let remove_obsolete = config.map_or(inherited_remove_obsolete, |c| {
        c.effective_remove_obsolete(inherited_remove_obsolete)
    });
    let type_name = ty.full_name();

    for nested in &mut ty.nested_types {
        let nested_config =
            config.and_then(|c| c.inner_type_configuration.get(&nested.simple_name()));
        prune_nested(nested, nested_config, remove_obsolete, ctx)?;
    }

    let listed = match config {
        Some(c) => RemovalSet::resolve(
            c.mode(),
            c.inner_types
                .iter()
                .map(|simple| nested_full_name(&type_name, simple)),
            || {
                ty.nested_types
                    .iter()
                    .map(TypeDef::full_name)
                    .collect::<Vec<_>>()
            },
        ),
        None => RemovalSet::new(),
    };

    let mut drop = Vec::with_capacity(ty.nested_types.len());
    for nested in &ty.nested_types {
        let removed = (ctx.reference_assembly && !type_is_api_visible(nested.visibility))
            || listed.removes(&nested.full_name(), false)
            || (remove_obsolete && is_obsolete(nested));
        if removed {
            ctx.remove_type(nested);
        }
        drop.push(removed);
    }
    let mut flags = drop.into_iter();
    ty.nested_types.retain(|_| !flags.next().unwrap_or(false));
    Ok(())
}
