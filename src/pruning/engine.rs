//! Two-pass pruning driver.
//!
//! The [`AssemblyPruner`] is the main entry point for pruning an assembly. It orchestrates:
//!
//! 1. **Entry check**: every member entry of the policy must split into type and name
//! 2. **Rename**: the optional identity change, before any symbol is touched
//! 3. **Snapshot**: a [`TypeIndex`] of every type of the assembly
//! 4. **Type pass**: per module, decide top-level and nested types
//! 5. **Member pass**: per module, prune the members of every surviving type
//!
//! The member pass needs the complete set of removed types of its module, so it starts only
//! after the type pass of that module has finished.

use std::time::Instant;

use log::{debug, info};

use crate::{
    config::AssemblyConfig,
    metadata::{
        module::AssemblyDef,
        typesystem::{ModuleResolver, TypeIndex, TypeResolver},
    },
    pruning::{
        context::PruneContext, members::prune_members, nested::prune_types, stats::PruneStats,
        transform::rename_assembly,
    },
    Result,
};

/// Applies one assembly's policy to its symbol graph.
///
/// # Example
///
/// ```rust
/// use dotprune::prelude::*;
///
/// let mut assembly = AssemblyDef::new("Contoso.Core", AssemblyVersion::new(1, 0, 0, 0));
/// assembly.modules.push(ModuleDef::new("Contoso.Core.dll"));
///
/// let config = AssemblyConfig::default();
/// let external = TypeIndex::default();
/// let stats = AssemblyPruner::new(&config, &external).prune(&mut assembly)?;
/// assert!(!stats.has_changes());
/// # Ok::<(), dotprune::Error>(())
/// ```
pub struct AssemblyPruner<'a> {
    config: &'a AssemblyConfig,
    external: &'a dyn TypeResolver,
}

impl<'a> AssemblyPruner<'a> {
    /// Create a pruner for `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - The policy of the assembly
    /// * `external` - Resolves references into other assemblies
    #[must_use]
    pub fn new(config: &'a AssemblyConfig, external: &'a dyn TypeResolver) -> Self {
        AssemblyPruner { config, external }
    }

    /// Prune `assembly` in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for a malformed member entry or rename version,
    /// and resolution errors raised while checking attributes, interfaces and signatures.
    /// The assembly is left partially pruned on error and must not be written.
    pub fn prune(&self, assembly: &mut AssemblyDef) -> Result<PruneStats> {
        let start = Instant::now();
        self.config.check_entries()?;

        let original_name = assembly.name.clone();
        if let Some(rename) = &self.config.rename {
            rename_assembly(assembly, rename)?;
        }

        let index = TypeIndex::from_assembly(assembly, None);
        let resolver = ModuleResolver::new(&index, &original_name, self.external);
        let remove_obsolete = self.config.effective_remove_obsolete();
        let mut stats = PruneStats::new();

        for module in &mut assembly.modules {
            let mut ctx = PruneContext::new(&resolver, self.config.make_reference_assembly)
                .with_scope(&original_name);

            prune_types(module, self.config, &mut ctx)?;
            debug!(
                "{}: {} types removed",
                module.name,
                ctx.registry.len()
            );

            for ty in &mut module.types {
                let type_config = self.config.type_configuration.get(&ty.full_name());
                prune_members(ty, type_config, remove_obsolete, &mut ctx)?;
            }

            stats.merge(&ctx.stats);
        }

        info!(
            "Pruned {} in {:.2?}: {}",
            assembly.name,
            start.elapsed(),
            stats
        );
        Ok(stats)
    }
}
