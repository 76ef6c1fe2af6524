//! Run orchestration.
//!
//! A [`Runner`] applies a [`Configuration`] to every assembly it names. Each assembly is an
//! independent unit of work:
//!
//! 1. **Input lookup**: `{key}.dll` is located through the search roots of the run
//! 2. **Framework discovery**: for `.NETCoreApp` targets the matching shared framework
//!    directories become extra search roots (see [`FrameworkLocator`])
//! 3. **Pruning**: the [`AssemblyPruner`] applies the assembly's policy, resolving
//!    references through an [`AssemblyResolver`]
//! 4. **Output**: the pruned modules are written into the output directory
//!
//! A failure in any step is recorded in the [`RunReport`] and the remaining assemblies are
//! still processed. Assemblies can be processed in parallel with `rayon`.
//!
//! # Key Components
//!
//! - [`Runner`] - drives a run
//! - [`RunOptions`] - search roots, output directory, dotnet root and parallelism
//! - [`RunReport`] - per-assembly outcomes and failures
//! - [`FrameworkLocator`] - shared framework discovery
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use dotprune::config::Configuration;
//! use dotprune::project::{RunOptions, Runner};
//!
//! let config = Configuration::from_file("prune.json".as_ref())?;
//! let options = RunOptions::new().output_dir("ref").parallel(true);
//! let report = Runner::new(options).run(&config)?;
//! println!(
//!     "{} pruned, {} failed",
//!     report.success_count(),
//!     report.failure_count()
//! );
//! # Ok::<(), dotprune::Error>(())
//! ```

mod framework;
mod options;
mod result;

pub use framework::{
    best_match, FrameworkLocator, DOTNET_ROOT_VAR, FRAMEWORK_FAMILIES, NETCORE_FAMILY,
    SHARED_DIR,
};
pub use options::{RunOptions, DEFAULT_OUTPUT_DIR, DEFAULT_SEARCH_ROOTS};
pub use result::{AssemblyFailure, AssemblyOutcome, RunReport};

use std::{fs, sync::Arc};

use log::{error, info};
use rayon::prelude::*;

use crate::{
    config::{AssemblyConfig, Configuration},
    metadata::{
        loader::{JsonModelProvider, ModelProvider},
        typesystem::AssemblyResolver,
    },
    pruning::AssemblyPruner,
    Result,
};

/// Applies a policy document to the assemblies found in the search roots.
pub struct Runner {
    options: RunOptions,
    provider: Arc<dyn ModelProvider>,
}

impl Runner {
    /// Create a runner reading and writing JSON model documents.
    #[must_use]
    pub fn new(options: RunOptions) -> Self {
        Self::with_provider(options, Arc::new(JsonModelProvider::new()))
    }

    /// Create a runner using `provider` for every document it reads or writes.
    #[must_use]
    pub fn with_provider(options: RunOptions, provider: Arc<dyn ModelProvider>) -> Self {
        Runner { options, provider }
    }

    /// The options of this runner
    #[must_use]
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Prune every assembly of `config`.
    ///
    /// Per-assembly failures are recorded in the report and do not stop the run.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the output directory cannot be created.
    pub fn run(&self, config: &Configuration) -> Result<RunReport> {
        fs::create_dir_all(self.options.output())?;

        let results: Vec<(&String, Result<AssemblyOutcome>)> = if self.options.is_parallel() {
            config
                .assemblies
                .par_iter()
                .map(|(key, assembly)| (key, self.process(key, assembly)))
                .collect()
        } else {
            config
                .assemblies
                .iter()
                .map(|(key, assembly)| (key, self.process(key, assembly)))
                .collect()
        };

        let mut report = RunReport::new();
        for (key, result) in results {
            match result {
                Ok(outcome) => report.record_success(outcome),
                Err(err) => {
                    error!("Failed to prune {}: {}", key, err);
                    report.record_failure(key.as_str(), err);
                }
            }
        }
        Ok(report)
    }

    /// Prune the assembly configured under `key` and write its modules.
    ///
    /// The output directory must exist.
    ///
    /// # Errors
    /// Returns [`crate::Error::AssemblyNotFound`] if `{key}.dll` is in no search root,
    /// [`crate::Error::FrameworkNotFound`] if a required shared framework version is
    /// missing, and any load, pruning or write error of the assembly.
    pub fn process(&self, key: &str, config: &AssemblyConfig) -> Result<AssemblyOutcome> {
        let mut resolver = AssemblyResolver::new(
            self.provider.clone(),
            self.options.search_roots_list().to_vec(),
        );

        let input = resolver.locate(&format!("{key}.dll"))?;
        let mut assembly = resolver.load_path(&input)?;

        if let Some(framework) = assembly.target_framework()? {
            let locator = match self.options.dotnet_root_path() {
                Some(root) => FrameworkLocator::new(root),
                None => FrameworkLocator::from_env(),
            };
            for root in locator.locate(&framework)? {
                resolver.add_search_root(root);
            }
        }

        let stats = AssemblyPruner::new(config, &resolver).prune(&mut assembly)?;

        let outputs = self.provider.write(&assembly, self.options.output())?;
        for output in &outputs {
            info!("Wrote {}", output.display());
        }

        Ok(AssemblyOutcome {
            key: key.to_string(),
            name: assembly.name,
            version: assembly.version,
            input,
            outputs,
            stats,
        })
    }
}
