//! Run result types and statistics.
//!
//! A run processes every configured assembly independently. [`RunReport`] collects the
//! outcome of each one: what was written and what was removed for the assemblies that
//! succeeded, and the error message for the ones that failed.

use std::path::PathBuf;

use serde::Serialize;

use crate::{metadata::identity::AssemblyVersion, pruning::PruneStats};

/// The outcome of one successfully pruned assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyOutcome {
    /// The key of the assembly in the policy document
    pub key: String,
    /// Assembly name after any rename
    pub name: String,
    /// Assembly version after any rename
    pub version: AssemblyVersion,
    /// The model document that was loaded
    pub input: PathBuf,
    /// The documents written, one per module
    pub outputs: Vec<PathBuf>,
    /// What the pruning pass changed
    pub stats: PruneStats,
}

/// A configured assembly that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyFailure {
    /// The key of the assembly in the policy document
    pub key: String,
    /// The rendered error
    pub error: String,
}

/// Result of a pruning run.
///
/// # Usage
///
/// ```rust,no_run
/// use dotprune::config::Configuration;
/// use dotprune::project::{RunOptions, Runner};
///
/// # fn main() -> dotprune::Result<()> {
/// let config = Configuration::from_file("prune.json".as_ref())?;
/// let report = Runner::new(RunOptions::new()).run(&config)?;
///
/// if report.is_complete_success() {
///     println!("Pruned {} assemblies", report.success_count());
/// } else {
///     for failure in &report.failed {
///         println!("{}: {}", failure.key, failure.error);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Assemblies pruned and written, in policy order
    pub succeeded: Vec<AssemblyOutcome>,
    /// Assemblies that failed, in policy order
    pub failed: Vec<AssemblyFailure>,
    /// Statistics summed over every succeeded assembly
    pub totals: PruneStats,
}

impl RunReport {
    /// Create a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pruned assembly.
    pub fn record_success(&mut self, outcome: AssemblyOutcome) {
        self.totals.merge(&outcome.stats);
        self.succeeded.push(outcome);
    }

    /// Record a failed assembly.
    pub fn record_failure(&mut self, key: impl Into<String>, error: impl ToString) {
        self.failed.push(AssemblyFailure {
            key: key.into(),
            error: error.to_string(),
        });
    }

    /// Check whether every assembly was processed.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of assemblies pruned and written.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    /// Number of assemblies that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Every document written by the run.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.succeeded
            .iter()
            .flat_map(|outcome| outcome.outputs.iter())
    }

    /// The outcome of the assembly configured under `key`, if it succeeded.
    #[must_use]
    pub fn outcome(&self, key: &str) -> Option<&AssemblyOutcome> {
        self.succeeded.iter().find(|outcome| outcome.key == key)
    }
}
