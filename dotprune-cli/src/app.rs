use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dotprune - policy-driven pruning of .NET assembly metadata
#[derive(Debug, Parser)]
#[command(name = "dotprune", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prune every assembly named by a policy and write the results.
    Prune {
        /// Path to the JSON policy document.
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Search root for input and referenced documents; repeatable. Defaults to refs and libs.
        #[arg(long = "refs", value_name = "DIR")]
        refs: Vec<PathBuf>,

        /// Output directory, created when missing.
        #[arg(short, long, value_name = "DIR", default_value = "out")]
        out: PathBuf,

        /// dotnet installation searched for shared frameworks. Defaults to DOTNET_ROOT.
        #[arg(long, value_name = "DIR")]
        dotnet_root: Option<PathBuf>,

        /// Process assemblies in parallel.
        #[arg(long)]
        parallel: bool,
    },

    /// Load and validate a policy without touching any assembly.
    Check {
        /// Path to the JSON policy document.
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// List the types of a model document with their member counts.
    Inspect {
        /// Path to the model document.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}
