mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .expect("failed to set Ctrl+C handler");

    let cli = Cli::parse();

    // Show dotprune info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("dotprune", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Prune {
            config,
            refs,
            out,
            dotnet_root,
            parallel,
        } => commands::prune::run(
            config,
            &commands::prune::PruneOptions {
                refs,
                out,
                dotnet_root: dotnet_root.as_deref(),
                parallel: *parallel,
            },
            &cli.global,
        ),
        Command::Check { config } => commands::check::run(config, &cli.global),
        Command::Inspect { path } => commands::inspect::run(path, &cli.global),
    }
}
