use std::path::{Path, PathBuf};

use dotprune::project::{RunOptions, RunReport, Runner};

use crate::{
    app::GlobalOptions,
    commands::common::{file_display_name, load_config},
    output::{print_output, Align, TabWriter},
};

pub struct PruneOptions<'a> {
    pub refs: &'a [PathBuf],
    pub out: &'a Path,
    pub dotnet_root: Option<&'a Path>,
    pub parallel: bool,
}

pub fn run(config: &Path, options: &PruneOptions<'_>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let config = load_config(config)?;

    let mut run_options = RunOptions::new()
        .output_dir(options.out)
        .parallel(options.parallel);
    if !options.refs.is_empty() {
        run_options = run_options.search_roots(options.refs.to_vec());
    }
    if let Some(root) = options.dotnet_root {
        run_options = run_options.dotnet_root(root);
    }

    let report = Runner::new(run_options).run(&config)?;
    print_output(&report, opts, print_report)?;

    if !report.is_complete_success() {
        anyhow::bail!(
            "{} of {} assemblies failed",
            report.failure_count(),
            report.success_count() + report.failure_count()
        );
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    let mut table = TabWriter::new(vec![
        ("Assembly", Align::Left),
        ("Version", Align::Left),
        ("Types", Align::Right),
        ("Methods", Align::Right),
        ("Fields", Align::Right),
        ("Properties", Align::Right),
        ("Events", Align::Right),
        ("Interfaces", Align::Right),
        ("Stubbed", Align::Right),
        ("Output", Align::Left),
    ]);
    for outcome in &report.succeeded {
        let stats = &outcome.stats;
        table.row(vec![
            outcome.name.clone(),
            outcome.version.to_string(),
            stats.types_removed.to_string(),
            stats.methods_removed.to_string(),
            stats.fields_removed.to_string(),
            stats.properties_removed.to_string(),
            stats.events_removed.to_string(),
            stats.interfaces_removed.to_string(),
            stats.bodies_stubbed.to_string(),
            outcome
                .outputs
                .iter()
                .map(|path| file_display_name(path))
                .collect::<Vec<_>>()
                .join(", "),
        ]);
    }
    table.print();

    if !report.failed.is_empty() {
        println!();
        println!("Failed:");
        for failure in &report.failed {
            println!("  {}: {}", failure.key, failure.error);
        }
    }

    println!();
    println!("Total: {}", report.totals);
}
