use std::path::Path;

use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_config,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct AssemblySummary {
    pub key: String,
    pub mode: String,
    pub reference_assembly: bool,
    pub remove_obsolete: bool,
    pub types: usize,
    pub type_configurations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let config = load_config(path)?;
    config.check_entries()?;

    let summaries: Vec<AssemblySummary> = config
        .assemblies
        .iter()
        .map(|(key, assembly)| AssemblySummary {
            key: key.clone(),
            mode: assembly.mode().to_string(),
            reference_assembly: assembly.make_reference_assembly,
            remove_obsolete: assembly.effective_remove_obsolete(),
            types: assembly.types.len(),
            type_configurations: assembly.type_configuration.len(),
            rename: assembly.rename.as_ref().map(|rename| {
                format!(
                    "{} {}",
                    rename.name().unwrap_or("-"),
                    rename.new_version.as_deref().unwrap_or("-")
                )
            }),
        })
        .collect();

    print_output(&summaries, opts, |summaries| {
        let mut table = TabWriter::new(vec![
            ("Assembly", Align::Left),
            ("Mode", Align::Left),
            ("Reference", Align::Left),
            ("Obsolete", Align::Left),
            ("Types", Align::Right),
            ("Configured", Align::Right),
            ("Rename", Align::Left),
        ]);
        for summary in summaries {
            table.row(vec![
                summary.key.clone(),
                summary.mode.clone(),
                summary.reference_assembly.to_string(),
                summary.remove_obsolete.to_string(),
                summary.types.to_string(),
                summary.type_configurations.to_string(),
                summary.rename.clone().unwrap_or_default(),
            ]);
        }
        table.print();
        println!();
        println!("{}: {} assemblies, valid", path.display(), summaries.len());
    })
}
