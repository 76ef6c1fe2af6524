use std::path::Path;

use dotprune::metadata::typesystem::TypeDef;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_model,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_framework: Option<String>,
    pub modules: Vec<ModuleSummary>,
}

#[derive(Debug, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub types: Vec<TypeSummary>,
}

#[derive(Debug, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub visibility: String,
    pub methods: usize,
    pub fields: usize,
    pub properties: usize,
    pub events: usize,
    pub interfaces: usize,
}

impl From<&TypeDef> for TypeSummary {
    fn from(ty: &TypeDef) -> Self {
        TypeSummary {
            name: ty.full_name(),
            visibility: ty.visibility.to_string(),
            methods: ty.methods.len(),
            fields: ty.fields.len(),
            properties: ty.properties.len(),
            events: ty.events.len(),
            interfaces: ty.interfaces.len(),
        }
    }
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let assembly = load_model(path)?;

    let summary = ModelSummary {
        name: assembly.name.clone(),
        version: assembly.version.to_string(),
        target_framework: assembly.target_framework()?.map(|tf| tf.to_string()),
        modules: assembly
            .modules
            .iter()
            .map(|module| ModuleSummary {
                name: module.name.clone(),
                types: module
                    .all_types()
                    .into_iter()
                    .map(TypeSummary::from)
                    .collect(),
            })
            .collect(),
    };

    print_output(&summary, opts, |summary| {
        println!("{} {}", summary.name, summary.version);
        if let Some(framework) = &summary.target_framework {
            println!("Target: {framework}");
        }
        for module in &summary.modules {
            println!();
            println!("{} ({} types)", module.name, module.types.len());
            let mut table = TabWriter::new(vec![
                ("Type", Align::Left),
                ("Visibility", Align::Left),
                ("Methods", Align::Right),
                ("Fields", Align::Right),
                ("Properties", Align::Right),
                ("Events", Align::Right),
                ("Interfaces", Align::Right),
            ]);
            for ty in &module.types {
                table.row(vec![
                    ty.name.clone(),
                    ty.visibility.clone(),
                    ty.methods.to_string(),
                    ty.fields.to_string(),
                    ty.properties.to_string(),
                    ty.events.to_string(),
                    ty.interfaces.to_string(),
                ]);
            }
            table.print();
        }
    })
}
