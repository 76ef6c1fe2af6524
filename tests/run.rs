//! End-to-end tests of a pruning run over model documents on disk.

use std::{fs, path::Path};

use dotprune::{
    prelude::*,
    project::{NETCORE_FAMILY, SHARED_DIR},
    Result,
};

const RUNTIME: &str = "System.Runtime";

fn external(full_name: &str) -> TypeSignature {
    TypeSignature::Class(TypeRef::external(full_name, RUNTIME))
}

/// `System.Runtime` with `System.Object` and a public `System.Uri`.
fn runtime() -> AssemblyDef {
    let mut assembly = AssemblyDef::new(RUNTIME, AssemblyVersion::new(8, 0, 0, 0));
    let mut module = ModuleDef::new("System.Runtime.dll");
    module
        .types
        .push(TypeDef::new("System", "Object", TypeVisibility::Public));
    let mut uri = TypeDef::new("System", "Uri", TypeVisibility::Public);
    uri.base = Some(TypeSignature::class("System.Object"));
    module.types.push(uri);
    assembly.modules.push(module);
    assembly
}

/// `App`, targeting .NET 8, with a widget whose API mentions `System.Uri`.
fn app() -> AssemblyDef {
    let mut assembly = AssemblyDef::new("App", AssemblyVersion::new(1, 0, 0, 0));
    assembly.custom_attributes.push(CustomAttribute::new(
        TypeRef::external(
            "System.Runtime.Versioning.TargetFrameworkAttribute",
            RUNTIME,
        ),
        vec![dotprune::metadata::customattributes::CustomAttributeArgument::String(
            ".NETCoreApp,Version=v8.0".to_string(),
        )],
    ));

    let mut module = ModuleDef::new("App.dll");
    let mut widget = TypeDef::new("App", "Widget", TypeVisibility::Public);
    widget.base = Some(external("System.Object"));
    let mut open = MethodDef::new(
        "Open",
        MemberAccess::Public,
        SignatureMethod::instance(TypeSignature::Void, vec![external("System.Uri")]),
    );
    open.body = Some(MethodBody::stub());
    widget.methods.push(open);
    widget.methods.push(MethodDef::new(
        "Internal",
        MemberAccess::Assembly,
        SignatureMethod::instance(TypeSignature::Void, vec![]),
    ));
    module.types.push(widget);
    module
        .types
        .push(TypeDef::new("App", "Hidden", TypeVisibility::NotPublic));

    assembly.modules.push(module);
    assembly
}

fn write(assembly: &AssemblyDef, dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    JsonModelProvider::new().write(assembly, dir).unwrap();
}

fn policy(dir: &Path, document: &str) -> Result<Configuration> {
    let path = dir.join("prune.json");
    fs::write(&path, document)?;
    Configuration::from_file(&path)
}

/// The runtime is only reachable through the discovered shared framework directory.
#[test]
fn test_run_resolves_through_shared_framework() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    write(&app(), &root.join("refs"));
    write(
        &runtime(),
        &root
            .join("dotnet")
            .join(SHARED_DIR)
            .join("Microsoft.NETCore.App")
            .join("8.0.3"),
    );
    // an older band that must not be picked
    write(
        &AssemblyDef::new(RUNTIME, AssemblyVersion::new(7, 0, 0, 0)),
        &root
            .join("dotnet")
            .join(SHARED_DIR)
            .join("Microsoft.NETCore.App")
            .join("7.0.9"),
    );

    let config = policy(
        root,
        r#"{"Assemblies":{"App":{"MakeReferenceAssembly":true,"Rename":{"NewName":"App.Ref","NewVersion":"1.0.1"}}}}"#,
    )?;
    let options = RunOptions::new()
        .search_roots(vec![root.join("refs")])
        .output_dir(root.join("out"))
        .dotnet_root(root.join("dotnet"));

    let report = Runner::new(options).run(&config)?;
    assert!(report.is_complete_success(), "{:?}", report.failed);

    // without the runtime family the same run fails instead of resolving elsewhere
    let bare = RunOptions::new()
        .search_roots(vec![root.join("refs")])
        .output_dir(root.join("bare-out"))
        .dotnet_root(root.join("no-dotnet"));
    let failed = Runner::new(bare).run(&config)?;
    assert_eq!(failed.failure_count(), 1);
    assert!(failed.failed[0].error.contains(NETCORE_FAMILY));

    let output = root.join("out").join("App.Ref.dll.json");
    assert!(output.is_file());
    let pruned = JsonModelProvider::new().load(&output)?;
    assert_eq!(pruned.name, "App.Ref");
    assert_eq!(pruned.version, AssemblyVersion::new(1, 0, 1, 0));

    let module = &pruned.modules[0];
    assert!(module.find_type("App.Hidden").is_none());
    let widget = module.find_type("App.Widget").expect("widget kept");
    assert_eq!(widget.methods.len(), 1);
    assert!(widget.methods[0].body.as_ref().is_some_and(MethodBody::is_stub));

    let outcome = report.outcome("App").expect("outcome");
    assert_eq!(outcome.stats.types_removed, 1);
    assert_eq!(outcome.stats.methods_removed, 1);
    Ok(())
}

/// A failing assembly is reported and the others are still written.
#[test]
fn test_run_isolates_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    write(&app(), &root.join("refs"));
    write(&runtime(), &root.join("libs"));

    let mut other = AssemblyDef::new("Other", AssemblyVersion::new(1, 0, 0, 0));
    let mut module = ModuleDef::new("Other.dll");
    module
        .types
        .push(TypeDef::new("Other", "Thing", TypeVisibility::Public));
    other.modules.push(module);
    write(&other, &root.join("refs"));
    fs::create_dir_all(
        root.join("dotnet")
            .join(SHARED_DIR)
            .join(NETCORE_FAMILY)
            .join("8.0.1"),
    )?;

    let config = policy(
        root,
        r#"{"Assemblies":{
            "App":{"TypeConfiguration":{"App.Widget":{"Mode":"Remove","Methods":["Open"]}}},
            "Missing":{},
            "Other":{"Mode":"Remove","Types":["Other.Thing"]}
        }}"#,
    )?;
    let options = RunOptions::new()
        .search_roots(vec![root.join("refs"), root.join("libs")])
        .output_dir(root.join("out"))
        .dotnet_root(root.join("dotnet"))
        .parallel(true);

    let report = Runner::new(options).run(&config)?;

    let failed: Vec<&str> = report.failed.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(failed, vec!["App", "Missing"]);
    assert!(report.failed[0].error.contains("Open"), "{}", report.failed[0].error);
    assert_eq!(report.success_count(), 1);
    assert!(!root.join("out").join("App.dll.json").exists());

    let other = JsonModelProvider::new().load(&root.join("out").join("Other.dll.json"))?;
    assert!(other.modules[0].types.is_empty());
    assert_eq!(report.totals.types_removed, 1);
    Ok(())
}
