//! Benchmarks for the pruning engine.
//!
//! Prunes a synthetic module of public types with methods, fields and nested types, where
//! some types are obsolete and other members mention them:
//! - default policy (obsolete removal and signature cascades)
//! - reference assembly (visibility pruning and body stubbing)
//! - explicit type list in keep mode

extern crate dotprune;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dotprune::prelude::*;
use std::hint::black_box;

const TYPES: usize = 200;
const METHODS: usize = 20;

fn body() -> MethodBody {
    MethodBody {
        max_stack: 8,
        init_locals: true,
        locals: vec![TypeSignature::I4],
        instructions: vec![
            dotprune::metadata::method::Instruction::simple(0x16, "ldc.i4.0"),
            dotprune::metadata::method::Instruction::simple(0x0A, "stloc.0"),
            dotprune::metadata::method::Instruction::ret(),
        ],
        exception_handlers: Vec::new(),
    }
}

/// Build an assembly where every tenth type is obsolete and every type has a method
/// taking the previous type.
fn synthetic_assembly() -> AssemblyDef {
    let mut assembly = AssemblyDef::new("Bench", AssemblyVersion::new(1, 0, 0, 0));
    let mut module = ModuleDef::new("Bench.dll");

    for i in 0..TYPES {
        let mut ty = TypeDef::new("Bench", format!("Type{i}"), TypeVisibility::Public);
        if i % 10 == 0 {
            ty.custom_attributes
                .push(CustomAttribute::obsolete(Some("gone")));
        }

        for m in 0..METHODS {
            let access = if m % 3 == 0 {
                MemberAccess::Private
            } else {
                MemberAccess::Public
            };
            let params = if m == 0 && i > 0 {
                vec![TypeSignature::class(format!("Bench.Type{}", i - 1))]
            } else {
                vec![TypeSignature::I4, TypeSignature::String]
            };
            let mut method = MethodDef::new(
                format!("Method{m}"),
                access,
                SignatureMethod::instance(TypeSignature::Void, params),
            );
            method.body = Some(body());
            ty.methods.push(method);
        }

        for f in 0..5 {
            ty.fields.push(FieldDef::new(
                format!("_field{f}"),
                MemberAccess::Private,
                TypeSignature::I4,
            ));
        }

        let mut nested = TypeDef::new("", "Inner", TypeVisibility::NestedPrivate);
        let mut method = MethodDef::new(
            "Run",
            MemberAccess::Public,
            SignatureMethod::instance(TypeSignature::Void, vec![]),
        );
        method.body = Some(body());
        nested.methods.push(method);
        ty.add_nested(nested);

        module.types.push(ty);
    }

    assembly.modules.push(module);
    assembly.link();
    assembly
}

fn bench_with(c: &mut Criterion, name: &str, config: AssemblyConfig) {
    let assembly = synthetic_assembly();
    let external = TypeIndex::default();

    c.bench_function(name, |b| {
        b.iter_batched(
            || assembly.clone(),
            |mut assembly| {
                let stats = AssemblyPruner::new(&config, &external)
                    .prune(black_box(&mut assembly))
                    .unwrap();
                black_box(stats)
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark the default policy: obsolete types and the methods mentioning them.
fn bench_prune_default(c: &mut Criterion) {
    bench_with(c, "prune_default", AssemblyConfig::default());
}

/// Benchmark producing a reference assembly.
fn bench_prune_reference(c: &mut Criterion) {
    bench_with(
        c,
        "prune_reference",
        AssemblyConfig {
            make_reference_assembly: true,
            ..AssemblyConfig::default()
        },
    );
}

/// Benchmark keeping an explicit half of the types.
fn bench_prune_keep_list(c: &mut Criterion) {
    bench_with(
        c,
        "prune_keep_list",
        AssemblyConfig {
            mode: Some(Mode::Keep),
            types: (0..TYPES / 2).map(|i| format!("Bench.Type{i}")).collect(),
            ..AssemblyConfig::default()
        },
    );
}

criterion_group!(
    benches,
    bench_prune_default,
    bench_prune_reference,
    bench_prune_keep_list
);
criterion_main!(benches);
