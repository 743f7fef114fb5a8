//! Resolution benchmark
//!
//! Measures declaration merging alone and the full check pipeline on
//! synthetic programs of increasing size. Every extension is split into
//! three partial fragments, extends the previous one, and augments a
//! constrained generic class, so each stage has real work to do.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use std::time::Duration;
use xtc::binder::{
    ConstraintSyntax, DeclarationTable, MemberFragment, Modifiers, TypeDeclarationFragment, TypeParameterSyntax,
    TypeSyntax,
};
use xtc::common::Interner;
use xtc::{Compilation, CompilationOptions};

/// `extension_count` extensions, each in three partial fragments.
fn generate_program(extension_count: usize) -> Vec<TypeDeclarationFragment> {
    let mut fragments = Vec::with_capacity(extension_count * 3 + 2);
    fragments.push(TypeDeclarationFragment::class("Payload"));
    fragments.push(
        TypeDeclarationFragment::class("Box").with_type_parameter(
            TypeParameterSyntax::new("T").with_constraint(ConstraintSyntax::ReferenceType { annotated: false }),
        ),
    );

    for i in 0..extension_count {
        let name = format!("Ext{i}");
        let file = format!("ext{i}.cs");
        let underlying = TypeSyntax::generic("Box", vec![TypeSyntax::named("Payload")]);

        let mut head = TypeDeclarationFragment::explicit_extension(&name)
            .for_type(underlying)
            .partial()
            .in_file(&file);
        if i > 0 {
            head = head.with_base(TypeSyntax::named(format!("Ext{}", i - 1)));
        }
        fragments.push(head);

        fragments.push(
            TypeDeclarationFragment::explicit_extension(&name)
                .partial()
                .in_file(&file)
                .with_member(MemberFragment::method(format!("Describe{i}")).with_modifiers(Modifiers::PUBLIC))
                .with_member(MemberFragment::field("Shared", TypeSyntax::int()).with_modifiers(Modifiers::STATIC)),
        );

        // Every tenth extension carries an instance field, so the reporter
        // is exercised too.
        let mut tail = TypeDeclarationFragment::explicit_extension(&name).partial().in_file(&file);
        if i % 10 == 0 {
            tail = tail.with_member(MemberFragment::field("state", TypeSyntax::string()));
        }
        fragments.push(tail);
    }
    fragments
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for count in [10, 100, 1000] {
        let fragments = generate_program(count);
        group.throughput(Throughput::Elements(fragments.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &fragments, |b, fragments| {
            b.iter(|| {
                let interner = Arc::new(Interner::new());
                let (arena, diagnostics) = DeclarationTable::merge(interner, fragments.clone());
                black_box((arena.len(), diagnostics.len()));
            });
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(20);

    for count in [10, 100, 1000] {
        let fragments = generate_program(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &fragments, |b, fragments| {
            b.iter(|| {
                let mut compilation = Compilation::new(CompilationOptions::default());
                compilation.add_fragments(fragments.iter().cloned());
                let result = compilation.compile().expect("synthetic program compiles");
                black_box(result.diagnostics().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge, bench_compile);
criterion_main!(benches);
