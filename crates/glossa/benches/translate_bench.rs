//! Benchmarks for the translation hot paths.
//!
//! Run with: cargo bench -p glossa --bench translate_bench
//!
//! Workloads:
//! - **translate**: direct component/key lookup, plain and plural.
//! - **string_key**: enum-registered values vs. scan-fallback values.
//! - **template**: `t()` over mixed component and variable markers.
//! - **constants**: merged-view rebuild after a mutation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glossa::{
    ComponentConfig, EngineConfig, LocaleStrings, PluralCategory, PluralForms, StringKeyEnum,
    TranslationEngine, Variables,
};
use std::hint::black_box;

// ── Fixtures ────────────────────────────────────────────────────────────

fn component(id: &str, keys: usize) -> ComponentConfig {
    let mut en = LocaleStrings::new()
        .with("greet", "Hello, {name}! Welcome to {Site}.")
        .with(
            "files",
            PluralForms::new()
                .with(PluralCategory::One, "{count} file")
                .with(PluralCategory::Other, "{count} files"),
        );
    for i in 0..keys {
        en.insert(format!("{id}_key_{i}"), format!("Value {i} for {{name}}"));
    }
    ComponentConfig::new(id).language("en", en)
}

fn engine(components: usize, keys: usize) -> TranslationEngine {
    let mut engine = TranslationEngine::new(EngineConfig::default().default_language("en"))
        .expect("valid config");
    for c in 0..components {
        engine
            .register_component(component(&format!("comp{c}"), keys))
            .expect("unique component");
    }
    engine
        .register_constants("core", Variables::from([("Site", "Acme")]), None)
        .expect("constants");
    engine
}

// ── Benchmark Functions ─────────────────────────────────────────────────

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    let engine = engine(4, 100);
    let name = Variables::from([("name", "Ada")]);
    let count = Variables::new().with("count", 42);

    group.bench_function("plain", |b| {
        b.iter(|| black_box(engine.translate("comp0", "greet", black_box(&name), None)));
    });
    group.bench_function("plural", |b| {
        b.iter(|| black_box(engine.translate("comp0", "files", black_box(&count), None)));
    });
    group.bench_function("safe_missing", |b| {
        b.iter(|| black_box(engine.safe_translate("comp0", "absent", &name, None)));
    });
    group.finish();
}

fn bench_string_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_key");

    for components in [1usize, 10, 50] {
        let mut engine = engine(components, 50);
        let last = format!("comp{}", components - 1);
        let value = format!("{last}_key_49");

        group.bench_with_input(
            BenchmarkId::new("scan_fallback", components),
            &value,
            |b, value| {
                b.iter(|| {
                    black_box(engine.safe_translate_string_key(value, &Variables::new(), None))
                });
            },
        );

        engine
            .register_string_key_enum(&StringKeyEnum::new(last, [value.clone()]), None)
            .expect("enum");
        group.bench_with_input(
            BenchmarkId::new("registered", components),
            &value,
            |b, value| {
                b.iter(|| {
                    black_box(engine.safe_translate_string_key(value, &Variables::new(), None))
                });
            },
        );
    }
    group.finish();
}

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("template");
    let engine = engine(4, 20);
    let vars = Variables::new().with("name", "Ada").with("count", 3);

    for (label, template) in [
        ("no_markers", "A plain sentence with no markers at all, repeated twice."),
        ("variables", "{name} has {count} new messages, {name}."),
        ("mixed", "{{comp0.greet}} {{comp1.files}} {{ghost.key}} {name}"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), template, |b, t| {
            b.iter(|| black_box(engine.t(black_box(t), &vars, None)));
        });
    }
    group.finish();
}

fn bench_constants(c: &mut Criterion) {
    let mut group = c.benchmark_group("constants");
    let mut engine = engine(1, 1);
    for i in 0..200 {
        engine
            .register_constants(
                &format!("owner{i}"),
                Variables::new().with(format!("K{i}"), i),
                None,
            )
            .expect("distinct keys");
    }

    let mut n = 0i64;
    group.bench_function("update_then_merge", |b| {
        b.iter(|| {
            n += 1;
            engine
                .update_constants("owner0", Variables::new().with("K0", n))
                .expect("update");
            black_box(engine.merged_constants().len())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_translate,
    bench_string_key,
    bench_template,
    bench_constants
);
criterion_main!(benches);
