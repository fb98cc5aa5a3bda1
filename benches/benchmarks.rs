//! Benchmark suite for codeguard.
//!
//! This module provides performance benchmarks for:
//! - Deep merge of configuration trees
//! - Configuration resolution from disk
//! - Report building from linter output
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Save baseline for comparison
//! cargo bench -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -- --baseline main
//! ```

use codeguard::config::merge::{merge, merge_values};
use codeguard::config::{defaults, ConfigLoader};
use codeguard::quality::{DiagnosticSeverity, FileResult, RawDiagnostic};
use codeguard::reporting::ReportBuilder;
use codeguard::tools::{lint, StaticProbe};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Merge Benchmarks
// ============================================================================

fn user_override(index: usize) -> Value {
    json!({
        "lint": {
            "ignorePatterns": [format!("generated-{index}"), "coverage"],
            "rules": { format!("custom/rule-{index}"): "warn" }
        },
        "format": { "tabWidth": 4, "printWidth": 120 },
        "staticAnalysis": { "rules": { "sonarjs/cognitive-complexity": ["error", 20] } }
    })
}

/// Merge onto the full default tree with a growing number of layers.
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let Ok(base) = defaults::default_value() else {
        return;
    };

    group.bench_function("single_override", |b| {
        let overlay = user_override(0);
        b.iter(|| black_box(merge_values(black_box(&base), black_box(&overlay))));
    });

    for layers in [2, 8, 32] {
        let overlays: Vec<Value> = (0..layers).map(user_override).collect();
        let refs: Vec<&Value> = overlays.iter().collect();

        group.throughput(Throughput::Elements(layers as u64));
        group.bench_with_input(BenchmarkId::new("layers", layers), &refs, |b, refs| {
            b.iter(|| black_box(merge(black_box(&base), refs)));
        });
    }

    group.finish();
}

// ============================================================================
// Resolution Benchmarks
// ============================================================================

/// Cold resolution from a nested directory versus a cached load.
fn bench_config_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_resolution");

    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp.path().join("codeguard.config.json"),
        user_override(1).to_string(),
    )
    .expect("Failed to write config");
    let nested = temp.path().join("packages/web/src");
    fs::create_dir_all(&nested).expect("Failed to create nested dir");

    let loader = ConfigLoader::new(&nested).with_user_config_path(None);

    group.bench_function("cold", |b| {
        b.iter(|| {
            loader.reset_cache();
            black_box(loader.load())
        });
    });

    group.bench_function("cached", |b| {
        loader.load();
        b.iter(|| black_box(loader.load()));
    });

    group.finish();
}

// ============================================================================
// Report Benchmarks
// ============================================================================

const RULES: &[Option<&str>] = &[
    Some("no-identical-conditions"),
    Some("no-hardcoded-credentials"),
    Some("security/detect-eval"),
    Some("prefer-const"),
    None,
];

fn lint_results(files: usize, per_file: usize) -> Vec<FileResult> {
    (0..files)
        .map(|f| {
            (0..per_file).fold(FileResult::new(format!("src/file_{f}.ts")), |file, i| {
                let severity = if i % 2 == 0 {
                    DiagnosticSeverity::Error
                } else {
                    DiagnosticSeverity::Warning
                };
                let mut diagnostic = RawDiagnostic::new(severity, "issue").at(i as u32 + 1, 1);
                if let Some(rule) = RULES[i % RULES.len()] {
                    diagnostic = diagnostic.with_rule(rule);
                }
                file.with_message(diagnostic)
            })
        })
        .collect()
}

/// Report building over growing linter output.
fn bench_report_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_building");
    let builder = ReportBuilder::new("bench");

    for files in [10, 100, 500] {
        let results = lint_results(files, 20);
        group.throughput(Throughput::Elements((files * 20) as u64));
        group.bench_with_input(BenchmarkId::new("files", files), &results, |b, results| {
            b.iter(|| black_box(builder.build(black_box(results))));
        });
    }

    group.finish();
}

/// Lint fragment assembly and rule folding.
fn bench_lint_build(c: &mut Criterion) {
    let mut config = defaults::default_config();
    config.lint.react = true;

    c.bench_function("lint_effective_rules", |b| {
        b.iter(|| {
            let built = lint::build(black_box(&config), &StaticProbe::all());
            black_box(built.effective_rules())
        });
    });
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(config_benches, bench_merge, bench_config_resolution);

criterion_group!(report_benches, bench_report_building, bench_lint_build);

criterion_main!(config_benches, report_benches);
