//! Benchmarks for the source heuristics and transcript parsing.

use blinkreact::core::ComponentIdentity;
use blinkreact::instrumentation::render_instrumented_source;
use blinkreact::{analyze_state_updates, classify, extract_render_metrics};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const TODO_LIST: &str = include_str!("../tests/data/TodoList.tsx");

/// A large component built by repeating the state-heavy fixture body.
fn large_component(copies: usize) -> String {
    let mut source = String::from("import React, { useState } from 'react';\n");
    for i in 0..copies {
        source.push_str(&format!(
            "const [value{i}, setValue{i}] = useState(0);\nsetValue{i}(value{i});\nsetValue{i}(1), setValue{i}(2);\n"
        ));
    }
    source.push_str(TODO_LIST);
    source
}

fn transcript(commits: usize) -> String {
    (1..=commits)
        .map(|n| format!("[BlinkReact] Bench rendered {n} times, render duration: {:.2}ms\n", n as f64 * 0.37))
        .collect()
}

fn bench_classifier(c: &mut Criterion) {
    c.bench_function("classify_todo_list", |b| {
        b.iter(|| classify(black_box(TODO_LIST)))
    });
}

fn bench_state_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_analysis");
    group.bench_function("todo_list", |b| {
        b.iter(|| analyze_state_updates(black_box(TODO_LIST)))
    });
    let large = large_component(50);
    group.bench_function("fifty_hooks", |b| {
        b.iter(|| analyze_state_updates(black_box(&large)))
    });
    group.finish();
}

fn bench_render_metrics(c: &mut Criterion) {
    let text = transcript(1_000);
    c.bench_function("extract_render_metrics_1000_commits", |b| {
        b.iter(|| extract_render_metrics(black_box(&text)))
    });
}

fn bench_instrumentation(c: &mut Criterion) {
    let identity = ComponentIdentity::new("TodoList");
    c.bench_function("render_instrumented_source", |b| {
        b.iter(|| render_instrumented_source(black_box(TODO_LIST), &identity, "TodoList"))
    });
}

criterion_group!(
    benches,
    bench_classifier,
    bench_state_analysis,
    bench_render_metrics,
    bench_instrumentation
);
criterion_main!(benches);
