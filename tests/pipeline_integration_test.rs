//! End-to-end tests of `analyze_component` through the library API.

mod common;

use blinkreact::harness::ClockMode;
use blinkreact::{analyze_component, AnalysisError};
use common::{virtual_time_config, ComponentFixture};
use pretty_assertions::assert_eq;
use std::path::Path;

#[tokio::test]
async fn test_todo_list_render_metrics() {
    let fixture = ComponentFixture::todo_list();
    let report = analyze_component(&fixture.path, &virtual_time_config())
        .await
        .unwrap();

    let render = &report.render_metrics;
    assert_eq!(report.component_name.as_str(), "TodoList");
    assert_eq!(render.total_renders, 3);
    assert_eq!(render.render_times, vec![5.23, 3.45, 3.12]);
    assert!((render.average_render_time.unwrap() - 3.9333).abs() < 1e-3);
    assert_eq!(render.max_render_time, Some(5.23));
    assert_eq!(render.unnecessary_renders, 1);
}

#[tokio::test]
async fn test_todo_list_state_metrics() {
    let fixture = ComponentFixture::todo_list();
    let report = analyze_component(&fixture.path, &virtual_time_config())
        .await
        .unwrap();

    let details: Vec<(&str, &str, usize, usize)> = report
        .state_metrics
        .state_update_details
        .iter()
        .map(|r| {
            (
                r.state_name.as_str(),
                r.setter_name.as_str(),
                r.update_count,
                r.redundant_updates,
            )
        })
        .collect();

    assert_eq!(
        details,
        vec![
            ("todos", "setTodos", 4, 0),
            ("newTodo", "setNewTodo", 2, 0),
            ("filter", "setFilter", 3, 1),
            ("count", "setCount", 1, 0),
        ]
    );
    assert_eq!(report.state_metrics.total_state_updates, 10);
    assert_eq!(report.state_metrics.redundant_state_updates, 1);
}

#[tokio::test]
async fn test_rerun_on_unchanged_source_is_identical() {
    let fixture = ComponentFixture::todo_list();
    let config = virtual_time_config();

    let first = analyze_component(&fixture.path, &config).await.unwrap();
    let second = analyze_component(&fixture.path, &config).await.unwrap();

    assert_eq!(first.render_metrics, second.render_metrics);
    assert_eq!(first.state_metrics, second.state_metrics);
}

#[tokio::test]
async fn test_no_artifacts_remain_after_success() {
    let fixture = ComponentFixture::todo_list();
    analyze_component(&fixture.path, &virtual_time_config())
        .await
        .unwrap();
    assert_eq!(fixture.files(), vec!["TodoList.tsx"]);
}

#[tokio::test]
async fn test_no_artifacts_remain_after_timeout() {
    let fixture = ComponentFixture::todo_list();
    let mut config = virtual_time_config();
    config.harness.clock = ClockMode::Real;
    config.harness.settle_interval_ms = 1_000;
    config.harness.timeout_ms = 50;

    let err = analyze_component(&fixture.path, &config).await.unwrap_err();

    assert!(matches!(err, AnalysisError::HarnessTimeout { .. }));
    assert_eq!(err.to_string(), "Render harness timed out after 50ms");
    assert_eq!(fixture.files(), vec!["TodoList.tsx"]);
}

#[tokio::test]
async fn test_concurrent_runs_do_not_collide() {
    let fixture = ComponentFixture::todo_list();
    let config = virtual_time_config();

    let (a, b) = tokio::join!(
        analyze_component(&fixture.path, &config),
        analyze_component(&fixture.path, &config)
    );

    assert_eq!(a.unwrap().render_metrics, b.unwrap().render_metrics);
    assert_eq!(fixture.files(), vec!["TodoList.tsx"]);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let err = analyze_component(Path::new("/no/such/dir/Card.tsx"), &virtual_time_config())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NotFound { .. }));
    assert_eq!(err.code().as_str(), "E001");
}

#[tokio::test]
async fn test_non_component_is_rejected_with_path() {
    let fixture = ComponentFixture::new(
        "format.ts",
        "export function formatDate(d: Date) { return d.toISOString(); }\n",
    );

    let err = analyze_component(&fixture.path, &virtual_time_config())
        .await
        .unwrap_err();

    match err {
        AnalysisError::NotAComponent { path } => assert_eq!(path, fixture.path),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fixture.files(), vec!["format.ts"]);
}

#[tokio::test]
async fn test_component_without_state_hooks() {
    let fixture = ComponentFixture::new(
        "Badge.jsx",
        "import React from 'react';\nexport default function Badge({ label }) {\n  return <span>{label}</span>;\n}\n",
    );

    let report = analyze_component(&fixture.path, &virtual_time_config())
        .await
        .unwrap();

    assert_eq!(report.state_metrics.total_state_updates, 0);
    assert!(report.state_metrics.state_update_details.is_empty());
    assert_eq!(report.render_metrics.total_renders, 3);
}
