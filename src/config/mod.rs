//! Configuration loaded from `.blinkreact.toml`.

mod core;
mod loader;

pub use self::core::{
    ArtifactConfig, BlinkConfig, HarnessConfig, OutputConfig, ReportFormat, MAX_SETTLE_INTERVAL_MS,
};
pub use self::loader::{
    directory_ancestors, load_config, load_config_from, load_config_starting_at,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AnalysisError;
    use crate::harness::{ClockMode, HarnessMode};
    use indoc::indoc;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BlinkConfig::default();
        assert_eq!(config.harness.mode, HarnessMode::Simulated);
        assert_eq!(config.harness.settle_interval_ms, 500);
        assert_eq!(config.harness.timeout_ms, 10_000);
        assert_eq!(config.harness.clock, ClockMode::Real);
        assert_eq!(config.harness.runner, vec!["npx", "--yes", "tsx"]);
        assert_eq!(config.artifacts.dir, None);
        assert_eq!(config.output.format, ReportFormat::Markdown);
        assert_eq!(config.output.path, PathBuf::from("PERFORMANCE_REPORT.md"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [harness]
            clock = "virtual"
            settle_interval_ms = 100

            [output]
            format = "json"
        "#})
        .unwrap();

        assert_eq!(config.harness.clock, ClockMode::Virtual);
        assert_eq!(config.harness.settle_interval_ms, 100);
        assert_eq!(config.harness.timeout_ms, 10_000);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.output.path, PathBuf::from("PERFORMANCE_REPORT.md"));
    }

    #[test]
    fn test_timeout_must_exceed_three_settles() {
        let err = parse_and_validate_config(indoc! {"
            [harness]
            settle_interval_ms = 1000
            timeout_ms = 3000
        "})
        .unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }

    #[test]
    fn test_settle_interval_upper_bound() {
        let mut config = BlinkConfig::default();
        config.harness.settle_interval_ms = MAX_SETTLE_INTERVAL_MS + 1;
        config.harness.timeout_ms = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = BlinkConfig::default();
        config.harness.settle_interval_ms = 0;
        config.harness.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_process_mode_requires_runner() {
        let mut config = BlinkConfig::default();
        config.harness.mode = HarnessMode::Process;
        config.harness.runner.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ancestor_search_finds_config() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[harness]\nmode = \"process\"\n",
        )
        .unwrap();
        let nested = root.path().join("src").join("components");
        std::fs::create_dir_all(&nested).unwrap();

        let config = load_config_starting_at(nested);
        assert_eq!(config.harness.mode, HarnessMode::Process);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "[harness\n").unwrap();
        let config = load_config_starting_at(root.path().to_path_buf());
        assert_eq!(config, BlinkConfig::default());
    }

    #[test]
    fn test_explicit_file_errors_are_reported() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.toml");
        std::fs::write(&path, "[harness]\ntimeout_ms = 0\n").unwrap();

        match load_config_from(&path).unwrap_err() {
            AnalysisError::Config { path: Some(p), .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            load_config_from(&root.path().join("absent.toml")),
            Err(AnalysisError::Io { .. })
        ));
    }

    #[test]
    fn test_directory_ancestors_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
