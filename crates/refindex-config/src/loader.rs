use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::experiment::ExperimentConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse experiment RON: {0}")]
    ParseError(String),
    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize experiment RON: {0}")]
    SerializeError(String),
}

/// Parse an experiment from a RON string.
pub fn load_experiment_from_str(ron_str: &str) -> Result<ExperimentConfig, LoadError> {
    let options = ron::Options::default();
    let config: ExperimentConfig = options
        .from_str(ron_str)
        .map_err(|e| LoadError::ParseError(e.to_string()))?;
    if config.medium.gradient.is_decreasing() {
        log::warn!(
            "Experiment '{}': index decreases toward the floor, beams may be totally reflected",
            config.name
        );
    }
    Ok(config)
}

/// Read and parse an experiment file.
pub fn load_experiment_file(path: &Path) -> Result<ExperimentConfig, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded experiment file {}", path.display());
    load_experiment_from_str(&contents)
}

/// Write an experiment back out as pretty RON.
pub fn to_ron_string(config: &ExperimentConfig) -> Result<String, LoadError> {
    ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(|e| LoadError::SerializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use refindex_core::IndexGradient;
    use refindex_trace::TotalReflectionPolicy;

    #[test]
    fn test_load_minimal_experiment() {
        let ron = r#"(
            name: "minimal",
            medium: (n_layers: 4, gradient: Linear(n_0: 1.33, n_f: 1.45)),
            beams: [(angle: 0.4, y_0: 10.0)],
        )"#;
        let cfg = load_experiment_from_str(ron).expect("should parse");
        assert_eq!(cfg.name, "minimal");
        // Defaults fill what the file leaves out.
        assert_eq!(cfg.container.width, 40.0);
        assert_eq!(cfg.container.height, 25.0);
        assert_eq!(cfg.beams[0].wavelength, 550.0);
        assert_eq!(cfg.on_total_reflection, TotalReflectionPolicy::Fail);
    }

    #[test]
    fn test_load_explicit_gradient() {
        let ron = r#"(
            name: "steps",
            container: (width: 10.0, height: 3.0),
            medium: (n_layers: 3, gradient: Explicit([1.0, 1.1, 1.3])),
            beams: [(wavelength: 633.0, angle: 0.2, y_0: 2.5)],
            on_total_reflection: Truncate,
        )"#;
        let cfg = load_experiment_from_str(ron).expect("should parse");
        assert_eq!(
            cfg.medium.gradient,
            IndexGradient::Explicit(vec![1.0, 1.1, 1.3])
        );
        assert_eq!(cfg.on_total_reflection, TotalReflectionPolicy::Truncate);
        assert!(cfg.build().is_ok());
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let result = load_experiment_from_str("(name: \"broken\", medium: {");
        assert!(matches!(result, Err(LoadError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("does/not/exist.ron");
        match load_experiment_file(path) {
            Err(err @ LoadError::ReadError { .. }) => {
                assert!(err.to_string().contains("exist.ron"), "{err}")
            }
            other => panic!("expected ReadError, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_experiments_load() {
        let default = include_str!("../../../data/experiments/default.ron");
        let inverted = include_str!("../../../data/experiments/inverted.ron");
        let all: Vec<ExperimentConfig> = [default, inverted]
            .iter()
            .map(|s| load_experiment_from_str(s).expect("should load"))
            .collect();
        assert_eq!(all[0].name, "sugar-water");
        assert!(all[1].medium.gradient.is_decreasing());
        for cfg in &all {
            assert!(cfg.build().is_ok(), "{} failed to build", cfg.name);
        }
    }

    #[test]
    fn test_ron_output_parses_back() {
        let default = include_str!("../../../data/experiments/default.ron");
        let cfg = load_experiment_from_str(default).expect("should parse");
        let written = to_ron_string(&cfg).expect("should serialize");
        let reparsed = load_experiment_from_str(&written).expect("should reparse");
        assert_eq!(reparsed, cfg);
    }
}
