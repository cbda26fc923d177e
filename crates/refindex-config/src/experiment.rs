use refindex_core::constants::{DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, DEFAULT_WAVELENGTH_NM};
use refindex_core::{Beam, Container, CoreError, IndexGradient, Medium};
use refindex_trace::{Experiment, TotalReflectionPolicy, TraceOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validator::{validate_experiment, ValidationError};

fn default_width() -> f64 {
    DEFAULT_CONTAINER_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_CONTAINER_HEIGHT
}

fn default_wavelength() -> f64 {
    DEFAULT_WAVELENGTH_NM
}

/// Container section of an experiment file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerDef {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

impl Default for ContainerDef {
    fn default() -> Self {
        Self {
            width: DEFAULT_CONTAINER_WIDTH,
            height: DEFAULT_CONTAINER_HEIGHT,
        }
    }
}

/// Layer stack section of an experiment file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediumDef {
    pub n_layers: usize,
    pub gradient: IndexGradient,
}

/// One incident beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamDef {
    /// Nanometers, informational only.
    #[serde(default = "default_wavelength")]
    pub wavelength: f64,
    /// Radians from the side-wall normal.
    pub angle: f64,
    /// Entry height on the left wall.
    pub y_0: f64,
}

/// A complete experiment loaded from RON data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Label used in logs and reports.
    pub name: String,
    #[serde(default)]
    pub container: ContainerDef,
    pub medium: MediumDef,
    pub beams: Vec<BeamDef>,
    #[serde(default)]
    pub on_total_reflection: TotalReflectionPolicy,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("experiment failed validation with {} errors", .0.len())]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Everything needed to run an experiment.
#[derive(Debug, Clone)]
pub struct ExperimentSetup {
    pub experiment: Experiment,
    pub beams: Vec<Beam>,
}

impl ExperimentConfig {
    /// Validate, then build the medium, the beams, and the trace options.
    pub fn build(&self) -> Result<ExperimentSetup, BuildError> {
        validate_experiment(self).map_err(BuildError::Invalid)?;

        let container = Container::new(self.container.width, self.container.height)?;
        let medium = Medium::with_gradient(container, self.medium.n_layers, &self.medium.gradient)?;
        let beams = self
            .beams
            .iter()
            .map(|b| Beam::new(b.wavelength, b.angle, b.y_0))
            .collect::<Result<Vec<_>, _>>()?;

        let options = TraceOptions {
            on_total_reflection: self.on_total_reflection,
        };
        let experiment = Experiment::new(self.name.clone(), medium).with_options(options);
        Ok(ExperimentSetup { experiment, beams })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExperimentConfig {
        ExperimentConfig {
            name: "test".into(),
            container: ContainerDef::default(),
            medium: MediumDef {
                n_layers: 15,
                gradient: IndexGradient::Linear { n_0: 1.0, n_f: 1.5 },
            },
            beams: vec![BeamDef {
                wavelength: 550.0,
                angle: 0.3,
                y_0: 12.0,
            }],
            on_total_reflection: TotalReflectionPolicy::Fail,
        }
    }

    #[test]
    fn test_build_valid_config() {
        let setup = config().build().expect("should build");
        assert_eq!(setup.beams.len(), 1);
        assert_eq!(setup.experiment.name(), "test");
        assert_eq!(setup.experiment.medium().n_layers(), 15);
        assert_eq!(setup.experiment.medium().container().width(), 40.0);
    }

    #[test]
    fn test_build_carries_policy() {
        let mut cfg = config();
        cfg.on_total_reflection = TotalReflectionPolicy::Truncate;
        let setup = cfg.build().expect("should build");
        assert_eq!(
            setup.experiment.options().on_total_reflection,
            TotalReflectionPolicy::Truncate
        );
    }

    #[test]
    fn test_build_rejects_invalid() {
        let mut cfg = config();
        cfg.medium.n_layers = 0;
        cfg.beams[0].y_0 = 99.0;
        match cfg.build() {
            Err(BuildError::Invalid(errors)) => assert_eq!(errors.len(), 2, "{errors:?}"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
