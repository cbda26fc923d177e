use std::f64::consts::FRAC_PI_2;

use refindex_core::IndexGradient;
use thiserror::Error;

use crate::experiment::ExperimentConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Experiment name is empty")]
    EmptyName,
    #[error("Container {what} must be positive, got {value}")]
    NonPositiveDimension { what: &'static str, value: f64 },
    #[error("Medium needs at least one layer")]
    NoLayers,
    #[error("Layer {layer} has invalid refractive index {value}")]
    InvalidIndex { layer: usize, value: f64 },
    #[error("Explicit gradient lists {actual} indices for {expected} layers")]
    GradientLengthMismatch { expected: usize, actual: usize },
    #[error("Experiment has no beams")]
    NoBeams,
    #[error("Beam {beam} wavelength must be positive, got {value}")]
    InvalidWavelength { beam: usize, value: f64 },
    #[error("Beam {beam} angle {angle} outside [0, pi/2]")]
    AngleOutOfRange { beam: usize, angle: f64 },
    #[error("Beam {beam} entry height {y_0} outside container [0, {height}]")]
    EntryOutOfRange { beam: usize, y_0: f64, height: f64 },
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Validate an experiment, collecting every problem instead of stopping at the first.
pub fn validate_experiment(config: &ExperimentConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    let height = config.container.height;
    if !positive(config.container.width) {
        errors.push(ValidationError::NonPositiveDimension {
            what: "width",
            value: config.container.width,
        });
    }
    if !positive(height) {
        errors.push(ValidationError::NonPositiveDimension {
            what: "height",
            value: height,
        });
    }

    let n_layers = config.medium.n_layers;
    if n_layers == 0 {
        errors.push(ValidationError::NoLayers);
    }

    match &config.medium.gradient {
        IndexGradient::Linear { n_0, n_f } => {
            if !positive(*n_0) {
                errors.push(ValidationError::InvalidIndex {
                    layer: 0,
                    value: *n_0,
                });
            }
            if !positive(*n_f) {
                errors.push(ValidationError::InvalidIndex {
                    layer: n_layers.saturating_sub(1),
                    value: *n_f,
                });
            }
        }
        IndexGradient::Explicit(values) => {
            if values.len() != n_layers {
                errors.push(ValidationError::GradientLengthMismatch {
                    expected: n_layers,
                    actual: values.len(),
                });
            }
            for (layer, &value) in values.iter().enumerate() {
                if !positive(value) {
                    errors.push(ValidationError::InvalidIndex { layer, value });
                }
            }
        }
    }

    if config.beams.is_empty() {
        errors.push(ValidationError::NoBeams);
    }
    for (beam, def) in config.beams.iter().enumerate() {
        if !positive(def.wavelength) {
            errors.push(ValidationError::InvalidWavelength {
                beam,
                value: def.wavelength,
            });
        }
        if !(0.0..=FRAC_PI_2).contains(&def.angle) {
            errors.push(ValidationError::AngleOutOfRange {
                beam,
                angle: def.angle,
            });
        }
        if !(0.0..=height).contains(&def.y_0) {
            errors.push(ValidationError::EntryOutOfRange {
                beam,
                y_0: def.y_0,
                height,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
