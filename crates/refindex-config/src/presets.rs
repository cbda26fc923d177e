//! Built-in experiments.

use crate::experiment::ExperimentConfig;
use crate::loader::{load_experiment_from_str, LoadError};

pub const DEFAULT_EXPERIMENT_RON: &str = include_str!("../../../data/experiments/default.ron");
pub const INVERTED_EXPERIMENT_RON: &str = include_str!("../../../data/experiments/inverted.ron");

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: [&str; 2] = ["default", "inverted"];

/// Look up a bundled experiment by name. `default` is the canonical tank:
/// 40 x 25, 15 layers from 1.0 to 1.5, one beam at 0.3 rad from y = 12.
pub fn builtin(name: &str) -> Option<Result<ExperimentConfig, LoadError>> {
    match name {
        "default" => Some(load_experiment_from_str(DEFAULT_EXPERIMENT_RON)),
        "inverted" => Some(load_experiment_from_str(INVERTED_EXPERIMENT_RON)),
        _ => None,
    }
}
