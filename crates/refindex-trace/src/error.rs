use std::fmt;

use refindex_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// The boundary a refraction was attempted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Interface {
    /// Air to the layer behind the left wall.
    Wall { layer: usize },
    /// Between layer `upper` and the layer right below it.
    Layers { upper: usize, lower: usize },
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interface::Wall { layer } => write!(f, "side wall into layer {layer}"),
            Interface::Layers { upper, lower } => write!(f, "layers {upper}/{lower}"),
        }
    }
}

/// Errors returned by the tracer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Snell's law has no solution: total internal reflection, which is not modeled.
    #[error("refraction out of domain at {interface}: |(n1/n2) sin(theta)| = {argument:.6} > 1")]
    OutOfDomain { interface: Interface, argument: f64 },
}
