use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::math::linspace;

/// Rule assigning a refractive index to every layer, first (top) layer first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexGradient {
    /// `n_layers` evenly spaced indices from `n_0` to `n_f`, both inclusive.
    Linear { n_0: f64, n_f: f64 },
    /// One index per layer.
    Explicit(Vec<f64>),
}

impl IndexGradient {
    /// Resolve the per-layer indices. Every index must be positive and finite.
    pub fn indices(&self, n_layers: usize) -> Result<Vec<f64>, CoreError> {
        if n_layers == 0 {
            return Err(CoreError::geometry("medium needs at least one layer"));
        }
        let indices = match self {
            IndexGradient::Linear { n_0, n_f } => linspace(*n_0, *n_f, n_layers),
            IndexGradient::Explicit(values) => {
                if values.len() != n_layers {
                    return Err(CoreError::geometry(format!(
                        "explicit gradient lists {} indices for {} layers",
                        values.len(),
                        n_layers
                    )));
                }
                values.clone()
            }
        };
        check_indices(&indices)?;
        Ok(indices)
    }

    /// Whether the index drops somewhere going down the stack, which allows
    /// total internal reflection at an interior interface.
    pub fn is_decreasing(&self) -> bool {
        match self {
            IndexGradient::Linear { n_0, n_f } => n_f < n_0,
            IndexGradient::Explicit(values) => values.windows(2).any(|w| w[1] < w[0]),
        }
    }
}

pub(crate) fn check_indices(indices: &[f64]) -> Result<(), CoreError> {
    for (i, &n) in indices.iter().enumerate() {
        if !(n.is_finite() && n > 0.0) {
            return Err(CoreError::geometry(format!(
                "layer {i} has invalid refractive index {n}"
            )));
        }
    }
    Ok(())
}
