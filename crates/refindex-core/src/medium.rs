use serde::Serialize;

use crate::error::CoreError;
use crate::gradient::{check_indices, IndexGradient};
use crate::types::Container;

/// One horizontal band `[y_bottom, y_top)` of uniform refractive index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layer {
    pub y_bottom: f64,
    pub y_top: f64,
    pub n: f64,
}

impl Layer {
    pub fn thickness(&self) -> f64 {
        self.y_top - self.y_bottom
    }

    /// Half-open containment; the band's top edge belongs to the layer above.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.y_bottom && y < self.y_top
    }
}

/// Stack of equally thick layers filling the container height.
///
/// Layer 0 is the top band and the last layer touches the floor, so a ray
/// travelling down visits layers in increasing index order. Adjacent layers
/// share their boundary exactly: `layers[i].y_bottom == layers[i + 1].y_top`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Medium {
    container: Container,
    layers: Vec<Layer>,
    layer_thickness: f64,
    n_0: f64,
    n_f: f64,
}

impl Medium {
    /// Linear index gradient from `n_0` (top layer) to `n_f` (bottom layer).
    pub fn new(container: Container, n_layers: usize, n_0: f64, n_f: f64) -> Result<Self, CoreError> {
        Self::with_gradient(container, n_layers, &IndexGradient::Linear { n_0, n_f })
    }

    pub fn with_gradient(
        container: Container,
        n_layers: usize,
        gradient: &IndexGradient,
    ) -> Result<Self, CoreError> {
        let indices = gradient.indices(n_layers)?;
        Self::from_indices(container, indices)
    }

    /// Per-layer formula: `index_of(i)` gives the index of layer `i`.
    pub fn from_fn(
        container: Container,
        n_layers: usize,
        index_of: impl Fn(usize) -> f64,
    ) -> Result<Self, CoreError> {
        if n_layers == 0 {
            return Err(CoreError::geometry("medium needs at least one layer"));
        }
        Self::from_indices(container, (0..n_layers).map(index_of).collect())
    }

    fn from_indices(container: Container, indices: Vec<f64>) -> Result<Self, CoreError> {
        check_indices(&indices)?;
        let n_layers = indices.len();
        let height = container.height();
        let layer_thickness = height / n_layers as f64;

        // Boundaries from the top down; the floor is pinned to exactly zero.
        let mut bounds: Vec<f64> = (0..=n_layers)
            .map(|j| height - layer_thickness * j as f64)
            .collect();
        bounds[n_layers] = 0.0;

        let layers: Vec<Layer> = indices
            .iter()
            .enumerate()
            .map(|(i, &n)| Layer {
                y_bottom: bounds[i + 1],
                y_top: bounds[i],
                n,
            })
            .collect();

        Ok(Self {
            container,
            layer_thickness,
            n_0: indices[0],
            n_f: indices[n_layers - 1],
            layers,
        })
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_thickness(&self) -> f64 {
        self.layer_thickness
    }

    /// Index of the first (top) layer.
    pub fn n_0(&self) -> f64 {
        self.n_0
    }

    /// Index of the last (bottom) layer.
    pub fn n_f(&self) -> f64 {
        self.n_f
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.layers.len()
    }

    /// Index of the layer containing `y`.
    ///
    /// Heights outside `[0, H]` clamp to the nearest end of the stack, NaN
    /// clamps to the top. A boundary height belongs to the layer it bottoms.
    pub fn layer_index_from_y(&self, y: f64) -> usize {
        let last = self.layers.len() - 1;
        if !(y < self.container.height()) {
            return 0;
        }
        if y < 0.0 {
            return last;
        }

        let estimate = ((self.container.height() - y) / self.layer_thickness).floor() as usize;
        let mut index = estimate.min(last);
        // The division can round across a boundary, settle against the stored edges.
        while !self.layers[index].contains(y) {
            if y >= self.layers[index].y_top && index > 0 {
                index -= 1;
            } else if y < self.layers[index].y_bottom && index < last {
                index += 1;
            } else {
                break;
            }
        }
        index
    }

    pub fn layer_from_y(&self, y: f64) -> &Layer {
        &self.layers[self.layer_index_from_y(y)]
    }

    /// Refractive indices top to bottom.
    pub fn indices(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers.iter().map(|l| l.n)
    }
}
