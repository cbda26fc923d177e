use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use serde::Serialize;

use crate::error::CoreError;

/// A point in the container cross-section. Origin at the bottom-left corner, y up.
pub type Point = DVec2;

/// The 2D bounding region holding the medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Container {
    width: f64,
    height: f64,
}

impl Container {
    /// Both dimensions must be positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, CoreError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(CoreError::geometry(format!(
                "container width must be positive, got {width}"
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(CoreError::geometry(format!(
                "container height must be positive, got {height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether a height lies on the left wall, bounds included.
    pub fn contains_height(&self, y: f64) -> bool {
        (0.0..=self.height).contains(&y)
    }
}

/// The incident light ray.
///
/// `angle` is measured from the horizontal normal of the vertical side wall;
/// positive values point down into the layer stack. `0` runs parallel to the
/// layers, `π/2` grazes straight down the wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Beam {
    wavelength: f64,
    angle: f64,
    y_0: f64,
}

impl Beam {
    pub fn new(wavelength: f64, angle: f64, y_0: f64) -> Result<Self, CoreError> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(CoreError::geometry(format!(
                "beam wavelength must be positive, got {wavelength}"
            )));
        }
        if !(0.0..=FRAC_PI_2).contains(&angle) {
            return Err(CoreError::geometry(format!(
                "beam angle must lie in [0, pi/2], got {angle}"
            )));
        }
        if !(y_0.is_finite() && y_0 >= 0.0) {
            return Err(CoreError::geometry(format!(
                "beam entry height must be non-negative, got {y_0}"
            )));
        }
        Ok(Self {
            wavelength,
            angle,
            y_0,
        })
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn y_0(&self) -> f64 {
        self.y_0
    }

    /// Entry point on the left wall.
    pub fn entry_point(&self) -> Point {
        Point::new(0.0, self.y_0)
    }

    /// A beam does not know its container, so the upper bound of `y_0` is checked here.
    pub fn check_within(&self, container: &Container) -> Result<(), CoreError> {
        if container.contains_height(self.y_0) {
            Ok(())
        } else {
            Err(CoreError::geometry(format!(
                "beam entry height {} outside container [0, {}]",
                self.y_0,
                container.height()
            )))
        }
    }
}
