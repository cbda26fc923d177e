//! Shared physical constants and experiment defaults.
//! Lengths are in centimeters, angles in radians.

/// Refractive index of the air outside the container.
pub const AMBIENT_INDEX: f64 = 1.0;

/// Default container width (aquarium front view).
pub const DEFAULT_CONTAINER_WIDTH: f64 = 40.0;

/// Default container height.
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 25.0;

/// Default number of layers in the medium.
pub const DEFAULT_N_LAYERS: usize = 15;

/// Default index of the first (top) layer.
pub const DEFAULT_N_0: f64 = 1.3;

/// Default index of the last (bottom) layer.
pub const DEFAULT_N_F: f64 = 1.5;

/// Default beam angle from the side-wall normal.
pub const DEFAULT_BEAM_ANGLE: f64 = 0.3;

/// Default wavelength in nanometers. Bookkeeping only, the index is not dispersive.
pub const DEFAULT_WAVELENGTH_NM: f64 = 550.0;

/// Absolute tolerance for comparing coordinates that should coincide.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
