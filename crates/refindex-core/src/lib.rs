pub mod constants;
pub mod error;
pub mod gradient;
pub mod math;
pub mod medium;
pub mod types;

pub use error::CoreError;
pub use gradient::IndexGradient;
pub use medium::{Layer, Medium};
pub use types::{Beam, Container, Point};
