pub mod context;
pub mod palette;
pub mod svg;

pub use context::{Band, Polyline, RenderContext, RenderStyle};
