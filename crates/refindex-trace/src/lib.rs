pub mod error;
pub mod experiment;
pub mod options;
pub mod tracer;
pub mod trajectory;

pub use error::{Interface, TraceError};
pub use experiment::Experiment;
pub use options::{TotalReflectionPolicy, TraceOptions};
pub use tracer::trace;
pub use trajectory::{Termination, Trajectory};
