pub mod experiment;
pub mod loader;
pub mod presets;
pub mod validator;

pub use experiment::{BeamDef, BuildError, ContainerDef, ExperimentConfig, ExperimentSetup, MediumDef};
pub use loader::LoadError;
pub use validator::ValidationError;
