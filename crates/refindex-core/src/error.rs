use thiserror::Error;

/// Errors raised while building a container, medium or beam.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl CoreError {
    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        CoreError::InvalidGeometry(msg.into())
    }
}
