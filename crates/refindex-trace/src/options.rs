use serde::{Deserialize, Serialize};

/// What the tracer does when Snell's law has no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TotalReflectionPolicy {
    /// Return `TraceError::OutOfDomain`.
    #[default]
    Fail,
    /// End the trajectory at the last valid point.
    Truncate,
}

/// Knobs for a single trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraceOptions {
    #[serde(default)]
    pub on_total_reflection: TotalReflectionPolicy,
}

impl TraceOptions {
    pub fn truncating() -> Self {
        Self {
            on_total_reflection: TotalReflectionPolicy::Truncate,
        }
    }
}
