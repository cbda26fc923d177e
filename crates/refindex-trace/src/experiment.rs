use rayon::prelude::*;
use refindex_core::{Beam, Medium};

use crate::error::TraceError;
use crate::options::TraceOptions;
use crate::tracer::trace;
use crate::trajectory::Trajectory;

/// A medium set up once and probed with any number of beams.
///
/// Holds no state between traces, so beams can be traced concurrently.
#[derive(Debug, Clone)]
pub struct Experiment {
    name: String,
    medium: Medium,
    options: TraceOptions,
}

impl Experiment {
    pub fn new(name: impl Into<String>, medium: Medium) -> Self {
        Self {
            name: name.into(),
            medium,
            options: TraceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TraceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Trace a single beam.
    pub fn beam_on(&self, beam: &Beam) -> Result<Trajectory, TraceError> {
        let trajectory = trace(&self.medium, beam, &self.options)?;
        log::info!(
            "[{}] beam y_0={:.3} angle={:.3}: {} points, {:?}",
            self.name,
            beam.y_0(),
            beam.angle(),
            trajectory.len(),
            trajectory.termination()
        );
        Ok(trajectory)
    }

    /// Trace independent beams in parallel. Results keep the input order.
    pub fn beam_on_all(&self, beams: &[Beam]) -> Vec<Result<Trajectory, TraceError>> {
        beams.par_iter().map(|beam| self.beam_on(beam)).collect()
    }
}
