use refindex_core::Point;
use serde::Serialize;

/// Why tracing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// Crossed the last layer and reached the container floor.
    Floor,
    /// Left the container through its right side.
    ExitedRight,
    /// Entered parallel to the layers and never met a horizontal interface.
    Parallel,
    /// Stopped at the last valid point because Snell's law had no solution.
    TotalInternalReflection,
}

/// Interface crossings of one beam, in travel order.
///
/// `points[0]` is the entry point on the left wall. `angles[i]` is the angle
/// from the vertical (the layer-interface normal) of the segment ending at
/// `points[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<Point>,
    angles: Vec<f64>,
    termination: Termination,
}

impl Trajectory {
    pub(crate) fn start(entry: Point) -> Self {
        Self {
            points: vec![entry],
            angles: Vec::new(),
            termination: Termination::Floor,
        }
    }

    pub(crate) fn push(&mut self, point: Point, angle: f64) {
        self.points.push(point);
        self.angles.push(angle);
    }

    pub(crate) fn finish(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a trajectory built by the tracer, the entry point is always present.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn entry(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Every point after the entry point.
    pub fn crossings(&self) -> &[Point] {
        &self.points[1..]
    }

    /// Total path length inside the container.
    pub fn path_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
