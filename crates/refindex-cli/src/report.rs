use std::path::Path;

use refindex_core::{Beam, Point};
use refindex_trace::{Experiment, Termination, TraceError, Trajectory};
use serde::{Deserialize, Serialize};

/// Outcome of one beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamReport {
    pub y_0: f64,
    pub angle: f64,
    pub wavelength: f64,
    pub points: Vec<Point>,
    /// Distance travelled inside the container, 0 when tracing failed.
    pub path_length: f64,
    /// `None` when tracing failed.
    pub termination: Option<String>,
    pub error: Option<String>,
}

/// Everything a run produced, saved as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryReport {
    pub experiment: String,
    pub width: f64,
    pub height: f64,
    /// Top layer first.
    pub indices: Vec<f64>,
    pub beams: Vec<BeamReport>,
}

fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::Floor => "floor",
        Termination::ExitedRight => "exited-right",
        Termination::Parallel => "parallel",
        Termination::TotalInternalReflection => "total-internal-reflection",
    }
}

impl TrajectoryReport {
    pub fn new(
        experiment: &Experiment,
        beams: &[Beam],
        results: &[Result<Trajectory, TraceError>],
    ) -> Self {
        let medium = experiment.medium();
        let beams = beams
            .iter()
            .zip(results)
            .map(|(beam, result)| {
                let (points, path_length, termination, error) = match result {
                    Ok(t) => (
                        t.points().to_vec(),
                        t.path_length(),
                        Some(termination_label(t.termination()).to_string()),
                        None,
                    ),
                    Err(e) => (Vec::new(), 0.0, None, Some(e.to_string())),
                };
                BeamReport {
                    y_0: beam.y_0(),
                    angle: beam.angle(),
                    wavelength: beam.wavelength(),
                    points,
                    path_length,
                    termination,
                    error,
                }
            })
            .collect();
        Self {
            experiment: experiment.name().to_string(),
            width: medium.container().width(),
            height: medium.container().height(),
            indices: medium.indices().collect(),
            beams,
        }
    }

    pub fn failures(&self) -> usize {
        self.beams.iter().filter(|b| b.error.is_some()).count()
    }
}

/// Save a report as pretty JSON, creating parent directories.
pub fn save_report(path: &Path, report: &TrajectoryReport) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Save any text output, creating parent directories.
pub fn save_text(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

/// Format every beam as a markdown table of its points.
pub fn format_markdown(report: &TrajectoryReport) -> String {
    let mut out = String::new();
    for (i, beam) in report.beams.iter().enumerate() {
        out.push_str(&format!(
            "### Beam {} (y_0 = {:.3}, angle = {:.3} rad)\n\n",
            i, beam.y_0, beam.angle
        ));
        if let Some(ref error) = beam.error {
            out.push_str(&format!("Failed: {}\n\n", error));
            continue;
        }
        out.push_str("| # | x | y |\n");
        out.push_str("|---|---|---|\n");
        for (j, p) in beam.points.iter().enumerate() {
            out.push_str(&format!("| {} | {:.4} | {:.4} |\n", j, p.x, p.y));
        }
        if let Some(ref termination) = beam.termination {
            out.push_str(&format!(
                "\nStopped: {} after {:.4} units\n",
                termination, beam.path_length
            ));
        }
        out.push('\n');
    }
    out
}
