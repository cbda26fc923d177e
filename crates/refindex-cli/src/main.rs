use std::process;

use refindex_cli::args::{self, ArgsError, Command, SourceError};
use refindex_cli::report::{self, TrajectoryReport};
use refindex_config::loader::to_ron_string;
use refindex_config::BuildError;
use refindex_render::{RenderContext, RenderStyle};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("{0}")]
    Build(String),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} of {1} beams failed to trace")]
    Trace(usize, usize),
}

impl From<BuildError> for CliError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Invalid(errors) => CliError::Build(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            BuildError::Core(e) => CliError::Build(e.to_string()),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&argv) {
        log::error!("{}", err);
        eprintln!("{}", args::USAGE);
        process::exit(1);
    }
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let cli = match args::parse_args(argv)? {
        Command::Help => {
            eprintln!("{}", args::HELP);
            return Ok(());
        }
        Command::Run(cli) => cli,
    };

    let config = cli.to_config()?;
    if cli.print_config {
        println!("{}", to_ron_string(&config).map_err(SourceError::from)?);
        return Ok(());
    }
    let setup = config.build()?;
    let experiment = &setup.experiment;
    log::info!(
        "Experiment '{}': {} layers, {} beam(s)",
        experiment.name(),
        experiment.medium().n_layers(),
        setup.beams.len()
    );

    let results = experiment.beam_on_all(&setup.beams);
    let trace_report = TrajectoryReport::new(experiment, &setup.beams, &results);

    println!("\n## {}\n", experiment.name());
    println!("{}", report::format_markdown(&trace_report));

    if let Some(ref path) = cli.svg {
        let mut ctx = RenderContext::new(experiment.medium(), RenderStyle::default());
        for trajectory in results.iter().flatten() {
            ctx.draw_trajectory(trajectory, cli.show_incidence_points);
        }
        report::save_text(path, &ctx.to_svg()).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved figure to {}", path.display());
    }

    if let Some(ref path) = cli.json {
        report::save_report(path, &trace_report).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved report to {}", path.display());
    }

    let failures = trace_report.failures();
    if failures > 0 {
        return Err(CliError::Trace(failures, trace_report.beams.len()));
    }
    Ok(())
}
