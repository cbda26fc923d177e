use std::path::PathBuf;
use std::str::FromStr;

use refindex_config::loader::{load_experiment_file, LoadError};
use refindex_config::presets;
use refindex_config::{BeamDef, ContainerDef, ExperimentConfig, MediumDef};
use refindex_core::constants::{
    DEFAULT_BEAM_ANGLE, DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, DEFAULT_N_0,
    DEFAULT_N_F, DEFAULT_WAVELENGTH_NM,
};
use refindex_core::IndexGradient;
use refindex_trace::TotalReflectionPolicy;
use thiserror::Error;

pub const USAGE: &str =
    "Usage: refindex <name> <n_layers> [n_0] [n_f] [y_beam] [--help for options]";

pub const HELP: &str = "\
Usage: refindex <name> <n_layers> [n_0] [n_f] [y_beam] [OPTIONS]
  <name>                            Experiment label
  <n_layers>                        Number of layers (>= 1)
  [n_0]                             Index of the top layer (default: 1.3)
  [n_f]                             Index of the bottom layer (default: 1.5)
  [y_beam]                          Entry height on the left wall (default: container height)
  --angle <rad>                     Incidence angle at the wall (default: 0.3)
  --width <w>                       Container width (default: 40)
  --height <h>                      Container height (default: 25)
  --wavelength <nm>                 Beam wavelength (default: 550)
  --beam <y>                        Extra beam entering at y (repeatable)
  --config <file.ron>               Load the experiment from a RON file
  --preset <name>                   Use a bundled experiment (default, inverted)
  --svg <path>                      Save the figure as SVG
  --json <path>                     Save the trajectories as JSON
  --show-incidence-points           Mark every interface crossing in the figure
  --truncate-on-total-reflection    Stop at the last point instead of failing
  --print-config                    Print the resolved experiment as RON and exit";

#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Invalid value '{value}' for {what}")]
    InvalidValue { what: String, value: String },
    #[error("Unknown argument: {0}")]
    UnknownFlag(String),
    #[error("Missing required argument <{0}>")]
    MissingPositional(&'static str),
    #[error("Unexpected extra argument: {0}")]
    UnexpectedPositional(String),
    #[error("--config and --preset cannot be combined with positional arguments")]
    ConflictingSource,
    #[error("Unknown preset '{name}', expected one of: {known}")]
    UnknownPreset { name: String, known: String },
}

/// Where the experiment comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Positional {
        name: String,
        n_layers: usize,
        n_0: f64,
        n_f: f64,
        y_beam: Option<f64>,
    },
    Config(PathBuf),
    Preset(String),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub source: Source,
    pub angle: f64,
    pub width: f64,
    pub height: f64,
    pub wavelength: f64,
    pub extra_beams: Vec<f64>,
    pub svg: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub show_incidence_points: bool,
    pub truncate: bool,
    pub print_config: bool,
}

/// Outcome of parsing: either run with the arguments or print the help text.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

fn parse_number<T: FromStr>(what: &str, value: &str) -> Result<T, ArgsError> {
    value.parse().map_err(|_| ArgsError::InvalidValue {
        what: what.to_string(),
        value: value.to_string(),
    })
}

fn next_value<'a>(flag: &str, iter: &mut impl Iterator<Item = &'a String>) -> Result<&'a str, ArgsError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<Command, ArgsError> {
    let mut positionals: Vec<&str> = Vec::new();
    let mut config: Option<PathBuf> = None;
    let mut preset: Option<String> = None;
    let mut angle = DEFAULT_BEAM_ANGLE;
    let mut width = DEFAULT_CONTAINER_WIDTH;
    let mut height = DEFAULT_CONTAINER_HEIGHT;
    let mut wavelength = DEFAULT_WAVELENGTH_NM;
    let mut extra_beams = Vec::new();
    let mut svg = None;
    let mut json = None;
    let mut show_incidence_points = false;
    let mut truncate = false;
    let mut print_config = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--angle" => angle = parse_number("--angle", next_value(arg, &mut iter)?)?,
            "--width" => width = parse_number("--width", next_value(arg, &mut iter)?)?,
            "--height" => height = parse_number("--height", next_value(arg, &mut iter)?)?,
            "--wavelength" => {
                wavelength = parse_number("--wavelength", next_value(arg, &mut iter)?)?
            }
            "--beam" => extra_beams.push(parse_number("--beam", next_value(arg, &mut iter)?)?),
            "--config" => config = Some(PathBuf::from(next_value(arg, &mut iter)?)),
            "--preset" => preset = Some(next_value(arg, &mut iter)?.to_string()),
            "--svg" => svg = Some(PathBuf::from(next_value(arg, &mut iter)?)),
            "--json" => json = Some(PathBuf::from(next_value(arg, &mut iter)?)),
            "--show-incidence-points" => show_incidence_points = true,
            "--truncate-on-total-reflection" => truncate = true,
            "--print-config" => print_config = true,
            // Negative numbers are values, not flags.
            other if other.starts_with("--") || (other.starts_with('-') && other.parse::<f64>().is_err()) => {
                return Err(ArgsError::UnknownFlag(other.to_string()))
            }
            other => positionals.push(other),
        }
    }

    let source = match (config, preset) {
        (Some(_), Some(_)) => return Err(ArgsError::ConflictingSource),
        (Some(path), None) => {
            if !positionals.is_empty() {
                return Err(ArgsError::ConflictingSource);
            }
            Source::Config(path)
        }
        (None, Some(name)) => {
            if !positionals.is_empty() {
                return Err(ArgsError::ConflictingSource);
            }
            Source::Preset(name)
        }
        (None, None) => positional_source(&positionals)?,
    };

    Ok(Command::Run(CliArgs {
        source,
        angle,
        width,
        height,
        wavelength,
        extra_beams,
        svg,
        json,
        show_incidence_points,
        truncate,
        print_config,
    }))
}

fn positional_source(positionals: &[&str]) -> Result<Source, ArgsError> {
    if positionals.len() > 5 {
        return Err(ArgsError::UnexpectedPositional(positionals[5].to_string()));
    }
    let name = positionals
        .first()
        .ok_or(ArgsError::MissingPositional("name"))?
        .to_string();
    let n_layers = positionals
        .get(1)
        .ok_or(ArgsError::MissingPositional("n_layers"))
        .and_then(|v| parse_number("<n_layers>", v))?;
    let n_0 = match positionals.get(2) {
        Some(v) => parse_number("<n_0>", v)?,
        None => DEFAULT_N_0,
    };
    let n_f = match positionals.get(3) {
        Some(v) => parse_number("<n_f>", v)?,
        None => DEFAULT_N_F,
    };
    let y_beam = positionals
        .get(4)
        .map(|v| parse_number("<y_beam>", v))
        .transpose()?;
    Ok(Source::Positional {
        name,
        n_layers,
        n_0,
        n_f,
        y_beam,
    })
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl CliArgs {
    /// Resolve the arguments into an experiment description.
    ///
    /// Files and presets keep their own beams; `--beam` entries are appended
    /// using the command-line angle and wavelength.
    pub fn to_config(&self) -> Result<ExperimentConfig, SourceError> {
        let mut config = match &self.source {
            Source::Positional {
                name,
                n_layers,
                n_0,
                n_f,
                y_beam,
            } => ExperimentConfig {
                name: name.clone(),
                container: ContainerDef {
                    width: self.width,
                    height: self.height,
                },
                medium: MediumDef {
                    n_layers: *n_layers,
                    gradient: IndexGradient::Linear {
                        n_0: *n_0,
                        n_f: *n_f,
                    },
                },
                beams: vec![self.beam_at(y_beam.unwrap_or(self.height))],
                on_total_reflection: TotalReflectionPolicy::default(),
            },
            Source::Config(path) => load_experiment_file(path)?,
            Source::Preset(name) => {
                presets::builtin(name).ok_or_else(|| ArgsError::UnknownPreset {
                    name: name.clone(),
                    known: presets::BUILTIN_NAMES.join(", "),
                })??
            }
        };

        config
            .beams
            .extend(self.extra_beams.iter().map(|&y| self.beam_at(y)));
        if self.truncate {
            config.on_total_reflection = TotalReflectionPolicy::Truncate;
        }
        Ok(config)
    }

    fn beam_at(&self, y_0: f64) -> BeamDef {
        BeamDef {
            wavelength: self.wavelength,
            angle: self.angle,
            y_0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str]) -> CliArgs {
        match parse_args(&args(list)).expect("should parse") {
            Command::Run(cli) => cli,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_positional_defaults() {
        let cli = run(&["tank", "15"]);
        assert_eq!(
            cli.source,
            Source::Positional {
                name: "tank".into(),
                n_layers: 15,
                n_0: 1.3,
                n_f: 1.5,
                y_beam: None,
            }
        );
        assert_eq!(cli.angle, 0.3);
        assert_eq!(cli.width, 40.0);
        assert_eq!(cli.height, 25.0);
        assert!(!cli.truncate);

        let cfg = cli.to_config().expect("should resolve");
        assert_eq!(cfg.beams.len(), 1);
        // Without y_beam the beam enters at the top of the container.
        assert_eq!(cfg.beams[0].y_0, 25.0);
        assert!(cfg.build().is_ok());
    }

    #[test]
    fn test_all_options() {
        let cli = run(&[
            "tank", "8", "1.0", "1.6", "12", "--angle", "0.5", "--width", "30", "--height", "20",
            "--wavelength", "633", "--beam", "5", "--beam", "10", "--svg", "out/fig.svg",
            "--json", "out/run.json", "--show-incidence-points", "--truncate-on-total-reflection",
        ]);
        assert_eq!(cli.angle, 0.5);
        assert_eq!(cli.extra_beams, vec![5.0, 10.0]);
        assert_eq!(cli.svg, Some(PathBuf::from("out/fig.svg")));
        assert_eq!(cli.json, Some(PathBuf::from("out/run.json")));
        assert!(cli.show_incidence_points);
        assert!(!cli.print_config);

        let cfg = cli.to_config().expect("should resolve");
        assert_eq!(cfg.container.width, 30.0);
        assert_eq!(cfg.medium.n_layers, 8);
        let heights: Vec<f64> = cfg.beams.iter().map(|b| b.y_0).collect();
        assert_eq!(heights, vec![12.0, 5.0, 10.0]);
        assert!(cfg.beams.iter().all(|b| b.wavelength == 633.0 && b.angle == 0.5));
        assert_eq!(cfg.on_total_reflection, TotalReflectionPolicy::Truncate);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args(&["tank", "--help"])), Ok(Command::Help));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_args(&args(&[])),
            Err(ArgsError::MissingPositional("name"))
        );
        assert_eq!(
            parse_args(&args(&["tank"])),
            Err(ArgsError::MissingPositional("n_layers"))
        );
        assert!(matches!(
            parse_args(&args(&["tank", "many"])),
            Err(ArgsError::InvalidValue { .. })
        ));
        assert_eq!(
            parse_args(&args(&["tank", "3", "--angle"])),
            Err(ArgsError::MissingValue("--angle".into()))
        );
        assert_eq!(
            parse_args(&args(&["tank", "3", "--bogus"])),
            Err(ArgsError::UnknownFlag("--bogus".into()))
        );
        assert!(matches!(
            parse_args(&args(&["tank", "3", "1", "1", "1", "extra"])),
            Err(ArgsError::UnexpectedPositional(_))
        ));
        assert_eq!(
            parse_args(&args(&["tank", "--config", "a.ron"])),
            Err(ArgsError::ConflictingSource)
        );
    }

    #[test]
    fn test_negative_value_is_not_a_flag() {
        // Parses; construction rejects it later.
        let cli = run(&["tank", "3", "-1.2"]);
        let cfg = cli.to_config().expect("should resolve");
        assert!(cfg.build().is_err());
    }

    #[test]
    fn test_preset_source() {
        let cli = run(&["--preset", "inverted", "--beam", "3"]);
        let cfg = cli.to_config().expect("should resolve");
        assert_eq!(cfg.name, "inverted");
        assert_eq!(cfg.beams.len(), 3);
        assert_eq!(cfg.beams[2].y_0, 3.0);

        let unknown = run(&["--preset", "nope"]);
        match unknown.to_config() {
            Err(SourceError::Args(err @ ArgsError::UnknownPreset { .. })) => {
                assert_eq!(
                    err.to_string(),
                    "Unknown preset 'nope', expected one of: default, inverted"
                );
            }
            other => panic!("expected UnknownPreset, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_config_file() {
        let cli = run(&["--config", "does/not/exist.ron"]);
        assert!(matches!(
            cli.to_config(),
            Err(SourceError::Load(LoadError::ReadError { .. }))
        ));
    }

    #[test]
    fn test_print_config_flag() {
        let cli = run(&["--preset", "default", "--print-config"]);
        assert!(cli.print_config);
        let cfg = cli.to_config().expect("should resolve");
        let ron = refindex_config::loader::to_ron_string(&cfg).expect("should serialize");
        assert!(ron.contains("sugar-water"), "{ron}");
    }
}
