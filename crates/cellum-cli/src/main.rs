//! `cellum`: run a cellular automaton from the command line.
//!
//! Each generation is printed to stdout as text, using the same `-` / `X`
//! glyphs the seed files use, so any printed generation can be fed back
//! in with `--seed-file`. The run summary goes to stderr.

mod error;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cellum::prelude::*;
use cellum::rule::presets;
use cellum::space::seed::{decode_line, decode_rows, decode_species_line, strip_line_ending};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::CliError;

/// Cellular automaton runner
#[derive(Parser, Debug)]
#[command(name = "cellum", version)]
#[command(about = "Run 1D, multi-species and Game of Life automata until they repeat")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Elementary or wider Wolfram-code rule on a line
    Wolfram {
        /// Rule number
        #[arg(long, default_value_t = 30)]
        code: u128,

        /// Neighbourhood width (odd, at most 7)
        #[arg(long, default_value_t = 3)]
        width: u32,

        #[command(flatten)]
        line: LineArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Totalistic rule from a rulestring such as `R2,C0,M1,S1,B3`
    Rule {
        /// Rulestring to parse
        #[arg(long, conflicts_with = "preset", required_unless_present = "preset")]
        rulestring: Option<String>,

        /// Named rule (tulips, the-city, roots, abacus, class-4a, date-palm)
        #[arg(long)]
        preset: Option<String>,

        /// Chance of each further step when perturbing neighbour counts
        #[arg(long, default_value_t = 0.0)]
        mutation: f64,

        #[command(flatten)]
        line: LineArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Three competing species on a line
    Species {
        /// Print the display glyphs instead of the seed-file digits
        #[arg(long)]
        fancy: bool,

        #[command(flatten)]
        line: LineArgs,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Conway's Game of Life
    Life {
        /// Use the 512-pattern table instead of neighbour counts
        #[arg(long)]
        exact: bool,

        /// Start from the demo glider on a 10x10 grid
        #[arg(long, conflicts_with = "seed_file")]
        glider: bool,

        #[command(flatten)]
        grid: GridArgs,

        #[command(flatten)]
        run: RunArgs,
    },
}

/// Seed options for 1D modes.
#[derive(Args, Debug)]
struct LineArgs {
    /// Read the seed from the first line of this file
    #[arg(long)]
    seed_file: Option<PathBuf>,

    /// Line length for a generated seed
    #[arg(long, default_value_t = 80)]
    length: usize,

    /// Start from a single living centre cell instead of a random line.
    /// In species mode every cell belongs to the first species.
    #[arg(long, conflicts_with = "seed_file")]
    point: bool,

    /// Probability that a generated cell is alive
    #[arg(long, default_value_t = 0.5)]
    density: f64,
}

/// Seed options for 2D modes.
#[derive(Args, Debug)]
struct GridArgs {
    /// Read the seed rows from this file
    #[arg(long)]
    seed_file: Option<PathBuf>,

    /// Rows of a generated seed
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Columns of a generated seed
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Probability that a generated cell is alive
    #[arg(long, default_value_t = 0.5)]
    density: f64,
}

/// Options shared by every mode.
#[derive(Args, Debug)]
struct RunArgs {
    /// Edge handling: wrap or clip
    #[arg(long, default_value_t = BoundaryPolicy::Wrap)]
    boundary: BoundaryPolicy,

    /// RNG seed for generated grids, species tie-breaks and count mutation
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many new generations
    #[arg(long, default_value_t = 500, conflicts_with = "no_limit")]
    max_generations: u64,

    /// Run until the grid repeats, however long that takes
    #[arg(long)]
    no_limit: bool,

    /// Only print the summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl RunArgs {
    fn config(&self) -> RunnerConfig {
        RunnerConfig {
            max_generations: (!self.no_limit).then_some(self.max_generations),
        }
    }

    fn rng(&self) -> (u64, ChaCha8Rng) {
        let seed = self.seed.unwrap_or_else(rand::random);
        (seed, ChaCha8Rng::seed_from_u64(seed))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match dispatch(cli.mode) {
        Ok(report) => {
            eprintln!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(mode: Mode) -> Result<RunReport, CliError> {
    match mode {
        Mode::Wolfram {
            code,
            width,
            line,
            run,
        } => {
            let automaton = Automaton::wolfram(code, width, run.boundary)?;
            info!(code = %code, width, boundary = %run.boundary, "wolfram rule");
            let grid = seed_line(&line, &run)?;
            execute(grid, automaton, &run, plain_sink(run.quiet))
        }
        Mode::Rule {
            rulestring,
            preset,
            mutation,
            line,
            run,
        } => {
            let rules = match (rulestring, preset) {
                (Some(text), _) => text.parse::<RuleString>()?,
                (None, Some(name)) => {
                    presets::named(&name).ok_or(CliError::UnknownPreset { name })?
                }
                (None, None) => return Err(CliError::MissingRule),
            };
            info!(rule = %rules, "rulestring");
            let (seed, _) = run.rng();
            let automaton = Automaton::from_rulestring(&rules, run.boundary)?
                .with_mutation(mutation, seed)?;
            if mutation > 0.0 {
                info!(mutation, seed, "neighbour-count mutation");
            }
            let grid = seed_line(&line, &run)?;
            execute(grid, automaton, &run, plain_sink(run.quiet))
        }
        Mode::Species { fancy, line, run } => {
            let registry = SpeciesRegistry::triad()?;
            let (seed, mut rng) = run.rng();
            let grid = seed_species_line(&line, &registry, &mut rng)?;
            let glyphs = if fancy {
                registry.glyphs()
            } else {
                registry.debug_glyphs()
            };
            let automaton = SpeciesAutomaton::new(registry, run.boundary, seed)?;
            let sink = plain_sink(run.quiet).map(|s| s.with_species_glyphs(glyphs));
            execute(grid, automaton, &run, sink)
        }
        Mode::Life {
            exact,
            glider,
            grid,
            run,
        } => {
            let automaton = if exact {
                Automaton::game_of_life_exact(run.boundary)?
            } else {
                Automaton::game_of_life(run.boundary)?
            };
            let seed = if glider {
                Grid2D::glider_demo()
            } else {
                seed_grid(&grid, &run)?
            };
            execute(seed, automaton, &run, plain_sink(run.quiet))
        }
    }
}

type StdoutSink = TextSink<BufWriter<io::Stdout>>;

fn plain_sink(quiet: bool) -> Option<StdoutSink> {
    (!quiet).then(|| TextSink::new(BufWriter::new(io::stdout())).with_glyphs('-', 'X'))
}

fn execute<L, T>(
    grid: L,
    transition: T,
    run: &RunArgs,
    sink: Option<StdoutSink>,
) -> Result<RunReport, CliError>
where
    L: Lattice,
    T: Transition<L>,
    StdoutSink: GenerationSink<L>,
{
    let mut runner = SimulationRunner::new(grid, transition, run.config())?;
    match sink {
        Some(mut sink) => {
            let report = runner.run(&mut sink)?;
            sink.into_inner().flush()?;
            Ok(report)
        }
        None => Ok(runner.run(&mut NullSink)?),
    }
}

fn seed_line(line: &LineArgs, run: &RunArgs) -> Result<Grid1D, CliError> {
    if let Some(path) = &line.seed_file {
        return Ok(decode_line(&read_first_line(path)?)?);
    }
    if line.point {
        return Ok(Grid1D::point(line.length)?);
    }
    let (seed, mut rng) = run.rng();
    info!(seed, "random line");
    Ok(Grid1D::random(line.length, line.density, &mut rng)?)
}

fn seed_species_line(
    line: &LineArgs,
    registry: &SpeciesRegistry<i32>,
    rng: &mut ChaCha8Rng,
) -> Result<Grid1D, CliError> {
    if let Some(path) = &line.seed_file {
        let text = read_first_line(path)?;
        return Ok(decode_species_line(&text, SpeciesId(0), |c| {
            registry.by_debug_glyph(c)
        })?);
    }
    if line.point {
        let centre = line.length / 2;
        let cells = (0..line.length)
            .map(|i| Cell::with_species(i == centre, SpeciesId(0)))
            .collect();
        return Ok(Grid1D::from_cells(cells)?);
    }
    Ok(registry.random_line(line.length, line.density, rng)?)
}

fn seed_grid(grid: &GridArgs, run: &RunArgs) -> Result<Grid2D, CliError> {
    if let Some(path) = &grid.seed_file {
        let text = read_seed(path)?;
        return Ok(decode_rows(&text)?);
    }
    let (seed, mut rng) = run.rng();
    info!(seed, "random grid");
    Ok(Grid2D::random(grid.height, grid.width, grid.density, &mut rng)?)
}

fn read_seed(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::SeedFile {
        path: path.to_path_buf(),
        source,
    })
}

fn read_first_line(path: &Path) -> Result<String, CliError> {
    let text = read_seed(path)?;
    let first = text.split_inclusive('\n').next().unwrap_or_default();
    Ok(strip_line_ending(first).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_wolfram_flags() {
        let cli = Cli::try_parse_from([
            "cellum",
            "wolfram",
            "--code",
            "110",
            "--point",
            "--length",
            "31",
            "--boundary",
            "clip",
            "--max-generations",
            "12",
        ])
        .unwrap();
        match cli.mode {
            Mode::Wolfram {
                code, line, run, ..
            } => {
                assert_eq!(code, 110);
                assert!(line.point);
                assert_eq!(line.length, 31);
                assert_eq!(run.boundary, BoundaryPolicy::Clip);
                assert_eq!(run.config().max_generations, Some(12));
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn no_limit_clears_generation_bound() {
        let cli = Cli::try_parse_from(["cellum", "life", "--glider", "--no-limit"]).unwrap();
        match cli.mode {
            Mode::Life { run, glider, .. } => {
                assert!(glider);
                assert_eq!(run.config().max_generations, None);
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn rule_needs_a_rulestring_or_preset() {
        assert!(Cli::try_parse_from(["cellum", "rule"]).is_err());
        assert!(Cli::try_parse_from(["cellum", "rule", "--preset", "abacus"]).is_ok());
    }

    #[test]
    fn bad_boundary_is_rejected() {
        assert!(Cli::try_parse_from(["cellum", "life", "--boundary", "mirror"]).is_err());
    }

    #[test]
    fn quiet_glider_run_cycles() {
        let cli = Cli::try_parse_from(["cellum", "life", "--glider", "-q"]).unwrap();
        let report = dispatch(cli.mode).unwrap();
        assert_eq!(report.state, RunState::Cycled { period: 40 });
    }

    #[test]
    fn species_point_is_one_living_first_species_cell() {
        let cli = Cli::try_parse_from(["cellum", "species", "--point", "--length", "9"]).unwrap();
        let Mode::Species { line, .. } = cli.mode else {
            panic!("expected species mode");
        };
        let registry = SpeciesRegistry::triad().unwrap();
        let grid = seed_species_line(&line, &registry, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.alive_count(), 1);
        assert_eq!(grid.get(4), Some(&Cell::with_species(true, SpeciesId(0))));
        assert!(grid.iter().all(|c| c.species == Some(SpeciesId(0))));
    }

    #[test]
    fn species_point_run_is_reproducible() {
        let args = ["cellum", "species", "--point", "--seed", "5", "-q"];
        let a = dispatch(Cli::try_parse_from(args).unwrap().mode).unwrap();
        let b = dispatch(Cli::try_parse_from(args).unwrap().mode).unwrap();
        assert_eq!(a, b);
        assert!(a.steps > 0);
    }

    #[test]
    fn mutation_flag_is_validated() {
        let cli = Cli::try_parse_from([
            "cellum", "rule", "--preset", "abacus", "--mutation", "1.5", "--point", "-q",
        ])
        .unwrap();
        assert!(matches!(
            dispatch(cli.mode),
            Err(CliError::Config(ConfigError::InvalidMutation { .. }))
        ));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let cli =
            Cli::try_parse_from(["cellum", "rule", "--preset", "nope", "--point", "-q"]).unwrap();
        assert!(matches!(
            dispatch(cli.mode),
            Err(CliError::UnknownPreset { .. })
        ));
    }
}
