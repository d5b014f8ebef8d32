//! Errors surfaced by the `cellum` binary.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use cellum::engine::{ConfigError, RunError, StepError};
use cellum::rule::RuleError;
use cellum::space::SpaceError;

/// Anything that stops the binary before or during a run.
#[derive(Debug)]
pub enum CliError {
    /// The seed file could not be read.
    SeedFile {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// `--preset` named no known rule.
    UnknownPreset {
        /// The requested name.
        name: String,
    },
    /// Neither `--rulestring` nor `--preset` was given.
    MissingRule,
    /// Malformed seed or grid dimensions.
    Space(SpaceError),
    /// Malformed rule.
    Rule(RuleError),
    /// Invalid configuration.
    Config(ConfigError),
    /// Failure while advancing.
    Step(StepError),
    /// Writing a generation failed.
    Output(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedFile { path, source } => {
                write!(f, "cannot read seed file {}: {source}", path.display())
            }
            Self::UnknownPreset { name } => write!(f, "unknown preset '{name}'"),
            Self::MissingRule => write!(f, "one of --rulestring or --preset is required"),
            Self::Space(e) => write!(f, "{e}"),
            Self::Rule(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Step(e) => write!(f, "{e}"),
            Self::Output(e) => write!(f, "writing output: {e}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SeedFile { source, .. } => Some(source),
            Self::Space(e) => Some(e),
            Self::Rule(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Step(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::UnknownPreset { .. } | Self::MissingRule => None,
        }
    }
}

impl From<SpaceError> for CliError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<RuleError> for CliError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Output(e)
    }
}

impl From<RunError> for CliError {
    fn from(e: RunError) -> Self {
        match e {
            RunError::Step(e) => Self::Step(e),
            RunError::Sink(e) => Self::Output(e),
        }
    }
}
