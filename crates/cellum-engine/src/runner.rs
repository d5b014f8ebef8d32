//! Run-to-completion driver with repeat detection.
//!
//! [`SimulationRunner`] owns the current generation and a scratch buffer
//! of the same shape. Each step advances into the scratch buffer, looks
//! the result up among every generation seen so far, and either halts
//! (the result repeats an earlier generation) or swaps the buffers and
//! continues.
//!
//! # Counting
//!
//! `steps` counts new, unique generations. The advance that produces a
//! repeat is counted in `advances` but not in `steps`, its changes are not
//! added to `total_changes`, and it is never emitted: the runner's grid
//! stays on the last unique generation. A still life therefore reports
//! `steps == 0` after one advance.

use std::fmt;

use cellum_core::GenerationId;
use cellum_space::Lattice;
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::advance::Transition;
use crate::cancel::CancelToken;
use crate::config::{ConfigError, RunnerConfig};
use crate::error::{RunError, StepError};
use crate::hash::{grid_digest, FnvBuildHasher, StateKey};
use crate::sink::GenerationSink;

/// Where a run stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Every generation so far is new.
    Running,
    /// The latest advance reproduced the current generation.
    Stable,
    /// The latest advance reproduced an earlier generation.
    Cycled {
        /// Generations between the two occurrences; always at least 2.
        period: u64,
    },
    /// Stopped through the [`CancelToken`].
    Cancelled,
    /// Stopped by [`RunnerConfig::max_generations`].
    Exhausted,
}

impl RunState {
    /// Whether the run has stopped.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stable => write!(f, "stable"),
            Self::Cycled { period } => write!(f, "cycled (period {period})"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Exhausted => write!(f, "generation limit reached"),
        }
    }
}

/// Summary of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Final state.
    pub state: RunState,
    /// Unique generations produced after the seed.
    pub steps: u64,
    /// Advances computed, including one that produced a repeat.
    pub advances: u64,
    /// Sum of changed cells over the unique generations.
    pub total_changes: u64,
    /// [`grid_digest`] of the last unique generation.
    pub final_digest: u64,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: steps {}, changes {}, digest {:016x}",
            self.state, self.steps, self.total_changes, self.final_digest
        )
    }
}

/// Drives a [`Transition`] until the grid repeats, the run is cancelled,
/// or the generation limit is reached.
///
/// # Example
///
/// ```
/// use cellum_engine::{Automaton, NullSink, RunState, RunnerConfig, SimulationRunner};
/// use cellum_space::{BoundaryPolicy, Grid2D};
///
/// let life = Automaton::game_of_life(BoundaryPolicy::Wrap).unwrap();
/// let mut runner =
///     SimulationRunner::new(Grid2D::glider_demo(), life, RunnerConfig::default()).unwrap();
/// let report = runner.run(&mut NullSink).unwrap();
/// // On a 10x10 torus the glider returns to its start after 40 generations.
/// assert_eq!(report.state, RunState::Cycled { period: 40 });
/// ```
pub struct SimulationRunner<L: Lattice, T> {
    current: L,
    scratch: L,
    transition: T,
    config: RunnerConfig,
    seen: IndexSet<StateKey, FnvBuildHasher>,
    generation: GenerationId,
    state: RunState,
    steps: u64,
    advances: u64,
    total_changes: u64,
    cancel: CancelToken,
}

impl<L: Lattice, T: Transition<L>> SimulationRunner<L, T> {
    /// Validate the configuration and record the seed as generation 0.
    pub fn new(grid: L, transition: T, config: RunnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.cell_count() == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        transition.validate(&grid)?;

        let mut seen = IndexSet::default();
        seen.insert(StateKey::of(&grid));
        debug!(
            cells = grid.cell_count(),
            digest = grid_digest(&grid),
            "runner initialised"
        );
        Ok(Self {
            scratch: grid.clone(),
            current: grid,
            transition,
            config,
            seen,
            generation: GenerationId::default(),
            state: RunState::Running,
            steps: 0,
            advances: 0,
            total_changes: 0,
            cancel: CancelToken::new(),
        })
    }

    /// Replace the cancel token, e.g. with one shared with a signal handler.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that stops [`run`](Self::run) before its next advance.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The last unique generation.
    pub fn grid(&self) -> &L {
        &self.current
    }

    /// Id of [`grid`](Self::grid).
    pub fn generation(&self) -> GenerationId {
        self.generation
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The transition driving the run.
    pub fn transition(&self) -> &T {
        &self.transition
    }

    /// Advance once.
    ///
    /// Returns the new state. Once a terminal state is reached further
    /// calls do nothing and return it again.
    pub fn step(&mut self) -> Result<RunState, StepError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        if self
            .config
            .max_generations
            .is_some_and(|max| self.steps >= max)
        {
            self.state = RunState::Exhausted;
            info!(steps = self.steps, "generation limit reached");
            return Ok(self.state);
        }

        let changed = self
            .transition
            .advance_into(&self.current, &mut self.scratch)?;
        self.advances += 1;

        let key = StateKey::of(&self.scratch);
        if let Some(first) = self.seen.get_index_of(&key) {
            let period = (self.seen.len() - first) as u64;
            self.state = if period == 1 {
                RunState::Stable
            } else {
                RunState::Cycled { period }
            };
            info!(
                generation = %self.generation,
                first_seen = first,
                period,
                "repeat detected"
            );
            return Ok(self.state);
        }

        self.seen.insert(key);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation = self.generation.next();
        self.steps += 1;
        self.total_changes += changed as u64;
        debug!(
            generation = %self.generation,
            changed,
            digest = grid_digest(&self.current),
            "advanced"
        );
        Ok(self.state)
    }

    /// Step until a terminal state, emitting the current generation first
    /// and then every new one.
    ///
    /// The cancel token is checked before each advance.
    pub fn run<S: GenerationSink<L>>(&mut self, sink: &mut S) -> Result<RunReport, RunError> {
        sink.emit(self.generation, &self.current)?;
        while !self.state.is_terminal() {
            if self.cancel.is_cancelled() {
                self.state = RunState::Cancelled;
                warn!(generation = %self.generation, "run cancelled");
                break;
            }
            let before = self.generation;
            self.step()?;
            if self.generation != before {
                sink.emit(self.generation, &self.current)?;
            }
        }
        let report = self.report();
        info!(
            state = %report.state,
            steps = report.steps,
            total_changes = report.total_changes,
            "run finished"
        );
        Ok(report)
    }

    /// Summary of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            state: self.state,
            steps: self.steps,
            advances: self.advances,
            total_changes: self.total_changes,
            final_digest: grid_digest(&self.current),
        }
    }
}
