//! Hill-climbing engine with bounded sideways moves.
//!
//! Each call to [`HillClimber::step`] scores the whole single-queen
//! neighborhood and applies at most one move:
//!
//! 1. the best strictly improving neighbor, if one exists (ties broken
//!    uniformly at random), which also refills the sideways budget;
//! 2. otherwise an equal-cost neighbor chosen uniformly at random, while the
//!    sideways budget lasts;
//! 3. otherwise nothing, and the engine reports a local minimum.
//!
//! The engine never decides when to stop. Drivers call `step` on a timer or
//! through [`HillClimber::run`] and stop on success or when stuck.

use crate::neighborhood::neighbor_costs;
use crate::{EngineError, EngineResult, Move, Placement, SearchConfig};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Moved to a strictly better neighbor
    Improved,
    /// Moved to an equal-cost neighbor, spending sideways budget
    Sideways,
    /// No permitted move; the placement is a local minimum
    Stuck,
    /// The placement was already a solution; nothing changed
    Solved,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Improved => write!(f, "improved"),
            StepKind::Sideways => write!(f, "sideways"),
            StepKind::Stuck => write!(f, "stuck"),
            StepKind::Solved => write!(f, "solved"),
        }
    }
}

/// Result of [`HillClimber::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Whether a move was applied
    pub moved: bool,
    /// Whether the engine is at a local minimum (never set on a solved board)
    pub stuck: bool,
    pub kind: StepKind,
    /// The applied move, if any
    pub mv: Option<Move>,
    /// Conflict count after the step
    pub cost: usize,
}

/// Snapshot of the engine for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatus {
    pub placement: Placement,
    pub cost: usize,
    pub moves: usize,
    pub sideways_left: usize,
    pub last_move: Option<Move>,
    /// Outcome of the most recent step since the last edit or reset
    pub last_step: Option<StepKind>,
    pub stuck: bool,
}

impl SearchStatus {
    pub fn is_solved(&self) -> bool {
        self.cost == 0
    }

    /// Whether the most recent step moved to a neighbor (improving or sideways)
    pub fn improved(&self) -> bool {
        matches!(
            self.last_step,
            Some(StepKind::Improved) | Some(StepKind::Sideways)
        )
    }

    /// Whether the most recent step was a sideways move
    pub fn lateral(&self) -> bool {
        self.last_step == Some(StepKind::Sideways)
    }
}

/// Status line: `h = 2   moves = 5   sideways_left = 3`, plus a marker on success or when stuck
impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "h = {}   moves = {}   sideways_left = {}",
            self.cost, self.moves, self.sideways_left
        )?;
        if self.is_solved() {
            write!(f, "   solution!")
        } else if self.stuck {
            write!(f, "   local minimum")
        } else {
            Ok(())
        }
    }
}

/// Why [`HillClimber::run`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// Reached a placement with no conflicts
    Solved,
    /// No improving or permitted sideways move
    Stuck,
    /// Step limit reached before either terminal state
    StepLimit,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Solved => write!(f, "Solution found"),
            Termination::Stuck => write!(f, "Local minimum"),
            Termination::StepLimit => write!(f, "Step limit reached"),
        }
    }
}

/// Outcome of [`HillClimber::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub termination: Termination,
    /// Number of `step` calls made by this run
    pub steps: usize,
    /// Total moves since the last edit or reset
    pub moves: usize,
    pub cost: usize,
}

/// Local search engine for one N-Queens board.
///
/// Generic over the random source so tests can inject a seeded generator.
#[derive(Debug, Clone)]
pub struct HillClimber<R = StdRng> {
    config: SearchConfig,
    /// Placement restored by `reset`; updated by every edit
    baseline: Placement,
    placement: Placement,
    last_move: Option<Move>,
    last_step: Option<StepKind>,
    moves: usize,
    sideways_left: usize,
    stuck: bool,
    rng: R,
}

impl HillClimber<StdRng> {
    /// Create an engine seeded from OS entropy
    pub fn new(config: SearchConfig) -> EngineResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed for reproducible runs
    pub fn with_seed(config: SearchConfig, seed: u64) -> EngineResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HillClimber<R> {
    /// Create an engine drawing tie-breaks (and a missing initial placement) from `rng`
    pub fn with_rng(config: SearchConfig, mut rng: R) -> EngineResult<Self> {
        config.validate()?;

        let baseline = match config.initial {
            Some(ref initial) => initial.clone(),
            None => Placement::random(config.board_size, &mut rng),
        };

        Ok(Self {
            placement: baseline.clone(),
            baseline,
            last_move: None,
            last_step: None,
            moves: 0,
            sideways_left: config.sideways_max,
            stuck: false,
            config,
            rng,
        })
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn sideways_max(&self) -> usize {
        self.config.sideways_max
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Placement that `reset` restores
    pub fn baseline(&self) -> &Placement {
        &self.baseline
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Moves applied since the last edit or reset
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn sideways_left(&self) -> usize {
        self.sideways_left
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Conflict count of the current placement
    pub fn cost(&self) -> usize {
        self.placement.conflicts()
    }

    pub fn is_solved(&self) -> bool {
        self.cost() == 0
    }

    pub fn status(&self) -> SearchStatus {
        SearchStatus {
            placement: self.placement.clone(),
            cost: self.cost(),
            moves: self.moves,
            sideways_left: self.sideways_left,
            last_move: self.last_move,
            last_step: self.last_step,
            stuck: self.stuck,
        }
    }

    /// Apply at most one move: the best improving neighbor, else a sideways move
    /// while budget remains. Never increases the conflict count.
    pub fn step(&mut self) -> StepResult {
        let current = self.cost();
        if current == 0 {
            self.last_step = Some(StepKind::Solved);
            return StepResult {
                moved: false,
                stuck: false,
                kind: StepKind::Solved,
                mv: None,
                cost: 0,
            };
        }

        let scored = neighbor_costs(&self.placement);
        let best = scored.iter().map(|&(_, cost)| cost).min().unwrap_or(current);
        trace!(
            "scored {} neighbors: current h = {}, best h = {}",
            scored.len(),
            current,
            best
        );

        if best < current {
            if let Some(mv) = Self::pick(&mut self.rng, &scored, best) {
                self.sideways_left = self.config.sideways_max;
                return self.apply(mv, StepKind::Improved, current, best);
            }
        }

        if self.config.sideways_max > 0 && self.sideways_left > 0 {
            if let Some(mv) = Self::pick(&mut self.rng, &scored, current) {
                self.sideways_left -= 1;
                return self.apply(mv, StepKind::Sideways, current, current);
            }
        }

        info!(
            "local minimum at h = {} after {} moves ({})",
            current,
            self.moves,
            self.placement.to_string_compact()
        );
        self.last_move = None;
        self.last_step = Some(StepKind::Stuck);
        self.stuck = true;
        StepResult {
            moved: false,
            stuck: true,
            kind: StepKind::Stuck,
            mv: None,
            cost: current,
        }
    }

    /// Step until solved, stuck, or `max_steps` calls have been made
    pub fn run(&mut self, max_steps: usize) -> SearchReport {
        let mut steps = 0;
        let termination = loop {
            if self.is_solved() {
                break Termination::Solved;
            }
            if steps >= max_steps {
                break Termination::StepLimit;
            }
            steps += 1;
            if !self.step().moved {
                break Termination::Stuck;
            }
        };

        SearchReport {
            termination,
            steps,
            moves: self.moves,
            cost: self.cost(),
        }
    }

    /// Put the queen of `column` on `row` and make the result the new baseline.
    ///
    /// Clears the stuck flag and last move, refills the sideways budget and
    /// restarts the move count. Leaves the engine untouched when out of range.
    pub fn edit_column(&mut self, column: usize, row: usize) -> EngineResult<()> {
        let size = self.config.board_size;
        if column >= size || row >= size {
            return Err(EngineError::OutOfRange { column, row, size });
        }

        self.placement.set(column, row);
        self.baseline = self.placement.clone();
        debug!(
            "edited column {} to row {}: h = {}",
            column,
            row,
            self.cost()
        );
        self.restart();
        Ok(())
    }

    /// Restore the baseline placement and clear all progress
    pub fn reset(&mut self) {
        self.placement = self.baseline.clone();
        self.restart();
    }

    /// Replace the baseline with a random placement and start over from it
    pub fn randomize(&mut self) {
        self.baseline = Placement::random(self.config.board_size, &mut self.rng);
        debug!(
            "new random baseline {} (h = {})",
            self.baseline.to_string_compact(),
            self.baseline.conflicts()
        );
        self.reset();
    }

    fn restart(&mut self) {
        self.moves = 0;
        self.last_move = None;
        self.last_step = None;
        self.stuck = false;
        self.sideways_left = self.config.sideways_max;
    }

    /// Uniform choice among the moves whose cost equals `target`
    fn pick(rng: &mut R, scored: &[(Move, usize)], target: usize) -> Option<Move> {
        let ties: Vec<Move> = scored
            .iter()
            .filter(|&&(_, cost)| cost == target)
            .map(|&(mv, _)| mv)
            .collect();
        ties.choose(rng).copied()
    }

    fn apply(&mut self, mv: Move, kind: StepKind, before: usize, after: usize) -> StepResult {
        self.placement.set(mv.column, mv.to);
        self.last_move = Some(mv);
        self.last_step = Some(kind);
        self.moves += 1;
        debug!(
            "move {} ({}): {}, h {} -> {}, sideways_left = {}",
            self.moves, kind, mv, before, after, self.sideways_left
        );
        if after == 0 {
            info!("solution found after {} moves: {}", self.moves, self.placement.to_string_compact());
        }

        StepResult {
            moved: true,
            stuck: false,
            kind,
            mv: Some(mv),
            cost: after,
        }
    }
}
