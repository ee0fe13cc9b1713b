//! Game controller: the single owner of the (grid, score, phase) triple.
//!
//! All state changes go through [`Game::apply_move`] and [`Game::restart`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::engine::{self, Grid, Move, Score};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Over,
}

/// What a call to [`Game::apply_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing slid or merged; no tile spawned, score untouched.
    Unchanged,
    /// The move was committed and play continues.
    Moved,
    /// The move was committed and left no legal move.
    Finished,
}

pub struct Game<R = StdRng> {
    grid: Grid,
    score: Score,
    phase: Phase,
    rng: R,
}

impl Game<StdRng> {
    /// Start a game seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Start a reproducible game.
    ///
    /// ```
    /// use twenty48_grid::game::Game;
    /// let game = Game::from_seed(42);
    /// assert_eq!(game.grid().count_empty(), 15);
    /// assert_eq!(game.score(), 0);
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// Empty grid plus one random tile; score 0.
    pub fn with_rng(mut rng: R) -> Self {
        let grid = engine::empty_grid().with_random_tile(&mut rng);
        Self {
            grid,
            score: 0,
            phase: Phase::Playing,
            rng,
        }
    }

    /// Resume from an arbitrary grid. Score and phase are derived from it.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        let phase = if grid.can_move() {
            Phase::Playing
        } else {
            Phase::Over
        };
        Self {
            grid,
            score: grid.score(),
            phase,
            rng,
        }
    }

    /// Shift the grid toward `direction`.
    ///
    /// A move that changes nothing is dropped. Otherwise one tile spawns, the
    /// score becomes the sum of the grid and the phase flips to `Over` if no
    /// move remains. The game-over guard belongs to the caller.
    pub fn apply_move(&mut self, direction: Move) -> MoveOutcome {
        let shifted = self.grid.shift(direction);
        if engine::grids_equal(shifted, self.grid) {
            debug!(%direction, "move does not change the grid");
            return MoveOutcome::Unchanged;
        }

        let updated = shifted.with_random_tile(&mut self.rng);
        self.grid = updated;
        self.score = updated.score();

        if !updated.can_move() {
            self.phase = Phase::Over;
            debug!(
                %direction,
                score = self.score,
                highest_tile = updated.highest_tile(),
                "no move left"
            );
            return MoveOutcome::Finished;
        }

        debug!(%direction, score = self.score, empty = updated.count_empty(), "move applied");
        MoveOutcome::Moved
    }

    /// Fresh seeded grid, score back to 0, phase back to `Playing`.
    pub fn restart(&mut self) {
        self.grid = engine::empty_grid().with_random_tile(&mut self.rng);
        self.score = 0;
        self.phase = Phase::Playing;
        info!("game restarted");
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}
