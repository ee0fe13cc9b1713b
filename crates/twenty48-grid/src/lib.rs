//! twenty48-grid: the 2048 grid engine and game controller
//!
//! This crate provides:
//! - A `Grid` value with pure transformations (`shift`, `rotate`, `can_move`, ...)
//! - A `Game` controller that owns grid, score and game-over phase
//!
//! Quick start:
//! ```
//! use twenty48_grid::engine::{Grid, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic grid initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let g0 = Grid::EMPTY.with_random_tile(&mut rng);
//! let g1 = g0.shift(Move::Left);
//! assert_eq!(g1.score(), g0.score());
//! ```
//!
//! Full loop:
//! ```
//! use twenty48_grid::engine::Move;
//! use twenty48_grid::game::{Game, MoveOutcome};
//!
//! let mut game = Game::from_seed(123);
//! let mut moves = 0u32;
//! while !game.is_over() && moves < 8 {
//!     let dir = Move::ALL[(moves % 4) as usize];
//!     if game.apply_move(dir) != MoveOutcome::Unchanged {
//!         assert_eq!(game.score(), game.grid().score());
//!     }
//!     moves += 1;
//! }
//! ```
//!
pub mod engine;
pub mod game;

pub use engine::{Grid, Move};
pub use game::{Game, MoveOutcome, Phase};
