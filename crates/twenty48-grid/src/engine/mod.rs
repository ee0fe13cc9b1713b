//! Engine module: the 4x4 grid value and the pure transformations over it.
//!
//! - `Grid` is the immutable 4x4 state with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Directions are one left merge composed with quarter-turn rotations.

mod ops;
pub mod state;

pub use state::{Grid, Move, Row, Score, Tile, TilesIter, GRID_SIZE};

pub use ops::{
    can_move, count_empty, empty_grid, get_highest_tile_val, get_score, grids_equal,
    insert_random_tile, move_grid_left, move_row_left, random_tile, rotate_grid, shift,
};
