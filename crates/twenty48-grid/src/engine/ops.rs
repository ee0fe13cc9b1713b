use rand::Rng;

use super::state::{Grid, Move, Row, Score, Tile, GRID_SIZE};

/// A fresh grid with every cell empty.
pub fn empty_grid() -> Grid {
    Grid::EMPTY
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// Every direction is the left merge seen through a rotation, so
/// `move_row_left` is the only place merge rules live.
pub fn shift(grid: Grid, direction: Move) -> Grid {
    let (before, after) = direction.rotations();
    rotate_times(move_grid_left(rotate_times(grid, before)), after)
}

/// Apply `move_row_left` to every row.
pub fn move_grid_left(grid: Grid) -> Grid {
    Grid(grid.0.map(move_row_left))
}

/// Compact a row to the left, merging equal neighbours once.
///
/// The scan is single-pass and left-biased: a tile produced by a merge is
/// never merged again in the same move, so `[2, 0, 2, 2]` becomes `[4, 2, 0, 0]`.
///
/// ```
/// use twenty48_grid::engine::move_row_left;
/// assert_eq!(move_row_left([2, 2, 0, 0]), [4, 0, 0, 0]);
/// assert_eq!(move_row_left([2, 0, 2, 2]), [4, 2, 0, 0]);
/// ```
pub fn move_row_left(row: Row) -> Row {
    let mut packed: Vec<Tile> = row.into_iter().filter(|&v| v != 0).collect();
    for i in 0..packed.len().saturating_sub(1) {
        if packed[i] == packed[i + 1] {
            packed[i] *= 2;
            // spent: the consumed neighbour cannot merge again this pass
            packed[i + 1] = 0;
        }
    }
    let mut out = [0; GRID_SIZE];
    for (slot, v) in out.iter_mut().zip(packed.into_iter().filter(|&v| v != 0)) {
        *slot = v;
    }
    out
}

/// Quarter turn clockwise: cell (r, c) moves to (c, 3 - r).
pub fn rotate_grid(grid: Grid) -> Grid {
    let mut out = [[0; GRID_SIZE]; GRID_SIZE];
    for (r, row) in grid.0.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][GRID_SIZE - 1 - r] = v;
        }
    }
    Grid(out)
}

pub(crate) fn rotate_times(grid: Grid, turns: usize) -> Grid {
    (0..turns % 4).fold(grid, |g, _| rotate_grid(g))
}

/// True if every corresponding cell matches.
pub fn grids_equal(a: Grid, b: Grid) -> bool {
    a.0 == b.0
}

/// True if any cell is empty or equals its right or bottom neighbour.
///
/// In this merge model that is exactly "some move changes the grid", so it
/// serves as the terminal-state test without simulating moves.
pub fn can_move(grid: Grid) -> bool {
    let g = &grid.0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if g[r][c] == 0 {
                return true;
            }
            if c < GRID_SIZE - 1 && g[r][c] == g[r][c + 1] {
                return true;
            }
            if r < GRID_SIZE - 1 && g[r][c] == g[r + 1][c] {
                return true;
            }
        }
    }
    false
}

/// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
///
/// Returns the grid unchanged when it has no empty cell.
pub fn random_tile<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Grid {
    let empty: Vec<(usize, usize)> = (0..GRID_SIZE)
        .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
        .filter(|&(r, c)| grid.0[r][c] == 0)
        .collect();
    if empty.is_empty() {
        return grid;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let mut out = grid;
    out.0[row][col] = generate_random_tile(rng);
    out
}

/// Insert a random 2 (90%) or 4 (10%) tile using thread-local RNG.
///
/// For reproducible behavior, prefer `Grid::with_random_tile(&mut impl Rng)`.
pub fn insert_random_tile(grid: Grid) -> Grid {
    grid.with_random_tile_thread()
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}

/// Sum of all tile values on the grid.
pub fn get_score(grid: Grid) -> Score {
    grid.tiles().map(Score::from).sum()
}

/// Count the number of zero tiles.
pub fn count_empty(grid: Grid) -> usize {
    grid.tiles().filter(|&v| v == 0).count()
}

pub fn get_highest_tile_val(grid: Grid) -> Tile {
    grid.tiles().max().unwrap_or(0)
}

pub(crate) fn format_val(val: Tile) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
