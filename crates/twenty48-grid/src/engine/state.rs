use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ops;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 4;

/// A single cell value: `0` for empty, otherwise a power of two.
pub type Tile = u32;
/// One row of the grid, left to right.
pub type Row = [Tile; GRID_SIZE];
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Quarter turns applied before and after the left merge so that
    /// merging left in the rotated frame merges toward `self` in the original.
    #[inline]
    pub fn rotations(self) -> (usize, usize) {
        match self {
            Move::Left => (0, 0),
            Move::Right => (2, 2),
            Move::Up => (3, 1),
            Move::Down => (1, 3),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// A 4x4 2048 grid stored row-major as plain tile values.
///
/// Every transformation returns a new `Grid`; nothing mutates in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid(pub(crate) [Row; GRID_SIZE]);

impl Grid {
    /// A constant empty grid (all zeros).
    pub const EMPTY: Grid = Grid([[0; GRID_SIZE]; GRID_SIZE]);

    /// Construct a `Grid` from its rows, top to bottom.
    #[inline]
    pub fn from_rows(rows: [Row; GRID_SIZE]) -> Self {
        Grid(rows)
    }

    /// Consume this `Grid`, returning its rows.
    #[inline]
    pub fn into_rows(self) -> [Row; GRID_SIZE] {
        self.0
    }

    /// Borrow the rows of this `Grid`.
    #[inline]
    pub fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.0
    }

    /// Value at (`row`, `col`); `0` when empty.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return the grid resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_grid::engine::{Grid, Move};
    /// let g = Grid::from_rows([[0, 0, 2, 2], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(g.shift(Move::Left).rows()[0], [4, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift(self, dir)
    }

    /// Rotate a quarter turn clockwise: (r, c) moves to (c, 3 - r).
    #[inline]
    pub fn rotate(self) -> Self {
        ops::rotate_grid(self)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty
    /// cell, using the provided RNG. A full grid comes back unchanged.
    ///
    /// ```
    /// use twenty48_grid::engine::Grid;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::random_tile(self, rng)
    }

    /// Convenience: like `with_random_tile` but uses thread-local RNG.
    #[inline]
    pub fn with_random_tile_thread(self) -> Self {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Sum of every tile on the grid.
    #[inline]
    pub fn score(self) -> Score {
        ops::get_score(self)
    }

    /// True while some move would change the grid.
    ///
    /// ```
    /// use twenty48_grid::engine::Grid;
    /// // No tiles at all still counts as movable: every cell is empty.
    /// assert!(Grid::EMPTY.can_move());
    /// ```
    #[inline]
    pub fn can_move(self) -> bool {
        ops::can_move(self)
    }

    /// Return the highest tile value present on the grid (0 when empty).
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::get_highest_tile_val(self)
    }

    /// Count the number of empty cells on the grid.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter { grid: self, idx: 0 }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Grid").field(&self.0).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", "-".repeat(GRID_SIZE * 8 - 1))?;
            }
            let cells: Vec<String> = row.iter().map(|&v| ops::format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<[Row; GRID_SIZE]> for Grid {
    fn from(rows: [Row; GRID_SIZE]) -> Self {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for [Row; GRID_SIZE] {
    fn from(g: Grid) -> Self {
        g.into_rows()
    }
}

/// Iterator over grid tiles in row-major order.
pub struct TilesIter {
    grid: Grid,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Tile;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= GRID_SIZE * GRID_SIZE {
            return None;
        }
        let v = self.grid.0[self.idx / GRID_SIZE][self.idx % GRID_SIZE];
        self.idx += 1;
        Some(v)
    }
}

impl IntoIterator for Grid {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rotations_undo_each_other() {
        for dir in Move::ALL {
            let (before, after) = dir.rotations();
            assert_eq!((before + after) % 4, 0, "{dir} does not return to its frame");
        }
    }

    #[test]
    fn it_tiles_row_major() {
        let g = Grid::from_rows([[1, 2, 3, 4], [5, 6, 7, 8], [0; 4], [0, 0, 0, 9]]);
        let tiles: Vec<Tile> = g.tiles().collect();
        assert_eq!(tiles.len(), 16);
        assert_eq!(&tiles[..5], &[1, 2, 3, 4, 5]);
        assert_eq!(tiles[15], 9);
    }

    #[test]
    fn it_display_blanks_empty_cells() {
        let g = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]);
        let text = g.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "   2   |       |       |       ");
        assert_eq!(lines[1], "-".repeat(31));
        assert_eq!(lines[6], "       |       |       |  2048 ");
    }

    #[test]
    fn it_serializes_as_nested_rows() {
        let g = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
