use serde::Serialize;

use super::{
    piece::Piece,
    shape::{Color, ShapeMatrix},
};

/// One row of the grid, left to right.
pub type GridRow = [Option<Color>; Grid::WIDTH];

const EMPTY_ROW: GridRow = [None; Grid::WIDTH];

/// Fixed-size occupancy matrix of locked cells.
///
/// Each cell is either empty (`None`) or holds the color of the piece that
/// was locked there. Row 0 is the top of the playfield.
///
/// The grid has no sentinel border: bounds are checked arithmetically in
/// [`is_valid_position`](Self::is_valid_position), and the area above row 0
/// is treated as open space so pieces can spawn or rotate partially above the
/// visible grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, ShapeKind};
///
/// let grid = Grid::new();
/// let shape = ShapeKind::O.matrix();
///
/// assert!(grid.is_valid_position(&shape, 0, 0));
/// assert!(grid.is_valid_position(&shape, 8, -1));
/// assert!(!grid.is_valid_position(&shape, 9, 0));
/// assert!(!grid.is_valid_position(&shape, 0, 19));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: [GridRow; Grid::HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; Self::HEIGHT],
        }
    }

    /// Returns the rows from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[GridRow; Grid::HEIGHT] {
        &self.rows
    }

    /// Returns the color at `(x, y)`, or `None` if the cell is empty or lies
    /// outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        self.rows.get(y)?.get(x).copied().flatten()
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some()
    }

    /// Tests whether `shape` anchored at `(x, y)` fits.
    ///
    /// A position is invalid if any occupied cell lands left of column 0,
    /// right of the last column, below the last row, or on an occupied grid
    /// cell. Cells above row 0 are never checked for occupancy.
    #[must_use]
    pub fn is_valid_position(&self, shape: &ShapeMatrix, x: i32, y: i32) -> bool {
        shape.occupied().all(|(r, c)| {
            let (Some(nx), Some(ny)) = (offset(x, c), offset(y, r)) else {
                return false;
            };
            let Ok(nx) = usize::try_from(nx) else {
                return false;
            };
            if nx >= Self::WIDTH {
                return false;
            }
            match usize::try_from(ny) {
                // Above the visible grid.
                Err(_) => true,
                Ok(ny) if ny >= Self::HEIGHT => false,
                Ok(ny) => self.rows[ny][nx].is_none(),
            }
        })
    }

    /// Writes the piece's color into every cell it occupies.
    ///
    /// The caller must have validated the position. Cells that fall outside
    /// the grid are skipped.
    pub(crate) fn place(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.occupied_cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = Some(color);
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned top to bottom. Each full row is taken out, everything
    /// above it shifts down by one, and an empty row is inserted at the top.
    /// `on_clear` is invoked with the row index at the moment each row is
    /// removed.
    pub fn clear_full_rows<F>(&mut self, mut on_clear: F) -> usize
    where
        F: FnMut(usize),
    {
        let mut count = 0;
        for y in 0..Self::HEIGHT {
            if self.rows[y].iter().all(Option::is_some) {
                self.rows[..=y].rotate_right(1);
                self.rows[0] = EMPTY_ROW;
                count += 1;
                on_clear(y);
            }
        }
        count
    }

    /// Builds a grid from text rows aligned to the bottom of the grid.
    ///
    /// `#` marks an occupied cell (filled with cyan) and any other character
    /// an empty one.
    #[cfg(test)]
    pub(crate) fn from_ascii(lines: &[&str]) -> Self {
        let mut grid = Self::new();
        let top = Self::HEIGHT - lines.len();
        for (dy, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().take(Self::WIDTH).enumerate() {
                if ch == '#' {
                    grid.rows[top + dy][x] = Some(Color::Cyan);
                }
            }
        }
        grid
    }

    #[cfg(test)]
    pub(crate) fn to_ascii(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

fn offset(base: i32, delta: usize) -> Option<i32> {
    base.checked_add(i32::try_from(delta).ok()?)
}

#[cfg(test)]
mod tests {
    use crate::core::shape::ShapeKind;

    use super::*;

    #[test]
    fn test_initial_grid_is_empty() {
        let grid = Grid::new();
        for y in 0..Grid::HEIGHT {
            for x in 0..Grid::WIDTH {
                assert!(!grid.is_occupied(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_valid_position_bounds() {
        let grid = Grid::new();
        let t = ShapeKind::T.matrix();

        assert!(grid.is_valid_position(&t, 0, 0));
        assert!(grid.is_valid_position(&t, 7, 18));
        assert!(!grid.is_valid_position(&t, -1, 0));
        assert!(!grid.is_valid_position(&t, 8, 0));
        assert!(!grid.is_valid_position(&t, 0, 19));
    }

    #[test]
    fn test_cells_above_grid_are_exempt() {
        let grid = Grid::from_ascii(&["##########"; Grid::HEIGHT]);
        let i = ShapeKind::I.matrix();

        // Entirely above row 0: nothing to collide with.
        assert!(grid.is_valid_position(&i, 3, -1));
        // Horizontal bounds still apply above the grid.
        assert!(!grid.is_valid_position(&i, 7, -1));
        // Touching row 0 collides.
        assert!(!grid.is_valid_position(&i, 3, 0));
    }

    #[test]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn test_valid_position_iff_no_cell_collides() {
        let grid = Grid::from_ascii(&[
            ".....#....", //
            "##.####.##",
        ]);
        for kind in ShapeKind::ALL {
            let mut shape = kind.matrix();
            for _ in 0..4 {
                for y in -4..=Grid::HEIGHT as i32 + 1 {
                    for x in -4..=Grid::WIDTH as i32 + 1 {
                        let expected = shape.occupied().all(|(r, c)| {
                            let nx = x + c as i32;
                            let ny = y + r as i32;
                            (0..Grid::WIDTH as i32).contains(&nx)
                                && ny < Grid::HEIGHT as i32
                                && (ny < 0 || !grid.is_occupied(nx as usize, ny as usize))
                        });
                        assert_eq!(
                            grid.is_valid_position(&shape, x, y),
                            expected,
                            "{kind:?} at ({x}, {y})"
                        );
                    }
                }
                shape = shape.rotated();
            }
        }
    }

    #[test]
    fn test_place_writes_color() {
        let mut grid = Grid::new();
        let piece = Piece::spawn(ShapeKind::O).moved(0, 18);
        grid.place(&piece);

        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(grid.cell(x, y), Some(ShapeKind::O.color()));
        }
        assert_eq!(grid.rows().iter().flatten().flatten().count(), 4);
    }

    #[test]
    fn test_place_skips_cells_above_grid() {
        let mut grid = Grid::new();
        let piece = Piece::spawn(ShapeKind::O).moved(0, -1);
        grid.place(&piece);

        assert!(grid.is_occupied(4, 0));
        assert!(grid.is_occupied(5, 0));
        assert_eq!(grid.rows().iter().flatten().flatten().count(), 2);
    }

    #[test]
    fn test_clear_no_rows() {
        let mut grid = Grid::from_ascii(&["#########."]);
        let before = grid.clone();
        let cleared = grid.clear_full_rows(|_| panic!("nothing to clear"));
        assert_eq!(cleared, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_bottom_row() {
        let mut grid = Grid::from_ascii(&[
            "#.........", //
            "##########",
        ]);
        let cleared = grid.clear_full_rows(|_| {});
        assert_eq!(cleared, 1);

        let ascii = grid.to_ascii();
        assert_eq!(ascii[19], "#.........");
        assert!(ascii[..19].iter().all(|row| row == ".........."));
    }

    #[test]
    fn test_clear_rows_two_and_five() {
        let mut grid = Grid::new();
        // Partial rows get a distinct pattern so their order can be checked.
        let partial = |y: usize| -> GridRow {
            let mut row = EMPTY_ROW;
            row[y % Grid::WIDTH] = Some(Color::Red);
            row
        };
        for y in 0..Grid::HEIGHT {
            grid.rows[y] = if y == 2 || y == 5 {
                [Some(Color::Blue); Grid::WIDTH]
            } else {
                partial(y)
            };
        }
        let partial_rows = (0..Grid::HEIGHT)
            .filter(|y| *y != 2 && *y != 5)
            .map(partial)
            .collect::<Vec<_>>();

        let mut cleared_at = vec![];
        let cleared = grid.clear_full_rows(|y| cleared_at.push(y));

        assert_eq!(cleared, 2);
        assert_eq!(cleared_at, vec![2, 5]);
        assert_eq!(grid.rows[0], EMPTY_ROW);
        assert_eq!(grid.rows[1], EMPTY_ROW);
        assert_eq!(&grid.rows[2..], &partial_rows[..]);
        assert!(
            grid.rows
                .iter()
                .flatten()
                .all(|cell| *cell != Some(Color::Blue))
        );
    }

    #[test]
    fn test_clear_four_consecutive_rows() {
        let mut grid = Grid::from_ascii(&[
            "..#.......",
            "##########",
            "##########",
            "##########",
            "##########",
        ]);
        let mut notifications = 0;
        let cleared = grid.clear_full_rows(|_| notifications += 1);
        assert_eq!(cleared, 4);
        assert_eq!(notifications, 4);

        let ascii = grid.to_ascii();
        assert_eq!(ascii[19], "..#.......");
        assert_eq!(ascii.iter().filter(|row| row.contains('#')).count(), 1);
    }

    #[test]
    fn test_clear_whole_grid() {
        let mut grid = Grid::from_ascii(&["##########"; Grid::HEIGHT]);
        let cleared = grid.clear_full_rows(|_| {});
        assert_eq!(cleared, Grid::HEIGHT);
        assert_eq!(grid, Grid::new());
    }
}
