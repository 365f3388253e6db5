use serde::Serialize;

use super::{
    grid::Grid,
    shape::{Color, ShapeKind, ShapeMatrix},
};

/// A falling piece: a shape matrix anchored at a grid position.
///
/// Pieces are immutable values. Movement and rotation return new `Piece`
/// instances and leave validation to the caller (see
/// [`Grid::is_valid_position`]).
///
/// # Coordinate System
///
/// - `(x, y)` is the top-left corner of the shape matrix in grid coordinates
/// - X increases rightward (columns), Y increases downward (rows)
/// - Coordinates are signed; a piece may extend above row 0
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, ShapeKind};
///
/// let piece = Piece::spawn(ShapeKind::O);
/// assert_eq!((piece.x(), piece.y()), (4, 0));
///
/// let moved = piece.moved(-1, 1);
/// assert_eq!((moved.x(), moved.y()), (3, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: ShapeKind,
    shape: ShapeMatrix,
    color: Color,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of `kind` in spawn orientation at the spawn position.
    #[must_use]
    pub fn spawn(kind: ShapeKind) -> Self {
        let shape = kind.matrix();
        Self {
            kind,
            shape,
            color: kind.color(),
            x: spawn_x(&shape),
            y: 0,
        }
    }

    /// Moves the piece back to the spawn row and the centered column for its
    /// current matrix width. Rotation is kept.
    #[must_use]
    pub fn respawned(self) -> Self {
        Self {
            x: spawn_x(&self.shape),
            y: 0,
            ..self
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the grid coordinates `(x, y)` of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(move |(r, c)| (self.x + offset(c), self.y + offset(r)))
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Rotates the shape 90° clockwise around the unchanged anchor.
    ///
    /// There is no wall kick: if the rotated piece does not fit, callers keep
    /// the unrotated piece.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    #[must_use]
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        grid.is_valid_position(&self.shape, self.x, self.y)
    }

    /// Projects the piece straight down to the last row where it still fits.
    #[must_use]
    pub fn simulate_drop_position(&self, grid: &Grid) -> Self {
        let mut dropped = *self;
        while dropped.down().is_valid_on(grid) {
            dropped = dropped.down();
        }
        dropped
    }
}

fn spawn_x(shape: &ShapeMatrix) -> i32 {
    offset(Grid::WIDTH / 2) - offset(shape.cols() / 2)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn offset(n: usize) -> i32 {
    // Shape and grid extents are tiny, so this never truncates.
    n as i32
}
