use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize, ser::SerializeSeq as _};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

/// Uniform selection over the seven kinds.
///
/// Every draw is independent; there is no bag or history.
impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [ShapeKind; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn matrix(self) -> ShapeMatrix {
        SHAPE_MATRICES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            ShapeKind::I => Color::Cyan,
            ShapeKind::O => Color::Yellow,
            ShapeKind::T => Color::Orange,
            ShapeKind::L => Color::Blue,
            ShapeKind::J => Color::Green,
            ShapeKind::S => Color::Red,
            ShapeKind::Z => Color::Purple,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('O'), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'T' => Some(ShapeKind::T),
            'L' => Some(ShapeKind::L),
            'J' => Some(ShapeKind::J),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            _ => None,
        }
    }
}

/// Color of a locked or falling cell.
///
/// Each [`ShapeKind`] maps to exactly one color, so a grid cell's color also
/// identifies the kind of piece that filled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Orange,
    Blue,
    Green,
    Red,
    Purple,
}

impl Color {
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Yellow => (255, 255, 0),
            Color::Orange => (255, 165, 0),
            Color::Blue => (0, 0, 255),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
            Color::Purple => (255, 0, 255),
        }
    }
}

/// Largest extent of any shape along either axis.
pub const MAX_SHAPE_EXTENT: usize = 4;

/// Immutable binary matrix describing which cells of a piece are occupied.
///
/// The matrix is stored in a fixed 4×4 array; only the top-left
/// `rows × cols` region is meaningful and everything outside it is always
/// `false`, so derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT],
}

impl ShapeMatrix {
    /// Builds a matrix from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is empty or larger than 4×4.
    #[must_use]
    pub const fn from_bits<const R: usize, const C: usize>(bits: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= MAX_SHAPE_EXTENT);
        assert!(C > 0 && C <= MAX_SHAPE_EXTENT);
        let mut cells = [[false; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                cells[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let (rows, cols) = (R as u8, C as u8);
        Self { rows, cols, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        usize::from(self.cols)
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Returns an iterator over occupied `(row, col)` offsets.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols()).filter_map(move |c| self.cells[r][c].then_some((r, c)))
        })
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// A `rows × cols` matrix becomes `cols × rows` with
    /// `result[c][rows - 1 - r] = self[r][c]`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let rows = self.rows();
        let mut cells = [[false; MAX_SHAPE_EXTENT]; MAX_SHAPE_EXTENT];
        for (r, c) in self.occupied() {
            cells[c][rows - 1 - r] = true;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

impl Serialize for ShapeMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Rows of 0/1, e.g. [[1,1,1],[0,1,0]]
        let mut seq = serializer.serialize_seq(Some(self.rows()))?;
        for row in &self.cells[..self.rows()] {
            let bits = row[..self.cols()]
                .iter()
                .map(|&cell| u8::from(cell))
                .collect::<Vec<_>>();
            seq.serialize_element(&bits)?;
        }
        seq.end()
    }
}

const SHAPE_MATRICES: [ShapeMatrix; ShapeKind::LEN] = [
    // I-piece
    ShapeMatrix::from_bits([[1, 1, 1, 1]]),
    // O-piece
    ShapeMatrix::from_bits([[1, 1], [1, 1]]),
    // T-piece
    ShapeMatrix::from_bits([[1, 1, 1], [0, 1, 0]]),
    // L-piece
    ShapeMatrix::from_bits([[1, 1, 1], [1, 0, 0]]),
    // J-piece
    ShapeMatrix::from_bits([[1, 1, 1], [0, 0, 1]]),
    // S-piece
    ShapeMatrix::from_bits([[1, 1, 0], [0, 1, 1]]),
    // Z-piece
    ShapeMatrix::from_bits([[0, 1, 1], [1, 1, 0]]),
];
