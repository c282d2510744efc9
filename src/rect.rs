use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::map::EndpointMap;
use crate::oracle;

/// A column or row index on a grid.
pub type Coord = usize;

/// Reasons a rectangle construction or an oracle query is rejected outright.
///
/// These are precondition violations and fail fast; they are never folded into a
/// feasibility-false answer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    /// Rectangles must be at least 2 columns wide and 1 row tall.
    #[error("rectangle dimensions must satisfy m >= 2, n >= 1; got m={m}, n={n}")]
    InvalidRectangle {
        /// The rejected width.
        m: usize,
        /// The rejected height.
        n: usize,
    },
    /// Start and end columns must lie in `[0, m)`.
    #[error("column {column} out of range for width {width}")]
    ColumnOutOfRange {
        /// The rejected column index.
        column: Coord,
        /// Width of the rectangle queried.
        width: usize,
    },
}

/// An `m`-by-`n` rectangular grid graph: `m` columns indexed `0..m` and `n` rows indexed
/// `0..n`, with row `0` at the bottom. Vertices are the integer lattice points; edges
/// connect 4-adjacent points.
///
/// [`Rectangle::new`] is the only way to obtain one and enforces `m >= 2`, `n >= 1`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rectangle {
    m: usize,
    n: usize,
}

impl Rectangle {
    /// Construct a rectangle, rejecting dimensions outside `m >= 2`, `n >= 1`.
    pub fn new(m: usize, n: usize) -> Result<Self, GridError> {
        match m >= 2 && n >= 1 {
            true => Ok(Self { m, n }),
            false => Err(GridError::InvalidRectangle { m, n }),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.m
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.n
    }

    fn check_column(&self, column: Coord) -> Result<(), GridError> {
        match column < self.m {
            true => Ok(()),
            false => Err(GridError::ColumnOutOfRange { column, width: self.m }),
        }
    }

    /// Decide whether a Hamiltonian path exists from column `x1` of the top row to column
    /// `x2` of the bottom row, by the closed-form case theorem.
    ///
    /// Deterministic and free of enumeration; repeated calls with the same arguments
    /// always agree. Columns outside `[0, m)` are a [`GridError::ColumnOutOfRange`], not
    /// a `false`.
    pub fn admits(&self, x1: Coord, x2: Coord) -> Result<bool, GridError> {
        self.check_column(x1)?;
        self.check_column(x2)?;
        Ok(oracle::admits_path(self.m, self.n, x1, x2))
    }

    /// Materialize the oracle into the full start-to-end column map for this rectangle.
    pub fn endpoint_map(&self) -> EndpointMap {
        EndpointMap::of(*self)
    }
}

/// A start/end column pair for one rectangle: the start sits on the top row, the end on
/// the bottom row.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct EndpointPair(pub Coord, pub Coord);

impl EndpointPair {
    /// The start column, on the top row.
    pub fn start(&self) -> Coord {
        self.0
    }

    /// The end column, on the bottom row.
    pub fn end(&self) -> Coord {
        self.1
    }
}

/// A location `(x, y)` in whole-stack coordinates. `y = 0` is the bottommost row of the
/// bottommost rectangle and `y` grows upward.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}
