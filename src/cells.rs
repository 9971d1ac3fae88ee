use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// A cell position on a grid. `row` is the vertical index counting down from the top,
/// `col` the horizontal index counting right from the left edge.
///
/// Ordering is row-major: row first, then column.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

pub type CoordinateSmallVec = SmallVec<[Point; 4]>;

impl Point {
    pub fn new(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    /// Creates a new `Point` offset 1 cell away in the given direction.
    /// Returns None if the position would be negative; the upper grid bound is not checked.
    pub fn offset(self, dir: CompassPrimary) -> Option<Point> {
        let Point { row, col } = self;
        match dir {
            CompassPrimary::East => Some(Point::new(row, col + 1)),
            CompassPrimary::South => Some(Point::new(row + 1, col)),
            CompassPrimary::West => col.checked_sub(1).map(|c| Point::new(row, c)),
            CompassPrimary::North => row.checked_sub(1).map(|r| Point::new(r, col)),
        }
    }

    /// Is `other` one step away horizontally or vertically (not diagonally)?
    pub fn is_adjacent(self, other: Point) -> bool {
        let row_step = if self.row > other.row { self.row - other.row } else { other.row - self.row };
        let col_step = if self.col > other.col { self.col - other.col } else { other.col - self.col };
        row_step + col_step == 1
    }

    /// Index of this point in a row-major buffer `cols` wide.
    #[inline]
    pub fn row_major_index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    #[inline]
    pub fn from_row_major_index(index: usize, cols: usize) -> Point {
        Point::new(index / cols, index % cols)
    }
}

impl From<(usize, usize)> for Point {
    fn from(row_col_pair: (usize, usize)) -> Point {
        Point::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    East,
    South,
    West,
    North,
}

impl CompassPrimary {
    /// The order the pathfinder expands neighbours in.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::North];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
            CompassPrimary::North => CompassPrimary::South,
        }
    }
}
