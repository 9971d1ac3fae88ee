use bit_set::BitSet;
use error_chain::bail;
use itertools::Itertools;
use std::fmt;

use crate::cells::Point;
use crate::errors::*;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{ColumnsCount, RowsCount};

/// A resizable rectangle of booleans, stored row-major.
///
/// A bit in the set means the cell is `true`. Every access is bounds checked; an out of range
/// index is reported as `ErrorKind::OutOfBounds`, never clamped.
#[derive(Clone)]
pub struct Grid {
    cells: BitSet,
    rows: usize,
    cols: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, set cells: {:?}",
               self.rows, self.cols, self.cells.len())
    }
}

impl Grid {
    /// A grid with every cell `false`.
    pub fn new(rows: RowsCount, cols: ColumnsCount) -> Result<Grid> {
        let (RowsCount(rows), ColumnsCount(cols)) = (rows, cols);
        check_dimensions(rows, cols)?;

        Ok(Grid {
            cells: BitSet::new(),
            rows,
            cols,
        })
    }

    /// Fill a new grid left to right, top to bottom from `values`.
    ///
    /// Missing values leave the remaining cells `false`, surplus values are ignored.
    pub fn from_values<I>(rows: RowsCount, cols: ColumnsCount, values: I) -> Result<Grid>
        where I: IntoIterator<Item = bool>
    {
        let mut grid = Grid::new(rows, cols)?;
        let size = grid.size();
        for (index, value) in values.into_iter().take(size).enumerate() {
            if value {
                grid.cells.insert(index);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn dimensions(&self) -> (RowsCount, ColumnsCount) {
        (RowsCount(self.rows), ColumnsCount(self.cols))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// How many cells are `true`.
    #[inline]
    pub fn count_set(&self) -> usize {
        self.cells.len()
    }

    /// Is the coordinate within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Point) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.checked_index(Point::new(row, col))?;
        Ok(self.cells.contains(index))
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        let index = self.checked_index(Point::new(row, col))?;
        if value {
            self.cells.insert(index);
        } else {
            self.cells.remove(index);
        }
        Ok(())
    }

    #[inline]
    pub fn cell(&self, coord: Point) -> Result<bool> {
        self.get(coord.row, coord.col)
    }

    #[inline]
    pub fn set_cell(&mut self, coord: Point, value: bool) -> Result<()> {
        self.set(coord.row, coord.col, value)
    }

    /// Resize to `rows` rows. Retained rows keep their contents, new rows are all `false`.
    pub fn set_rows(&mut self, rows: RowsCount) -> Result<()> {
        let RowsCount(new_rows) = rows;
        check_dimensions(new_rows, self.cols)?;

        if new_rows < self.rows {
            let limit = new_rows * self.cols;
            self.cells = self.cells.iter().take_while(|&index| index < limit).collect();
        }
        self.rows = new_rows;
        Ok(())
    }

    /// Resize to `cols` columns. Each row keeps its values at their original column positions:
    /// growing appends `false` columns to the end of every row, shrinking drops the trailing
    /// columns of every row.
    pub fn set_cols(&mut self, cols: ColumnsCount) -> Result<()> {
        let ColumnsCount(new_cols) = cols;
        check_dimensions(self.rows, new_cols)?;

        // Row-major storage: changing the width moves the start of every row.
        let old_cols = self.cols;
        self.cells = self.cells
            .iter()
            .map(|index| Point::from_row_major_index(index, old_cols))
            .filter(|coord| coord.col < new_cols)
            .map(|coord| coord.row_major_index(new_cols))
            .collect();
        self.cols = new_cols;
        Ok(())
    }

    /// Same dimensions and same value in every cell.
    pub fn equals(&self, other: &Grid) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells.iter().eq(other.cells.iter())
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: bool) {
        if value {
            self.cells = (0..self.size()).collect();
        } else {
            self.cells.clear();
        }
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows, self.cols)
    }

    /// Every cell with its value, in row-major order.
    pub fn iter_values<'a>(&'a self) -> impl Iterator<Item = (Point, bool)> + 'a {
        let cols = self.cols;
        self.iter().map(move |coord| (coord, self.cells.contains(coord.row_major_index(cols))))
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.rows, self.cols)
    }

    /// The row-major index of a coordinate, or `OutOfBounds`.
    fn checked_index(&self, coord: Point) -> Result<usize> {
        if self.is_valid_coordinate(coord) {
            Ok(coord.row_major_index(self.cols))
        } else {
            bail!(ErrorKind::OutOfBounds(coord.row, coord.col, self.rows, self.cols))
        }
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.equals(other)
    }
}
impl Eq for Grid {}

/// Space separated `0`/`1` tokens, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.iter_row() {
            let line = row.iter()
                .map(|coord| if self.cells.contains(coord.row_major_index(self.cols)) { "1" } else { "0" })
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Both dimensions at least 1, and the cell count must fit in a `usize`.
fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
        bail!(ErrorKind::InvalidDimension(rows, cols));
    }
    Ok(())
}
