use crate::cells::Point;

/// Every coordinate of a `rows` x `cols` rectangle in row-major order.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    cols: usize,
}

impl CellIter {
    pub fn new(rows: usize, cols: usize) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: rows * cols,
            cols,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Point;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Point::from_row_major_index(self.current_cell_number, self.cols);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// The coordinates of one row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    rows: usize,
    cols: usize,
}

impl RowIter {
    pub fn new(rows: usize, cols: usize) -> RowIter {
        RowIter {
            current_row: 0,
            rows,
            cols,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Point>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows {
            let row = self.current_row;
            let coords = (0..self.cols).map(|col| Point::new(row, col)).collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows - self.current_row;
        (lower_bound, Some(lower_bound))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cell_iter() {
        assert_eq!(CellIter::new(2, 2).collect::<Vec<Point>>(),
                   &[Point::new(0, 0), Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]);
    }

    #[test]
    fn cell_iter_len() {
        let mut iter = CellIter::new(3, 5);
        assert_eq!(iter.len(), 15);
        iter.next();
        assert_eq!(iter.len(), 14);
    }

    #[test]
    fn row_iter() {
        assert_eq!(RowIter::new(2, 3).collect::<Vec<Vec<Point>>>(),
                   vec![vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)],
                        vec![Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)]]);
    }
}
