use error_chain::bail;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

use crate::cells::{CompassPrimary, CoordinateSmallVec, Point};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_iterators::CellIter;
use crate::units::{ColumnsCount, RowsCount};

/// A rectangular maze described by two wall grids of equal size.
///
/// `walls_right` at (r, c) blocks the passage to (r, c + 1), `walls_bottom` at (r, c) blocks the
/// passage to (r + 1, c). The outer edge of the maze is always a wall whatever the grids say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    walls_right: Grid,
    walls_bottom: Grid,
}

impl Maze {
    /// A maze without any inner walls.
    pub fn new(rows: RowsCount, cols: ColumnsCount) -> Result<Maze> {
        Ok(Maze {
            walls_right: Grid::new(rows, cols)?,
            walls_bottom: Grid::new(rows, cols)?,
        })
    }

    pub fn from_walls(walls_right: Grid, walls_bottom: Grid) -> Result<Maze> {
        if walls_right.dimensions() != walls_bottom.dimensions() {
            bail!(ErrorKind::MismatchedDimensions((walls_right.rows(), walls_right.columns()),
                                                  (walls_bottom.rows(), walls_bottom.columns())));
        }
        Ok(Maze { walls_right, walls_bottom })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.walls_right.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.walls_right.columns()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.walls_right.size()
    }

    #[inline]
    pub fn walls_right(&self) -> &Grid {
        &self.walls_right
    }

    #[inline]
    pub fn walls_bottom(&self) -> &Grid {
        &self.walls_bottom
    }

    #[inline]
    pub fn walls_right_mut(&mut self) -> &mut Grid {
        &mut self.walls_right
    }

    #[inline]
    pub fn walls_bottom_mut(&mut self) -> &mut Grid {
        &mut self.walls_bottom
    }

    pub fn set_rows(&mut self, rows: RowsCount) -> Result<()> {
        self.walls_right.set_rows(rows)?;
        self.walls_bottom.set_rows(rows)
    }

    pub fn set_cols(&mut self, cols: ColumnsCount) -> Result<()> {
        self.walls_right.set_cols(cols)?;
        self.walls_bottom.set_cols(cols)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Point) -> bool {
        self.walls_right.is_valid_coordinate(coord)
    }

    /// Is there a wall on the given side of a cell? The maze boundary counts as a wall.
    /// West and north sides are read from the neighbouring cell's east and south walls.
    pub fn has_wall(&self, coord: Point, direction: CompassPrimary) -> Result<bool> {
        let Point { row, col } = coord;
        let own_right = self.walls_right.get(row, col)?;
        let own_bottom = self.walls_bottom.get(row, col)?;
        let is_blocked = match direction {
            CompassPrimary::East => col + 1 >= self.columns() || own_right,
            CompassPrimary::South => row + 1 >= self.rows() || own_bottom,
            CompassPrimary::West => col == 0 || self.walls_right.get(row, col - 1)?,
            CompassPrimary::North => row == 0 || self.walls_bottom.get(row - 1, col)?,
        };
        Ok(is_blocked)
    }

    /// Cells reachable in one step from `coord`, in east, south, west, north order.
    /// Returns None if the coordinate is invalid.
    pub fn links(&self, coord: Point) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = CompassPrimary::ALL
            .iter()
            .filter(|&&dir| self.has_wall(coord, dir).map(|blocked| !blocked).unwrap_or(false))
            .filter_map(|&dir| coord.offset(dir))
            .collect();
        Some(linked)
    }

    /// Are two cells adjacent with no wall between them?
    pub fn is_linked(&self, a: Point, b: Point) -> bool {
        if !a.is_adjacent(b) || !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let wall = if first.row == second.row {
            self.walls_right.get(first.row, first.col)
        } else {
            self.walls_bottom.get(first.row, first.col)
        };
        wall.map(|blocked| !blocked).unwrap_or(false)
    }

    /// Number of open passages between neighbouring cells.
    /// A perfect maze has exactly `size() - 1`.
    pub fn passages_count(&self) -> usize {
        self.iter_links().count()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        self.walls_right.iter()
    }

    /// Every open passage once, as (cell, east or south neighbour) pairs in row-major order.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (Point, Point)> + 'a {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter(|&&dir| self.has_wall(coord, dir).map(|blocked| !blocked).unwrap_or(false))
                .filter_map(|&dir| coord.offset(dir))
                .map(|neighbour| (coord, neighbour))
                .collect::<CoordinatePairs>()
        })
    }

    /// The open passages as an undirected graph. Node `i` is the cell with row-major index `i`
    /// and carries its `Point`.
    pub fn passage_graph(&self) -> Graph<Point, (), Undirected> {
        let cols = self.columns();
        let mut graph = Graph::with_capacity(self.size(), self.size());
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            let _ = graph.add_edge(NodeIndex::new(a.row_major_index(cols)),
                                   NodeIndex::new(b.row_major_index(cols)),
                                   ());
        }
        graph
    }
}

type CoordinatePairs = smallvec::SmallVec<[(Point, Point); 2]>;

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;

    // A 2x3 maze:
    //  _ _ _
    // |_    |
    // |_ _|_|
    fn small_maze() -> Maze {
        let right = Grid::from_values(RowsCount(2),
                                      ColumnsCount(3),
                                      vec![false, false, true, false, true, true])
            .unwrap();
        let bottom = Grid::from_values(RowsCount(2),
                                       ColumnsCount(3),
                                       vec![true, false, false, true, true, true])
            .unwrap();
        Maze::from_walls(right, bottom).unwrap()
    }

    fn sorted_links(maze: &Maze, coord: Point) -> Vec<Point> {
        maze.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
    }

    #[test]
    fn mismatched_wall_grids_rejected() {
        let right = Grid::new(RowsCount(2), ColumnsCount(3)).unwrap();
        let bottom = Grid::new(RowsCount(3), ColumnsCount(2)).unwrap();
        match Maze::from_walls(right, bottom) {
            Err(Error(ErrorKind::MismatchedDimensions((2, 3), (3, 2)), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn links_follow_walls() {
        let m = small_maze();
        let p = |r, c| Point::new(r, c);
        assert_eq!(sorted_links(&m, p(0, 0)), vec![p(0, 1)]);
        assert_eq!(sorted_links(&m, p(0, 1)), vec![p(0, 0), p(0, 2), p(1, 1)]);
        assert_eq!(sorted_links(&m, p(0, 2)), vec![p(0, 1), p(1, 2)]);
        assert_eq!(sorted_links(&m, p(1, 0)), vec![p(1, 1)]);
        assert_eq!(sorted_links(&m, p(1, 1)), vec![p(0, 1), p(1, 0)]);
        assert_eq!(sorted_links(&m, p(1, 2)), vec![p(0, 2)]);
        assert_eq!(m.links(p(2, 0)), None);
    }

    #[test]
    fn links_are_in_expansion_order() {
        let m = small_maze();
        assert_eq!(&*m.links(Point::new(0, 1)).unwrap(),
                   &[Point::new(0, 2), Point::new(1, 1), Point::new(0, 0)]);
    }

    #[test]
    fn is_linked_both_ways() {
        let m = small_maze();
        let p = |r, c| Point::new(r, c);
        assert!(m.is_linked(p(0, 0), p(0, 1)) && m.is_linked(p(0, 1), p(0, 0)));
        assert!(m.is_linked(p(0, 2), p(1, 2)) && m.is_linked(p(1, 2), p(0, 2)));
        assert!(!m.is_linked(p(0, 0), p(1, 0)));
        assert!(!m.is_linked(p(0, 0), p(1, 1)));
        assert!(!m.is_linked(p(0, 0), p(0, 0)));
        assert!(!m.is_linked(p(1, 2), p(1, 3)));
    }

    #[test]
    fn boundary_is_always_a_wall() {
        // No inner walls at all, the edges still block
        let m = Maze::new(RowsCount(2), ColumnsCount(2)).unwrap();
        assert!(m.has_wall(Point::new(0, 0), CompassPrimary::North).unwrap());
        assert!(m.has_wall(Point::new(0, 0), CompassPrimary::West).unwrap());
        assert!(m.has_wall(Point::new(1, 1), CompassPrimary::East).unwrap());
        assert!(m.has_wall(Point::new(1, 1), CompassPrimary::South).unwrap());
        assert!(!m.has_wall(Point::new(0, 0), CompassPrimary::East).unwrap());
        assert!(m.has_wall(Point::new(2, 0), CompassPrimary::North).is_err());
        assert_eq!(m.passages_count(), 4);
    }

    #[test]
    fn passages_and_graph() {
        let m = small_maze();
        let links = m.iter_links().collect::<Vec<_>>();
        assert_eq!(links,
                   vec![(Point::new(0, 0), Point::new(0, 1)),
                        (Point::new(0, 1), Point::new(0, 2)),
                        (Point::new(0, 1), Point::new(1, 1)),
                        (Point::new(0, 2), Point::new(1, 2)),
                        (Point::new(1, 0), Point::new(1, 1))]);
        assert_eq!(m.passages_count(), 5);

        let graph = m.passage_graph();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(petgraph::algo::connected_components(&graph), 1);
        assert_eq!(graph[NodeIndex::new(4)], Point::new(1, 1));
    }

    #[test]
    fn resizing_keeps_both_grids_in_step() {
        let mut m = small_maze();
        m.set_rows(RowsCount(4)).unwrap();
        m.set_cols(ColumnsCount(1)).unwrap();
        assert_eq!(m.walls_right().dimensions(), (RowsCount(4), ColumnsCount(1)));
        assert_eq!(m.walls_bottom().dimensions(), (RowsCount(4), ColumnsCount(1)));
        assert_eq!(m.rows(), 4);
        assert_eq!(m.columns(), 1);
        assert!(m.walls_bottom().get(0, 0).unwrap());
        assert!(m.walls_bottom().get(1, 0).unwrap());
        assert!(!m.walls_bottom().get(2, 0).unwrap());
    }
}
