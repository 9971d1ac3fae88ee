use error_chain::bail;
use log::{debug, warn};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::cells::Point;
use crate::errors::*;
use crate::maze::Maze;
use crate::utils;
use crate::utils::FnvHashMap;

/// Step counts from one start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Point,
    distances: FnvHashMap<Point, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill the maze from `start_coordinate`.
    /// Returns None if the start is not a cell of the maze.
    pub fn for_maze(maze: &Maze, start_coordinate: Point) -> Option<Distances> {

        if !maze.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(maze.size());
        distances.insert(start_coordinate, 0);

        // Every step costs the same, so the first time a cell is reached is the shortest
        // distance to it. The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in maze.links(*cell_coord).unwrap_or_default().iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Point {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None if `coord` is unreachable from the start or not on the maze.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Point) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, in row-major order.
    pub fn furthest_points(&self) -> SmallVec<[Point; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Point; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Breadth first search for the shortest route from `start` to `end`, both included.
///
/// Neighbours are expanded east, south, west then north, recording each (parent, child) edge as
/// a cell is first discovered. Once `end` comes off the queue the route is rebuilt by walking
/// the recorded edges backwards from `end`.
///
/// Fails with `OutOfBounds` if either point is off the maze and with `NotFound` if no route
/// exists, which cannot happen on a perfect maze but can on loaded data.
pub fn solve(maze: &Maze, start: Point, end: Point) -> Result<Vec<Point>> {

    for coord in &[start, end] {
        if !maze.is_valid_coordinate(*coord) {
            bail!(ErrorKind::OutOfBounds(coord.row, coord.col, maze.rows(), maze.columns()));
        }
    }

    let cells_count = maze.size();
    let mut open = VecDeque::with_capacity(cells_count);
    let mut seen = utils::fnv_hashset(cells_count);
    let mut discovered: Vec<(Point, Point)> = Vec::with_capacity(cells_count);
    open.push_back(start);
    seen.insert(start);

    while let Some(coord) = open.pop_front() {

        if coord == end {
            let path = trace_back(&discovered, end);
            debug!("solved {} -> {} in {} steps", start, end, path.len() - 1);
            return Ok(path);
        }

        for link in maze.links(coord).unwrap_or_default().iter() {
            if seen.insert(*link) {
                open.push_back(*link);
                discovered.push((coord, *link));
            }
        }
    }

    warn!("no route from {} to {} after visiting {} cells", start, end, seen.len());
    bail!(ErrorKind::NotFound(start, end))
}

fn trace_back(discovered: &[(Point, Point)], end: Point) -> Vec<Point> {
    let mut path = vec![end];
    let mut current = end;
    for &(parent, child) in discovered.iter().rev() {
        if child == current {
            path.push(parent);
            current = parent;
        }
    }
    path.reverse();
    path
}

/// The longest route through the maze.
///
/// Exact for a perfect maze: the cell furthest from any cell is one end of a longest path, and
/// the cell furthest from that is the other end. On other mazes it is only the longest route
/// within the part connected to the top left cell.
pub fn longest_path(maze: &Maze) -> Option<Vec<Point>> {
    let first_distances = Distances::for_maze(maze, Point::new(0, 0))?;
    let long_path_start = first_distances.furthest_points()[0];

    let distances_from_start = Distances::for_maze(maze, long_path_start)?;
    let end_point = distances_from_start.furthest_points()[0];

    solve(maze, long_path_start, end_point).ok()
}
