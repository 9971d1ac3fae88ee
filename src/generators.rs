use error_chain::bail;
use log::debug;

use crate::errors::*;
use crate::maze::Maze;
use crate::random::RandomSource;
use crate::units::{ColumnsCount, RowsCount};

/// Percentage chance of a random draw placing a wall.
pub const DEFAULT_WALL_BIAS: u32 = 50;

/// Generate a perfect maze with Eller's algorithm using the default wall bias.
pub fn eller<R>(rows: RowsCount, cols: ColumnsCount, rng: &mut R) -> Result<Maze>
    where R: RandomSource
{
    eller_with_bias(rows, cols, DEFAULT_WALL_BIAS, rng)
}

/// Apply Eller's maze generation algorithm to a fresh maze of the given dimensions.
///
/// The maze is built one row at a time, tracking for each column which connected set its cell
/// belongs to. Along a row we randomly leave east walls out, merging the two sets either side,
/// except where both cells already share a set (that passage would close a cycle). Then we
/// randomly drop floors, always keeping at least one open floor per set so that every set
/// reaches the next row. The last row joins up every remaining set and has a solid floor, so
/// the result is a spanning tree: exactly one route between any two cells.
///
/// `wall_bias` is the percentage chance of each random draw choosing a wall.
/// O(rows * cols) draws, with O(cols) set bookkeeping per merge.
pub fn eller_with_bias<R>(rows: RowsCount,
                          cols: ColumnsCount,
                          wall_bias: u32,
                          rng: &mut R)
                          -> Result<Maze>
    where R: RandomSource
{
    if wall_bias > 100 {
        bail!(ErrorKind::InvalidParameter("wall bias", wall_bias as usize));
    }

    let mut maze = Maze::new(rows, cols)?;
    let (RowsCount(rows_count), ColumnsCount(cols_count)) = (rows, cols);

    // 0 means the column's cell has no set yet
    let mut set_ids = vec![0usize; cols_count];
    let mut next_set_id = 1;

    for row in 0..rows_count {
        let is_last_row = row == rows_count - 1;

        // A floor in the row above cut this column off, so it starts a new set
        for col in 0..cols_count {
            if set_ids[col] == 0 || (row > 0 && maze.walls_bottom().get(row - 1, col)?) {
                set_ids[col] = next_set_id;
                next_set_id += 1;
            }
        }

        for col in 0..cols_count {
            let is_last_col = col == cols_count - 1;

            let wants_east_wall = is_last_col || rng.next_bool(wall_bias) ||
                                  set_ids[col] == set_ids[col + 1];
            let must_join = is_last_row && !is_last_col && set_ids[col] != set_ids[col + 1];

            if wants_east_wall && !must_join {
                maze.walls_right_mut().set(row, col, true)?;
            } else {
                let (absorbed, survivor) = (set_ids[col + 1], set_ids[col]);
                merge_sets(&mut set_ids, absorbed, survivor);
            }

            if is_last_row ||
               (rng.next_bool(wall_bias) && open_floors_in_set(&maze, row, set_ids[col], &set_ids)? > 1) {
                maze.walls_bottom_mut().set(row, col, true)?;
            }
        }
    }

    debug!("generated {}x{} maze with {} sets", rows_count, cols_count, next_set_id - 1);
    Ok(maze)
}

/// Relabel every column of set `absorbed` as `survivor`.
fn merge_sets(set_ids: &mut [usize], absorbed: usize, survivor: usize) {
    for id in set_ids.iter_mut().filter(|id| **id == absorbed) {
        *id = survivor;
    }
}

/// How many cells of `set_id` on this row still have an open floor.
fn open_floors_in_set(maze: &Maze, row: usize, set_id: usize, set_ids: &[usize]) -> Result<usize> {
    let mut holes = 0;
    for (col, _) in set_ids.iter().enumerate().filter(|&(_, id)| *id == set_id) {
        if !maze.walls_bottom().get(row, col)? {
            holes += 1;
        }
    }
    Ok(holes)
}
