//! Cave generation by cellular automaton.
//!
//! A cell is `true` when alive (rock) and `false` when dead (open floor). Each step counts the
//! live cells among a cell's eight neighbours, where anything past the edge of the grid counts as
//! alive, and kills or births the cell by comparing that count with the death and born limits.

use error_chain::bail;
use log::{debug, trace};

use crate::errors::*;
use crate::grid::Grid;
use crate::random::RandomSource;
use crate::units::{ColumnsCount, RowsCount};

pub const DEFAULT_BORN_LIMIT: usize = 3;
pub const DEFAULT_DEATH_LIMIT: usize = 3;
/// Side length of a randomly generated cave.
pub const RANDOM_CAVE_SIZE: usize = 25;

const MAX_LIMIT: usize = 8;

const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [(0, -1), (0, 1), (-1, 0), (1, 0),
                                                (-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Debug, Clone)]
pub struct Cave {
    current: Grid,
    previous: Grid,
    born_limit: usize,
    death_limit: usize,
}

impl Cave {
    /// An all dead cave with the default limits.
    pub fn new(rows: RowsCount, cols: ColumnsCount) -> Result<Cave> {
        Ok(Cave {
            current: Grid::new(rows, cols)?,
            previous: Grid::new(rows, cols)?,
            born_limit: DEFAULT_BORN_LIMIT,
            death_limit: DEFAULT_DEATH_LIMIT,
        })
    }

    /// Wrap a loaded grid. The previous generation starts all dead.
    pub fn from_grid(grid: Grid) -> Result<Cave> {
        let (rows, cols) = grid.dimensions();
        Ok(Cave {
            previous: Grid::new(rows, cols)?,
            current: grid,
            born_limit: DEFAULT_BORN_LIMIT,
            death_limit: DEFAULT_DEATH_LIMIT,
        })
    }

    /// Replace the cave with a fresh `RANDOM_CAVE_SIZE` square one.
    ///
    /// `fill_chance` is the percentage chance of a cell starting *dead*: 0 gives solid rock and
    /// 100 an empty cave. The limits are kept.
    pub fn generate_random<R>(&mut self, fill_chance: u32, rng: &mut R) -> Result<()>
        where R: RandomSource
    {
        if fill_chance > 100 {
            bail!(ErrorKind::InvalidParameter("fill chance", fill_chance as usize));
        }

        let dimensions = (RowsCount(RANDOM_CAVE_SIZE), ColumnsCount(RANDOM_CAVE_SIZE));
        let cells_count = RANDOM_CAVE_SIZE * RANDOM_CAVE_SIZE;
        let values = (0..cells_count).map(|_| !rng.next_bool(fill_chance)).collect::<Vec<bool>>();

        self.current = Grid::from_values(dimensions.0, dimensions.1, values)?;
        self.previous = Grid::new(dimensions.0, dimensions.1)?;
        debug!("seeded {0}x{0} cave, fill chance {1}, {2} alive",
               RANDOM_CAVE_SIZE,
               fill_chance,
               self.current.count_set());
        Ok(())
    }

    /// Advance one generation, returning how many cells changed.
    ///
    /// Every cell is judged against the grid as it was before the step. Afterwards `previous`
    /// holds that pre-step grid.
    pub fn next(&mut self) -> Result<usize> {
        let (rows, cols) = self.current.dimensions();
        let (born_limit, death_limit) = (self.born_limit, self.death_limit);
        let snapshot = &self.current;

        let next_values = snapshot.iter_values()
            .map(|(coord, alive)| {
                let neighbours = alive_neighbours(snapshot, coord.row, coord.col);
                if alive {
                    neighbours >= death_limit
                } else {
                    neighbours > born_limit
                }
            })
            .collect::<Vec<bool>>();

        let changed = snapshot.iter_values()
            .zip(next_values.iter())
            .filter(|&((_, before), after)| before != *after)
            .count();

        let next_grid = Grid::from_values(rows, cols, next_values)?;
        self.previous = ::std::mem::replace(&mut self.current, next_grid);
        trace!("cave step changed {} cells", changed);
        Ok(changed)
    }

    /// Did the last step leave the cave unchanged? Only meaningful after at least one `next`.
    pub fn is_stable(&self) -> bool {
        self.current == self.previous
    }

    pub fn set_born_limit(&mut self, born_limit: usize) -> Result<()> {
        self.born_limit = check_limit("born limit", born_limit)?;
        Ok(())
    }

    pub fn set_death_limit(&mut self, death_limit: usize) -> Result<()> {
        self.death_limit = check_limit("death limit", death_limit)?;
        Ok(())
    }

    #[inline]
    pub fn born_limit(&self) -> usize {
        self.born_limit
    }

    #[inline]
    pub fn death_limit(&self) -> usize {
        self.death_limit
    }

    pub fn set_rows(&mut self, rows: RowsCount) -> Result<()> {
        self.current.set_rows(rows)?;
        self.previous.set_rows(rows)
    }

    pub fn set_cols(&mut self, cols: ColumnsCount) -> Result<()> {
        self.current.set_cols(cols)?;
        self.previous.set_cols(cols)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.current.columns()
    }

    #[inline]
    pub fn current(&self) -> &Grid {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    #[inline]
    pub fn previous(&self) -> &Grid {
        &self.previous
    }
}

fn check_limit(name: &'static str, value: usize) -> Result<usize> {
    if value > MAX_LIMIT {
        bail!(ErrorKind::InvalidParameter(name, value));
    }
    Ok(value)
}

/// Live cells around (row, col). Positions past any edge of the grid count as alive.
fn alive_neighbours(grid: &Grid, row: usize, col: usize) -> usize {
    NEIGHBOUR_OFFSETS.iter()
        .filter(|&&(row_step, col_step)| {
            let neighbour_row = row as isize + row_step;
            let neighbour_col = col as isize + col_step;
            if neighbour_row < 0 || neighbour_col < 0 || neighbour_row as usize >= grid.rows() ||
               neighbour_col as usize >= grid.columns() {
                return true;
            }
            grid.get(neighbour_row as usize, neighbour_col as usize).unwrap_or(true)
        })
        .count()
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::parser;
    use crate::random::{RngSource, ScriptedSource};

    fn fixture(text: &str) -> Grid {
        parser::parse_cave_grid(text).expect("fixture is well formed")
    }

    fn example_cave() -> Cave {
        let mut cave = Cave::from_grid(fixture(include_str!("../resources/cave_example_1.txt"))).unwrap();
        cave.set_born_limit(4).unwrap();
        cave.set_death_limit(3).unwrap();
        cave
    }

    #[test]
    fn default_limits() {
        let cave = Cave::new(RowsCount(4), ColumnsCount(5)).unwrap();
        assert_eq!(cave.born_limit(), DEFAULT_BORN_LIMIT);
        assert_eq!(cave.death_limit(), DEFAULT_DEATH_LIMIT);
        assert_eq!((cave.rows(), cave.columns()), (4, 5));
        assert_eq!(cave.current().count_set(), 0);
    }

    #[test]
    fn one_step_of_example() {
        let mut cave = example_cave();
        let before = cave.current().clone();
        let changed = cave.next().unwrap();

        assert_eq!(cave.current(), &fixture(include_str!("../resources/cave_example_1_step_1.txt")));
        assert_eq!(cave.previous(), &before);
        assert!(changed > 0);
        assert!(!cave.is_stable());
    }

    #[test]
    fn example_reaches_fixed_point() {
        let mut cave = example_cave();
        let mut steps = 0;
        while cave.next().unwrap() > 0 {
            steps += 1;
            assert!(steps < 100, "no fixed point");
        }
        assert_eq!(steps, 6);
        assert!(cave.is_stable());
        assert_eq!(cave.current(), &fixture(include_str!("../resources/cave_example_1_fixed_point.txt")));

        // Stays put once stable
        let fixed = cave.current().clone();
        for _ in 0..3 {
            assert_eq!(cave.next().unwrap(), 0);
            assert_eq!(cave.current(), &fixed);
        }
    }

    #[test]
    fn edge_of_cave_counts_as_alive() {
        let mut cave = Cave::new(RowsCount(5), ColumnsCount(5)).unwrap();
        cave.set_death_limit(0).unwrap();
        cave.set_born_limit(2).unwrap();
        cave.next().unwrap();

        for (coord, alive) in cave.current().iter_values() {
            let on_edge = coord.row == 0 || coord.col == 0 || coord.row == 4 || coord.col == 4;
            assert_eq!(alive, on_edge, "cell {}", coord);
        }
    }

    #[test]
    fn corners_see_five_walls() {
        let grid = Grid::new(RowsCount(3), ColumnsCount(3)).unwrap();
        assert_eq!(alive_neighbours(&grid, 0, 0), 5);
        assert_eq!(alive_neighbours(&grid, 0, 1), 3);
        assert_eq!(alive_neighbours(&grid, 1, 1), 0);

        let single = Grid::new(RowsCount(1), ColumnsCount(1)).unwrap();
        assert_eq!(alive_neighbours(&single, 0, 0), 8);
    }

    #[test]
    fn limits_must_be_at_most_eight() {
        let mut cave = Cave::new(RowsCount(2), ColumnsCount(2)).unwrap();
        cave.set_born_limit(8).unwrap();
        cave.set_death_limit(0).unwrap();
        match cave.set_born_limit(9) {
            Err(Error(ErrorKind::InvalidParameter("born limit", 9), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match cave.set_death_limit(12) {
            Err(Error(ErrorKind::InvalidParameter("death limit", 12), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!((cave.born_limit(), cave.death_limit()), (8, 0));
    }

    #[test]
    fn random_generation() {
        let mut cave = Cave::new(RowsCount(3), ColumnsCount(3)).unwrap();

        cave.generate_random(0, &mut ScriptedSource::always(false)).unwrap();
        assert_eq!((cave.rows(), cave.columns()), (RANDOM_CAVE_SIZE, RANDOM_CAVE_SIZE));
        assert_eq!(cave.current().count_set(), RANDOM_CAVE_SIZE * RANDOM_CAVE_SIZE);
        assert_eq!(cave.previous().dimensions(), cave.current().dimensions());
        assert_eq!(cave.previous().count_set(), 0);

        // A draw of true means the cell starts dead
        cave.generate_random(100, &mut RngSource::from_seed(5)).unwrap();
        assert_eq!(cave.current().count_set(), 0);

        match cave.generate_random(101, &mut RngSource::from_seed(5)) {
            Err(Error(ErrorKind::InvalidParameter("fill chance", 101), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn edited_cells_feed_the_next_step() {
        let mut cave = Cave::new(RowsCount(3), ColumnsCount(3)).unwrap();
        cave.set_born_limit(8).unwrap();
        cave.set_death_limit(0).unwrap();
        cave.current_mut().set(1, 1, true).unwrap();
        assert_eq!(cave.next().unwrap(), 0);
        assert!(cave.current().get(1, 1).unwrap());
        assert_eq!(cave.current().count_set(), 1);
    }

    #[test]
    fn resizing_keeps_generations_aligned() {
        let mut cave = example_cave();
        cave.next().unwrap();
        cave.set_rows(RowsCount(4)).unwrap();
        cave.set_cols(ColumnsCount(12)).unwrap();
        assert_eq!(cave.current().dimensions(), (RowsCount(4), ColumnsCount(12)));
        assert_eq!(cave.previous().dimensions(), (RowsCount(4), ColumnsCount(12)));
        assert!(!cave.current().get(0, 11).unwrap());

        match cave.set_cols(ColumnsCount(0)) {
            Err(Error(ErrorKind::InvalidDimension(4, 0), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn seeded_caves_are_reproducible() {

        fn p(seed: u64, fill: u8, born: u8, death: u8) -> bool {
            let run = || {
                let mut cave = Cave::new(RowsCount(1), ColumnsCount(1)).unwrap();
                cave.set_born_limit(born as usize % 9).unwrap();
                cave.set_death_limit(death as usize % 9).unwrap();
                cave.generate_random(fill as u32 % 101, &mut RngSource::from_seed(seed)).unwrap();
                cave.next().unwrap();
                cave.current().clone()
            };
            run() == run()
        }
        quickcheck(p as fn(u64, u8, u8, u8) -> bool)
    }
}
