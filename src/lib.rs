//! **mazes** generates perfect mazes, finds routes through them and grows caves with a cellular
//! automaton, all on top of a resizable boolean `Grid`.

pub mod cave;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_iterators;
pub mod maze;
pub mod parser;
pub mod pathing;
pub mod random;
pub mod units;
mod utils;
