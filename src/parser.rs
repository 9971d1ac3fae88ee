//! Text formats for mazes and caves.
//!
//! Both start with a `rows cols` header line. A maze follows it with `rows` lines of right walls,
//! a blank line, then `rows` lines of bottom walls. A cave follows it with `rows` lines of cells.
//! Within a row only the digit characters count, left to right, so `1 0 1` and `101` read the
//! same; any digit other than `0` or `1` is an error.

use error_chain::bail;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::cave::Cave;
use crate::errors::*;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::units::{ColumnsCount, RowsCount};

type NumberedLines<'a> = ::std::iter::Enumerate<::std::str::Lines<'a>>;

pub fn parse_maze(text: &str) -> Result<Maze> {
    let mut lines = text.lines().enumerate();
    let (rows, cols) = parse_header(&mut lines)?;
    let walls_right = parse_grid_rows(&mut lines, rows, cols)?;
    let walls_bottom = parse_grid_rows(&mut lines, rows, cols)?;
    Maze::from_walls(walls_right, walls_bottom)
}

pub fn maze_to_string(maze: &Maze) -> String {
    format!("{} {}\n{}\n{}",
            maze.rows(),
            maze.columns(),
            maze.walls_right(),
            maze.walls_bottom())
}

/// Read a cave file's grid alone.
pub fn parse_cave_grid(text: &str) -> Result<Grid> {
    let mut lines = text.lines().enumerate();
    let (rows, cols) = parse_header(&mut lines)?;
    parse_grid_rows(&mut lines, rows, cols)
}

/// A cave with the default limits around a parsed grid.
pub fn parse_cave(text: &str) -> Result<Cave> {
    Cave::from_grid(parse_cave_grid(text)?)
}

pub fn cave_to_string(cave: &Cave) -> String {
    format!("{} {}\n{}", cave.rows(), cave.columns(), cave.current())
}

/// The passages as a graph edge list. Line 1: n (#vertices) m (#edges). Each following line is one
/// passage between two cells, numbered by 1-based row-major index.
pub fn edges_to_string(maze: &Maze) -> String {
    let cols = maze.columns();
    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze.size(), maze.passages_count()));

    for (src, dst) in maze.iter_links() {
        let src_as_1_based_index = src.row_major_index(cols) + 1;
        let dst_as_1_based_index = dst.row_major_index(cols) + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }
    graph_data
}

pub fn load_maze<P: AsRef<Path>>(path: P) -> Result<Maze> {
    let text = read_text_file(path.as_ref())?;
    parse_maze(&text).chain_err(|| format!("Failed to read maze from {}", path.as_ref().display()))
}

pub fn save_maze<P: AsRef<Path>>(path: P, maze: &Maze) -> Result<()> {
    write_text_to_file(&maze_to_string(maze), path.as_ref())
}

pub fn load_cave<P: AsRef<Path>>(path: P) -> Result<Cave> {
    let text = read_text_file(path.as_ref())?;
    parse_cave(&text).chain_err(|| format!("Failed to read cave from {}", path.as_ref().display()))
}

pub fn write_text_to_file(data: &str, path: &Path) -> Result<()> {
    let mut f = File::create(path).chain_err(|| format!("Unable to create {}", path.display()))?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn read_text_file(path: &Path) -> Result<String> {
    let mut text = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut text))
        .chain_err(|| format!("Unable to read {}", path.display()))?;
    Ok(text)
}

fn parse_header(lines: &mut NumberedLines) -> Result<(RowsCount, ColumnsCount)> {
    let (_, header) = next_non_blank(lines)
        .ok_or_else(|| ErrorKind::LoadFailure("missing 'rows cols' header".to_owned()))?;

    let mut tokens = header.split_whitespace();
    let mut dimension = |name: &str| -> Result<usize> {
        let token = tokens.next()
            .ok_or_else(|| ErrorKind::LoadFailure(format!("header has no {} count", name)))?;
        let value = token.parse::<usize>()
            .chain_err(|| ErrorKind::LoadFailure(format!("bad {} count '{}'", name, token)))?;
        Ok(value)
    };
    let rows = dimension("rows")?;
    let cols = dimension("columns")?;
    if let Some(extra) = tokens.next() {
        bail!(ErrorKind::LoadFailure(format!("unexpected '{}' after the header dimensions", extra)));
    }
    Ok((RowsCount(rows), ColumnsCount(cols)))
}

/// Read the next `rows` non blank lines as a grid. Blank lines separate blocks.
/// Storage grows with the rows actually read, never with the header's claim.
fn parse_grid_rows(lines: &mut NumberedLines, rows: RowsCount, cols: ColumnsCount) -> Result<Grid> {
    let (RowsCount(rows_count), ColumnsCount(cols_count)) = (rows, cols);
    let mut values = vec![];

    for row in 0..rows_count {
        let (line_index, line) = next_non_blank(lines).ok_or_else(|| {
                ErrorKind::LoadFailure(format!("expected {} rows, found {}", rows_count, row))
            })?;
        values.extend(parse_row(line, line_index + 1, cols_count)?);
    }
    Grid::from_values(rows, cols, values)
}

fn parse_row(line: &str, line_number: usize, cols: usize) -> Result<Vec<bool>> {
    let mut row = vec![];
    for digit in line.chars().filter(|c| c.is_ascii_digit()) {
        match digit {
            '0' => row.push(false),
            '1' => row.push(true),
            other => {
                bail!(ErrorKind::LoadFailure(format!("line {}: '{}' is not 0 or 1", line_number, other)))
            }
        }
    }
    if row.len() != cols {
        bail!(ErrorKind::LoadFailure(format!("line {}: expected {} values, found {}",
                                             line_number,
                                             cols,
                                             row.len())));
    }
    Ok(row)
}

fn next_non_blank<'a>(lines: &mut NumberedLines<'a>) -> Option<(usize, &'a str)> {
    lines.find(|&(_, line)| !line.trim().is_empty())
}
