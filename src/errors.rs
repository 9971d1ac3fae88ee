// Other modules in this crate `use crate::errors::*;` to get access to everything
// `error_chain!` creates: Error, ErrorKind, ResultExt (`chain_err`) and Result.
#![allow(deprecated)]

use error_chain::error_chain;

use crate::cells::Point;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ParseInt(::std::num::ParseIntError);
    }

    errors {
        InvalidDimension(rows: usize, cols: usize) {
            description("invalid grid dimension")
            display("invalid grid dimension: {} rows by {} columns, both must be at least 1", rows, cols)
        }

        OutOfBounds(row: usize, col: usize, rows: usize, cols: usize) {
            description("cell index out of bounds")
            display("cell ({}, {}) is outside a grid of {} rows by {} columns", row, col, rows, cols)
        }

        InvalidParameter(name: &'static str, value: usize) {
            description("parameter out of range")
            display("{} out of range: {}", name, value)
        }

        MismatchedDimensions(first: (usize, usize), second: (usize, usize)) {
            description("grids have different dimensions")
            display("grid dimensions differ: {:?} vs {:?}", first, second)
        }

        NotFound(start: Point, end: Point) {
            description("no path between cells")
            display("no path from {} to {}", start, end)
        }

        LoadFailure(reason: String) {
            description("malformed grid data")
            display("unable to load grid data: {}", reason)
        }
    }
}
