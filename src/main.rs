use docopt::Docopt;
use error_chain::bail;
use log::info;
use mazes::{
    cave::{self, Cave},
    cells::Point,
    generators,
    parser,
    pathing,
    random::RngSource,
    units::{ColumnsCount, RowsCount},
};
use serde_derive::Deserialize;
use std::path::Path;

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver maze [--rows=<r>] [--cols=<c>] [--bias=<b>] [--seed=<s>] [--out=<path>] [--save-edges=<path>]
    mazes_driver solve <maze-file> <start-row> <start-col> <end-row> <end-col>
    mazes_driver cave (--file=<path> | --fill-chance=<n>) [--born=<b>] [--death=<d>] [--steps=<n>] [--seed=<s>] [--out=<path>]

Options:
    -h --help              Show this screen.
    --rows=<r>             Maze height in cells [default: 20].
    --cols=<c>             Maze width in cells [default: 20].
    --bias=<b>             Percentage chance of each random wall draw placing a wall [default: 50].
    --seed=<s>             Seed the random source for a reproducible run. Seeded from the system otherwise.
    --out=<path>           Write the maze or cave text to a file instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --file=<path>          Load the starting cave from a cave text file.
    --fill-chance=<n>      Seed a 25x25 cave where each cell starts dead with an n in 100 chance.
    --born=<b>             A dead cell with more than b live neighbours comes alive [default: 3].
    --death=<d>            A live cell with fewer than d live neighbours dies [default: 3].
    --steps=<n>            Most generations to run, stopping early once the cave is stable [default: 10].
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    cmd_maze: bool,
    cmd_solve: bool,
    cmd_cave: bool,
    flag_rows: usize,
    flag_cols: usize,
    flag_bias: u32,
    flag_seed: Option<u64>,
    flag_out: String,
    flag_save_edges: String,
    arg_maze_file: String,
    arg_start_row: Option<usize>,
    arg_start_col: Option<usize>,
    arg_end_row: Option<usize>,
    arg_end_col: Option<usize>,
    flag_file: String,
    flag_fill_chance: Option<u32>,
    flag_born: usize,
    flag_death: usize,
    flag_steps: usize,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Mazes(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.cmd_maze {
        run_maze(&args)
    } else if args.cmd_solve {
        run_solve(&args)
    } else if args.cmd_cave {
        run_cave(&args)
    } else {
        bail!("no command given")
    }
}

fn run_maze(args: &DriverArgs) -> Result<()> {

    let mut rng = random_source(args.flag_seed);
    let maze = generators::eller_with_bias(RowsCount(args.flag_rows),
                                           ColumnsCount(args.flag_cols),
                                           args.flag_bias,
                                           &mut rng)?;

    if !args.flag_save_edges.is_empty() {
        parser::write_text_to_file(&parser::edges_to_string(&maze), Path::new(&args.flag_save_edges))
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
    }

    emit(&parser::maze_to_string(&maze), &args.flag_out)
}

fn run_solve(args: &DriverArgs) -> Result<()> {

    let start = point_arg(args.arg_start_row, args.arg_start_col)?;
    let end = point_arg(args.arg_end_row, args.arg_end_col)?;

    let maze = parser::load_maze(&args.arg_maze_file)?;
    let path = pathing::solve(&maze, start, end)?;

    for coord in path {
        println!("{} {}", coord.row, coord.col);
    }
    Ok(())
}

fn run_cave(args: &DriverArgs) -> Result<()> {

    let mut cave = if !args.flag_file.is_empty() {
        parser::load_cave(&args.flag_file)?
    } else {
        let fill_chance = args.flag_fill_chance.ok_or("a cave needs --file or --fill-chance")?;
        let mut cave = Cave::new(RowsCount(cave::RANDOM_CAVE_SIZE), ColumnsCount(cave::RANDOM_CAVE_SIZE))?;
        cave.generate_random(fill_chance, &mut random_source(args.flag_seed))?;
        cave
    };
    cave.set_born_limit(args.flag_born)?;
    cave.set_death_limit(args.flag_death)?;

    for step in 0..args.flag_steps {
        if cave.next()? == 0 {
            info!("cave stable after {} steps", step);
            break;
        }
    }

    emit(&parser::cave_to_string(&cave), &args.flag_out)
}

fn random_source(seed: Option<u64>) -> RngSource {
    match seed {
        Some(seed) => {
            info!("random seed {}", seed);
            RngSource::from_seed(seed)
        }
        None => RngSource::from_entropy(),
    }
}

fn point_arg(row: Option<usize>, col: Option<usize>) -> Result<Point> {
    match (row, col) {
        (Some(row), Some(col)) => Ok(Point::new(row, col)),
        _ => bail!("a point needs both a row and a column"),
    }
}

fn emit(text: &str, out_path: &str) -> Result<()> {
    if out_path.is_empty() {
        print!("{}", text);
    } else {
        parser::write_text_to_file(text, Path::new(out_path))
            .chain_err(|| format!("Failed to write text file {}", out_path))?;
    }
    Ok(())
}
