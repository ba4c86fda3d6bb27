use docopt::Docopt;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use mazeforge::{
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    maze::LargeMaze,
    pathing,
    units::{ColumnLength, RowLength},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
    rc::Rc,
};

const USAGE: &str = "Mazeforge

Usage:
    mazeforge_driver -h | --help
    mazeforge_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--text-out=<path>] [(--mark-start-end|--show-path|--show-distances)]

Options:
    -h --help           Show this screen.
    --grid-size=<n>     The grid size is n * n.
    --grid-width=<w>    The grid width in a w*h grid [default: 20].
    --grid-height=<h>   The grid height in a w*h grid [default: 20].
    --seed=<s>          Seed for the random generator, for reproducible mazes. Random if not given.
    --text-out=<path>   Output file path for the textual rendering of the maze. Prints to stdout if not given.
    --mark-start-end    Draw an 'S' (start) and 'E' (end) to show the maze entrance and exit corners.
    --show-path         Show the route from the entrance corner to the exit corner.
    --show-distances    Show the distance from the entrance corner to every other cell.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_mark_start_end: bool,
    flag_show_path: bool,
    flag_show_distances: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Maze(::mazeforge::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut rng = if let Some(seed) = args.flag_seed {
        XorShiftRng::seed_from_u64(seed)
    } else {
        XorShiftRng::from_entropy()
    };

    let mut maze = LargeMaze::generate(RowLength(width), ColumnLength(height), &mut rng)?;

    set_maze_griddisplay(&mut maze, &args)?;

    let rendered = format!("{}", maze);
    if args.flag_text_out.is_empty() {
        println!("{}", rendered);
    } else {
        write_text_to_file(&rendered, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Decide how the maze's cells are decorated in the text rendering.
/// - Nothing in the cells by default
/// - Start and End corner markers
/// - Distances from the start corner to every other cell
/// - The route between the start and end corners
fn set_maze_griddisplay(maze: &mut LargeMaze, maze_args: &MazeArgs) -> Result<()> {

    if maze_args.flag_show_distances || maze_args.flag_show_path {

        let distances = Rc::new(pathing::Distances::new(maze.grid(), maze.start())
            .ok_or("The maze entrance is not a valid start for path distances.")?);

        if maze_args.flag_show_distances {

            maze.set_grid_display(Some(distances.clone() as Rc<dyn GridDisplay>));

        } else {

            let path_opt = pathing::shortest_path(maze.grid(), &distances, maze.end());
            if let Some(path) = path_opt {
                maze.set_grid_display(Some(Rc::new(PathDisplay::new(&path)) as Rc<dyn GridDisplay>));
            } else {
                // Somehow there is no route, maze generation failed to make a perfect maze
                let display = StartEndPointsDisplay::new(maze.start(), maze.end());
                maze.set_grid_display(Some(Rc::new(display) as Rc<dyn GridDisplay>));
            }
        }
    } else if maze_args.flag_mark_start_end {

        let display = StartEndPointsDisplay::new(maze.start(), maze.end());
        maze.set_grid_display(Some(Rc::new(display) as Rc<dyn GridDisplay>));
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
