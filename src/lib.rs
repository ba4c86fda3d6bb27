//! Perfect maze generation on rectangular grids.
//!
//! A maze is carved into a [`grid::Grid`] by the randomized backtracking walk
//! in [`generators`], wrapped with corner entrance and exit selection by
//! [`maze::Maze`]. Carved grids render as ASCII art through their `Display`
//! impl, optionally decorated by a [`grid_displays::GridDisplay`], and
//! [`pathing`] finds distances and routes through the open passages.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod units;

mod utils;
