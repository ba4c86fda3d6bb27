use std::fmt;
use std::rc::Rc;

use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::generators;
use crate::grid::{Grid, GridError, IndexType};
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnLength, RowLength};

/// Which pair of opposite corners holds the entrance and the exit.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CornerArrangement {
    NorthWestToSouthEast,
    SouthWestToNorthEast,
    NorthEastToSouthWest,
    SouthEastToNorthWest,
}

pub const CORNER_ARRANGEMENTS: [CornerArrangement; 4] =
    [CornerArrangement::NorthWestToSouthEast,
     CornerArrangement::SouthWestToNorthEast,
     CornerArrangement::NorthEastToSouthWest,
     CornerArrangement::SouthEastToNorthWest];

impl CornerArrangement {
    /// The (start, end) corner cells of a grid with the given dimensions.
    pub fn endpoints(self,
                     row_width: RowLength,
                     column_height: ColumnLength)
                     -> (GridCoordinate, GridCoordinate) {
        let east = (row_width.0 - 1) as u32;
        let south = (column_height.0 - 1) as u32;
        let north_west = GridCoordinate::new(0, 0);
        let north_east = GridCoordinate::new(east, 0);
        let south_west = GridCoordinate::new(0, south);
        let south_east = GridCoordinate::new(east, south);
        match self {
            CornerArrangement::NorthWestToSouthEast => (north_west, south_east),
            CornerArrangement::SouthWestToNorthEast => (south_west, north_east),
            CornerArrangement::NorthEastToSouthWest => (north_east, south_west),
            CornerArrangement::SouthEastToNorthWest => (south_east, north_west),
        }
    }
}

/// A carved maze with its entrance and exit fixed at opposite corners.
/// The passage layout never changes after generation.
pub struct Maze<GridIndexType: IndexType> {
    grid: Grid<GridIndexType>,
    start: GridCoordinate,
    end: GridCoordinate,
}

pub type SmallMaze = Maze<u8>;
pub type MediumMaze = Maze<u16>;
pub type LargeMaze = Maze<u32>;

impl<GridIndexType: IndexType> Maze<GridIndexType> {
    /// Carve a new perfect maze and pick a random pair of opposite corners
    /// as the entrance and exit.
    pub fn generate(row_width: RowLength,
                    column_height: ColumnLength,
                    rng: &mut XorShiftRng)
                    -> Result<Maze<GridIndexType>, GridError> {
        let mut grid = Grid::new(row_width, column_height)?;
        generators::backtracking_carve(&mut grid, rng)?;

        let arrangement = CORNER_ARRANGEMENTS[rng.gen_range(0..CORNER_ARRANGEMENTS.len())];
        let (start, end) = arrangement.endpoints(row_width, column_height);

        Ok(Maze { grid, start, end })
    }

    #[inline]
    pub fn grid(&self) -> &Grid<GridIndexType> {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> GridCoordinate {
        self.end
    }

    /// Swapping the renderer decoration is allowed on a finished maze, it
    /// changes nothing about the passages.
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid.set_grid_display(grid_display);
    }
}

impl<GridIndexType: IndexType> fmt::Display for Maze<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
