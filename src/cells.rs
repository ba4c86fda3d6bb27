use smallvec::SmallVec;
use std::convert::From;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridDirection {
    North,
    South,
    East,
    West,
}

pub const DIRECTIONS: [GridDirection; 4] = [
    GridDirection::North,
    GridDirection::South,
    GridDirection::East,
    GridDirection::West,
];

impl GridDirection {
    pub fn opposite(self) -> GridDirection {
        match self {
            GridDirection::North => GridDirection::South,
            GridDirection::South => GridDirection::North,
            GridDirection::East => GridDirection::West,
            GridDirection::West => GridDirection::East,
        }
    }
}

/// Creates a new `GridCoordinate` offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable - the grid itself
/// bounds checks the other two edges of the rectangle.
pub fn offset_coordinate(coord: GridCoordinate, dir: GridDirection) -> Option<GridCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        GridDirection::North => {
            if y > 0 {
                Some(GridCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        GridDirection::South => Some(GridCoordinate { x, y: y + 1 }),
        GridDirection::East => Some(GridCoordinate { x: x + 1, y }),
        GridDirection::West => {
            if x > 0 {
                Some(GridCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// The open/closed state of one cell's four passages, as seen by renderers
/// and players. `true` means an opening exists toward that neighbour.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CellPassages {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl CellPassages {
    pub fn is_open(self, dir: GridDirection) -> bool {
        match dir {
            GridDirection::North => self.north,
            GridDirection::South => self.south,
            GridDirection::East => self.east,
            GridDirection::West => self.west,
        }
    }

    pub fn open_count(self) -> usize {
        [self.north, self.south, self.east, self.west]
            .iter()
            .filter(|&&open| open)
            .count()
    }
}
