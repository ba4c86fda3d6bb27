use std::fmt;

use crate::cells::{GridCoordinate, GridDirection};
use crate::grid::{Grid, IndexType};
use crate::pathing::Distances;
use crate::utils::FnvHashSet;

/// Provides the text to put in the body of a cell when rendering a grid.
/// The body is exactly three characters wide.
pub trait GridDisplay {
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
}

impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> PathDisplay {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        self.distance_from_start_to(coord)
            .map_or_else(|| String::from("   "),
                         |distance| format!("{:^3x}", distance))
    }
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    /// Renders the grid as ASCII art, one text row of wall data then one of
    /// floor data per grid row.
    ///
    /// A 2x2 grid with all passages open looks like:
    ///
    /// ```text
    /// +---+---+
    /// |       |
    /// +   +   +
    /// |       |
    /// +---+---+
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let columns_count = self.row_length().0;

        // The north boundary wall is never carved through.
        let mut output = String::from("+");
        for _ in 0..columns_count {
            output.push_str("---+");
        }
        output.push('\n');

        let render_body = |coord| {
            self.grid_display()
                .as_ref()
                .map_or_else(|| String::from("   "),
                             |displayer| displayer.render_cell_body(coord))
        };

        for row in self.iter_row() {
            let mut wall_line = String::from("|");
            let mut floor_line = String::from("+");
            for coord in row {
                wall_line.push_str(&render_body(coord));
                wall_line.push(if self.is_passage_open(coord, GridDirection::East) {
                    ' '
                } else {
                    '|'
                });
                floor_line.push_str(if self.is_passage_open(coord, GridDirection::South) {
                    "   "
                } else {
                    "---"
                });
                floor_line.push('+');
            }
            output.push_str(&wall_line);
            output.push('\n');
            output.push_str(&floor_line);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use std::rc::Rc;

    use super::*;
    use crate::units::{ColumnLength, RowLength};

    fn two_by_two() -> Grid<u8> {
        // Passages: (0,0)-(1,0), (1,0)-(1,1), (1,1)-(0,1)
        let mut g = Grid::<u8>::new(RowLength(2), ColumnLength(2)).expect("grid");
        let origin = GridCoordinate::new(0, 0);
        let east = g.carve(origin, GridDirection::East).expect("carve east");
        let south = g.carve(east, GridDirection::South).expect("carve south");
        g.carve(south, GridDirection::West).expect("carve west");
        g
    }

    #[test]
    fn rendering_walls_and_floors() {
        let g = two_by_two();
        let expected = "+---+---+\n\
                        |       |\n\
                        +---+   +\n\
                        |       |\n\
                        +---+---+\n";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn rendering_start_and_end_markers() {
        let mut g = two_by_two();
        let display = StartEndPointsDisplay::new(GridCoordinate::new(0, 0),
                                                 GridCoordinate::new(1, 1));
        g.set_grid_display(Some(Rc::new(display)));
        let expected = "+---+---+\n\
                        | S     |\n\
                        +---+   +\n\
                        |     E |\n\
                        +---+---+\n";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn rendering_a_path() {
        let mut g = two_by_two();
        let path = [GridCoordinate::new(0, 0),
                    GridCoordinate::new(1, 0),
                    GridCoordinate::new(1, 1)];
        g.set_grid_display(Some(Rc::new(PathDisplay::new(&path))));
        let expected = "+---+---+\n\
                        | .   . |\n\
                        +---+   +\n\
                        |     . |\n\
                        +---+---+\n";
        assert_eq!(format!("{}", g), expected);
    }
}
