use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use std::error;
use std::fmt;
use std::rc::Rc;
use std::slice;

use crate::cells::{offset_coordinate, CellPassages, CoordinateSmallVec, GridCoordinate,
                   GridDirection};
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnLength, ColumnsCount, RowLength, RowsCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    /// Construction was requested with dimensions that cannot make a maze:
    /// fewer than 2 cells on a side, or more cells than the grid index type
    /// can address.
    InvalidDimensions(RowLength, ColumnLength),
    /// A coordinate outside the grid, or a carve toward a missing neighbour.
    /// Unreachable through the generator's own bounds checks, so hitting it
    /// indicates a logic defect and is not worth retrying.
    OutOfBounds(GridCoordinate),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::InvalidDimensions(RowLength(w), ColumnLength(h)) => {
                write!(f,
                       "invalid grid dimensions {}x{}: a maze needs at least 2 cells on each \
                        side and must fit the grid index type",
                       w,
                       h)
            }
            GridError::OutOfBounds(coord) => {
                write!(f,
                       "cell ({}, {}) is outside the grid or has no neighbour in the requested \
                        direction",
                       coord.x,
                       coord.y)
            }
        }
    }
}

impl error::Error for GridError {}

/// A rectangular grid of cells where the open passages between adjacent cells
/// are the edges of an undirected graph. Storing a passage as a single edge
/// makes the two cells' reciprocal flags one fact: a cell's opening toward a
/// neighbour and the neighbour's opening back can never disagree.
///
/// The grid holds no generation bookkeeping - visited flags and backtrack
/// parents are the carving algorithm's transient state, so a grid handed to a
/// renderer or player exposes passage data only.
pub struct Grid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    row_width: RowLength,
    column_height: ColumnLength,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: graph: {:?}, row_width: {:?}, column_height: {:?}",
               self.graph,
               self.row_width,
               self.column_height)
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    pub fn new(row_width: RowLength,
               column_height: ColumnLength)
               -> Result<Grid<GridIndexType>, GridError> {

        let RowLength(width) = row_width;
        let ColumnLength(height) = column_height;

        // A 1 wide or 1 high maze has no direction preference worth shuffling
        // and a 1x1 maze cannot have distinct start/end corners.
        if width < 2 || height < 2 {
            return Err(GridError::InvalidDimensions(row_width, column_height));
        }
        let cells_count = width * height;
        if cells_count > <GridIndexType as IndexType>::max().index() {
            return Err(GridError::InvalidDimensions(row_width, column_height));
        }

        // Exact count of adjacent cell pairs, the most edges a carve can make.
        let edges_count_hint = 2 * cells_count - width - height;

        let mut grid = Grid {
            graph: Graph::with_capacity(cells_count, edges_count_hint),
            row_width,
            column_height,
            grid_display: None,
        };
        for _ in 0..cells_count {
            let _ = grid.graph.add_node(());
        }

        Ok(grid)
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.row_width.0 * self.column_height.0
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.row_width.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: GridDirection)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction)
            .filter(|&neighbour_coord| self.is_valid_coordinate(neighbour_coord))
    }

    /// Open the passage from a cell toward the adjacent cell in the given
    /// direction, in both cells' view of the shared wall at once.
    /// Returns the neighbouring coordinate moved to.
    pub fn carve(&mut self,
                 coord: GridCoordinate,
                 direction: GridDirection)
                 -> Result<GridCoordinate, GridError> {

        let a_index = self.grid_coordinate_graph_index(coord)
            .ok_or(GridError::OutOfBounds(coord))?;
        let target = self.neighbour_at_direction(coord, direction)
            .ok_or(GridError::OutOfBounds(coord))?;
        let b_index = self.grid_coordinate_graph_index(target)
            .ok_or(GridError::OutOfBounds(target))?;

        // An update rather than an add, so carving twice never duplicates the edge.
        let _ = self.graph.update_edge(a_index, b_index, ());
        Ok(target)
    }

    /// Are two cells in the grid linked by an open passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_passage_open(&self, coord: GridCoordinate, direction: GridDirection) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false,
                    |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// The four passage booleans of one cell. Walls on the grid boundary are
    /// always closed.
    pub fn passages(&self, coord: GridCoordinate) -> Result<CellPassages, GridError> {
        if !self.is_valid_coordinate(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        Ok(CellPassages {
            north: self.is_passage_open(coord, GridDirection::North),
            south: self.is_passage_open(coord, GridDirection::South),
            east: self.is_passage_open(coord, GridDirection::East),
            west: self.is_passage_open(coord, GridDirection::West),
        })
    }

    /// Cell nodes that are linked to a particular node by a passage.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord)
            .map(|graph_node_index| {
                self.graph
                    .neighbors(graph_node_index)
                    .map(|linked_node_index| {
                        index_to_grid_coordinate(self.row_width, linked_node_index.index())
                    })
                    .collect()
            })
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_width: self.row_width,
            cells_count: self.size(),
        }
    }

    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            row_width: self.row_width,
            rows_count: self.column_height.0,
        }
    }

    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            row_width: self.row_width,
        }
    }

    /// Convert a grid coordinate into a petgraph node index.
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: GridCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord)
            .map(graph::NodeIndex::<GridIndexType>::new)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_width: RowLength,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(self.row_width, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    row_width: RowLength,
    rows_count: usize,
}

impl Iterator for RowIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let y = self.current_row as u32;
            let coords = (0..self.row_width.0)
                .map(|x| GridCoordinate::new(x as u32, y))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count - self.current_row;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for RowIter {} // default impl using size_hint()

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    row_width: RowLength,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = index_to_grid_coordinate(self.row_width, edge.source().index());
            let dst_cell_coord = index_to_grid_coordinate(self.row_width, edge.target().index());
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {}

fn index_to_grid_coordinate(row_width: RowLength, one_dimensional_index: usize) -> GridCoordinate {
    let y = one_dimensional_index / row_width.0;
    let x = one_dimensional_index - (y * row_width.0);
    GridCoordinate {
        x: x as u32,
        y: y as u32,
    }
}
