use crate::cells::GridCoordinate;
use crate::grid::{Grid, IndexType};
use crate::utils;
use crate::utils::FnvHashMap;

/// The distance of every reachable cell from a start cell, by breadth first
/// search over the grid's open passages.
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if the start coordinate is not in the grid.
    pub fn new<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                         start_coordinate: GridCoordinate)
                                         -> Option<Distances> {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);
        let mut max_distance = 0;

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for coord in frontier {
                let distance = distances[&coord];
                if distance > max_distance {
                    max_distance = distance;
                }
                // links() cannot fail here, the coordinates all come from the grid
                for linked_coord in grid.links(coord).unwrap_or_default() {
                    if !distances.contains_key(&linked_coord) {
                        distances.insert(linked_coord, distance + 1);
                        new_frontier.push(linked_coord);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance,
        })
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn cells_reached(&self) -> usize {
        self.distances.len()
    }
}

/// The shortest path from the distances' start cell to the given end cell,
/// as start-to-end coordinates. Returns None if the end cell is unreachable
/// or not in the grid.
pub fn shortest_path<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                               distances: &Distances,
                                               end_coordinate: GridCoordinate)
                                               -> Option<Vec<GridCoordinate>> {
    distances.distance_from_start_to(end_coordinate)?;

    // Walk backward from the end, each step moving to any linked neighbour
    // one unit closer to the start. In a perfect maze that neighbour is unique.
    let mut path = vec![end_coordinate];
    let mut current = end_coordinate;
    while current != distances.start() {
        let current_distance = distances.distance_from_start_to(current)?;
        let next = grid.links(current)?
            .iter()
            .cloned()
            .find(|&linked_coord| {
                distances.distance_from_start_to(linked_coord)
                    .map_or(false, |d| d + 1 == current_distance)
            })?;
        path.push(next);
        current = next;
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::GridDirection;
    use crate::units::{ColumnLength, RowLength};

    /// 3x3 grid carved into one serpentine corridor:
    /// (0,0)-(1,0)-(2,0)-(2,1)-(1,1)-(0,1)-(0,2)-(1,2)-(2,2)
    fn serpentine_grid() -> Grid<u8> {
        let mut g = Grid::<u8>::new(RowLength(3), ColumnLength(3)).expect("grid");
        let mut pos = GridCoordinate::new(0, 0);
        let route = [GridDirection::East,
                     GridDirection::East,
                     GridDirection::South,
                     GridDirection::West,
                     GridDirection::West,
                     GridDirection::South,
                     GridDirection::East,
                     GridDirection::East];
        for &dir in &route {
            pos = g.carve(pos, dir).expect("carve failed");
        }
        g
    }

    #[test]
    fn distances_of_an_invalid_start_cell() {
        let g = serpentine_grid();
        assert!(Distances::new(&g, GridCoordinate::new(3, 3)).is_none());
    }

    #[test]
    fn distances_along_a_corridor() {
        let g = serpentine_grid();
        let start = GridCoordinate::new(0, 0);
        let distances = Distances::new(&g, start).expect("start is a valid cell");

        assert_eq!(distances.start(), start);
        assert_eq!(distances.cells_reached(), 9);
        assert_eq!(distances.max(), 8);
        assert_eq!(distances.distance_from_start_to(start), Some(0));
        assert_eq!(distances.distance_from_start_to(GridCoordinate::new(2, 0)), Some(2));
        assert_eq!(distances.distance_from_start_to(GridCoordinate::new(0, 1)), Some(5));
        assert_eq!(distances.distance_from_start_to(GridCoordinate::new(2, 2)), Some(8));
        assert_eq!(distances.distance_from_start_to(GridCoordinate::new(3, 0)), None);
    }

    #[test]
    fn distances_ignore_unreached_cells() {
        // Only one passage carved, the rest of the grid is walled off.
        let mut g = Grid::<u8>::new(RowLength(3), ColumnLength(3)).expect("grid");
        g.carve(GridCoordinate::new(0, 0), GridDirection::East).expect("carve failed");
        let distances = Distances::new(&g, GridCoordinate::new(0, 0)).expect("valid start");

        assert_eq!(distances.cells_reached(), 2);
        assert_eq!(distances.max(), 1);
        assert_eq!(distances.distance_from_start_to(GridCoordinate::new(2, 2)), None);
    }

    #[test]
    fn shortest_path_follows_the_corridor() {
        let g = serpentine_grid();
        let start = GridCoordinate::new(0, 0);
        let end = GridCoordinate::new(2, 2);
        let distances = Distances::new(&g, start).expect("valid start");

        let path = shortest_path(&g, &distances, end).expect("end is reachable");
        let gc = GridCoordinate::new;
        assert_eq!(path,
                   vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(2, 1), gc(1, 1), gc(0, 1), gc(0, 2),
                        gc(1, 2), gc(2, 2)]);
    }

    #[test]
    fn shortest_path_to_an_unreachable_cell() {
        let mut g = Grid::<u8>::new(RowLength(3), ColumnLength(3)).expect("grid");
        g.carve(GridCoordinate::new(0, 0), GridDirection::East).expect("carve failed");
        let distances = Distances::new(&g, GridCoordinate::new(0, 0)).expect("valid start");

        assert!(shortest_path(&g, &distances, GridCoordinate::new(2, 2)).is_none());
    }
}
