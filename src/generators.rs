use bit_set::BitSet;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::cells::{GridCoordinate, GridDirection, DIRECTIONS};
use crate::grid::{Grid, GridError, IndexType};

/// Carve a perfect maze into the grid with a randomized backtracking walk.
///
/// The walk starts at the north west corner and repeatedly moves to an
/// unvisited neighbouring cell, opening the passage as it goes. The four
/// directions are tried in a fixed order that is reshuffled only every few
/// steps, so corridors keep a direction bias for a while and the maze grows
/// long winding passages rather than tight switchbacks. When no unvisited
/// neighbour remains the walk retreats along the cells it came from until one
/// has an unvisited neighbour again, and stops once every cell is visited.
///
/// Visits every cell exactly once and opens `grid.size() - 1` passages, so
/// any two cells end up connected by exactly one route.
pub fn backtracking_carve<GridIndexType: IndexType>(grid: &mut Grid<GridIndexType>,
                                                    rng: &mut XorShiftRng)
                                                    -> Result<(), GridError> {
    // Bias window scales with the grid height, small mazes reshuffle often.
    let max_steps_between_reshuffles = grid.column_length().0 / 8;
    carve_with(grid, |direction_order| {
        direction_order.shuffle(rng);
        rng.gen_range(0..=max_steps_between_reshuffles)
    })
}

/// The carving walk with the direction scheduling factored out: `reshuffle`
/// reorders the four directions in place and returns how many steps the new
/// order stays in force.
fn carve_with<GridIndexType, F>(grid: &mut Grid<GridIndexType>,
                                mut reshuffle: F)
                                -> Result<(), GridError>
    where GridIndexType: IndexType,
          F: FnMut(&mut [GridDirection; 4]) -> usize
{
    let cells_count = grid.size();
    let start = GridCoordinate::new(0, 0);
    let start_index = grid.grid_coordinate_to_index(start)
        .ok_or(GridError::OutOfBounds(start))?;

    let mut visited = BitSet::with_capacity(cells_count);
    visited.insert(start_index);
    let mut visited_count = 1;

    // Where the walk entered each cell from, for retreating out of dead ends.
    let mut parents: Vec<Option<GridCoordinate>> = vec![None; cells_count];

    let mut current = start;
    let mut direction_order = DIRECTIONS;
    let mut steps_since_reshuffle = 0;
    let mut reshuffle_threshold = 0;

    while visited_count < cells_count {
        if steps_since_reshuffle >= reshuffle_threshold {
            reshuffle_threshold = reshuffle(&mut direction_order);
            steps_since_reshuffle = 0;
        }
        steps_since_reshuffle += 1;

        let next_move = direction_order.iter()
            .find_map(|&direction| {
                grid.neighbour_at_direction(current, direction)
                    .filter(|&neighbour| {
                        grid.grid_coordinate_to_index(neighbour)
                            .map_or(false, |index| !visited.contains(index))
                    })
                    .map(|_| direction)
            });

        match next_move {
            Some(direction) => {
                let next = grid.carve(current, direction)?;
                let next_index = grid.grid_coordinate_to_index(next)
                    .ok_or(GridError::OutOfBounds(next))?;
                visited.insert(next_index);
                visited_count += 1;
                parents[next_index] = Some(current);
                current = next;
            }
            None => {
                // Dead end, retreat one cell. The start has no parent, but
                // the walk only returns there once every cell is visited.
                let current_index = grid.grid_coordinate_to_index(current)
                    .ok_or(GridError::OutOfBounds(current))?;
                match parents[current_index] {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;

    use super::*;
    use crate::pathing::Distances;
    use crate::units::{ColumnLength, RowLength};

    #[test]
    fn fixed_direction_order_carves_a_serpentine() {
        // With the order pinned to north, east, south, west and never
        // reshuffled, the walk on a 4x4 grid is fully determined: east along
        // the top row, south down the east side, then a snake back through
        // the interior.
        let mut g = Grid::<u8>::new(RowLength(4), ColumnLength(4)).expect("grid");
        carve_with(&mut g, |direction_order| {
            *direction_order = [GridDirection::North,
                                GridDirection::East,
                                GridDirection::South,
                                GridDirection::West];
            usize::MAX
        })
        .expect("carve failed");

        let gc = GridCoordinate::new;
        let expected_links = [(gc(0, 0), gc(1, 0)),
                              (gc(1, 0), gc(2, 0)),
                              (gc(2, 0), gc(3, 0)),
                              (gc(3, 0), gc(3, 1)),
                              (gc(3, 1), gc(3, 2)),
                              (gc(3, 2), gc(3, 3)),
                              (gc(3, 3), gc(2, 3)),
                              (gc(2, 3), gc(2, 2)),
                              (gc(2, 2), gc(2, 1)),
                              (gc(2, 1), gc(1, 1)),
                              (gc(1, 1), gc(1, 2)),
                              (gc(1, 2), gc(1, 3)),
                              (gc(1, 3), gc(0, 3)),
                              (gc(0, 3), gc(0, 2)),
                              (gc(0, 2), gc(0, 1))];

        assert_eq!(g.links_count(), expected_links.len());
        for &(a, b) in &expected_links {
            assert!(g.is_linked(a, b), "expected a passage between {:?} and {:?}", a, b);
        }
    }

    #[test]
    fn same_seed_carves_the_same_maze() {
        let carve_seeded = |seed| {
            let mut g = Grid::<u16>::new(RowLength(12), ColumnLength(12)).expect("grid");
            let mut rng = XorShiftRng::seed_from_u64(seed);
            backtracking_carve(&mut g, &mut rng).expect("carve failed");
            g.iter_links().sorted().collect::<Vec<_>>()
        };
        assert_eq!(carve_seeded(7), carve_seeded(7));
        assert_ne!(carve_seeded(7), carve_seeded(8));
    }

    #[test]
    fn carved_maze_is_perfect() {
        let mut g = Grid::<u16>::new(RowLength(10), ColumnLength(10)).expect("grid");
        let mut rng = XorShiftRng::seed_from_u64(42);
        backtracking_carve(&mut g, &mut rng).expect("carve failed");

        // A spanning tree of 100 cells has exactly 99 edges.
        assert_eq!(g.links_count(), 99);

        // Every cell is reachable from the start corner.
        let distances = Distances::new(&g, GridCoordinate::new(0, 0)).expect("valid start");
        assert_eq!(distances.cells_reached(), 100);

        // Both sides of every passage agree that it is open.
        for (a, b) in g.iter_links() {
            assert!(g.is_linked(a, b));
            assert!(g.is_linked(b, a));
        }
        let open_passages_total: usize = g.iter()
            .map(|coord| g.passages(coord).expect("valid coordinate").open_count())
            .sum();
        assert_eq!(open_passages_total, 2 * g.links_count());
    }

    #[test]
    fn smallest_grid_carves_fully() {
        let mut g = Grid::<u8>::new(RowLength(2), ColumnLength(2)).expect("grid");
        let mut rng = XorShiftRng::seed_from_u64(1);
        backtracking_carve(&mut g, &mut rng).expect("carve failed");
        assert_eq!(g.links_count(), 3);
    }

    #[test]
    fn carved_mazes_are_spanning_trees() {
        fn prop(width: u8, height: u8, seed: u64) -> TestResult {
            let w = (width % 12) as usize + 2;
            let h = (height % 12) as usize + 2;

            let mut g = match Grid::<u16>::new(RowLength(w), ColumnLength(h)) {
                Ok(g) => g,
                Err(_) => return TestResult::error("dimensions should be valid"),
            };
            let mut rng = XorShiftRng::seed_from_u64(seed);
            if backtracking_carve(&mut g, &mut rng).is_err() {
                return TestResult::error("carve should not fail");
            }

            let distances = match Distances::new(&g, GridCoordinate::new(0, 0)) {
                Some(d) => d,
                None => return TestResult::error("start should be a valid cell"),
            };
            TestResult::from_bool(g.links_count() == w * h - 1 &&
                                  distances.cells_reached() == w * h)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
