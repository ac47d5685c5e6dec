use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::cells::{Direction, Position};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;
use crate::units::{Height, Width};

/// Generate a perfect maze of `width` x `height` cells.
///
/// Fails fast with `ErrorKind::InvalidDimensions` if either side is zero.
pub fn generate_maze<R>(width: usize, height: usize, rng: &mut R) -> Result<Grid>
    where R: Rng + ?Sized
{
    let dimensions = GridDimensions::new(Width(width), Height(height))?;
    Ok(recursive_backtracker(dimensions, rng))
}

/// Apply the recursive backtracker maze generation algorithm to a fresh, fully walled grid.
///
/// Starting at the top left cell we walk randomly to unvisited neighbours, carving a passage
/// for every step. When the walk reaches a cell with no unvisited neighbours it backtracks along
/// the stack of visited cells until it finds a cell that still has one. It is finished when the
/// stack is empty.
/// Each carve attaches exactly one previously unvisited cell to the passages carved so far, so
/// the result is a spanning tree of the grid: `width * height - 1` passages, no loops and exactly
/// one route between any two cells.
/// The "recursion" is an explicit stack so large grids do not overflow the call stack.
#[instrument(skip(rng))]
pub fn recursive_backtracker<R>(dimensions: GridDimensions, rng: &mut R) -> Grid
    where R: Rng + ?Sized
{
    let mut grid = Grid::new(dimensions);
    let origin = Position::new(0, 0);

    let mut stack = Vec::with_capacity(dimensions.size().0);
    set_visited(&mut grid, origin);
    stack.push(origin);

    while let Some(&current) = stack.last() {

        let unvisited_neighbours = unvisited_neighbours(&grid, current);

        if unvisited_neighbours.is_empty() {
            let _ = stack.pop();
        } else {
            let next = unvisited_neighbours[rng.gen_range(0..unvisited_neighbours.len())];
            let linked = grid.link(current, next);
            debug_assert!(linked.is_ok(), "carving {} -> {}: {:?}", current, next, linked);
            set_visited(&mut grid, next);
            stack.push(next);
        }
    }

    for cell in grid.cells_mut() {
        cell.is_path = true;
    }

    debug!(width = dimensions.width().0,
           height = dimensions.height().0,
           passages = grid.links_count(),
           "maze generated");
    grid
}

fn unvisited_neighbours(grid: &Grid, coord: Position) -> SmallVec<[Position; 4]> {
    Direction::ALL.iter()
        .filter_map(|&dir| grid.neighbour_at_direction(coord, dir))
        .filter(|neighbour| grid.cell(*neighbour).map_or(false, |cell| !cell.visited))
        .collect()
}

fn set_visited(grid: &mut Grid, coord: Position) {
    if let Some(cell) = grid.cell_mut(coord) {
        cell.visited = true;
    }
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::pathing::{is_perfect_maze, Distances};

    fn seeded(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut rng = seeded(1);
        for &(w, h) in &[(0, 0), (0, 10), (10, 0)] {
            match generate_maze(w, h, &mut rng) {
                Err(Error(ErrorKind::InvalidDimensions(..), _)) => (),
                other => panic!("expected InvalidDimensions for {}x{}, got {:?}", w, h, other),
            }
        }
    }

    #[test]
    fn single_cell_maze() {
        let g = generate_maze(1, 1, &mut seeded(7)).unwrap();
        assert_eq!(g.size(), 1);
        assert_eq!(g.links_count(), 0);
        let cell = g.cell(Position::new(0, 0)).unwrap();
        assert_eq!(cell.walls.standing_count(), 4);
        assert!(cell.is_path);
    }

    #[test]
    fn carve_candidates_always_link() {
        let dimensions = GridDimensions::new(Width(4), Height(3)).unwrap();
        let mut grid = Grid::new(dimensions);
        set_visited(&mut grid, Position::new(1, 1));
        for coord in grid.iter() {
            for next in unvisited_neighbours(&grid, coord).iter() {
                assert_ne!(*next, Position::new(1, 1));
                assert_eq!(grid.clone().link(coord, *next), Ok(()));
            }
        }
    }

    #[test]
    fn every_cell_visited_and_marked_as_path() {
        let g = generate_maze(10, 10, &mut seeded(3)).unwrap();
        assert!(g.cells().iter().all(|c| c.visited && c.is_path));
    }

    #[test]
    fn spanning_tree_passage_count() {
        let mut rng = seeded(42);
        for &(w, h) in &[(10, 10), (15, 15), (20, 20), (1, 7), (7, 1), (3, 5)] {
            let g = generate_maze(w, h, &mut rng).unwrap();
            assert_eq!(g.links_count(), w * h - 1);
            assert!(g.walls_are_symmetric());
            assert!(is_perfect_maze(&g));
        }
    }

    #[test]
    fn origin_keeps_its_boundary_walls() {
        let g = generate_maze(10, 10, &mut seeded(11)).unwrap();
        let origin = g.cell(Position::new(0, 0)).unwrap();
        assert!(origin.walls.top);
        assert!(origin.walls.left);
        // The walk from the origin has to leave through one of the two inner walls.
        assert!(!origin.walls.right || !origin.walls.bottom);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_maze(12, 9, &mut seeded(99)).unwrap();
        let b = generate_maze(12, 9, &mut seeded(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_cell_reachable_from_origin() {
        let g = generate_maze(20, 20, &mut seeded(5)).unwrap();
        let distances = Distances::<u32>::new(&g, Position::new(0, 0)).unwrap();
        assert_eq!(distances.reachable_count(), 400);
        assert!(distances.distance_from_start_to(Position::new(19, 19)).is_some());
    }

    #[test]
    fn generated_mazes_are_perfect() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 24, h as usize % 24);
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let g = generate_maze(w, h, &mut seeded(seed)).unwrap();
            let distances = Distances::<u32>::new(&g, Position::new(0, 0)).unwrap();
            TestResult::from_bool(g.links_count() == w * h - 1 && g.walls_are_symmetric() &&
                                  is_perfect_maze(&g) &&
                                  distances.reachable_count() == w * h)
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }
}
