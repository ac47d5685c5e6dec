//! Flood fill distances and structural checks over a generated maze.
//!
//! These are verification tools (is every cell reachable, is the maze a spanning tree); the game
//! itself never hands routes to the player.

use std::fmt::{Debug, Display};
use std::ops::Add;

use fnv::FnvHashMap;
use num::traits::{Bounded, One, Unsigned, Zero};
use petgraph::algo::connected_components;

use crate::cells::Position;
use crate::grid::Grid;
use crate::utils;


// Bound bundle for the distance counter type, blanket implemented for every unsigned integer.
pub trait MaxDistance: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord {}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord> MaxDistance for T {}


#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Position,
    distances: FnvHashMap<Position, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Breadth first flood fill of passage steps from `start_coordinate` to every reachable cell.
    ///
    /// Returns None if the start coordinate is not in the grid.
    pub fn new(grid: &Grid, start_coordinate: Position) -> Option<Distances<MaxDistanceT>> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        // Every step costs one so the first time a cell is reached is by a shortest route, the map
        // doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = match distances.get(cell_coord) {
                    Some(d) => *d,
                    None => continue,
                };
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Position {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Position) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the flood fill reached, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }
}

/// Is there any route through the passages from `start` to `end`?
pub fn is_solvable(grid: &Grid, start: Position, end: Position) -> bool {
    Distances::<u32>::new(grid, start)
        .map_or(false, |d| d.distance_from_start_to(end).is_some())
}

/// A perfect maze: the passages form a spanning tree of the grid, one connected piece with exactly
/// `cells - 1` passages (so no loops).
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = grid.passage_graph();
    graph.node_count() == grid.size() && graph.edge_count() + 1 == graph.node_count() &&
    connected_components(&graph) == 1
}


#[cfg(test)]
mod tests {

    use std::u32;

    use itertools::Itertools;

    use super::*;
    use crate::grid_dimensions::GridDimensions;
    use crate::units::{Height, Width};

    type SmallDistances = Distances<u8>;

    static OUT_OF_GRID_COORDINATE: Position = Position {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(GridDimensions::new(Width(w), Height(h)).unwrap())
    }

    // 2x2 grid with every inner wall knocked down: a loop.
    fn open_grid() -> Grid {
        let mut g = small_grid(2, 2);
        let gc = |x, y| Position::new(x, y);
        g.link(gc(0, 0), gc(1, 0)).expect("Link Failed");
        g.link(gc(0, 0), gc(0, 1)).expect("Link Failed");
        g.link(gc(1, 0), gc(1, 1)).expect("Link Failed");
        g.link(gc(0, 1), gc(1, 1)).expect("Link Failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = small_grid(3, 3);
        let distances = SmallDistances::new(&g, OUT_OF_GRID_COORDINATE);
        assert!(distances.is_none());
    }

    #[test]
    fn start() {
        let g = small_grid(3, 3);
        let start_coordinate = Position::new(1, 1);
        let distances = SmallDistances::new(&g, start_coordinate).unwrap();
        assert_eq!(start_coordinate, distances.start());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = small_grid(3, 3);
        let start_coordinate = Position::new(0, 0);
        let distances = SmallDistances::new(&g, start_coordinate).unwrap();
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reachable_count(), 1);
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_grid();
        let gc = |x, y| Position::new(x, y);
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
    }

    #[test]
    fn corridor_distances() {
        let mut g = small_grid(4, 1);
        for x in 0..3 {
            g.link(Position::new(x, 0), Position::new(x + 1, 0)).unwrap();
        }
        let distances = SmallDistances::new(&g, Position::new(0, 0)).unwrap();
        let all = g.iter().map(|c| distances.distance_from_start_to(c).unwrap()).collect_vec();
        assert_eq!(all, vec![0, 1, 2, 3]);
        assert!(is_solvable(&g, Position::new(0, 0), Position::new(3, 0)));
        assert!(is_perfect_maze(&g));
    }

    #[test]
    fn loops_are_not_perfect() {
        let g = open_grid();
        assert!(is_solvable(&g, Position::new(0, 0), Position::new(1, 1)));
        assert!(!is_perfect_maze(&g));
    }

    #[test]
    fn disconnected_is_not_perfect() {
        let mut g = small_grid(3, 1);
        g.link(Position::new(0, 0), Position::new(1, 0)).unwrap();
        assert!(!is_solvable(&g, Position::new(0, 0), Position::new(2, 0)));
        assert!(!is_perfect_maze(&g));
    }

    #[test]
    fn single_cell_is_perfect() {
        let g = small_grid(1, 1);
        assert!(is_perfect_maze(&g));
        assert!(is_solvable(&g, Position::new(0, 0), Position::new(0, 0)));
    }
}
