use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cell, Direction, Position, PositionSmallVec};
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{Height, Width};


/// A rectangular maze: an arena of cells stored row-major, `cells[y * width + x]`.
///
/// Passages are recorded as cleared wall flags, always on both cells that share the wall.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width(), self.height(), self.links_count())
    }
}

impl Grid {
    /// A grid with every wall of every cell standing.
    pub fn new(dimensions: GridDimensions) -> Grid {
        Grid {
            dimensions,
            cells: vec![Cell::new(); dimensions.size().0],
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.dimensions.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.dimensions.height()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, coord: Position) -> Option<&Cell> {
        self.dimensions.index_of(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: Position) -> Option<&mut Cell> {
        match self.dimensions.index_of(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Position) -> bool {
        self.dimensions.contains(coord)
    }

    /// Carve a passage between two adjacent cells, clearing the wall on both sides.
    /// Linking cells that are already linked is fine.
    pub fn link(&mut self, a: Position, b: Position) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let direction = a.direction_to(b).ok_or(CellLinkError::NotAdjacent)?;

        if let Some(cell) = self.cell_mut(a) {
            cell.walls.set_facing(direction, false);
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.walls.set_facing(direction.opposite(), false);
        }
        Ok(())
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Position, b: Position) -> bool {
        match (a.direction_to(b), self.cell(a), self.cell(b)) {
            (Some(direction), Some(cell_a), Some(_)) => cell_a.is_open(direction),
            _ => false,
        }
    }

    /// Can one step be taken from `coord` in `direction`: the neighbour exists and no wall is in the way.
    pub fn is_neighbour_linked(&self, coord: Position, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Position) -> Option<PositionSmallVec> {
        self.cell(coord).map(|_| {
            Direction::ALL.iter()
                .filter(|&&dir| self.is_neighbour_linked(coord, dir))
                .filter_map(|&dir| coord.offset(dir))
                .collect()
        })
    }

    /// Cells that are above, below, left or right of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Position) -> PositionSmallVec {
        Direction::ALL.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self, coord: Position, direction: Direction) -> Option<Position> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Number of carved passages, each shared wall counted once.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// True when every shared wall agrees on both of its sides.
    pub fn walls_are_symmetric(&self) -> bool {
        self.iter().all(|coord| {
            [Direction::Right, Direction::Down].iter().all(|&dir| {
                match (self.cell(coord), self.neighbour_at_direction(coord, dir)) {
                    (Some(cell), Some(neighbour_coord)) => {
                        self.cell(neighbour_coord).map_or(false, |neighbour| {
                            cell.walls.facing(dir) == neighbour.walls.facing(dir.opposite())
                        })
                    }
                    _ => true,
                }
            })
        })
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.dimensions)
    }

    /// Every passage as a pair of positions, the second right of or below the first.
    pub fn iter_links(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.iter().flat_map(move |coord| {
            [Direction::Right, Direction::Down]
                .iter()
                .filter_map(move |&dir| {
                    if self.is_neighbour_linked(coord, dir) {
                        coord.offset(dir).map(|neighbour| (coord, neighbour))
                    } else {
                        None
                    }
                })
                .collect::<PositionPairSmallVec>()
        })
    }

    /// The passages as an undirected graph, one node per cell in row-major order.
    pub fn passage_graph(&self) -> UnGraph<Position, ()> {
        let (nodes, _) = self.dimensions.graph_size();
        let mut graph = UnGraph::with_capacity(nodes.0, self.dimensions.spanning_tree_edges().0);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) =
                   (self.dimensions.index_of(a), self.dimensions.index_of(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

type PositionPairSmallVec = smallvec::SmallVec<[(Position, Position); 2]>;
