
use crate::cells::Position;
use crate::errors::*;
use crate::units::{EdgesCount, Height, NodesCount, Width};


/// The extent of a rectangular grid. Always at least one cell in each direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridDimensions {
    width: Width,
    height: Height,
}

impl GridDimensions {
    pub fn new(width: Width, height: Height) -> Result<GridDimensions> {
        if width.0 == 0 || height.0 == 0 || width.0 > u32::MAX as usize ||
           height.0 > u32::MAX as usize {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0));
        }
        Ok(GridDimensions { width, height })
    }

    // Only for sizes known to be valid at compile time.
    pub(crate) const fn new_unchecked(width: usize, height: usize) -> GridDimensions {
        GridDimensions {
            width: Width(width),
            height: Height(height),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.width.0 * self.height.0)
    }

    /// Edges of the full lattice: every pair of orthogonal neighbours.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.width.0, self.height.0);
        (self.size(), EdgesCount((w - 1) * h + w * (h - 1)))
    }

    /// Edges in a spanning tree of the lattice.
    #[inline]
    pub fn spanning_tree_edges(&self) -> EdgesCount {
        EdgesCount(self.size().0 - 1)
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        (pos.x as usize) < self.width.0 && (pos.y as usize) < self.height.0
    }

    /// Row-major index of a position, None when outside of the grid.
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width.0 + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        let x = index % self.width.0;
        let y = index / self.width.0;
        Position::new(x as u32, y as u32)
    }

    /// The bottom right corner.
    pub fn far_corner(&self) -> Position {
        Position::new((self.width.0 - 1) as u32, (self.height.0 - 1) as u32)
    }
}
