use std::convert::From;
use std::fmt;

use smallvec::SmallVec;

pub type PositionSmallVec = SmallVec<[Position; 4]>;

/// A grid position. `x` grows to the right, `y` grows downwards; `(0, 0)` is the top left corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }

    /// The position one step away in `direction`.
    /// Returns None if the step would leave the non-negative quadrant; the far grid
    /// boundaries are checked by the grid, not here.
    pub fn offset(self, direction: Direction) -> Option<Position> {
        let Position { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(1).map(|y| Position { x, y }),
            Direction::Down => y.checked_add(1).map(|y| Position { x, y }),
            Direction::Left => x.checked_sub(1).map(|x| Position { x, y }),
            Direction::Right => x.checked_add(1).map(|x| Position { x, y }),
        }
    }

    /// Which direction leads from `self` to an orthogonally adjacent `other`.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::ALL.iter()
            .cloned()
            .find(|&dir| self.offset(dir) == Some(other))
    }
}

impl From<(u32, u32)> for Position {
    fn from(x_y_pair: (u32, u32)) -> Position {
        Position::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise from the top, matching the order walls are listed in.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a key name to a direction: arrow keys (`ArrowUp` etc.) or `w`/`a`/`s`/`d`, any case.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key.to_lowercase().as_str() {
            "arrowup" | "w" => Some(Direction::Up),
            "arrowdown" | "s" => Some(Direction::Down),
            "arrowleft" | "a" => Some(Direction::Left),
            "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// The four independent walls of a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub fn all() -> Walls {
        Walls {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    #[inline]
    pub fn facing(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    #[inline]
    pub fn set_facing(&mut self, direction: Direction, standing: bool) {
        match direction {
            Direction::Up => self.top = standing,
            Direction::Right => self.right = standing,
            Direction::Down => self.bottom = standing,
            Direction::Left => self.left = standing,
        }
    }

    pub fn standing_count(&self) -> usize {
        Direction::ALL.iter().filter(|&&dir| self.facing(dir)).count()
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::all()
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Default)]
pub struct Cell {
    pub walls: Walls,
    /// Only meaningful while a generator is running.
    pub visited: bool,
    /// Set on every cell once generation has finished.
    pub is_path: bool,
}

impl Cell {
    /// A cell with all four walls standing.
    pub fn new() -> Cell {
        Cell::default()
    }

    #[inline]
    pub fn is_open(&self, direction: Direction) -> bool {
        !self.walls.facing(direction)
    }
}
