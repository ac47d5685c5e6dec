use std::fmt;

use crate::cells::{Direction, Position};
use crate::grid::Grid;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Position) -> String {
        String::from("   ")
    }
}

#[derive(Debug, Copy, Clone)]
pub struct StartEndPointsDisplay {
    start: Position,
    end: Position,
}

impl StartEndPointsDisplay {
    pub fn new(start: Position, end: Position) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Position) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Start and end markers with the player drawn on top.
#[derive(Debug, Copy, Clone)]
pub struct PlayerDisplay {
    player: Position,
    points: StartEndPointsDisplay,
}

impl PlayerDisplay {
    pub fn new(player: Position, start: Position, end: Position) -> PlayerDisplay {
        PlayerDisplay {
            player,
            points: StartEndPointsDisplay::new(start, end),
        }
    }
}

impl GridDisplay for PlayerDisplay {
    fn render_cell_body(&self, coord: Position) -> String {
        if coord == self.player {
            String::from(" @ ")
        } else {
            self.points.render_cell_body(coord)
        }
    }
}

/// A grid rendered as text together with an optional cell body overlay.
pub struct MazeView<'a> {
    grid: &'a Grid,
    grid_display: Option<&'a dyn GridDisplay>,
}

impl<'a> MazeView<'a> {
    pub fn new(grid: &'a Grid, grid_display: Option<&'a dyn GridDisplay>) -> MazeView<'a> {
        MazeView { grid, grid_display }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&MazeView::new(self, None), f)
    }
}

/// Box drawing junction glyph for the wall segments meeting at a corner.
/// Indexed by `left | right << 1 | up << 2 | down << 3`.
const JUNCTIONS: [&str; 16] = [
    " ", "╴", "╶", "─",
    "╵", "┘", "└", "┴",
    "╷", "┐", "┌", "┬",
    "│", "┤", "├", "┼",
];

fn junction(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    let index = left as usize | (right as usize) << 1 | (up as usize) << 2 | (down as usize) << 3;
    JUNCTIONS[index]
}

impl<'a> fmt::Display for MazeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_LR_3: &str = "───";
        const WALL_UD: &str = "│";
        const EMPTY_BODY: &str = "   ";

        let grid = self.grid;
        // The grid boundary counts as a wall, so `walled` is true on every outer side.
        let walled = |coord: Position, dir: Direction| !grid.is_neighbour_linked(coord, dir);
        let walled_beyond = |coord: Position, step: Direction, dir: Direction| {
            grid.neighbour_at_direction(coord, step).map_or(false, |c| walled(c, dir))
        };

        // North boundary: a corner after every cell, with a stem down where that cell's east wall stands.
        let mut output = String::from(junction(false, true, false, true));
        for x in 0..grid.width().0 {
            let coord = Position::new(x as u32, 0);
            output.push_str(WALL_LR_3);
            output.push_str(junction(true,
                                     grid.neighbour_at_direction(coord, Direction::Right).is_some(),
                                     false,
                                     walled(coord, Direction::Right)));
        }
        output.push('\n');

        for row in grid.iter_row() {
            let mut middle = String::from(WALL_UD);
            let mut bottom = String::new();

            for (index_column, coord) in row.into_iter().enumerate() {
                match self.grid_display {
                    Some(displayer) => middle.push_str(&displayer.render_cell_body(coord)),
                    None => middle.push_str(EMPTY_BODY),
                }
                middle.push_str(if walled(coord, Direction::Right) { WALL_UD } else { " " });

                if index_column == 0 {
                    // West boundary corner below this cell.
                    bottom.push_str(junction(false,
                                             walled(coord, Direction::Down),
                                             true,
                                             grid.neighbour_at_direction(coord, Direction::Down)
                                                 .is_some()));
                }
                bottom.push_str(if walled(coord, Direction::Down) { WALL_LR_3 } else { EMPTY_BODY });

                // The south east corner of the cell.
                bottom.push_str(junction(walled(coord, Direction::Down),
                                         walled_beyond(coord, Direction::Right, Direction::Down),
                                         walled(coord, Direction::Right),
                                         walled_beyond(coord, Direction::Down, Direction::Right)));
            }

            output.push_str(&middle);
            output.push('\n');
            output.push_str(&bottom);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
