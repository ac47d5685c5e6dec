//! **maze_runner** generates perfect mazes and runs a single player's way through one of them:
//! moves, elapsed time and a score derived from both.

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod effects;
pub mod errors;
pub mod game;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod session;
pub mod units;
mod utils;

pub use crate::cells::{Cell, Direction, Position, Walls};
pub use crate::game::{advance_level, difficulty_to_size, move_player, reset, start_new_game,
                      tick, toggle_pause, Difficulty, GamePhase, GameState};
pub use crate::generators::generate_maze;
pub use crate::grid::Grid;
