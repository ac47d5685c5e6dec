//! The single player game: a `GameState` value plus the pure transitions that turn one state into
//! the next.
//!
//! Every transition takes the state by value and hands back the successor. None of them fail:
//! input that makes no sense in the current phase (moving into a wall, moving while paused) gives
//! back the state unchanged. Elapsed time is measured by the caller and fed in through `tick`.

use std::cmp;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::cells::{Cell, Direction, Position};
use crate::generators;
use crate::grid::Grid;
use crate::grid_dimensions::GridDimensions;

pub const MAX_LEVEL: u32 = 10;
const TIME_BONUS_CEILING: u32 = 1000;
const MOVE_BONUS_CEILING: u32 = 500;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a difficulty tag, any case. Anything unrecognised is `Easy`.
    pub fn from_tag(tag: &str) -> Difficulty {
        match tag.trim().to_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Perfect for beginners",
            Difficulty::Medium => "A good challenge",
            Difficulty::Hard => "For maze masters",
        }
    }

    /// Maze size for the tier. The level never changes it.
    pub fn size(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (10, 10),
            Difficulty::Medium => (15, 15),
            Difficulty::Hard => (20, 20),
        }
    }

    pub fn dimensions(self) -> GridDimensions {
        let (width, height) = self.size();
        GridDimensions::new_unchecked(width, height)
    }
}

impl Default for Difficulty {
    fn default() -> Difficulty {
        Difficulty::Easy
    }
}

impl FromStr for Difficulty {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Difficulty, Infallible> {
        Ok(Difficulty::from_tag(s))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Width and height of the maze for a difficulty tag; unknown tags get the easy size.
pub fn difficulty_to_size(difficulty: &str) -> (usize, usize) {
    Difficulty::from_tag(difficulty).size()
}

/// The phase encoded by the `is_playing`, `is_paused` and `is_completed` flags.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub maze: Grid,
    pub player: Position,
    pub start: Position,
    pub end: Position,
    pub level: u32,
    pub score: u32,
    pub moves: u32,
    /// Seconds since the last start or reset, as reported by the caller's clock.
    pub time: u32,
    pub is_playing: bool,
    pub is_completed: bool,
    pub is_paused: bool,
    pub difficulty: Difficulty,
}

impl GameState {
    /// The state before any game has been started: an uncarved easy sized board, nothing running.
    pub fn menu() -> GameState {
        let dimensions = Difficulty::Easy.dimensions();
        GameState {
            maze: Grid::new(dimensions),
            player: Position::new(0, 0),
            start: Position::new(0, 0),
            end: dimensions.far_corner(),
            level: 1,
            score: 0,
            moves: 0,
            time: 0,
            is_playing: false,
            is_completed: false,
            is_paused: false,
            difficulty: Difficulty::Easy,
        }
    }

    /// Completed takes precedence, then a game that is not playing is at the menu whatever its
    /// paused flag says.
    pub fn phase(&self) -> GamePhase {
        match (self.is_playing, self.is_paused, self.is_completed) {
            (_, _, true) => GamePhase::Completed,
            (true, true, _) => GamePhase::Paused,
            (true, false, _) => GamePhase::Playing,
            (false, _, _) => GamePhase::Menu,
        }
    }

    /// Moves are accepted and the clock runs.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_playing && !self.is_paused && !self.is_completed
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.maze.width().0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.maze.height().0
    }

    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.maze.cell(pos)
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::menu()
    }
}

/// Start a new game on a fresh maze, drawing randomness from the thread local generator.
pub fn start_new_game(difficulty: Difficulty) -> GameState {
    start_new_game_with_rng(difficulty, &mut rand::thread_rng())
}

/// Start a new game: fresh maze for the difficulty, level 1, counters zeroed, playing.
#[instrument(level = "debug", skip(rng))]
pub fn start_new_game_with_rng<R>(difficulty: Difficulty, rng: &mut R) -> GameState
    where R: Rng + ?Sized
{
    let (maze, start, end) = new_board(difficulty, rng);
    GameState {
        maze,
        player: start,
        start,
        end,
        level: 1,
        score: 0,
        moves: 0,
        time: 0,
        is_playing: true,
        is_completed: false,
        is_paused: false,
        difficulty,
    }
}

pub fn advance_level(state: GameState) -> GameState {
    advance_level_with_rng(state, &mut rand::thread_rng())
}

/// Move on to the next level: a fresh maze of the same difficulty, level raised (capped at
/// `MAX_LEVEL`), move count and clock zeroed, playing again.
///
/// This does not check that the current level was completed; see `GameSession::next_level` for
/// the guarded version.
pub fn advance_level_with_rng<R>(state: GameState, rng: &mut R) -> GameState
    where R: Rng + ?Sized
{
    let level = next_level(state.level);
    let (maze, start, end) = new_board(state.difficulty, rng);
    debug!(new_level = level, difficulty = %state.difficulty, "advancing level");
    GameState {
        maze,
        player: start,
        start,
        end,
        level,
        moves: 0,
        time: 0,
        is_playing: true,
        is_completed: false,
        is_paused: false,
        ..state
    }
}

/// Try to take one step. Steps out of the grid or through a wall are ignored, as is any step
/// while the game is not running. Reaching the exit completes the game and scores it.
pub fn move_player(state: GameState, direction: Direction) -> GameState {
    if !state.is_playing || state.is_paused {
        return state;
    }

    let target = match step_target(&state.maze, state.player, direction) {
        Some(target) => target,
        None => {
            trace!(player = %state.player, %direction, "move blocked");
            return state;
        }
    };

    let moved = GameState {
        player: target,
        moves: state.moves.saturating_add(1),
        ..state
    };

    if moved.player == moved.end {
        let score = calculate_score(moved.time, moved.moves, moved.level);
        debug!(score, moves = moved.moves, time = moved.time, level = moved.level,
               "maze completed");
        GameState {
            is_completed: true,
            is_playing: false,
            score,
            ..moved
        }
    } else {
        moved
    }
}

/// Flip the paused flag. Nothing else changes, whatever the phase: a paused flag on a game that
/// is not playing is ignored by `GameState::phase`.
pub fn toggle_pause(state: GameState) -> GameState {
    GameState {
        is_paused: !state.is_paused,
        ..state
    }
}

/// Another attempt at the same maze: back to the start with the counters zeroed.
pub fn reset(state: GameState) -> GameState {
    GameState {
        player: state.start,
        moves: 0,
        time: 0,
        is_completed: false,
        is_playing: true,
        is_paused: false,
        ..state
    }
}

/// Record the caller's elapsed seconds. Only the running clock moves: a paused, finished or
/// unstarted game keeps its time.
pub fn tick(state: GameState, elapsed_seconds: u32) -> GameState {
    if state.is_active() {
        GameState {
            time: elapsed_seconds,
            ..state
        }
    } else {
        state
    }
}

/// `(max(0, 1000 - time) + max(0, 500 - moves)) * level`
pub fn calculate_score(time: u32, moves: u32, level: u32) -> u32 {
    let time_bonus = TIME_BONUS_CEILING.saturating_sub(time);
    let move_bonus = MOVE_BONUS_CEILING.saturating_sub(moves);
    (time_bonus + move_bonus).saturating_mul(level)
}

pub fn next_level(level: u32) -> u32 {
    cmp::min(level.saturating_add(1), MAX_LEVEL)
}

/// Can a player standing on `from` step in `direction`? Not when the step leaves the grid or the
/// wall on that side of `from` is standing.
pub fn can_move(maze: &Grid, from: Position, direction: Direction) -> bool {
    step_target(maze, from, direction).is_some()
}

fn step_target(maze: &Grid, from: Position, direction: Direction) -> Option<Position> {
    let target = maze.neighbour_at_direction(from, direction)?;
    let cell = maze.cell(from)?;
    if cell.is_open(direction) {
        Some(target)
    } else {
        None
    }
}

fn new_board<R>(difficulty: Difficulty, rng: &mut R) -> (Grid, Position, Position)
    where R: Rng + ?Sized
{
    let dimensions = difficulty.dimensions();
    let maze = generators::recursive_backtracker(dimensions, rng);
    (maze, Position::new(0, 0), dimensions.far_corner())
}
