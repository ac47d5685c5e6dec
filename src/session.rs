use std::mem;

use rand::Rng;
use tracing::{debug, info};

use crate::cells::Direction;
use crate::effects::{Effect, EffectNotifier};
use crate::game::{self, Difficulty, GamePhase, GameState};

/// What a front end holds on to between frames: the current `GameState`, the random source used for
/// new mazes and the notifier that gets told about effects.
///
/// Each stimulus goes through the matching pure transition in `game`; the session only adds the
/// guards a UI would apply (no resuming a finished game, no next level before finishing) and
/// the effect announcements.
#[derive(Debug)]
pub struct GameSession<R, N> {
    state: GameState,
    rng: R,
    notifier: N,
}

impl<R, N> GameSession<R, N>
    where R: Rng,
          N: EffectNotifier
{
    /// A session sitting at the menu.
    pub fn new(rng: R, notifier: N) -> GameSession<R, N> {
        GameSession {
            state: GameState::menu(),
            rng,
            notifier,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn new_game(&mut self, difficulty: Difficulty) {
        self.state = game::start_new_game_with_rng(difficulty, &mut self.rng);
        info!(%difficulty, width = self.state.width(), height = self.state.height(),
              "new game");
        self.notifier.notify(Effect::Start);
    }

    /// Advance to the next level, only from a completed game. Returns whether it happened.
    pub fn next_level(&mut self) -> bool {
        if self.phase() != GamePhase::Completed {
            debug!(phase = ?self.phase(), "next level ignored");
            return false;
        }
        let current = mem::take(&mut self.state);
        self.state = game::advance_level_with_rng(current, &mut self.rng);
        info!(level = self.state.level, "next level");
        self.notifier.notify(Effect::Start);
        true
    }

    /// Directional input. Every press during active play is announced, whether or not a wall was
    /// in the way; finishing the maze is announced once.
    pub fn press(&mut self, direction: Direction) {
        if !self.state.is_active() {
            return;
        }
        self.notifier.notify(Effect::Move);
        self.apply(|state| game::move_player(state, direction));
        if self.state.is_completed {
            info!(score = self.state.score, moves = self.state.moves, time = self.state.time,
                  "level complete");
            self.notifier.notify(Effect::Win);
        }
    }

    /// Pause or resume a game in progress. Returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.state.is_playing || self.state.is_completed {
            return false;
        }
        self.notifier.notify(Effect::Click);
        self.apply(game::toggle_pause);
        true
    }

    /// Restart the current maze. Nothing to restart from the menu.
    pub fn reset(&mut self) -> bool {
        if self.phase() == GamePhase::Menu {
            return false;
        }
        self.notifier.notify(Effect::Click);
        self.apply(game::reset);
        true
    }

    /// Feed in the seconds elapsed on the caller's clock since the game (re)started.
    pub fn tick(&mut self, elapsed_seconds: u32) {
        self.apply(|state| game::tick(state, elapsed_seconds));
    }

    fn apply<F>(&mut self, transition: F)
        where F: FnOnce(GameState) -> GameState
    {
        let current = mem::take(&mut self.state);
        self.state = transition(current);
    }
}


#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::Position;
    use crate::effects::RecordingNotifier;
    use crate::pathing::Distances;

    type TestSession<'a> = GameSession<XorShiftRng, &'a RecordingNotifier>;

    fn session(recorder: &RecordingNotifier) -> TestSession {
        GameSession::new(XorShiftRng::seed_from_u64(1234), recorder)
    }

    // Walk the player to the exit along the unique route through the maze.
    fn solve(session: &mut TestSession) {
        let maze = session.state().maze.clone();
        let from_end = Distances::<u32>::new(&maze, session.state().end).unwrap();
        while !session.state().is_completed {
            let here = session.state().player;
            let here_distance = from_end.distance_from_start_to(here).unwrap();
            let step = Direction::ALL.iter()
                .cloned()
                .find(|&dir| {
                    maze.neighbour_at_direction(here, dir)
                        .filter(|next| maze.is_linked(here, *next))
                        .and_then(|next| from_end.distance_from_start_to(next))
                        .map_or(false, |d| d < here_distance)
                })
                .unwrap();
            session.press(step);
        }
    }

    #[test]
    fn starts_at_the_menu() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        assert_eq!(s.phase(), GamePhase::Menu);
        s.press(Direction::Right);
        assert!(!s.toggle_pause());
        assert!(!s.reset());
        assert!(!s.next_level());
        assert!(recorder.effects().is_empty());
        assert_eq!(s.state(), &GameState::menu());
    }

    #[test]
    fn new_game_announces_start() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        s.new_game(Difficulty::Hard);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().width(), 20);
        assert_eq!(recorder.take(), vec![Effect::Start]);
    }

    #[test]
    fn every_active_press_announces_a_move() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        s.new_game(Difficulty::Easy);
        recorder.take();

        // Up from the origin is always walled.
        s.press(Direction::Up);
        assert_eq!(s.state().moves, 0);
        assert_eq!(recorder.take(), vec![Effect::Move]);

        assert!(s.toggle_pause());
        s.press(Direction::Down);
        assert_eq!(recorder.take(), vec![Effect::Click]);
        assert_eq!(s.state().player, Position::new(0, 0));
    }

    #[test]
    fn solving_announces_one_win() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        s.new_game(Difficulty::Easy);
        s.tick(3);
        solve(&mut s);

        let state = s.state().clone();
        assert_eq!(state.phase(), GamePhase::Completed);
        assert_eq!(state.player, state.end);
        assert_eq!(state.score, game::calculate_score(3, state.moves, 1));

        let effects = recorder.take();
        assert_eq!(effects.first(), Some(&Effect::Start));
        assert_eq!(effects.last(), Some(&Effect::Win));
        assert_eq!(effects.iter().filter(|&&e| e == Effect::Win).count(), 1);
        assert_eq!(effects.iter().filter(|&&e| e == Effect::Move).count(), state.moves as usize);

        // A finished game cannot be paused and ignores input.
        assert!(!s.toggle_pause());
        s.press(Direction::Left);
        assert!(recorder.effects().is_empty());
    }

    #[test]
    fn next_level_only_after_completion() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        s.new_game(Difficulty::Medium);
        assert!(!s.next_level());
        assert_eq!(s.state().level, 1);

        solve(&mut s);
        recorder.take();
        assert!(s.next_level());
        assert_eq!(s.state().level, 2);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().width(), 15);
        assert_eq!(recorder.take(), vec![Effect::Start]);
    }

    #[test]
    fn level_stops_at_ten() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        s.new_game(Difficulty::Easy);
        for _ in 0..12 {
            solve(&mut s);
            assert!(s.next_level());
        }
        assert_eq!(s.state().level, game::MAX_LEVEL);
    }

    #[test]
    fn reset_clicks_and_restarts() {
        let recorder = RecordingNotifier::new();
        let mut s = session(&recorder);
        s.new_game(Difficulty::Easy);
        let maze = s.state().maze.clone();
        s.tick(9);
        assert_eq!(s.state().time, 9);
        recorder.take();

        assert!(s.reset());
        assert_eq!(recorder.take(), vec![Effect::Click]);
        assert_eq!(s.state().time, 0);
        assert_eq!(s.state().maze, maze);
        assert_eq!(s.into_state().player, Position::new(0, 0));
    }
}
