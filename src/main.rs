use std::io;
use std::io::prelude::*;
use std::time::{Duration, Instant};

#[macro_use]
extern crate error_chain;

use docopt::Docopt;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use maze_runner::{
    effects::{Effect, EffectNotifier},
    game::{Difficulty, GamePhase},
    grid_displays::{MazeView, PlayerDisplay},
    session::GameSession,
    Direction,
};

const USAGE: &str = "Maze Runner

Find the way from the top left corner (S) to the bottom right corner (E).

Usage:
    maze_runner [--difficulty=<d>] [--seed=<n>] [--quiet]
    maze_runner -h | --help

Options:
    -h --help           Show this screen.
    --difficulty=<d>    easy (10x10), medium (15x15) or hard (20x20) [default: easy].
    --seed=<n>          Seed the maze generator so the same mazes come out every run.
    --quiet             Do not print effect notifications.

Commands, one or more per line:
    w a s d             Move up, left, down, right (arrowup etc. also work).
    p                   Pause / resume.
    r                   Restart the current maze.
    n                   Next level, once the maze is finished.
    g <difficulty>      New game.
    q                   Quit.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_difficulty: String,
    flag_seed: Option<u64>,
    flag_quiet: bool,
}

mod errors {
    #![allow(deprecated)]
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

/// Effects as text on stderr; the board goes to stdout.
struct TerminalNotifier {
    quiet: bool,
}

impl EffectNotifier for TerminalNotifier {
    fn notify(&self, effect: Effect) {
        if self.quiet {
            return;
        }
        match effect {
            Effect::Win => eprintln!("*** {} ***", effect),
            _ => eprintln!("[{}]", effect),
        }
    }
}

/// Wall clock seconds of play since the last (re)start, paused time excluded.
#[derive(Debug)]
struct Stopwatch {
    running_since: Option<Instant>,
    banked: Duration,
}

impl Stopwatch {
    fn new() -> Stopwatch {
        Stopwatch {
            running_since: None,
            banked: Duration::from_secs(0),
        }
    }

    fn restart(&mut self) {
        self.banked = Duration::from_secs(0);
        self.running_since = Some(Instant::now());
    }

    fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }

    fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn elapsed_seconds(&self) -> u32 {
        let running = self.running_since.map_or(Duration::from_secs(0), |since| since.elapsed());
        (self.banked + running).as_secs() as u32
    }
}

type Session = GameSession<XorShiftRng, TerminalNotifier>;

fn parse_args<I, S>(argv: I) -> ::std::result::Result<MazeArgs, docopt::Error>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize())
}

fn main() -> Result<()> {
    // Help requests and bad arguments print the usage text and exit.
    let args = parse_args(std::env::args()).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };
    let notifier = TerminalNotifier { quiet: args.flag_quiet };
    let mut session = GameSession::new(rng, notifier);
    let mut stopwatch = Stopwatch::new();

    let difficulty = Difficulty::from_tag(&args.flag_difficulty);
    info!(%difficulty, seed = ?args.flag_seed, "starting");
    session.new_game(difficulty);
    stopwatch.restart();
    render(&session)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        session.tick(stopwatch.elapsed_seconds());

        let mut words = line.split_whitespace();
        while let Some(word) = words.next() {
            match word {
                "q" | "quit" => return Ok(()),
                "p" => {
                    if session.toggle_pause() {
                        if session.phase() == GamePhase::Paused {
                            stopwatch.pause();
                        } else {
                            stopwatch.resume();
                        }
                    }
                }
                "r" => {
                    if session.reset() {
                        stopwatch.restart();
                    }
                }
                "n" => {
                    if session.next_level() {
                        stopwatch.restart();
                    }
                }
                "g" => {
                    let tag = words.next().unwrap_or("easy");
                    session.new_game(Difficulty::from_tag(tag));
                    stopwatch.restart();
                }
                other => press_keys(&mut session, other),
            }
        }

        if session.phase() == GamePhase::Completed {
            stopwatch.pause();
        }
        render(&session)?;
    }

    Ok(())
}

// A word is either a key name ("arrowup") or a run of single letter keys ("ddsd").
fn press_keys(session: &mut Session, word: &str) {
    if let Some(direction) = Direction::from_key(word) {
        session.press(direction);
        return;
    }
    for key in word.chars() {
        match Direction::from_key(&key.to_string()) {
            Some(direction) => session.press(direction),
            None => debug!(%key, "ignoring unknown key"),
        }
    }
}

fn render(session: &Session) -> Result<()> {
    let state = session.state();
    let display = PlayerDisplay::new(state.player, state.start, state.end);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", MazeView::new(&state.maze, Some(&display)))?;
    writeln!(out,
             "{} {}x{} | level {} | moves {} | time {}s",
             state.difficulty,
             state.width(),
             state.height(),
             state.level,
             state.moves,
             state.time)?;
    match session.phase() {
        GamePhase::Paused => writeln!(out, "Paused. p to resume.")?,
        GamePhase::Completed => {
            writeln!(out, "Level complete! Final score {}.", state.score)?;
            writeln!(out, "n for the next level, g <difficulty> for a new game.")?;
            for d in Difficulty::ALL.iter() {
                let (w, h) = d.size();
                writeln!(out, "  {:<6} {}x{}  {}", d.tag(), w, h, d.description())?;
            }
        }
        GamePhase::Playing | GamePhase::Menu => (),
    }
    out.flush()?;
    Ok(())
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn defaults() {
        let args = parse_args(&["maze_runner"]).unwrap();
        assert_eq!(args.flag_difficulty, "easy");
        assert_eq!(args.flag_seed, None);
        assert!(!args.flag_quiet);
    }

    #[test]
    fn all_options() {
        let args = parse_args(&["maze_runner", "--difficulty=hard", "--seed=7", "--quiet"]).unwrap();
        assert_eq!(Difficulty::from_tag(&args.flag_difficulty), Difficulty::Hard);
        assert_eq!(args.flag_seed, Some(7));
        assert!(args.flag_quiet);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = parse_args(&["maze_runner", "--help"]).unwrap_err();
        assert!(!err.fatal());

        let err = parse_args(&["maze_runner", "--bogus"]).unwrap_err();
        assert!(err.fatal());
    }
}
