use std::str::FromStr;

use client_core::Mode;
use shared::domain::{Algorithm, Direction, ParseAlgorithmError};
use thiserror::Error;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    SwitchMode(Mode),
    Solve(Algorithm),
    Speed(u16),
    Reset,
    Scores,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Algorithm(#[from] ParseAlgorithmError),
    #[error("invalid speed '{0}'")]
    Speed(String),
}

pub const HELP: &str = "\
commands:
  w a s d | up down left right   move (play mode)
  play | visualize               switch mode
  solve <bfs|dfs|astar>          run the solver (visualize mode)
  speed <10-500>                 animation speed
  reset                          restart the current level
  scores                         reload the leaderboard
  quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();

        if let Ok(direction) = head.parse::<Direction>() {
            return Ok(Command::Move(direction));
        }

        match head.to_ascii_lowercase().as_str() {
            "play" => Ok(Command::SwitchMode(Mode::Play)),
            "visualize" | "vis" => Ok(Command::SwitchMode(Mode::Visualize)),
            "solve" => {
                let arg = arg.ok_or(CommandError::MissingArgument("solve"))?;
                Ok(Command::Solve(arg.parse()?))
            }
            "speed" => {
                let arg = arg.ok_or(CommandError::MissingArgument("speed"))?;
                arg.parse()
                    .map(Command::Speed)
                    .map_err(|_| CommandError::Speed(arg.to_string()))
            }
            "reset" => Ok(Command::Reset),
            "scores" | "leaderboard" => Ok(Command::Scores),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
