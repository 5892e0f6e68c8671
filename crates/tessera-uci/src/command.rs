//! UCI command parsing.

use std::time::Duration;

use tessera_core::{MoveError, Position};

use crate::error::UciError;

/// Parameters for the `go` command.
///
/// All fields are optional; a bare `go` searches until `stop` or the
/// maximum depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// White's remaining time.
    pub wtime: Option<Duration>,
    /// Black's remaining time.
    pub btime: Option<Duration>,
    /// White's increment per move.
    pub winc: Option<Duration>,
    /// Black's increment per move.
    pub binc: Option<Duration>,
    /// Search to this depth only.
    pub depth: Option<u8>,
    /// Search for exactly this duration.
    pub movetime: Option<Duration>,
    /// Search until `stop` (no time limit).
    pub infinite: bool,
}

/// Options settable through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    /// Transposition table size in megabytes.
    Hash(usize),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a position with optional moves applied.
    Position(Position),
    /// `go` -- start searching with given parameters.
    Go(GoParams),
    /// `setoption name <id> value <x>`.
    SetOption(UciOption),
    /// `staticeval` -- print the evaluation of the current position (debugging aid).
    StaticEval,
    /// `stop` -- halt the current search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (ignored, as the UCI protocol requires).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "staticeval" => Ok(Command::StaticEval),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(args),
        "go" => parse_go(args),
        "setoption" => parse_setoption(args),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let moves_at = tokens
        .iter()
        .position(|&t| t == "moves")
        .unwrap_or(tokens.len());
    let (setup, rest) = tokens.split_at(moves_at);

    let mut position = match setup.split_first() {
        Some((&"startpos", _)) => Position::startpos(),
        Some((&"fen", fields)) => {
            let fen = fields.join(" ");
            Position::from_fen(&fen).map_err(|_| UciError::InvalidFen { fen })?
        }
        _ => return Err(UciError::MalformedPosition),
    };

    if let Some((_, moves)) = rest.split_first() {
        position
            .play_uci_moves(moves.iter().copied())
            .map_err(|MoveError::Illegal { uci_move }| UciError::InvalidMove { uci_move })?;
    }

    Ok(Command::Position(position))
}

/// Parse the `go` command arguments.
///
/// Supports: wtime, btime, winc, binc, depth (a number or `infinite`),
/// movetime, infinite. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "wtime" => {
                params.wtime = Some(parse_millis(tokens.get(i + 1), "wtime")?);
                i += 2;
            }
            "btime" => {
                params.btime = Some(parse_millis(tokens.get(i + 1), "btime")?);
                i += 2;
            }
            "winc" => {
                params.winc = Some(parse_millis(tokens.get(i + 1), "winc")?);
                i += 2;
            }
            "binc" => {
                params.binc = Some(parse_millis(tokens.get(i + 1), "binc")?);
                i += 2;
            }
            "depth" if tokens.get(i + 1) == Some(&"infinite") => {
                params.infinite = true;
                i += 2;
            }
            "depth" => {
                params.depth = Some(parse_int(tokens.get(i + 1), "depth")?);
                i += 2;
            }
            "movetime" => {
                params.movetime = Some(parse_millis(tokens.get(i + 1), "movetime")?);
                i += 2;
            }
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            _ => {
                // Unknown token -- skip per UCI convention
                i += 1;
            }
        }
    }

    Ok(Command::Go(params))
}

/// Parse `setoption name <id> value <x>`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let value_at = tokens.iter().position(|&t| t == "value");
    let name_end = value_at.unwrap_or(tokens.len());
    let name = match tokens.split_first() {
        Some((&"name", _)) => tokens[1..name_end].join(" "),
        _ => return Err(UciError::MalformedOption),
    };

    match name.to_ascii_lowercase().as_str() {
        "hash" => {
            let value = value_at.and_then(|at| tokens.get(at + 1));
            Ok(Command::SetOption(UciOption::Hash(parse_int(value, "Hash")?)))
        }
        _ => Err(UciError::UnknownOption { name }),
    }
}

/// Parse a millisecond value from a token.
fn parse_millis(token: Option<&&str>, param: &str) -> Result<Duration, UciError> {
    parse_int(token, param).map(Duration::from_millis)
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
