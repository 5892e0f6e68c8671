//! Progress lines emitted while searching.
//!
//! Format per completed iteration:
//!
//! ```text
//! info depth 5 seldepth 9 time 41 nodes 18211 score cp 32 pv e2e4 e7e5 g1f3
//! ```
//!
//! and once at the end `bestmove e2e4` (`bestmove 0000` without a legal move).

use std::fmt;
use std::time::Duration;

use tessera_core::Move;

use crate::search::driver::SearchOutcome;
use crate::search::line::SearchLine;
use crate::search::score::{is_mate_score, mate_distance_in_moves};

/// Renders a score as `cp <n>` or `mate <n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDisplay(pub i32);

impl fmt::Display for ScoreDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_mate_score(self.0) {
            write!(f, "mate {}", mate_distance_in_moves(self.0))
        } else {
            write!(f, "cp {}", self.0)
        }
    }
}

/// Summary of one completed iteration.
#[derive(Debug, Clone)]
pub struct IterationReport {
    /// Depth this iteration searched to.
    pub depth: u8,
    /// Deepest ply reached, quiescence included.
    pub seldepth: usize,
    /// Score of `best_move` for the side to move at the root.
    pub score: i32,
    /// Nodes since the search started.
    pub nodes: u64,
    /// Time since the search started.
    pub elapsed: Duration,
    /// Principal variation.
    pub line: SearchLine,
    /// First move of `line`.
    pub best_move: Move,
}

impl fmt::Display for IterationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info depth {} seldepth {} time {} nodes {} score {} pv {}",
            self.depth,
            self.seldepth,
            self.elapsed.as_millis(),
            self.nodes,
            ScoreDisplay(self.score),
            self.line
        )
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.best_move {
            Some(mv) => write!(f, "bestmove {mv}"),
            None => f.write_str("bestmove 0000"),
        }
    }
}
