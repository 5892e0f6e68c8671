//! Time management: convert clock parameters to a search deadline.

use std::time::Duration;

use tessera_core::Color;

/// Share of the remaining clock spent on one move.
pub const CLOCK_FRACTION: u32 = 20;

/// No single move ever thinks longer than this.
pub const HARD_CEILING: Duration = Duration::from_secs(15);

/// Thinking time for one move.
///
/// A fixed `movetime` wins; otherwise `remaining / 20`. Either is capped at
/// [`HARD_CEILING`]. With neither there is no deadline and the search runs
/// until stopped or out of depth.
pub fn budget(remaining: Option<Duration>, movetime: Option<Duration>) -> Option<Duration> {
    let budget = match (movetime, remaining) {
        (Some(movetime), _) => movetime,
        (None, Some(remaining)) => remaining / CLOCK_FRACTION,
        (None, None) => return None,
    };
    Some(budget.min(HARD_CEILING))
}

/// Deadline for `side` given both clocks from a `go` command.
pub fn deadline_for(
    side: Color,
    wtime: Option<Duration>,
    btime: Option<Duration>,
    movetime: Option<Duration>,
) -> Option<Duration> {
    let remaining = match side {
        Color::White => wtime,
        Color::Black => btime,
    };
    budget(remaining, movetime)
}
