//! Score constants and mate-score encoding.
//!
//! Scores are centipawns from the side to move's point of view. The band
//! `MATE - MAX_PLY ..= MATE` (and its negation) is reserved for forced
//! mates; anything outside it is an ordinary evaluation.

/// Bound no real score reaches.
pub const INFINITY: i32 = 32_000;

/// Score of delivering mate at the root itself.
pub const MATE: i32 = 31_000;

/// Deepest ply the search will ever reach (quiescence included).
pub const MAX_PLY: usize = 128;

/// Smallest absolute value that still encodes a mate.
pub const MATE_BOUND: i32 = MATE - MAX_PLY as i32;

/// Draw score.
pub const DRAW: i32 = 0;

/// Value returned by a node that observed cancellation.
///
/// The worst possible score for the side to move, and outside the mate band.
pub const CANCELLED: i32 = -INFINITY;

/// Score for the side to move being checkmated `ply` plies from the root.
pub const fn mate_in(ply: usize) -> i32 {
    -(MATE - ply as i32)
}

/// Return `true` if `score` encodes a forced mate for either side.
pub const fn is_mate_score(score: i32) -> bool {
    let abs = score.abs();
    abs >= MATE_BOUND && abs <= MATE
}

/// Full moves until mate, from the root side's point of view.
///
/// Positive when the root side mates, negative when it gets mated.
/// A mate delivered on ply `2n - 1` and one suffered on ply `2n` both
/// report `n` (with the matching sign).
pub const fn mate_distance_in_moves(score: i32) -> i32 {
    let plies = MATE - score.abs();
    if score > 0 { (plies + 1) / 2 } else { -(plies / 2) }
}

/// Make a mate score relative to the current node before storing it.
pub const fn to_tt(score: i32, ply: usize) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score + ply as i32
    } else {
        score - ply as i32
    }
}

/// Re-base a stored mate score onto the path that probed it.
pub const fn from_tt(score: i32, ply: usize) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score - ply as i32
    } else {
        score + ply as i32
    }
}
