//! Game phase from remaining non-pawn material.

use tessera_core::{Board, Piece};

/// Phase of the starting position: N=1, B=1, R=2, Q=4, summed over both sides.
pub const MAX_PHASE: i32 = 24;

/// Current phase, `0..=MAX_PHASE`. Higher means more middlegame.
pub fn game_phase(board: &Board) -> i32 {
    let minors = (board.pieces(Piece::Knight) | board.pieces(Piece::Bishop)).len() as i32;
    let rooks = board.pieces(Piece::Rook).len() as i32;
    let queens = board.pieces(Piece::Queen).len() as i32;
    (minors + rooks * 2 + queens * 4).min(MAX_PHASE)
}
