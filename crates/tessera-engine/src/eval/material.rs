//! Material values and balance.

use tessera_core::{Board, Color, Piece};

use crate::eval::tapered::{S, Tapered};

/// Phase-dependent piece values, indexed by piece.
pub const PIECE_VALUES: [Tapered; 6] = [
    S(100, 120), // Pawn
    S(300, 290), // Knight
    S(300, 310), // Bishop
    S(500, 540), // Rook
    S(900, 960), // Queen
    S(0, 0),     // King
];

/// Bonus for owning at least two bishops.
pub const BISHOP_PAIR: Tapered = S(30, 50);

/// Plain piece values for material-only evaluation.
pub const fn centipawns(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 300,
        Piece::Bishop => 300,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 0,
    }
}

/// Material balance from White's side, phase-dependent values plus bishop pair.
pub fn material(board: &Board) -> Tapered {
    let mut score = Tapered::ZERO;
    for piece in Piece::ALL {
        let white = board.colored_pieces(Color::White, piece).len() as i32;
        let black = board.colored_pieces(Color::Black, piece).len() as i32;
        score += PIECE_VALUES[piece as usize] * (white - black);
    }
    if board.colored_pieces(Color::White, Piece::Bishop).len() >= 2 {
        score += BISHOP_PAIR;
    }
    if board.colored_pieces(Color::Black, Piece::Bishop).len() >= 2 {
        score -= BISHOP_PAIR;
    }
    score
}

/// Material balance from White's side using [`centipawns`].
pub fn plain_material(board: &Board) -> i32 {
    Piece::ALL
        .into_iter()
        .map(|piece| {
            let white = board.colored_pieces(Color::White, piece).len() as i32;
            let black = board.colored_pieces(Color::Black, piece).len() as i32;
            centipawns(piece) * (white - black)
        })
        .sum()
}
