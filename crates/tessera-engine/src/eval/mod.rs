//! Static evaluation.
//!
//! Evaluators score from White's point of view; the search flips the sign
//! for Black.

pub mod material;
pub mod phase;
pub mod pst;
pub mod tapered;

use tessera_core::{Board, Color, Piece, Position};

use material::{material, plain_material};
use phase::{MAX_PHASE, game_phase};
use pst::square_bonus;
use tapered::Tapered;

/// Scores a position numerically from White's point of view.
pub trait Evaluator<P> {
    /// Centipawn score; positive favours White.
    fn evaluate(&self, pos: &P) -> i32;
}

/// Material plus tapered piece-square tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalEvaluator;

impl Evaluator<Position> for ClassicalEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        evaluate_board(pos.board())
    }
}

/// Material only, with fixed piece values. Deterministic and cheap; used by tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator<Position> for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        plain_material(pos.board())
    }
}

/// Classical evaluation of a bare board, White's point of view.
pub fn evaluate_board(board: &Board) -> i32 {
    let mut score = material(board);
    for color in [Color::White, Color::Black] {
        let mut placement = Tapered::ZERO;
        for piece in Piece::ALL {
            for sq in board.colored_pieces(color, piece) {
                placement += square_bonus(piece, color, sq);
            }
        }
        match color {
            Color::White => score += placement,
            Color::Black => score -= placement,
        }
    }
    score.blend(game_phase(board), MAX_PHASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn starting_position_is_zero() {
        assert_eq!(ClassicalEvaluator.evaluate(&Position::startpos()), 0);
        assert_eq!(MaterialEvaluator.evaluate(&Position::startpos()), 0);
    }

    #[test]
    fn mirrored_positions_negate() {
        let white = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let black = pos("rnbqkb1r/pppp1ppp/5n2/4p3/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 2 3");
        assert_eq!(
            ClassicalEvaluator.evaluate(&white),
            -ClassicalEvaluator.evaluate(&black)
        );
    }

    #[test]
    fn white_up_a_queen_is_positive() {
        let p = pos("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(ClassicalEvaluator.evaluate(&p) > 800);
        assert_eq!(MaterialEvaluator.evaluate(&p), 900);
    }

    #[test]
    fn perspective_does_not_depend_on_side_to_move() {
        let w = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let b = pos("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert_eq!(ClassicalEvaluator.evaluate(&w), ClassicalEvaluator.evaluate(&b));
        assert!(ClassicalEvaluator.evaluate(&w) > 0);
    }
}
