//! The rules-engine contract consumed by search.

use cozy_chess::Color;

use crate::chess_move::Move;
use crate::move_list::MoveList;

/// Position mutation, move generation, and terminal-condition queries.
///
/// [`make_move`](RulesEngine::make_move) and
/// [`undo_move`](RulesEngine::undo_move) must be called in strict LIFO
/// pairs. Implementations treat an unbalanced pair as a fatal bug.
pub trait RulesEngine {
    /// Apply a legal move.
    fn make_move(&mut self, mv: Move);

    /// Revert the most recent [`make_move`](RulesEngine::make_move), which must have been `mv`.
    fn undo_move(&mut self, mv: Move);

    /// Generate all legal moves, or only captures and promotions.
    fn generate_legal_moves(&self, captures_only: bool) -> MoveList;

    /// Return `true` if the side to move is in check.
    fn is_in_check(&self) -> bool;

    /// Return `true` if the current position occurred before with the same side to move.
    fn is_repeated_position(&self) -> bool;

    /// Return `true` once 100 plies passed without a capture or pawn move.
    fn is_fifty_move_draw(&self) -> bool;

    /// Return `true` if neither side can deliver mate.
    fn is_insufficient_material(&self) -> bool;

    /// Return `true` if the position is drawn by rule.
    fn is_draw(&self) -> bool {
        self.is_repeated_position() || self.is_fifty_move_draw() || self.is_insufficient_material()
    }

    /// 64-bit key, equal for logically identical positions.
    fn fingerprint(&self) -> u64;

    /// The side to move.
    fn side_to_move(&self) -> Color;
}
