//! Move ordering: victim/attacker captures, promotions, castling, killers.
//!
//! Ordering only changes how fast the search runs, never its result.

use tessera_core::{Move, MoveList, Piece, MAX_MOVES};

use crate::search::heuristics::KillerMoves;

/// Base bonus for any capture, before victim minus attacker value.
pub const CAPTURE_BONUS: i32 = 937;

/// Base bonus for any promotion, before the promoted piece's value.
pub const PROMOTION_BONUS: i32 = 347;

/// Flat bonus for castling.
pub const CASTLE_BONUS: i32 = 66;

/// Bonus for matching the ply's newest killer.
pub const FIRST_KILLER_BONUS: i32 = 800;

/// Bonus for matching the ply's older killer.
pub const SECOND_KILLER_BONUS: i32 = 700;

/// Score of the first priority move; later priority moves rank just below it.
const PRIORITY_BONUS: i32 = 1_000_000;

/// Piece values used for ordering only.
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 300,
        Piece::Bishop => 300,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 10_000,
    }
}

/// Orders move lists and owns the per-run ordering state (killer moves).
///
/// One orderer lives for one driver run, so nothing leaks between searches.
#[derive(Clone, Default)]
pub struct MoveOrderer {
    killers: KillerMoves,
}

impl MoveOrderer {
    /// A fresh orderer with no killers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority of `mv` at `ply`, computed without touching the position.
    pub fn score(&self, mv: Move, ply: usize) -> i32 {
        let mut score = 0;
        if let Some(victim) = mv.captured() {
            score += CAPTURE_BONUS + piece_value(victim) - piece_value(mv.piece());
        }
        if let Some(promoted) = mv.promotion() {
            score += PROMOTION_BONUS + piece_value(promoted);
        }
        if mv.is_castle() {
            score += CASTLE_BONUS;
        }
        if mv.is_quiet() {
            score += match self.killers.slot_of(ply, mv) {
                Some(0) => FIRST_KILLER_BONUS,
                Some(_) => SECOND_KILLER_BONUS,
                None => 0,
            };
        }
        score
    }

    /// Sort `moves` best-first.
    ///
    /// Moves listed in `priority` (seeded root move, transposition-table
    /// move) go ahead of everything else, in the order given. Ties keep
    /// generation order, so identical inputs always give identical output.
    pub fn order(&self, moves: &mut MoveList, ply: usize, priority: &[Move]) {
        let len = moves.len();
        let mut keyed = [(0i32, 0u8); MAX_MOVES];
        for (i, &mv) in moves.iter().enumerate() {
            let score = match priority.iter().position(|&p| p == mv) {
                Some(rank) => PRIORITY_BONUS - rank as i32,
                None => self.score(mv, ply),
            };
            keyed[i] = (score, i as u8);
        }
        let keyed = &mut keyed[..len];
        keyed.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let original = moves.clone();
        for (slot, &(_, index)) in moves.as_mut_slice().iter_mut().zip(keyed.iter()) {
            *slot = original[index as usize];
        }
    }

    /// Remember a quiet move that caused a beta cutoff at `ply`.
    pub fn record_cutoff(&mut self, ply: usize, mv: Move) {
        if mv.is_quiet() {
            self.killers.store(ply, mv);
        }
    }

    /// The killer table.
    pub fn killers(&self) -> &KillerMoves {
        &self.killers
    }

    /// Forget all learned ordering state.
    pub fn reset(&mut self) {
        self.killers.clear();
    }
}
