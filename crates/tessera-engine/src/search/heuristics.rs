//! Killer moves: quiet moves that recently caused a beta cutoff at a ply.

use tessera_core::Move;

/// Plies that keep killer slots; deeper plies get no killer bonus.
pub const MAX_KILLER_PLY: usize = 20;

/// Two killer slots per ply. Slot 0 holds the most recent cutoff.
#[derive(Clone)]
pub struct KillerMoves {
    slots: [[Move; 2]; MAX_KILLER_PLY],
}

impl KillerMoves {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            slots: [[Move::NULL; 2]; MAX_KILLER_PLY],
        }
    }

    /// Record a cutoff move at `ply`.
    ///
    /// The previous slot-0 move shifts into slot 1, unless it already is `mv`.
    pub fn store(&mut self, ply: usize, mv: Move) {
        let Some(slots) = self.slots.get_mut(ply) else {
            return;
        };
        if slots[0] != mv {
            slots[1] = slots[0];
            slots[0] = mv;
        }
    }

    /// Which slot holds `mv` at `ply`: `Some(0)`, `Some(1)`, or `None`.
    pub fn slot_of(&self, ply: usize, mv: Move) -> Option<usize> {
        if mv.is_null() {
            return None;
        }
        self.slots.get(ply)?.iter().position(|&killer| killer == mv)
    }

    /// Forget every killer.
    pub fn clear(&mut self) {
        self.slots = [[Move::NULL; 2]; MAX_KILLER_PLY];
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self::new()
    }
}
