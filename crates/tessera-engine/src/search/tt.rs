//! Transposition table: one entry per slot, indexed by fingerprint modulo capacity.
//!
//! Storing always overwrites the slot. Unrelated positions that map to the
//! same slot alias each other, so every read validates the full 64-bit
//! fingerprint before trusting an entry.
//!
//! The table has no internal locking. Exactly one search thread owns it at
//! a time; iterative deepening hands it from one depth to the next.

use tessera_core::Move;
use tracing::debug;

use crate::search::score::{from_tt, to_tt};

/// What a stored score says about the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is the exact value (an improving move was found).
    Exact,
    /// The true value is at least the stored score (beta cutoff).
    LowerBound,
    /// The true value is at most the stored score (no move raised alpha).
    UpperBound,
}

/// One memoized search result.
#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    /// Full fingerprint of the position that wrote this entry.
    pub key: u64,
    /// Score, with mate scores relative to the storing node.
    pub score: i32,
    /// Best move found, or [`Move::NULL`].
    pub best_move: Move,
    /// Remaining depth the score was searched to.
    pub depth: u8,
    /// How to interpret `score`.
    pub bound: Bound,
}

/// Fixed-capacity memo of search results keyed by position fingerprint.
pub struct TranspositionTable {
    slots: Box<[Option<TtEntry>]>,
}

impl TranspositionTable {
    /// Create a table with exactly `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    /// Create a table that uses roughly `mb` megabytes.
    pub fn with_megabytes(mb: usize) -> Self {
        let slot_size = std::mem::size_of::<Option<TtEntry>>();
        let capacity = mb.saturating_mul(1024 * 1024) / slot_size;
        let table = Self::with_capacity(capacity);
        debug!(mb, slots = table.capacity(), "transposition table allocated");
        table
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding an entry.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Empty every slot, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    /// The entry stored for exactly this fingerprint, if any.
    pub fn entry(&self, key: u64) -> Option<&TtEntry> {
        self.slots[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Look up a usable score for this node.
    ///
    /// Hits only when the fingerprint matches, the stored depth is at least
    /// `depth`, and the bound settles the `(alpha, beta)` window: exact
    /// scores always, upper bounds at or below `alpha`, lower bounds at or
    /// above `beta`.
    pub fn lookup(&self, key: u64, depth: u8, alpha: i32, beta: i32, ply: usize) -> Option<i32> {
        let entry = self.entry(key)?;
        if entry.depth < depth {
            return None;
        }
        let score = from_tt(entry.score, ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::UpperBound => score <= alpha,
            Bound::LowerBound => score >= beta,
        };
        usable.then_some(score)
    }

    /// Best move stored for this fingerprint, for move ordering.
    pub fn probe_move(&self, key: u64) -> Option<Move> {
        self.entry(key)
            .map(|entry| entry.best_move)
            .filter(|mv| !mv.is_null())
    }

    /// Record a result, overwriting whatever occupied the slot.
    pub fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound, best_move: Move, ply: usize) {
        let index = self.index(key);
        self.slots[index] = Some(TtEntry {
            key,
            score: to_tt(score, ply),
            best_move,
            depth,
            bound,
        });
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_megabytes(16)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("capacity", &self.capacity())
            .finish()
    }
}
