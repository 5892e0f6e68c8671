//! Principal-variation buffers.

use std::fmt;

use tessera_core::Move;

use crate::search::score::MAX_PLY;

/// Longest principal variation kept per node.
pub const LINE_CAPACITY: usize = 10;

/// Fixed-capacity principal variation. Unused slots hold [`Move::NULL`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SearchLine {
    moves: [Move; LINE_CAPACITY],
    len: usize,
}

impl SearchLine {
    /// An empty line.
    pub const fn new() -> Self {
        Self {
            moves: [Move::NULL; LINE_CAPACITY],
            len: 0,
        }
    }

    /// Drop every move.
    pub fn clear(&mut self) {
        self.moves[..self.len].fill(Move::NULL);
        self.len = 0;
    }

    /// Replace the contents with `first` followed by `rest`, truncated to capacity.
    pub fn set(&mut self, first: Move, rest: &SearchLine) {
        let tail = rest.len.min(LINE_CAPACITY - 1);
        self.moves[0] = first;
        self.moves[1..=tail].copy_from_slice(&rest.moves[..tail]);
        self.moves[tail + 1..].fill(Move::NULL);
        self.len = tail + 1;
    }

    /// The stored moves.
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// First move of the line, if any.
    pub fn first(&self) -> Option<Move> {
        self.as_slice().first().copied()
    }

    /// Number of stored moves.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the line holds no moves.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SearchLine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SearchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for SearchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchLine[{self}]")
    }
}

/// One [`SearchLine`] per ply, preallocated for the whole search.
///
/// The line at ply `p` holds the best continuation found so far below the
/// node at `p`. A node clears its own line on entry and rebuilds it from
/// its child's line whenever a move raises alpha.
pub(crate) struct PvTable {
    lines: Box<[SearchLine]>,
}

impl PvTable {
    pub(crate) fn new() -> Self {
        Self {
            lines: vec![SearchLine::new(); MAX_PLY + 2].into_boxed_slice(),
        }
    }

    pub(crate) fn clear(&mut self, ply: usize) {
        if let Some(line) = self.lines.get_mut(ply) {
            line.clear();
        }
    }

    /// Set the line at `ply` to `mv` followed by the line at `ply + 1`.
    pub(crate) fn promote(&mut self, ply: usize, mv: Move) {
        if ply + 1 >= self.lines.len() {
            return;
        }
        let (head, tail) = self.lines.split_at_mut(ply + 1);
        head[ply].set(mv, &tail[0]);
    }

    pub(crate) fn line(&self, ply: usize) -> &SearchLine {
        &self.lines[ply]
    }
}
