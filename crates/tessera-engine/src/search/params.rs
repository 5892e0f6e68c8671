//! Tunable search heuristics.

/// Switches and thresholds for the selective parts of the search.
///
/// None of these change which positions count as won, lost, or drawn;
/// they trade completeness for speed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Skip quiet moves once more than this many non-quiet moves
    /// (captures, promotions, checks) were searched at a node.
    /// `None` disables late-move pruning.
    pub late_move_limit: Option<u8>,
    /// Remaining depth at or below which later quiet moves are skipped
    /// once one quiet move was tried. 0 disables futility pruning.
    pub futility_depth: u8,
    /// Minimum remaining depth for null-window probes of non-first moves.
    pub pvs_min_depth: u8,
    /// Extra depth taken off a null-window probe.
    pub pvs_reduction: u8,
}

impl SearchParams {
    /// No pruning and no probe reduction: alpha-beta returns the exact
    /// minimax value for the depth searched.
    pub fn exhaustive() -> Self {
        Self {
            late_move_limit: None,
            futility_depth: 0,
            pvs_min_depth: 3,
            pvs_reduction: 0,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            late_move_limit: Some(5),
            futility_depth: 1,
            pvs_min_depth: 3,
            pvs_reduction: 1,
        }
    }
}
