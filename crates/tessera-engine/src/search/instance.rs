//! One fixed-depth search run.

use std::time::{Duration, Instant};

use tessera_core::{Move, RulesEngine};

use crate::eval::Evaluator;
use crate::search::line::SearchLine;
use crate::search::negamax::AlphaBetaEngine;
use crate::search::score::CANCELLED;

/// Lifecycle of a [`SearchInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// Created, or still searching.
    Running,
    /// Every root move was searched to the full depth.
    Completed,
    /// Cancellation was observed; the outputs must not be used.
    Cancelled,
}

/// Results of searching the root to one depth.
///
/// Starts out [`Running`](InstanceState::Running); [`run`](Self::run) moves it
/// to `Completed` or `Cancelled`, after which it only answers queries.
#[derive(Debug, Clone)]
pub struct SearchInstance {
    depth: u8,
    state: InstanceState,
    best_move: Option<Move>,
    score: i32,
    line: SearchLine,
    nodes: u64,
    seldepth: usize,
    elapsed: Duration,
}

impl SearchInstance {
    /// A not yet searched instance for `depth`.
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            state: InstanceState::Running,
            best_move: None,
            score: CANCELLED,
            line: SearchLine::new(),
            nodes: 0,
            seldepth: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Search the engine's position to this instance's depth.
    ///
    /// Has no effect once the instance has finished.
    pub fn run<R, E>(&mut self, engine: &mut AlphaBetaEngine<'_, R, E>, seed: Option<Move>)
    where
        R: RulesEngine,
        E: Evaluator<R>,
    {
        if self.state != InstanceState::Running {
            return;
        }

        let start = Instant::now();
        let nodes_before = engine.nodes();
        let result = engine.search_root(self.depth, seed);

        self.elapsed = start.elapsed();
        self.nodes = engine.nodes() - nodes_before;
        self.seldepth = engine.seldepth();

        if result.score == CANCELLED {
            self.state = InstanceState::Cancelled;
            return;
        }

        self.state = InstanceState::Completed;
        self.best_move = result.best_move;
        self.score = result.score;
        self.line = *engine.line();
    }

    /// Depth this instance searches to.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Return `true` if the run finished without being cancelled.
    pub fn is_completed(&self) -> bool {
        self.state == InstanceState::Completed
    }

    /// Best root move. `None` until completed, and when the root has no legal move.
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// Score of the best move for the root side, or [`CANCELLED`].
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Principal variation.
    pub fn line(&self) -> &SearchLine {
        &self.line
    }

    /// Nodes visited by this run.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Deepest ply reached by this run.
    pub fn seldepth(&self) -> usize {
        self.seldepth
    }

    /// Wall-clock time of this run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use tessera_core::Position;

    use super::*;
    use crate::eval::ClassicalEvaluator;
    use crate::search::control::SearchControl;
    use crate::search::ordering::MoveOrderer;
    use crate::search::params::SearchParams;
    use crate::search::tt::TranspositionTable;

    #[test]
    fn completes_without_cancellation() {
        let mut pos = Position::startpos();
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let mut engine =
            AlphaBetaEngine::new(&mut pos, &ClassicalEvaluator, &mut tt, &mut orderer, &params, None);

        let mut instance = SearchInstance::new(2);
        assert_eq!(instance.state(), InstanceState::Running);
        instance.run(&mut engine, None);

        assert!(instance.is_completed());
        assert!(instance.best_move().is_some());
        assert_eq!(instance.line().first(), instance.best_move());
        assert!(instance.nodes() > 20);
        assert_ne!(instance.score(), CANCELLED);
    }

    #[test]
    fn pre_cancelled_run_reports_cancelled() {
        let mut pos = Position::startpos();
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(true)));
        let mut engine = AlphaBetaEngine::new(
            &mut pos,
            &ClassicalEvaluator,
            &mut tt,
            &mut orderer,
            &params,
            Some(&control),
        );

        let mut instance = SearchInstance::new(3);
        instance.run(&mut engine, None);

        assert_eq!(instance.state(), InstanceState::Cancelled);
        assert_eq!(instance.best_move(), None);
        assert_eq!(instance.score(), CANCELLED);
        assert!(instance.line().is_empty());
    }

    #[test]
    fn finished_instance_does_not_rerun() {
        let mut pos = Position::startpos();
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let mut engine =
            AlphaBetaEngine::new(&mut pos, &ClassicalEvaluator, &mut tt, &mut orderer, &params, None);

        let mut instance = SearchInstance::new(1);
        instance.run(&mut engine, None);
        let nodes = instance.nodes();
        instance.run(&mut engine, None);
        assert_eq!(instance.nodes(), nodes);
        assert_eq!(engine.nodes(), nodes);
    }
}
