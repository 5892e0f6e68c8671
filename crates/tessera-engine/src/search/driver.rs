//! Iterative deepening over the alpha-beta engine.
//!
//! [`Searcher`] owns the state that outlives a single search: the
//! transposition table, the heuristic parameters, and the evaluator. A run
//! searches depth 1, 2, 3, ... with a fresh [`SearchInstance`] per depth,
//! all sharing that table, and keeps the deepest iteration that completed.
//!
//! [`Searcher::start`] moves the searcher onto its own thread so the caller
//! stays free to stop it; the searcher comes back, table intact, through
//! [`SearchHandle::stop`] or [`SearchHandle::join`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tessera_core::{Move, RulesEngine};
use tracing::debug;

use crate::error::SearchError;
use crate::eval::{ClassicalEvaluator, Evaluator};
use crate::search::control::SearchControl;
use crate::search::instance::{InstanceState, SearchInstance};
use crate::search::line::SearchLine;
use crate::search::negamax::AlphaBetaEngine;
use crate::search::ordering::MoveOrderer;
use crate::search::params::SearchParams;
use crate::search::report::IterationReport;
use crate::search::score::CANCELLED;
use crate::search::tt::TranspositionTable;

/// Deepest iteration a run will start.
pub const MAX_DEPTH: u8 = 40;

/// Default transposition table size in megabytes.
pub const DEFAULT_HASH_MB: usize = 16;

/// When a run should end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Last depth to search, clamped to `1..=MAX_DEPTH`.
    pub max_depth: u8,
    /// Cancel the run once this much time has passed.
    pub deadline: Option<Duration>,
}

impl SearchLimits {
    /// Search exactly to `max_depth`, with no deadline.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            deadline: None,
        }
    }

    /// Same limits with a deadline.
    pub fn with_deadline(self, deadline: Option<Duration>) -> Self {
        Self { deadline, ..self }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(MAX_DEPTH)
    }
}

/// Result of a whole run: the deepest completed iteration.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Move to play. `None` only when the root has no legal move.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the root side.
    pub score: i32,
    /// Depth of the iteration that produced the result.
    pub depth: u8,
    /// Principal variation of that iteration, starting with `best_move`.
    pub line: SearchLine,
    /// Nodes over every iteration, cancelled ones included.
    pub nodes: u64,
    /// Time since the search started.
    pub elapsed: Duration,
}

/// Observer of a running search.
pub trait SearchListener {
    /// Called after every completed iteration.
    fn on_iteration(&mut self, report: &IterationReport);

    /// Called once with the final result.
    fn on_complete(&mut self, _outcome: &SearchOutcome) {}
}

impl<F> SearchListener for F
where
    F: FnMut(&IterationReport),
{
    fn on_iteration(&mut self, report: &IterationReport) {
        self(report)
    }
}

/// Iterative-deepening searcher with a transposition table.
pub struct Searcher<E = ClassicalEvaluator> {
    tt: TranspositionTable,
    params: SearchParams,
    evaluator: E,
}

impl Searcher {
    /// Classical evaluation, default parameters, 16 MB table.
    pub fn new() -> Self {
        Self::with_evaluator(ClassicalEvaluator)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Searcher<E> {
    /// Default parameters and table size around `evaluator`.
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            tt: TranspositionTable::with_megabytes(DEFAULT_HASH_MB),
            params: SearchParams::default(),
            evaluator,
        }
    }

    /// Replace the heuristic parameters.
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the transposition table.
    pub fn with_table(mut self, tt: TranspositionTable) -> Self {
        self.tt = tt;
        self
    }

    /// The shared transposition table.
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Reallocate the transposition table at `mb` megabytes.
    pub fn resize_tt(&mut self, mb: usize) {
        self.tt = TranspositionTable::with_megabytes(mb);
    }

    /// Forget every stored result.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Run iterative deepening on the calling thread.
    ///
    /// Depth 1 always runs to completion, so a legal move is returned
    /// whenever one exists. Later depths observe `control`; a cancelled
    /// iteration is discarded and the previous one stands.
    pub fn search<R, L>(
        &mut self,
        pos: &mut R,
        limits: SearchLimits,
        control: &SearchControl,
        listener: &mut L,
    ) -> SearchOutcome
    where
        R: RulesEngine,
        E: Evaluator<R>,
        L: SearchListener + ?Sized,
    {
        let max_depth = limits.max_depth.clamp(1, MAX_DEPTH);
        debug!(max_depth, deadline = ?control.deadline(), "search started");
        let mut orderer = MoveOrderer::new();
        let mut outcome = SearchOutcome::default();

        for depth in 1..=max_depth {
            if depth > 1 && control.should_stop_iterating() {
                break;
            }

            let cancel = (depth > 1).then_some(control);
            let mut engine = AlphaBetaEngine::new(
                pos,
                &self.evaluator,
                &mut self.tt,
                &mut orderer,
                &self.params,
                cancel,
            );
            let mut instance = SearchInstance::new(depth);
            instance.run(&mut engine, outcome.best_move);

            outcome.nodes += instance.nodes();
            outcome.elapsed = control.elapsed();

            if instance.state() != InstanceState::Completed || instance.score() == CANCELLED {
                debug!(depth, nodes = instance.nodes(), "iteration cancelled");
                break;
            }

            let Some(best_move) = instance.best_move() else {
                outcome.score = instance.score();
                outcome.depth = depth;
                debug!(score = outcome.score, "no legal move at the root");
                break;
            };

            outcome.best_move = Some(best_move);
            outcome.score = instance.score();
            outcome.depth = depth;
            outcome.line = *instance.line();

            debug!(
                depth,
                score = outcome.score,
                nodes = instance.nodes(),
                elapsed_ms = instance.elapsed().as_millis() as u64,
                best = %best_move,
                "iteration complete"
            );

            listener.on_iteration(&IterationReport {
                depth,
                seldepth: instance.seldepth(),
                score: outcome.score,
                nodes: outcome.nodes,
                elapsed: outcome.elapsed,
                line: outcome.line,
                best_move,
            });
        }

        listener.on_complete(&outcome);
        outcome
    }

    /// Run iterative deepening on a background thread.
    ///
    /// The searcher and the position move onto the thread and come back in
    /// [`SearchDone`].
    pub fn start<R, L>(
        self,
        mut pos: R,
        limits: SearchLimits,
        mut listener: L,
    ) -> Result<SearchHandle<R, E>, SearchError>
    where
        R: RulesEngine + Send + 'static,
        E: Evaluator<R> + Send + 'static,
        L: SearchListener + Send + 'static,
    {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new(Arc::clone(&stopped), limits.deadline);
        let mut searcher = self;

        let thread = thread::Builder::new()
            .name("search".to_string())
            .spawn(move || {
                let outcome = searcher.search(&mut pos, limits, &control, &mut listener);
                SearchDone {
                    outcome,
                    searcher,
                    position: pos,
                }
            })?;

        Ok(SearchHandle { stopped, thread })
    }
}

impl<E> std::fmt::Debug for Searcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("tt", &self.tt)
            .field("params", &self.params)
            .finish()
    }
}

/// Everything a finished background search hands back.
pub struct SearchDone<R, E = ClassicalEvaluator> {
    /// Result of the run.
    pub outcome: SearchOutcome,
    /// The searcher, with its transposition table still warm.
    pub searcher: Searcher<E>,
    /// The searched position, restored to its state before the search.
    pub position: R,
}

/// A search running on its own thread.
pub struct SearchHandle<R, E = ClassicalEvaluator> {
    stopped: Arc<AtomicBool>,
    thread: JoinHandle<SearchDone<R, E>>,
}

impl<R, E> SearchHandle<R, E> {
    /// Ask the search to stop without waiting for it.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Ask the search to stop and wait for its result.
    pub fn stop(self) -> SearchDone<R, E> {
        self.request_stop();
        self.join()
    }

    /// Wait for the search to end on its own.
    pub fn join(self) -> SearchDone<R, E> {
        match self.thread.join() {
            Ok(done) => done,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
