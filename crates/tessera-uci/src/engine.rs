//! Event-driven UCI engine with a background search thread.

use std::io::{self, BufRead};
use std::sync::mpsc;

use tracing::{debug, info, warn};

use tessera_core::{Position, RulesEngine};
use tessera_engine::{
    ClassicalEvaluator, DEFAULT_HASH_MB, Evaluator, IterationReport, MAX_DEPTH, SearchDone,
    SearchError, SearchHandle, SearchLimits, SearchListener, SearchOutcome, Searcher,
    TranspositionTable, deadline_for,
};

use crate::command::{Command, GoParams, UciOption, parse_command};
use crate::error::UciError;

/// Largest accepted `Hash` value in megabytes.
const MAX_HASH_MB: usize = 65_536;

/// Events processed by the main engine loop.
enum EngineEvent {
    UciCommand(Result<Command, UciError>),
    SearchFinished,
    InputClosed,
}

/// Prints progress lines and wakes the main loop when the search ends.
struct UciListener {
    tx: mpsc::Sender<EngineEvent>,
}

impl SearchListener for UciListener {
    fn on_iteration(&mut self, report: &IterationReport) {
        println!("{report}");
    }

    fn on_complete(&mut self, _outcome: &SearchOutcome) {
        let _ = self.tx.send(EngineEvent::SearchFinished);
    }
}

/// The UCI engine, holding the current position and the searcher.
///
/// Runs an event-driven loop on the main thread. While a search runs the
/// searcher lives on the search thread and comes back when it finishes;
/// table changes requested in the meantime are applied then.
pub struct UciEngine {
    position: Position,
    searcher: Option<Searcher>,
    search: Option<SearchHandle<Position>>,
    hash_mb: usize,
    pending_clear_tt: bool,
    /// Pending TT resize (MB) to apply when the search thread returns the searcher.
    pending_resize_tt: Option<usize>,
}

impl UciEngine {
    /// Create a new engine with the starting position.
    pub fn new() -> Self {
        Self {
            position: Position::startpos(),
            searcher: Some(Searcher::new()),
            search: None,
            hash_mb: DEFAULT_HASH_MB,
            pending_clear_tt: false,
            pending_resize_tt: None,
        }
    }

    /// Run the UCI event loop, reading from stdin until `quit` or input closes.
    pub fn run(mut self) -> Result<(), UciError> {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let stdin_tx = tx.clone();
        std::thread::Builder::new()
            .name("stdin".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    debug!(cmd = %trimmed, "received UCI command");
                    if stdin_tx
                        .send(EngineEvent::UciCommand(parse_command(trimmed)))
                        .is_err()
                    {
                        return;
                    }
                }
                let _ = stdin_tx.send(EngineEvent::InputClosed);
            })?;

        for event in &rx {
            match event {
                EngineEvent::UciCommand(Ok(cmd)) => match cmd {
                    Command::Uci => self.handle_uci(),
                    Command::IsReady => println!("readyok"),
                    Command::UciNewGame => self.handle_ucinewgame(),
                    Command::Position(position) => self.position = position,
                    Command::Go(params) => self.handle_go(params, &tx),
                    Command::SetOption(option) => self.handle_setoption(option),
                    Command::StaticEval => self.handle_staticeval(),
                    Command::Stop => self.handle_stop(),
                    Command::Quit => break,
                    Command::Unknown(_) => {}
                },
                EngineEvent::UciCommand(Err(e)) => {
                    warn!(error = %e, "UCI parse error");
                }
                EngineEvent::SearchFinished => {
                    if let Some(handle) = self.search.take() {
                        self.finish_search(handle.join());
                    }
                }
                EngineEvent::InputClosed => break,
            }
        }

        if let Some(handle) = self.search.take() {
            self.finish_search(handle.stop());
        }

        info!("tessera shutting down");
        Ok(())
    }

    fn handle_uci(&self) {
        println!("id name tessera {}", env!("CARGO_PKG_VERSION"));
        println!("id author the tessera developers");
        println!("option name Hash type spin default {DEFAULT_HASH_MB} min 1 max {MAX_HASH_MB}");
        println!("uciok");
    }

    fn handle_ucinewgame(&mut self) {
        self.position = Position::startpos();
        match self.searcher.as_mut() {
            Some(searcher) => searcher.clear_tt(),
            // Search thread owns the searcher; clear when it comes back
            None => self.pending_clear_tt = true,
        }
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Hash(mb) => {
                let mb = mb.clamp(1, MAX_HASH_MB);
                self.hash_mb = mb;
                match self.searcher.as_mut() {
                    Some(searcher) => searcher.resize_tt(mb),
                    None => self.pending_resize_tt = Some(mb),
                }
            }
        }
    }

    fn handle_staticeval(&self) {
        println!("{}", ClassicalEvaluator.evaluate(&self.position));
    }

    fn handle_go(&mut self, params: GoParams, tx: &mpsc::Sender<EngineEvent>) {
        if self.search.is_some() {
            warn!("go received while searching, ignoring");
            return;
        }

        let deadline = if params.infinite {
            None
        } else {
            deadline_for(
                self.position.side_to_move(),
                params.wtime,
                params.btime,
                params.movetime,
            )
        };
        let limits = SearchLimits {
            max_depth: params.depth.unwrap_or(MAX_DEPTH),
            deadline,
        };
        debug!(?limits, "starting search");

        let hash_mb = self.hash_mb;
        let searcher = self
            .searcher
            .take()
            .unwrap_or_else(|| fresh_searcher(hash_mb));
        let listener = UciListener { tx: tx.clone() };

        match searcher.start(self.position.clone(), limits, listener) {
            Ok(handle) => self.search = Some(handle),
            Err(e) => println!("{}", self.search_not_started(e)),
        }
    }

    /// Recover from a search thread that never started.
    ///
    /// The searcher went down with the failed spawn; a fresh one takes its
    /// place, already sized and empty, so pending table changes are moot.
    /// The returned outcome has no move, which still answers the `go`.
    fn search_not_started(&mut self, error: SearchError) -> SearchOutcome {
        warn!(error = %error, "could not start search");
        self.searcher = Some(fresh_searcher(self.hash_mb));
        self.pending_clear_tt = false;
        self.pending_resize_tt = None;
        SearchOutcome::default()
    }

    fn handle_stop(&mut self) {
        if let Some(handle) = &self.search {
            handle.request_stop();
        }
    }

    fn finish_search(&mut self, done: SearchDone<Position>) {
        let mut searcher = done.searcher;

        if let Some(mb) = self.pending_resize_tt.take() {
            // Resize supersedes clear: a fresh allocation is already empty
            searcher.resize_tt(mb);
            self.pending_clear_tt = false;
        } else if self.pending_clear_tt {
            searcher.clear_tt();
            self.pending_clear_tt = false;
        }

        self.searcher = Some(searcher);
        println!("{}", done.outcome);
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_searcher(hash_mb: usize) -> Searcher {
    Searcher::new().with_table(TranspositionTable::with_megabytes(hash_mb))
}
