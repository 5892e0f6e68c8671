//! Search and evaluation for tessera.

pub mod error;
pub mod eval;
pub mod search;
pub mod time;

pub use error::SearchError;
pub use eval::{ClassicalEvaluator, Evaluator, MaterialEvaluator};
pub use search::control::SearchControl;
pub use search::driver::{
    DEFAULT_HASH_MB, MAX_DEPTH, SearchDone, SearchHandle, SearchLimits, SearchListener,
    SearchOutcome, Searcher,
};
pub use search::instance::{InstanceState, SearchInstance};
pub use search::line::SearchLine;
pub use search::negamax::AlphaBetaEngine;
pub use search::ordering::MoveOrderer;
pub use search::params::SearchParams;
pub use search::report::{IterationReport, ScoreDisplay};
pub use search::tt::{Bound, TranspositionTable};
pub use time::{budget, deadline_for};
