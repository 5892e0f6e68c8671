//! Negamax alpha-beta search with principal-variation probes and quiescence.
//!
//! The engine is fail-hard: a node returns `beta` on a cutoff and `alpha`
//! otherwise. Every `make_move` is paired with an `undo_move` before the
//! caller looks at the child's score, on every path.
//!
//! Cancellation is polled when a node is entered and again after each child
//! has been undone. A node that sees it returns [`CANCELLED`] without touching
//! the transposition table, the killers, or its line.

use tessera_core::{Color, Move, RulesEngine};

use crate::eval::Evaluator;
use crate::search::control::SearchControl;
use crate::search::line::{PvTable, SearchLine};
use crate::search::ordering::MoveOrderer;
use crate::search::params::SearchParams;
use crate::search::score::{CANCELLED, DRAW, INFINITY, MAX_PLY, mate_in};
use crate::search::tt::{Bound, TranspositionTable};

/// Root outcome of one fixed-depth search.
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    /// Best root move, or `None` when the root has no legal move.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move, or [`CANCELLED`].
    pub score: i32,
}

/// Recursive searcher over one position.
///
/// Borrows everything it touches for the duration of one depth iteration:
/// the position it mutates, the evaluator, the shared transposition table,
/// and the run's move orderer.
pub struct AlphaBetaEngine<'a, R, E> {
    pos: &'a mut R,
    evaluator: &'a E,
    tt: &'a mut TranspositionTable,
    orderer: &'a mut MoveOrderer,
    params: &'a SearchParams,
    control: Option<&'a SearchControl>,
    lines: PvTable,
    nodes: u64,
    seldepth: usize,
}

impl<'a, R, E> AlphaBetaEngine<'a, R, E>
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    /// Build an engine. With `control` set to `None` the search cannot be cancelled.
    pub fn new(
        pos: &'a mut R,
        evaluator: &'a E,
        tt: &'a mut TranspositionTable,
        orderer: &'a mut MoveOrderer,
        params: &'a SearchParams,
        control: Option<&'a SearchControl>,
    ) -> Self {
        Self {
            pos,
            evaluator,
            tt,
            orderer,
            params,
            control,
            lines: PvTable::new(),
            nodes: 0,
            seldepth: 0,
        }
    }

    /// Nodes visited so far, quiescence included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Deepest ply reached so far, quiescence included.
    pub fn seldepth(&self) -> usize {
        self.seldepth
    }

    /// Principal variation of the last root search.
    pub fn line(&self) -> &SearchLine {
        self.lines.line(0)
    }

    /// Search every root move to `depth` with a full window.
    ///
    /// `seed` (the previous iteration's best move) is tried first, then the
    /// transposition-table move. No selective pruning is applied at the root.
    pub fn search_root(&mut self, depth: u8, seed: Option<Move>) -> RootResult {
        let depth = depth.max(1);
        self.lines.clear(0);
        self.visit(0);

        let mut moves = self.pos.generate_legal_moves(false);
        let in_check = self.pos.is_in_check();
        if moves.is_empty() {
            let score = if in_check { mate_in(0) } else { DRAW };
            return RootResult {
                best_move: None,
                score,
            };
        }

        let key = self.pos.fingerprint();
        let mut priority = [Move::NULL; 2];
        let mut len = 0;
        for mv in [seed, self.tt.probe_move(key)].into_iter().flatten() {
            if !priority[..len].contains(&mv) {
                priority[len] = mv;
                len += 1;
            }
        }
        self.orderer.order(&mut moves, 0, &priority[..len]);

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_move = None;
        let mut found_pv = false;

        for &mv in moves.iter() {
            self.pos.make_move(mv);
            let score = self.child_score(depth, alpha, beta, 0, found_pv && !in_check);
            self.pos.undo_move(mv);

            if self.is_stopped() {
                return RootResult {
                    best_move,
                    score: CANCELLED,
                };
            }

            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                found_pv = true;
                self.lines.promote(0, mv);
            }
        }

        let stored = best_move.unwrap_or(moves[0]);
        self.tt.store(key, depth, alpha, Bound::Exact, stored, 0);

        RootResult {
            best_move,
            score: alpha,
        }
    }

    /// Negamax search of the current position to `depth` remaining plies.
    pub fn search(&mut self, depth: u8, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        self.lines.clear(ply);

        if self.should_stop() {
            return CANCELLED;
        }

        // Repetition, fifty-move rule, dead material
        if self.pos.is_draw() {
            return DRAW;
        }

        // Probe transposition table
        let key = self.pos.fingerprint();
        if let Some(score) = self.tt.lookup(key, depth, alpha, beta, ply) {
            return score;
        }

        // Horizon: settle captures before evaluating
        if depth == 0 {
            return self.quiesce(alpha, beta, ply);
        }

        if ply >= MAX_PLY {
            return self.static_eval();
        }

        self.visit(ply);

        // Checkmate or stalemate
        let mut moves = self.pos.generate_legal_moves(false);
        let in_check = self.pos.is_in_check();
        if moves.is_empty() {
            return if in_check { mate_in(ply) } else { DRAW };
        }

        // TT move first, then captures, killers, quiets
        let tt_move = self.tt.probe_move(key);
        self.orderer.order(&mut moves, ply, tt_move.as_slice());

        let mut best_move = moves[0];
        let mut bound = Bound::UpperBound;
        let mut found_pv = false;
        let mut made_quiet = false;
        let mut action_moves: u8 = 0;

        for &mv in moves.iter() {
            self.pos.make_move(mv);

            // Checks count as action moves; only quiet ones may be pruned
            let gives_check = self.pos.is_in_check();
            let quiet = mv.is_quiet() && !gives_check;
            if !quiet {
                action_moves = action_moves.saturating_add(1);
            } else if self.late_move_pruned(action_moves)
                || self.futile(depth, in_check, found_pv, made_quiet)
            {
                self.pos.undo_move(mv);
                continue;
            }
            made_quiet |= quiet;

            let score = self.child_score(depth, alpha, beta, ply, found_pv && !in_check);
            self.pos.undo_move(mv);

            if self.is_stopped() {
                return CANCELLED;
            }

            // Beta cutoff
            if score >= beta {
                self.tt.store(key, depth, beta, Bound::LowerBound, mv, ply);
                self.orderer.record_cutoff(ply, mv);
                return beta;
            }

            // New best move inside the window
            if score > alpha {
                alpha = score;
                best_move = mv;
                bound = Bound::Exact;
                found_pv = true;
                self.lines.promote(ply, mv);
            }
        }

        self.tt.store(key, depth, alpha, bound, best_move, ply);
        alpha
    }

    /// Capture-only search that settles the position before it is evaluated.
    ///
    /// Draws and checkmates are still scored exactly; stalemate is not
    /// looked for.
    pub fn quiesce(&mut self, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        if self.should_stop() {
            return CANCELLED;
        }

        self.visit(ply);

        if self.pos.is_draw() {
            return DRAW;
        }
        if self.pos.is_in_check() && self.pos.generate_legal_moves(false).is_empty() {
            return mate_in(ply);
        }

        // Stand pat: the side to move may decline every capture
        let stand_pat = self.static_eval();
        if ply >= MAX_PLY || stand_pat >= beta {
            return stand_pat.min(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = self.pos.generate_legal_moves(true);
        self.orderer.order(&mut moves, ply, &[]);

        for &mv in moves.iter() {
            self.pos.make_move(mv);
            let score = -self.quiesce(-beta, -alpha, ply + 1);
            self.pos.undo_move(mv);

            if self.is_stopped() {
                return CANCELLED;
            }

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Score of the move just made, from the mover's side.
    ///
    /// With `probe` set, a null-window search at reduced depth runs first and
    /// the full search only follows when the probe lands inside the window.
    fn child_score(&mut self, depth: u8, alpha: i32, beta: i32, ply: usize, probe: bool) -> i32 {
        if probe && depth >= self.params.pvs_min_depth {
            let reduced = depth.saturating_sub(1 + self.params.pvs_reduction);
            let score = -self.search(reduced, -alpha - 1, -alpha, ply + 1);
            if score <= alpha || score >= beta {
                return score;
            }
        }
        -self.search(depth - 1, -beta, -alpha, ply + 1)
    }

    fn late_move_pruned(&self, action_moves: u8) -> bool {
        self.params
            .late_move_limit
            .is_some_and(|limit| action_moves > limit)
    }

    fn futile(&self, depth: u8, in_check: bool, found_pv: bool, made_quiet: bool) -> bool {
        !in_check && !found_pv && made_quiet && depth <= self.params.futility_depth
    }

    /// Evaluation from the side to move's point of view.
    fn static_eval(&self) -> i32 {
        let score = self.evaluator.evaluate(&*self.pos);
        match self.pos.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        }
    }

    fn visit(&mut self, ply: usize) {
        self.nodes += 1;
        self.seldepth = self.seldepth.max(ply);
    }

    fn should_stop(&self) -> bool {
        self.control
            .is_some_and(|control| control.should_stop(self.nodes))
    }

    fn is_stopped(&self) -> bool {
        self.control.is_some_and(SearchControl::is_stopped)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use tessera_core::{MoveList, Position};

    use super::*;
    use crate::eval::{ClassicalEvaluator, MaterialEvaluator};
    use crate::search::score::{is_mate_score, mate_distance_in_moves};

    fn root<E: Evaluator<Position>>(fen: &str, depth: u8, evaluator: &E) -> (RootResult, u64) {
        let mut pos: Position = fen.parse().unwrap();
        let mut tt = TranspositionTable::with_capacity(1 << 16);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let mut engine = AlphaBetaEngine::new(&mut pos, evaluator, &mut tt, &mut orderer, &params, None);
        let result = engine.search_root(depth, None);
        (result, engine.nodes())
    }

    #[test]
    fn takes_hanging_queen() {
        let (result, _) = root("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 2, &MaterialEvaluator);
        assert_eq!(result.best_move.unwrap().to_uci(), "e4d5");
        assert!(result.score > 0);
    }

    #[test]
    fn finds_back_rank_mate() {
        let (result, _) = root("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2, &ClassicalEvaluator);
        assert_eq!(result.best_move.unwrap().to_uci(), "a1a8");
        assert!(is_mate_score(result.score));
        assert_eq!(mate_distance_in_moves(result.score), 1);
    }

    #[test]
    fn checkmated_root_has_no_move() {
        let (result, _) = root("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 3, &ClassicalEvaluator);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, mate_in(0));
    }

    #[test]
    fn stalemated_root_is_a_draw() {
        let (result, _) = root("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3, &ClassicalEvaluator);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, DRAW);
    }

    #[test]
    fn quiescence_sees_recapture() {
        // Qxd5 loses the queen to exd5 once quiescence looks one capture further.
        let (result, _) = root("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1", 1, &MaterialEvaluator);
        assert_ne!(result.best_move.unwrap().to_uci(), "d1d5");
    }

    #[test]
    fn raised_flag_cancels_search() {
        let mut pos = Position::startpos();
        let mut tt = TranspositionTable::with_capacity(1024);
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
        let result = engine.search_root(4, None);
        assert_eq!(result.score, CANCELLED);
        assert_eq!(result.best_move, None);
        assert_eq!(tt.occupied(), 0);
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn position_is_restored_after_search() {
        let mut pos: Position = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
            .parse()
            .unwrap();
        let before = pos.fingerprint();
        let mut tt = TranspositionTable::with_capacity(1 << 14);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let mut engine =
            AlphaBetaEngine::new(&mut pos, &ClassicalEvaluator, &mut tt, &mut orderer, &params, None);
        engine.search_root(3, None);
        assert!(engine.seldepth() >= 3);
        assert!(!engine.line().is_empty());
        assert_eq!(pos.fingerprint(), before);
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let (_, pruned) = root(fen, 4, &ClassicalEvaluator);

        let mut pos: Position = fen.parse().unwrap();
        let mut tt = TranspositionTable::with_capacity(1 << 16);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::exhaustive();
        let mut engine =
            AlphaBetaEngine::new(&mut pos, &ClassicalEvaluator, &mut tt, &mut orderer, &params, None);
        engine.search_root(4, None);
        assert!(pruned < engine.nodes());
    }

    /// Position that logs the moves searched at the node it starts on, each
    /// with whether it gave check. A move counts as searched once its child
    /// node is entered; pruned moves are made and undone without that.
    struct Recorder {
        pos: Position,
        searched: Vec<(Move, bool)>,
        current: Option<(Move, bool)>,
        entered: Cell<bool>,
    }

    impl Recorder {
        fn new(fen: &str) -> Self {
            Self {
                pos: fen.parse().unwrap(),
                searched: Vec::new(),
                current: None,
                entered: Cell::new(false),
            }
        }
    }

    impl RulesEngine for Recorder {
        fn make_move(&mut self, mv: Move) {
            let at_start = self.pos.ply() == 0;
            self.pos.make_move(mv);
            if at_start {
                self.current = Some((mv, self.pos.is_in_check()));
                self.entered.set(false);
            }
        }

        fn undo_move(&mut self, mv: Move) {
            self.pos.undo_move(mv);
            if self.pos.ply() == 0 {
                if let Some(tried) = self.current.take() {
                    if self.entered.get() {
                        self.searched.push(tried);
                    }
                }
            }
        }

        fn generate_legal_moves(&self, captures_only: bool) -> MoveList {
            self.pos.generate_legal_moves(captures_only)
        }

        fn is_in_check(&self) -> bool {
            self.pos.is_in_check()
        }

        fn is_repeated_position(&self) -> bool {
            self.pos.is_repeated_position()
        }

        fn is_fifty_move_draw(&self) -> bool {
            self.pos.is_fifty_move_draw()
        }

        fn is_insufficient_material(&self) -> bool {
            self.pos.is_insufficient_material()
        }

        // Every child node asks this first.
        fn is_draw(&self) -> bool {
            if self.pos.ply() == 1 {
                self.entered.set(true);
            }
            self.pos.is_draw()
        }

        fn fingerprint(&self) -> u64 {
            self.pos.fingerprint()
        }

        fn side_to_move(&self) -> Color {
            self.pos.side_to_move()
        }
    }

    struct RecorderMaterial;

    impl Evaluator<Recorder> for RecorderMaterial {
        fn evaluate(&self, pos: &Recorder) -> i32 {
            MaterialEvaluator.evaluate(&pos.pos)
        }
    }

    /// Search `fen` as an interior node at ply 0 and return the moves tried there.
    fn tried_moves(
        fen: &str,
        params: &SearchParams,
        window: (i32, i32),
        killer: Option<&str>,
    ) -> (Vec<(Move, bool)>, usize) {
        let mut rec = Recorder::new(fen);
        let legal = rec.pos.generate_legal_moves(false).len();
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let mut orderer = MoveOrderer::new();
        if let Some(text) = killer {
            orderer.record_cutoff(0, rec.pos.parse_uci_move(text).unwrap());
        }
        let mut engine =
            AlphaBetaEngine::new(&mut rec, &RecorderMaterial, &mut tt, &mut orderer, params, None);
        engine.search(1, window.0, window.1, 0);
        (rec.searched, legal)
    }

    fn late_moves_only() -> SearchParams {
        SearchParams {
            futility_depth: 0,
            ..SearchParams::default()
        }
    }

    fn futility_only() -> SearchParams {
        SearchParams {
            late_move_limit: None,
            ..SearchParams::default()
        }
    }

    const FULL_WINDOW: (i32, i32) = (-INFINITY, INFINITY);

    /// Nothing can raise alpha, so no move ever becomes the PV.
    const HOPELESS_WINDOW: (i32, i32) = (5_000, 5_001);

    #[test]
    fn quiets_searched_while_action_moves_within_limit() {
        // Five queen captures, no checking moves.
        let fen = "7k/6pp/8/2ppp3/3Q4/2p1p3/8/4K3 w - - 0 1";
        let (searched, legal) = tried_moves(fen, &late_moves_only(), FULL_WINDOW, None);
        assert_eq!(searched.iter().filter(|(mv, _)| mv.is_capture()).count(), 5);
        assert!(searched.iter().any(|(mv, _)| mv.is_quiet()));
        assert_eq!(searched.len(), legal);
    }

    #[test]
    fn quiets_skipped_once_action_moves_exceed_limit() {
        // Six queen captures; every quiet move comes after them.
        let fen = "7k/6pp/8/2ppp3/3Q4/2ppp3/8/4K3 w - - 0 1";
        let (searched, legal) = tried_moves(fen, &late_moves_only(), FULL_WINDOW, None);
        assert_eq!(searched.len(), 6);
        assert!(searched.iter().all(|(mv, _)| mv.is_capture()));
        assert!(legal > searched.len());

        let exhaustive = SearchParams {
            late_move_limit: None,
            ..late_moves_only()
        };
        let (searched, legal) = tried_moves(fen, &exhaustive, FULL_WINDOW, None);
        assert_eq!(searched.len(), legal);
    }

    #[test]
    fn checking_move_counts_toward_limit() {
        // Ra8+ (ordered first as a killer) and five captures reach six
        // action moves; after that only checks (Qh4+) are still tried.
        let fen = "7k/8/8/2ppp3/3Q4/2p1p3/8/R3K3 w - - 0 1";
        let (searched, legal) = tried_moves(fen, &late_moves_only(), FULL_WINDOW, Some("a1a8"));
        assert_eq!(searched[0].0.to_uci(), "a1a8");
        assert!(searched[0].1);
        assert_eq!(searched.iter().filter(|(mv, _)| mv.is_capture()).count(), 5);
        assert!(searched.iter().all(|&(mv, check)| !mv.is_quiet() || check));
        assert!(searched.iter().any(|(mv, _)| mv.to_uci() == "d4h4"));
        assert!(legal > searched.len());
    }

    #[test]
    fn futility_skips_later_quiets_at_frontier() {
        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1";
        let (searched, legal) = tried_moves(fen, &futility_only(), HOPELESS_WINDOW, None);
        let plain_quiets = searched
            .iter()
            .filter(|&&(mv, check)| mv.is_quiet() && !check)
            .count();
        assert_eq!(plain_quiets, 1);
        // Ra8+ is a check and is never futile.
        assert!(searched.iter().any(|(mv, _)| mv.to_uci() == "a1a8"));
        assert!(legal > searched.len());
    }

    #[test]
    fn futility_never_applies_in_check() {
        // Same position with a rook checking along the first rank.
        let fen = "4k3/8/8/8/8/8/8/R3K2r w - - 0 1";
        let (searched, legal) = tried_moves(fen, &futility_only(), HOPELESS_WINDOW, None);
        assert!(legal > 1);
        assert_eq!(searched.len(), legal);
        assert!(searched.iter().all(|(mv, _)| mv.is_quiet()));
    }

    #[test]
    fn quiet_cutoff_stores_lower_bound_and_killer() {
        let mut pos = Position::startpos();
        let key = pos.fingerprint();
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let mut engine =
            AlphaBetaEngine::new(&mut pos, &MaterialEvaluator, &mut tt, &mut orderer, &params, None);
        // Every move clears beta, so the first one cuts off.
        let score = engine.search(2, -10_000, -5_000, 3);
        assert_eq!(score, -5_000);

        let entry = *tt.entry(key).unwrap();
        assert_eq!(entry.bound, Bound::LowerBound);
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.score, -5_000);
        assert!(entry.best_move.is_quiet());
        assert_eq!(orderer.killers().slot_of(3, entry.best_move), Some(0));
        assert_eq!(orderer.killers().slot_of(2, entry.best_move), None);
    }

    #[test]
    fn capture_cutoff_is_not_a_killer() {
        let mut pos: Position = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let key = pos.fingerprint();
        let exd5 = pos.parse_uci_move("e4d5").unwrap();
        let mut tt = TranspositionTable::with_capacity(1 << 12);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let mut engine =
            AlphaBetaEngine::new(&mut pos, &MaterialEvaluator, &mut tt, &mut orderer, &params, None);
        assert_eq!(engine.search(1, -10_000, -5_000, 3), -5_000);

        let entry = *tt.entry(key).unwrap();
        assert_eq!(entry.bound, Bound::LowerBound);
        assert_eq!(entry.depth, 1);
        assert_eq!(entry.best_move, exd5);
        assert_eq!(orderer.killers().slot_of(3, exd5), None);
    }
}
