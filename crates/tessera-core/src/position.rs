//! Game position backed by the `cozy-chess` move generator.
//!
//! Moves are applied copy-make: every [`make_move`](RulesEngine::make_move)
//! pushes the prior board onto an undo stack, and
//! [`undo_move`](RulesEngine::undo_move) pops it back. The stack also holds
//! the fingerprints of every earlier position in the game, which is what
//! repetition detection scans.

use std::str::FromStr;

use cozy_chess::{BitBoard, Board, Color, Piece, Rank, Square};
use tracing::debug;

use crate::chess_move::{Move, MoveKind};
use crate::error::{FenError, MoveError};
use crate::move_list::MoveList;
use crate::rules::RulesEngine;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// One applied move and the state it replaced.
#[derive(Clone)]
struct Frame {
    board: Board,
    mv: Move,
}

/// A chess position plus the history needed to undo moves and spot repetitions.
#[derive(Clone)]
pub struct Position {
    board: Board,
    frames: Vec<Frame>,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    /// Load a position from FEN.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let board = Board::from_fen(fen, false).map_err(|source| FenError::Invalid {
            fen: fen.to_string(),
            source,
        })?;
        debug!(fen, "position loaded");
        Ok(Self::from_board(board))
    }

    /// Wrap an existing board with an empty history.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            frames: Vec::with_capacity(256),
        }
    }

    /// The underlying board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves currently applied on top of the loaded position.
    pub fn ply(&self) -> usize {
        self.frames.len()
    }

    /// Piece and owner on `sq`, if occupied.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some((color, piece))
    }

    /// Find the legal move written as `text` in long algebraic notation.
    ///
    /// Castling is accepted both as the king's destination (`e1g1`) and as
    /// king-takes-rook (`e1h1`).
    pub fn parse_uci_move(&self, text: &str) -> Result<Move, MoveError> {
        self.generate_legal_moves(false)
            .iter()
            .copied()
            .find(|mv| mv.to_uci() == text || mv.to_cozy().to_string() == text)
            .ok_or_else(|| MoveError::Illegal {
                uci_move: text.to_string(),
            })
    }

    /// Apply a sequence of moves given in long algebraic notation.
    ///
    /// Stops at the first move that is not legal; moves before it stay applied.
    pub fn play_uci_moves<'a, I>(&mut self, moves: I) -> Result<(), MoveError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for text in moves {
            let mv = self.parse_uci_move(text)?;
            self.make_move(mv);
        }
        Ok(())
    }

    /// Classify a generator move against the current board.
    fn classify(&self, piece: Piece, mv: cozy_chess::Move) -> Move {
        let us = self.board.side_to_move();
        let target = self.board.piece_on(mv.to);

        if piece == Piece::King && self.board.color_on(mv.to) == Some(us) {
            return Move::new(mv.from, mv.to, piece, None, None, MoveKind::Castling);
        }
        if piece == Piece::Pawn && target.is_none() && mv.from.file() != mv.to.file() {
            return Move::new(mv.from, mv.to, piece, Some(Piece::Pawn), None, MoveKind::EnPassant);
        }
        if mv.promotion.is_some() {
            return Move::new(mv.from, mv.to, piece, target, mv.promotion, MoveKind::Promotion);
        }
        Move::new(mv.from, mv.to, piece, target, None, MoveKind::Normal)
    }

    /// Destination mask for captures-only generation, per moving piece.
    fn tactical_targets(&self, piece: Piece) -> BitBoard {
        let us = self.board.side_to_move();
        let mut mask = self.board.colors(!us);
        if piece == Piece::Pawn {
            mask |= Rank::Eighth.relative_to(us).bitboard();
            if let Some(file) = self.board.en_passant() {
                mask |= Square::new(file, Rank::Sixth.relative_to(us)).bitboard();
            }
        }
        mask
    }
}

impl RulesEngine for Position {
    fn make_move(&mut self, mv: Move) {
        let cozy = mv.to_cozy();
        debug_assert!(self.board.is_legal(cozy), "illegal move {mv} in make_move");
        self.frames.push(Frame {
            board: self.board.clone(),
            mv,
        });
        self.board.play_unchecked(cozy);
    }

    fn undo_move(&mut self, mv: Move) {
        let Some(frame) = self.frames.pop() else {
            panic!("undo_move({mv}) without a matching make_move");
        };
        assert_eq!(frame.mv, mv, "undo_move out of order");
        self.board = frame.board;
    }

    fn generate_legal_moves(&self, captures_only: bool) -> MoveList {
        let mut list = MoveList::new();
        self.board.generate_moves(|mut piece_moves| {
            if captures_only {
                piece_moves.to &= self.tactical_targets(piece_moves.piece);
            }
            let piece = piece_moves.piece;
            for mv in piece_moves {
                list.push(self.classify(piece, mv));
            }
            false
        });
        list
    }

    fn is_in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn is_repeated_position(&self) -> bool {
        let key = self.board.hash();
        let window = self.board.halfmove_clock() as usize;
        // Same side to move sits an even number of plies back.
        self.frames
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .any(|frame| frame.board.hash() == key)
    }

    fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }

        let knights = board.pieces(Piece::Knight);
        let bishops = board.pieces(Piece::Bishop);
        match (knights | bishops).len() {
            0 | 1 => true,
            2 if knights.is_empty() => {
                // KB vs KB with both bishops on the same square colour.
                let white = bishops & board.colors(Color::White);
                if white.len() != 1 {
                    return false;
                }
                let mut shades = bishops.into_iter().map(|sq| (sq.file() as u8 + sq.rank() as u8) % 2);
                shades.next() == shades.next()
            }
            _ => false,
        }
    }

    fn fingerprint(&self) -> u64 {
        self.board.hash()
    }

    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Position")
            .field("fen", &format!("{}", self.board))
            .field("ply", &self.frames.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let p = Position::startpos();
        assert_eq!(p.generate_legal_moves(false).len(), 20);
        assert!(p.generate_legal_moves(true).is_empty());
        assert_eq!(p.side_to_move(), Color::White);
    }

    #[test]
    fn startpos_matches_starting_fen() {
        assert_eq!(
            Position::startpos().fingerprint(),
            pos(STARTING_FEN).fingerprint()
        );
    }

    #[test]
    fn invalid_fen_is_rejected() {
        assert!(Position::from_fen("not a fen").is_err());
    }

    #[test]
    fn make_undo_restores_fingerprint() {
        let mut p = Position::startpos();
        let before = p.fingerprint();
        let mv = p.parse_uci_move("e2e4").unwrap();
        p.make_move(mv);
        assert_ne!(p.fingerprint(), before);
        assert_eq!(p.side_to_move(), Color::Black);
        p.undo_move(mv);
        assert_eq!(p.fingerprint(), before);
        assert_eq!(p.ply(), 0);
    }

    #[test]
    #[should_panic]
    fn undo_without_make_panics() {
        let mut p = Position::startpos();
        let mv = p.parse_uci_move("e2e4").unwrap();
        p.undo_move(mv);
    }

    #[test]
    #[should_panic]
    fn undo_of_wrong_move_panics() {
        let mut p = Position::startpos();
        let e4 = p.parse_uci_move("e2e4").unwrap();
        let d4 = p.parse_uci_move("d2d4").unwrap();
        p.make_move(e4);
        p.undo_move(d4);
    }

    #[test]
    fn captures_only_lists_captures_and_promotions() {
        // White pawn on b7 can push-promote on b8 or capture-promote on a8;
        // Nd4 can take the e6 pawn; the rest are quiet.
        let p = pos("r3k3/1P6/4p3/8/3N4/8/8/4K3 w - - 0 1");
        let tactical = p.generate_legal_moves(true);
        let all = p.generate_legal_moves(false);
        assert!(tactical.len() < all.len());
        for mv in &tactical {
            assert!(mv.is_capture() || mv.is_promotion(), "{mv} is quiet");
        }
        // 4 push promotions + 4 capture promotions + Nxe6
        assert_eq!(tactical.len(), 9);
        let nxe6 = p.parse_uci_move("d4e6").unwrap();
        assert_eq!(nxe6.captured(), Some(Piece::Pawn));
        assert!(tactical.contains(nxe6));
    }

    #[test]
    fn en_passant_is_classified_and_tactical() {
        let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep = p.parse_uci_move("e5d6").unwrap();
        assert_eq!(ep.kind(), MoveKind::EnPassant);
        assert_eq!(ep.captured(), Some(Piece::Pawn));
        assert!(p.generate_legal_moves(true).contains(ep));
    }

    #[test]
    fn castling_parses_both_notations() {
        let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let short = p.parse_uci_move("e1g1").unwrap();
        assert_eq!(short.kind(), MoveKind::Castling);
        assert_eq!(short.to_uci(), "e1g1");
        assert_eq!(p.parse_uci_move("e1h1").unwrap(), short);
        let long = p.parse_uci_move("e1c1").unwrap();
        assert_eq!(long.to_uci(), "e1c1");
        assert!(!p.generate_legal_moves(true).contains(short));
    }

    #[test]
    fn illegal_move_text_is_rejected() {
        let p = Position::startpos();
        assert!(p.parse_uci_move("e2e5").is_err());
        assert!(p.parse_uci_move("zz").is_err());
    }

    #[test]
    fn knight_shuffle_repeats() {
        let mut p = Position::startpos();
        assert!(!p.is_repeated_position());
        p.play_uci_moves(["g1f3", "g8f6", "f3g1"]).unwrap();
        assert!(!p.is_repeated_position());
        p.play_uci_moves(["f6g8"]).unwrap();
        assert!(p.is_repeated_position());
        assert!(p.is_draw());
    }

    #[test]
    fn pawn_move_resets_repetition_window() {
        let mut p = Position::startpos();
        p.play_uci_moves(["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"]).unwrap();
        assert!(!p.is_repeated_position());
    }

    #[test]
    fn fifty_move_rule() {
        assert!(pos("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").is_fifty_move_draw());
        assert!(!pos("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").is_fifty_move_draw());
    }

    #[test]
    fn insufficient_material_cases() {
        assert!(pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_insufficient_material());
        assert!(pos("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").is_insufficient_material());
        assert!(pos("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").is_insufficient_material());
        // Bishops on f1 (light) and c8 (light).
        assert!(pos("2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1").is_insufficient_material());
        // Bishops on f1 (light) and f8 (dark).
        assert!(!pos("4kb2/8/8/8/8/8/8/4KB2 w - - 0 1").is_insufficient_material());
        assert!(!pos("4k3/8/8/8/8/8/8/4KNN1 w - - 0 1").is_insufficient_material());
        assert!(!pos("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").is_insufficient_material());
    }

    #[test]
    fn check_detection() {
        let p = pos("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
        assert!(p.is_in_check());
        assert!(!Position::startpos().is_in_check());
    }
}
