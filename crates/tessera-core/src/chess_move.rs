//! Move value type carried through search, ordering, and output.

use std::fmt;

use cozy_chess::{File, Piece, Square};

/// The category of a chess move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Quiet move or ordinary capture.
    Normal,
    /// King and rook swap sides; stored king-onto-rook.
    Castling,
    /// Pawn captures the pawn that just double-stepped past it.
    EnPassant,
    /// Pawn reaches the last rank, with or without a capture.
    Promotion,
}

/// A fully classified chess move.
///
/// Carries the moving piece and the captured piece (if any) so that move
/// ordering never has to consult the board.
///
/// Castling is stored the way the move generator produces it: the king's
/// origin and the castling rook's square. [`Move::to_uci`] renders it as
/// the king's destination (`e1g1`, `e1c1`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    promotion: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Sentinel for "no move" (A1 to A1). Never a legal move.
    pub const NULL: Move = Move {
        from: Square::A1,
        to: Square::A1,
        piece: Piece::Pawn,
        captured: None,
        promotion: None,
        kind: MoveKind::Normal,
    };

    /// Create a move from its parts.
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promotion: Option<Piece>,
        kind: MoveKind,
    ) -> Move {
        Move {
            from,
            to,
            piece,
            captured,
            promotion,
            kind,
        }
    }

    /// Origin square.
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination square (the rook's square for castling).
    pub const fn to(self) -> Square {
        self.to
    }

    /// The piece being moved.
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The piece removed from the board by this move, if any.
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    /// The piece a pawn promotes to, if any.
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    /// The move category.
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Return `true` for the [`Move::NULL`] sentinel.
    pub fn is_null(self) -> bool {
        self.from == self.to
    }

    /// Return `true` if the move removes an enemy piece (en passant included).
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// Return `true` if the move promotes a pawn.
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Return `true` for castling.
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castling)
    }

    /// Return `true` if the move neither captures nor promotes.
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// The square the king lands on, or the plain destination for other moves.
    pub fn king_destination(self) -> Square {
        if !self.is_castle() {
            return self.to;
        }
        let file = if self.to.file() as u8 > self.from.file() as u8 {
            File::G
        } else {
            File::C
        };
        Square::new(file, self.from.rank())
    }

    /// Convert to the move generator's representation.
    pub fn to_cozy(self) -> cozy_chess::Move {
        cozy_chess::Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }

    /// Long algebraic notation (`e2e4`, `e7e8q`, `e1g1`).
    pub fn to_uci(self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        match self.promotion {
            Some(promo) => format!("{}{}{}", self.from, self.to, promo),
            None => format!("{}{}", self.from, self.king_destination()),
        }
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?}", self.to_uci(), self.kind)?;
        if let Some(captured) = self.captured {
            write!(f, " x{captured:?}")?;
        }
        f.write_str(")")
    }
}
