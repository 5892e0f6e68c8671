//! Core chess types and the rules-engine contract.
//!
//! Board representation and legal move generation come from `cozy-chess`;
//! this crate classifies its moves and exposes them through [`RulesEngine`].

mod chess_move;
mod error;
mod move_list;
mod position;
mod rules;

pub mod perft;

pub use chess_move::{Move, MoveKind};
pub use cozy_chess::{BitBoard, Board, Color, File, Piece, Rank, Square};
pub use error::{FenError, MoveError};
pub use move_list::{MAX_MOVES, MoveList};
pub use position::{Position, STARTING_FEN};
pub use rules::RulesEngine;
