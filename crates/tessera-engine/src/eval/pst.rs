//! Piece-square tables.
//!
//! Written from White's side with a1 first and h8 last; Black looks up the
//! vertically mirrored square.

use tessera_core::{Color, Piece, Square};

use crate::eval::tapered::{S, Tapered};

#[rustfmt::skip]
const PAWN: [Tapered; 64] = [
    S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),
    S(0,4),   S(6,4),   S(4,2),   S(-12,0), S(-12,0), S(4,2),   S(6,4),   S(0,4),
    S(2,2),   S(0,2),   S(4,0),   S(6,0),   S(6,0),   S(4,0),   S(0,2),   S(2,2),
    S(0,8),   S(2,8),   S(8,4),   S(18,4),  S(18,4),  S(8,4),   S(2,8),   S(0,8),
    S(4,18),  S(6,16),  S(12,12), S(22,10), S(22,10), S(12,12), S(6,16),  S(4,18),
    S(12,40), S(14,38), S(20,34), S(28,30), S(28,30), S(20,34), S(14,38), S(12,40),
    S(40,90), S(40,90), S(44,86), S(48,80), S(48,80), S(44,86), S(40,90), S(40,90),
    S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),
];

#[rustfmt::skip]
const KNIGHT: [Tapered; 64] = [
    S(-60,-40), S(-24,-28), S(-30,-20), S(-20,-16), S(-20,-16), S(-30,-20), S(-24,-28), S(-60,-40),
    S(-30,-26), S(-16,-12), S(0,-4),    S(4,0),     S(4,0),     S(0,-4),    S(-16,-12), S(-30,-26),
    S(-22,-18), S(2,-2),    S(10,6),    S(12,12),   S(12,12),   S(10,6),    S(2,-2),    S(-22,-18),
    S(-16,-14), S(4,4),     S(14,14),   S(18,20),   S(18,20),   S(14,14),   S(4,4),     S(-16,-14),
    S(-12,-14), S(8,4),     S(20,14),   S(24,20),   S(24,20),   S(20,14),   S(8,4),     S(-12,-14),
    S(-18,-18), S(6,-4),    S(24,6),    S(26,10),   S(26,10),   S(24,6),    S(6,-4),    S(-18,-18),
    S(-28,-26), S(-14,-14), S(4,-6),    S(8,-2),    S(8,-2),    S(4,-6),    S(-14,-14), S(-28,-26),
    S(-70,-44), S(-34,-30), S(-26,-24), S(-20,-20), S(-20,-20), S(-26,-24), S(-34,-30), S(-70,-44),
];

#[rustfmt::skip]
const BISHOP: [Tapered; 64] = [
    S(-18,-14), S(-6,-8),  S(-12,-10), S(-8,-6), S(-8,-6), S(-12,-10), S(-6,-8),  S(-18,-14),
    S(-4,-8),   S(10,-2),  S(6,-4),    S(2,0),   S(2,0),   S(6,-4),    S(10,-2),  S(-4,-8),
    S(-6,-6),   S(6,0),    S(8,4),     S(6,6),   S(6,6),   S(8,4),     S(6,0),    S(-6,-6),
    S(-4,-4),   S(4,2),    S(6,6),     S(14,8),  S(14,8),  S(6,6),     S(4,2),    S(-4,-4),
    S(-6,-4),   S(8,2),    S(8,6),     S(16,8),  S(16,8),  S(8,6),     S(8,2),    S(-6,-4),
    S(-8,-6),   S(4,0),    S(10,2),    S(8,4),   S(8,4),   S(10,2),    S(4,0),    S(-8,-6),
    S(-12,-8),  S(-4,-4),  S(0,-2),    S(-2,0),  S(-2,0),  S(0,-2),    S(-4,-4),  S(-12,-8),
    S(-20,-14), S(-10,-10),S(-12,-10), S(-10,-8),S(-10,-8),S(-12,-10), S(-10,-10),S(-20,-14),
];

#[rustfmt::skip]
const ROOK: [Tapered; 64] = [
    S(-4,-2),  S(-2,-2), S(2,0),  S(6,-2),  S(6,-2),  S(2,0),  S(-2,-2), S(-4,-2),
    S(-12,-4), S(-6,-4), S(-4,-2),S(-2,-2), S(-2,-2), S(-4,-2),S(-6,-4), S(-12,-4),
    S(-10,-2), S(-4,0),  S(-2,0), S(0,0),   S(0,0),   S(-2,0), S(-4,0),  S(-10,-2),
    S(-8,0),   S(-4,2),  S(-2,2), S(0,2),   S(0,2),   S(-2,2), S(-4,2),  S(-8,0),
    S(-6,2),   S(-2,4),  S(0,4),  S(4,4),   S(4,4),   S(0,4),  S(-2,4),  S(-6,2),
    S(-2,4),   S(4,4),   S(6,4),  S(8,4),   S(8,4),   S(6,4),  S(4,4),   S(-2,4),
    S(12,8),   S(18,10), S(20,10),S(22,10), S(22,10), S(20,10),S(18,10), S(12,8),
    S(6,6),    S(8,6),   S(10,6), S(12,6),  S(12,6),  S(10,6), S(8,6),   S(6,6),
];

#[rustfmt::skip]
const QUEEN: [Tapered; 64] = [
    S(-16,-24), S(-10,-16), S(-6,-12), S(-2,-8), S(-2,-8), S(-6,-12), S(-10,-16), S(-16,-24),
    S(-10,-16), S(0,-8),    S(4,-4),   S(4,-2),  S(4,-2),  S(4,-4),   S(0,-8),    S(-10,-16),
    S(-6,-10),  S(2,-2),    S(4,2),    S(2,4),   S(2,4),   S(4,2),    S(2,-2),    S(-6,-10),
    S(-4,-6),   S(0,2),     S(2,6),    S(4,10),  S(4,10),  S(2,6),    S(0,2),     S(-4,-6),
    S(-6,-6),   S(0,4),     S(2,8),    S(4,12),  S(4,12),  S(2,8),    S(0,4),     S(-6,-6),
    S(-8,-8),   S(-2,2),    S(2,6),    S(2,8),   S(2,8),   S(2,6),    S(-2,2),    S(-8,-8),
    S(-12,-12), S(-6,-4),   S(-2,0),   S(0,2),   S(0,2),   S(-2,0),   S(-6,-4),   S(-12,-12),
    S(-18,-20), S(-12,-14), S(-8,-10), S(-6,-8), S(-6,-8), S(-8,-10), S(-12,-14), S(-18,-20),
];

#[rustfmt::skip]
const KING: [Tapered; 64] = [
    S(18,-48), S(30,-30), S(12,-22), S(-8,-20), S(-8,-20), S(12,-22), S(30,-30), S(18,-48),
    S(12,-26), S(8,-12),  S(-10,-6), S(-24,-2), S(-24,-2), S(-10,-6), S(8,-12),  S(12,-26),
    S(-14,-18),S(-20,-2), S(-28,8),  S(-36,12), S(-36,12), S(-28,8),  S(-20,-2), S(-14,-18),
    S(-30,-14),S(-36,4),  S(-44,16), S(-52,22), S(-52,22), S(-44,16), S(-36,4),  S(-30,-14),
    S(-38,-10),S(-44,8),  S(-52,20), S(-60,26), S(-60,26), S(-52,20), S(-44,8),  S(-38,-10),
    S(-44,-8), S(-50,10), S(-58,18), S(-64,22), S(-64,22), S(-58,18), S(-50,10), S(-44,-8),
    S(-50,-16),S(-56,0),  S(-62,8),  S(-68,10), S(-68,10), S(-62,8),  S(-56,0),  S(-50,-16),
    S(-56,-40),S(-60,-24),S(-66,-16),S(-72,-12),S(-72,-12),S(-66,-16),S(-60,-24),S(-56,-40),
];

const TABLES: [[Tapered; 64]; 6] = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING];

/// Bonus for `piece` of `color` standing on `sq`, from that side's point of view.
pub fn square_bonus(piece: Piece, color: Color, sq: Square) -> Tapered {
    let index = match color {
        Color::White => sq as usize,
        Color::Black => sq as usize ^ 56,
    };
    TABLES[piece as usize][index]
}
