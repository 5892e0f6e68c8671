//! Perft node counting over any [`RulesEngine`].
//!
//! Verifies that move generation and make/undo pairing agree with known
//! reference counts.

use crate::rules::RulesEngine;

/// Count leaf nodes at `depth`, applying and reverting every move.
pub fn perft<R: RulesEngine>(pos: &mut R, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = pos.generate_legal_moves(false);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in &moves {
        pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.undo_move(mv);
    }
    nodes
}

/// Per-move breakdown of [`perft`], sorted by move text.
pub fn divide<R: RulesEngine>(pos: &mut R, depth: usize) -> Vec<(String, u64)> {
    let moves = pos.generate_legal_moves(false);
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|&mv| {
            pos.make_move(mv);
            let count = perft(pos, depth.saturating_sub(1));
            pos.undo_move(mv);
            (mv.to_uci(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Count capture and promotion leaves at `depth` using captures-only generation.
pub fn tactical_leaves<R: RulesEngine>(pos: &mut R, depth: usize) -> u64 {
    if depth <= 1 {
        return pos.generate_legal_moves(true).len() as u64;
    }
    let moves = pos.generate_legal_moves(false);
    let mut total = 0u64;
    for &mv in &moves {
        pos.make_move(mv);
        total += tactical_leaves(pos, depth - 1);
        pos.undo_move(mv);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn kiwipete() -> Position {
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap()
    }

    fn position3() -> Position {
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1".parse().unwrap()
    }

    #[test]
    fn perft_startpos_depth_3() {
        let mut p = Position::startpos();
        assert_eq!(perft(&mut p, 1), 20);
        assert_eq!(perft(&mut p, 2), 400);
        assert_eq!(perft(&mut p, 3), 8_902);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let mut p = kiwipete();
        assert_eq!(perft(&mut p, 1), 48);
        assert_eq!(perft(&mut p, 2), 2_039);
    }

    #[test]
    fn perft_position3_depth_3() {
        let mut p = position3();
        assert_eq!(perft(&mut p, 3), 2_812);
    }

    #[test]
    fn perft_leaves_position_untouched() {
        let mut p = kiwipete();
        let before = p.fingerprint();
        perft(&mut p, 3);
        assert_eq!(p.fingerprint(), before);
        assert_eq!(p.ply(), 0);
    }

    #[test]
    fn kiwipete_tactical_leaves() {
        // 8 captures at depth 1 (no promotions available).
        let mut p = kiwipete();
        assert_eq!(tactical_leaves(&mut p, 1), 8);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut p = Position::startpos();
        let rows = divide(&mut p, 3);
        assert_eq!(rows.len(), 20);
        assert_eq!(rows.iter().map(|(_, n)| n).sum::<u64>(), 8_902);
    }
}
