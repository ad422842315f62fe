//! Perft: exhaustive legal-move tree counting, used to validate the
//! generator and `with_move` against known node counts.

use crate::board::Board;
use crate::moves::generate::generate_legal_moves;
use crate::piece::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounters {
    fn add(&mut self, other: &PerftCounters) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passants += other.en_passants;
        self.castles += other.castles;
        self.promotions += other.promotions;
    }
}

/// Count leaf nodes `depth` plies below the position.
pub fn perft(board: &Board, who: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(board, who);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in &moves {
        let child = board.with_move(who, mv);
        nodes += perft(&child, who.opposite(), depth - 1);
    }
    nodes
}

/// Full perft with per-move-type breakdown. Move types are tallied for the
/// moves played at the final ply, matching the published reference tables.
pub fn perft_full(board: &Board, who: Color, depth: u32) -> PerftCounters {
    let mut counters = PerftCounters::default();
    if depth == 0 {
        counters.nodes = 1;
        return counters;
    }

    let moves = generate_legal_moves(board, who);
    for &mv in &moves {
        if depth == 1 {
            counters.nodes += 1;
            if mv.is_any_capturing() {
                counters.captures += 1;
            }
            if mv.is_en_passant() {
                counters.en_passants += 1;
            }
            if mv.is_castling() {
                counters.castles += 1;
            }
            if mv.is_promoting() {
                counters.promotions += 1;
            }
        } else {
            let child = board.with_move(who, mv);
            counters.add(&perft_full(&child, who.opposite(), depth - 1));
        }
    }
    counters
}

/// Per-root-move node counts, the standard tool for localizing a generator
/// discrepancy.
pub fn perft_divide(board: &Board, who: Color, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();

    for &mv in &generate_legal_moves(board, who) {
        let child = board.with_move(who, mv);
        let nodes = if depth <= 1 {
            1
        } else {
            perft(&child, who.opposite(), depth - 1)
        };
        results.push((mv.to_string(), nodes));
    }

    results
}
