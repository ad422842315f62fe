//! `with_move` end-to-end: every incremental tally must match a recompute
//! for arbitrary legal play.

use acumen::board::{Board, BoardCode};
use acumen::material::Material;
use acumen::moves::generate::generate_legal_moves;
use acumen::piece::{Color, Piece};
use acumen::position::Position;

/// Walk the legal move tree a couple of plies deep, checking all board
/// invariants at every node.
fn check_tree(board: &Board, who: Color, depth: u32) {
    for &mv in &generate_legal_moves(board, who) {
        let child = board.with_move(who, mv);

        // side to move flips
        assert_eq!(child.current_turn(), who.opposite());

        // exactly one king per color, where the board says it is
        for &color in &[Color::White, Color::Black] {
            let king = acumen::piece::ColoredPiece::make(color, Piece::King);
            let mut king_squares = acumen::coord::all_coords()
                .filter(|&coord| child.piece_at(coord) == king);
            let first = king_squares.next().expect("king present");
            assert!(king_squares.next().is_none(), "more than one {color} king");
            assert_eq!(child.king_position(color), first);
        }

        // incremental tallies agree with recomputation
        assert_eq!(child.code(), BoardCode::from_board(&child), "code after {mv}");
        assert_eq!(
            *child.material(),
            Material::from_board(&child),
            "material after {mv}"
        );
        assert_eq!(
            *child.position(),
            Position::from_board(&child),
            "position after {mv}"
        );

        // castling eligibility only ever shrinks
        for &color in &[Color::White, Color::Black] {
            let before = board.castling_eligibility(color).bits();
            let after = child.castling_eligibility(color).bits();
            assert_eq!(
                after & before,
                before,
                "castling eligibility regained after {mv}"
            );
        }

        if depth > 1 {
            check_tree(&child, who.opposite(), depth - 1);
        }
    }
}

#[test]
fn invariants_hold_from_the_start_position() {
    let board = Board::from_default_position();
    check_tree(&board, Color::White, 2);
}

#[test]
fn invariants_hold_from_kiwipete() {
    let board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    check_tree(&board, Color::White, 2);
}

#[test]
fn invariants_hold_in_an_en_passant_tangle() {
    let board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    check_tree(&board, Color::White, 3);
}

#[test]
fn invariants_hold_through_promotions() {
    let board =
        Board::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    check_tree(&board, Color::White, 2);
}
