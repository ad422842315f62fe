use super::*;
use crate::material::Material;
use crate::moves::move_parse;
use crate::position::Position;

fn mv(text: &str, who: Color) -> Move {
    move_parse(text, who).unwrap()
}

#[test]
fn default_position_state() {
    let board = Board::from_default_position();

    assert_eq!(board.current_turn(), Color::White);
    assert_eq!(board.half_move_clock(), 0);
    assert_eq!(board.full_move_clock(), 1);
    assert_eq!(board.king_position(Color::White), "e1".parse().unwrap());
    assert_eq!(board.king_position(Color::Black), "e8".parse().unwrap());
    assert_eq!(
        board.castling_eligibility(Color::White),
        CastlingEligibility::EITHER_SIDE_ELIGIBLE
    );
    assert!(board.en_passant_target().is_none());
    assert_eq!(board.material().overall_score(Color::White), 0);
    assert_eq!(board.position().overall_score(Color::White), 0);
}

#[test]
fn with_move_flips_the_turn_and_keeps_tallies_consistent() {
    let board = Board::from_default_position();
    let next = board.with_move(Color::White, mv("e2 e4", Color::White));

    assert_eq!(next.current_turn(), Color::Black);
    assert_eq!(next.code(), BoardCode::from_board(&next));
    assert_eq!(*next.material(), Material::from_board(&next));
    assert_eq!(*next.position(), Position::from_board(&next));

    // the original is untouched
    assert_eq!(board.current_turn(), Color::White);
    assert!(board.piece_at("e2".parse().unwrap()).piece_type() == Piece::Pawn);
}

#[test]
fn double_pawn_advance_sets_en_passant_target() {
    let board = Board::from_default_position();
    let next = board.with_move(Color::White, mv("e2 e4", Color::White));

    let target = next.en_passant_target().unwrap();
    assert_eq!(target.coord, "e3".parse().unwrap());
    assert_eq!(target.vulnerable_color, Color::White);
    assert!(next.is_en_passant_vulnerable(Color::White));
    assert!(!next.is_en_passant_vulnerable(Color::Black));

    // expires after the reply
    let after_reply = next.with_move(Color::Black, mv("g8 f6", Color::Black));
    assert!(after_reply.en_passant_target().is_none());
}

#[test]
fn half_move_clock_resets_on_pawn_moves_and_captures() {
    let board = Board::from_default_position();
    let board = board.with_move(Color::White, mv("g1 f3", Color::White));
    assert_eq!(board.half_move_clock(), 1);

    let board = board.with_move(Color::Black, mv("d7 d5", Color::Black));
    assert_eq!(board.half_move_clock(), 0);
    assert_eq!(board.full_move_clock(), 2);

    let board = board.with_move(Color::White, mv("f3 e5", Color::White));
    assert_eq!(board.half_move_clock(), 1);

    let board = board.with_move(Color::Black, mv("b8 c6", Color::Black));
    assert_eq!(board.half_move_clock(), 2);

    let board = board.with_move(Color::White, mv("e5xc6", Color::White));
    assert_eq!(board.half_move_clock(), 0);
}

#[test]
fn moving_the_king_loses_both_castling_sides() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let next = board.with_move(Color::White, mv("e1 e2", Color::White));

    assert_eq!(
        next.castling_eligibility(Color::White),
        CastlingEligibility::NEITHER_SIDE_ELIGIBLE
    );
    assert_eq!(
        next.castling_eligibility(Color::Black),
        CastlingEligibility::EITHER_SIDE_ELIGIBLE
    );
    assert_eq!(next.king_position(Color::White), "e2".parse().unwrap());
}

#[test]
fn rook_moves_lose_one_castling_side() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let next = board.with_move(Color::White, mv("a1 a2", Color::White));
    assert!(!next.castling_eligibility(Color::White).can_castle_queenside());
    assert!(next.castling_eligibility(Color::White).can_castle_kingside());

    let next = board.with_move(Color::White, mv("h1 h2", Color::White));
    assert!(next.castling_eligibility(Color::White).can_castle_queenside());
    assert!(!next.castling_eligibility(Color::White).can_castle_kingside());
}

#[test]
fn capturing_a_home_rook_loses_the_opponents_side() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/6n1/R3K2R b KQkq - 0 1").unwrap();
    let next = board.with_move(Color::Black, mv("g2xh1", Color::Black));

    assert!(!next.castling_eligibility(Color::White).can_castle_kingside());
    assert!(next.castling_eligibility(Color::White).can_castle_queenside());
}

#[test]
fn castling_moves_king_and_rook_together() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let kingside = board.with_move(Color::White, mv("o-o", Color::White));
    assert_eq!(
        kingside.piece_at("g1".parse().unwrap()),
        ColoredPiece::make(Color::White, Piece::King)
    );
    assert_eq!(
        kingside.piece_at("f1".parse().unwrap()),
        ColoredPiece::make(Color::White, Piece::Rook)
    );
    assert!(kingside.piece_at("e1".parse().unwrap()).is_none());
    assert!(kingside.piece_at("h1".parse().unwrap()).is_none());
    assert_eq!(
        kingside.castling_eligibility(Color::White),
        CastlingEligibility::NEITHER_SIDE_ELIGIBLE
    );
    assert_eq!(kingside.code(), BoardCode::from_board(&kingside));

    let queenside = board.with_move(Color::White, mv("o-o-o", Color::White));
    assert_eq!(
        queenside.piece_at("c1".parse().unwrap()),
        ColoredPiece::make(Color::White, Piece::King)
    );
    assert_eq!(
        queenside.piece_at("d1".parse().unwrap()),
        ColoredPiece::make(Color::White, Piece::Rook)
    );
    assert_eq!(queenside.code(), BoardCode::from_board(&queenside));
}

#[test]
fn en_passant_removes_the_bypassing_pawn() {
    let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let next = board.with_move(Color::White, mv("e5 d6 ep", Color::White));

    assert_eq!(
        next.piece_at("d6".parse().unwrap()),
        ColoredPiece::make(Color::White, Piece::Pawn)
    );
    assert!(next.piece_at("d5".parse().unwrap()).is_none());
    assert!(next.piece_at("e5".parse().unwrap()).is_none());
    assert_eq!(next.material().piece_count(Color::Black, Piece::Pawn), 0);
    assert_eq!(next.code(), BoardCode::from_board(&next));
    assert_eq!(*next.material(), Material::from_board(&next));
    assert_eq!(*next.position(), Position::from_board(&next));
}

#[test]
fn promotion_swaps_the_pawn_for_the_chosen_piece() {
    let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let next = board.with_move(Color::White, mv("a7 a8(Q)", Color::White));

    assert_eq!(
        next.piece_at("a8".parse().unwrap()),
        ColoredPiece::make(Color::White, Piece::Queen)
    );
    assert_eq!(next.material().piece_count(Color::White, Piece::Pawn), 0);
    assert_eq!(next.material().piece_count(Color::White, Piece::Queen), 1);
    assert_eq!(next.code(), BoardCode::from_board(&next));
    assert_eq!(*next.material(), Material::from_board(&next));
}

#[test]
fn fen_output_round_trips() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.to_fen_string(Color::White), fen);
}
