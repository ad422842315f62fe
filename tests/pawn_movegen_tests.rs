use acumen::board::Board;
use acumen::moves::generate::generate_all_potential_moves;
use acumen::moves::move_parse;
use acumen::piece::{Color, Piece};

#[test]
fn double_advance_needs_both_squares_empty() {
    // White pawn on its starting rank with d3 blocked
    let board = Board::from_fen("4k3/8/8/8/8/3n4/3P4/4K3 w - - 0 1").unwrap();
    let moves = generate_all_potential_moves(&board, Color::White);
    assert!(!moves.iter().any(|mv| mv.to_string() == "d2 d3"));
    assert!(!moves.iter().any(|mv| mv.to_string() == "d2 d4"));

    // d3 open but d4 blocked: single advance only
    let board = Board::from_fen("4k3/8/8/8/3n4/8/3P4/4K3 w - - 0 1").unwrap();
    let moves = generate_all_potential_moves(&board, Color::White);
    assert!(moves.iter().any(|mv| mv.to_string() == "d2 d3"));
    assert!(!moves.iter().any(|mv| mv.to_string() == "d2 d4"));

    // black pawns advance from row 1 the same way
    let board = Board::from_fen("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    let moves = generate_all_potential_moves(&board, Color::Black);
    assert!(moves.iter().any(|mv| mv.to_string() == "d7 d5"));
    assert!(moves.iter().any(|mv| mv.to_string() == "d7 d6"));
}

#[test]
fn pawns_only_capture_opposing_pieces() {
    let board = Board::from_fen("4k3/8/8/8/8/2n1N3/3P4/4K3 w - - 0 1").unwrap();
    let moves = generate_all_potential_moves(&board, Color::White);

    assert!(moves.iter().any(|mv| mv.to_string() == "d2xc3"));
    assert!(!moves.iter().any(|mv| mv.src().to_string() == "d2"
        && mv.dst().to_string() == "e3"));
}

#[test]
fn promotion_emits_exactly_four_variants() {
    let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = generate_all_potential_moves(&board, Color::White);

    let promotions: Vec<_> = moves
        .iter()
        .filter(|mv| mv.src().to_string() == "a7")
        .collect();
    assert_eq!(promotions.len(), 4);
    assert!(promotions.iter().all(|mv| mv.is_promoting()));

    let types: Vec<Piece> = promotions
        .iter()
        .map(|mv| mv.promoted_piece().piece_type())
        .collect();
    // queen first in the ordering, knight last
    assert_eq!(
        types,
        vec![Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight]
    );
}

#[test]
fn capture_promotions_also_come_in_four_variants() {
    // a7 pawn can push to a8 or take the rook on b8: eight promoting moves
    let board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = generate_all_potential_moves(&board, Color::White);

    let promotions: Vec<_> = moves
        .iter()
        .filter(|mv| mv.src().to_string() == "a7")
        .collect();
    assert_eq!(promotions.len(), 8);
    assert_eq!(
        promotions.iter().filter(|mv| mv.is_any_capturing()).count(),
        4
    );
}

#[test]
fn en_passant_window_opens_and_is_generated() {
    // 1. e4 d5 2. e5 f5 leaves Black vulnerable on f6
    let mut board = Board::from_default_position();
    for (text, who) in [
        ("e2 e4", Color::White),
        ("d7 d5", Color::Black),
        ("e4 e5", Color::White),
        ("f7 f5", Color::Black),
    ] {
        board = board.with_move(who, move_parse(text, who).unwrap());
    }

    let target = board.en_passant_target().unwrap();
    assert_eq!(target.coord.to_string(), "f6");
    assert_eq!(target.vulnerable_color, Color::Black);

    let moves = generate_all_potential_moves(&board, Color::White);
    let en_passant = moves
        .iter()
        .find(|mv| mv.is_en_passant())
        .expect("en passant move generated");
    assert_eq!(en_passant.to_string(), "e5 f6 ep");
}

#[test]
fn en_passant_requires_the_adjacent_column() {
    // the double advance happened on the h-file; a pawn on e5 is too far
    let mut board = Board::from_default_position();
    for (text, who) in [
        ("e2 e4", Color::White),
        ("d7 d5", Color::Black),
        ("e4 e5", Color::White),
        ("h7 h5", Color::Black),
    ] {
        board = board.with_move(who, move_parse(text, who).unwrap());
    }

    let moves = generate_all_potential_moves(&board, Color::White);
    assert!(!moves.iter().any(|mv| mv.is_en_passant()));
}

#[test]
fn en_passant_window_expires_after_one_move() {
    let mut board = Board::from_default_position();
    for (text, who) in [
        ("e2 e4", Color::White),
        ("d7 d5", Color::Black),
        ("e4 e5", Color::White),
        ("f7 f5", Color::Black),
        // White declines the capture
        ("g1 f3", Color::White),
        ("g8 f6", Color::Black),
    ] {
        board = board.with_move(who, move_parse(text, who).unwrap());
    }

    let moves = generate_all_potential_moves(&board, Color::White);
    assert!(!moves.iter().any(|mv| mv.is_en_passant()));
}
