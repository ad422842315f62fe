use acumen::board::Board;
use acumen::game::{Game, GameStatus};
use acumen::material::CheckmateIsPossible;

#[test]
fn fresh_game_is_in_play() {
    let game = Game::new_standard();
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn checkmate_is_reported_for_the_side_to_move() {
    let game =
        Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(game.status(), GameStatus::Checkmate);
}

#[test]
fn stalemate_is_reported_for_the_side_to_move() {
    let game = Game::from_fen("k7/8/1Q6/8/8/8/8/2K5 b - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::Stalemate);
}

#[test]
fn fifty_moves_without_progress_is_a_draw() {
    let game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 100 80").unwrap();
    assert_eq!(game.status(), GameStatus::FiftyMovesWithoutProgressDraw);

    let game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 150 110").unwrap();
    assert_eq!(
        game.status(),
        GameStatus::SeventyFiveMovesWithoutProgressDraw
    );
}

#[test]
fn threefold_repetition_becomes_a_draw() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();

    for _ in 0..2 {
        for input in ["g1 f1", "g8 f8", "f1 g1", "f8 g8"] {
            assert_eq!(game.status(), GameStatus::Playing);
            game.parse_and_make_move(input).unwrap();
        }
    }
    assert_eq!(game.status(), GameStatus::ThreefoldRepetitionDraw);
}

#[test]
fn insufficient_material_scenarios() {
    // bare kings
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::No
    );

    // king + bishop vs king
    let board = Board::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::No
    );

    // king + knight vs king
    let board = Board::from_fen("4k3/8/8/8/8/8/8/2N1K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::No
    );

    // bishops on the same square color cannot construct a mate
    let board = Board::from_fen("2b1k3/8/8/8/8/8/8/1B2K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::No
    );

    // bishops on opposite colors can
    let board = Board::from_fen("1b2k3/8/8/8/8/8/8/1B2K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::Yes
    );

    // two knights can still construct a (helped) mate
    let board = Board::from_fen("4k3/8/8/8/8/8/8/1NN1K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::Yes
    );

    // a pawn is always enough to play on
    let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    assert_eq!(
        board.material().checkmate_is_possible(&board),
        CheckmateIsPossible::Yes
    );
}

#[test]
fn insufficient_material_is_reported_as_a_draw() {
    let game = Game::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::InsufficientMaterialDraw);
}
