use acumen::board::{Board, BoardBuilder};
use acumen::evaluate::MAX_NON_CHECKMATE_SCORE;
use acumen::history::History;
use acumen::logger::NullLogger;
use acumen::piece::{Color, Piece};
use acumen::search::{IterativeSearch, MoveTimer, SearchResult, TranspositionTable};

struct SearchHelper {
    history: History,
    logger: NullLogger,
    transposition_table: TranspositionTable,
}

impl SearchHelper {
    fn new() -> SearchHelper {
        SearchHelper {
            history: History::new(),
            logger: NullLogger,
            transposition_table: TranspositionTable::new_default(),
        }
    }

    fn deepen(&mut self, board: &Board, depth: i32, seconds: u64, side: Color) -> SearchResult {
        let timer = MoveTimer::from_seconds(seconds);
        let mut search = IterativeSearch::new(
            board,
            &self.history,
            &self.logger,
            timer,
            depth,
            &mut self.transposition_table,
        );
        search.iteratively_deepen(side)
    }
}

// Mating line: 1.Ra6 f6 2.Bxf6 Rg7 3.Rxa8#
#[test]
fn can_find_mate_in_3() {
    let mut builder = BoardBuilder::new();
    builder
        .add_pieces(
            Color::Black,
            &[
                ("a8", Piece::Rook),
                ("g8", Piece::Rook),
                ("h8", Piece::King),
                ("f7", Piece::Pawn),
                ("h7", Piece::Pawn),
            ],
        )
        .unwrap();
    builder
        .add_pieces(
            Color::White,
            &[
                ("f6", Piece::Rook),
                ("e5", Piece::Bishop),
                ("h2", Piece::Pawn),
                ("h1", Piece::King),
            ],
        )
        .unwrap();
    let board = builder.build().unwrap();

    let mut helper = SearchHelper::new();
    let result = helper.deepen(&board, 6, 600, Color::White);

    assert!(result.mv.is_some());
    assert!(
        result.score > MAX_NON_CHECKMATE_SCORE,
        "expected a mate score, got {}",
        result.score
    );
}

// Mating lines: ... Rd4+ 2. Ke5 f6#  and  ... Bb7+ 2. Ke5 Re4#
#[test]
fn can_find_mate_in_2_and_a_half() {
    let board = Board::from_fen("4n3/2k2p2/p5p1/2pK4/1r6/1n6/8/8 b - - 0 1").unwrap();

    let mut helper = SearchHelper::new();
    let result = helper.deepen(&board, 6, 600, Color::Black);

    assert!(result.mv.is_some());
    assert!(result.score > MAX_NON_CHECKMATE_SCORE);
}

#[test]
fn takes_the_hanging_queen() {
    // depth 1 is enough to grab free material
    let board = Board::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();

    let mut helper = SearchHelper::new();
    let result = helper.deepen(&board, 1, 600, Color::White);

    let best = result.mv.expect("a move was found");
    assert_eq!(best.to_string(), "e4xd5");
}

#[test]
fn prefers_the_faster_mate() {
    // back-rank position with mate-in-1 available
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();

    let mut helper = SearchHelper::new();
    let result = helper.deepen(&board, 6, 600, Color::White);

    let best = result.mv.expect("a move was found");
    assert_eq!(best.to_string(), "a1 a8");
    assert!(result.score > MAX_NON_CHECKMATE_SCORE);
}

#[test]
fn repeated_position_scores_as_a_draw_for_the_searcher() {
    // Only shuffle moves available; searching with a history that already
    // saw this position twice treats the root as drawish, but a move is
    // still produced.
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();

    let mut history = History::from_initial_board(&board);
    history.add_tentative_position(&board);

    let logger = NullLogger;
    let mut tt = TranspositionTable::new_default();
    let timer = MoveTimer::from_seconds(30);
    let mut search = IterativeSearch::new(&board, &history, &logger, timer, 3, &mut tt);
    let result = search.iteratively_deepen(Color::White);

    assert!(result.mv.is_some());
}
