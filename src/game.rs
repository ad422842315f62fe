//! The game facade: a current board, its history, player assignments, and
//! the engine configuration used to pick computer moves.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use crate::board::{Board, BoardBuilder};
use crate::coord::Coord;
use crate::error::{FenError, GameLoadError, MoveParseError};
use crate::evaluate::{evaluate, is_checkmated, is_stalemated, MIN_DRAW_SCORE};
use crate::history::History;
use crate::logger::Logger;
use crate::material::CheckmateIsPossible;
use crate::moves::generate::{generate_legal_moves, map_coordinates_to_move};
use crate::moves::notation::move_parse;
use crate::moves::types::{Move, MoveList};
use crate::piece::{Color, NUM_PLAYERS, Piece};
use crate::search::{IterativeSearch, MoveTimer, PeriodicFunction, TranspositionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Human,
    ChessEngine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    ThreefoldRepetitionDraw,
    FivefoldRepetitionDraw,
    FiftyMovesWithoutProgressDraw,
    SeventyFiveMovesWithoutProgressDraw,
    InsufficientMaterialDraw,
}

pub const DEFAULT_MAX_DEPTH: i32 = 7;
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(4);

pub struct Game {
    current_board: Board,
    history: History,
    players: [Player; NUM_PLAYERS],
    transposition_table: TranspositionTable,
    max_depth: i32,
    search_timeout: Duration,
    periodic_function: Option<PeriodicFunction>,
}

impl Game {
    pub fn new_standard() -> Game {
        Game::from_board(Board::from_default_position())
    }

    pub fn from_board(board: Board) -> Game {
        let history = History::from_initial_board(&board);
        Game {
            current_board: board,
            history,
            players: [Player::Human, Player::ChessEngine],
            transposition_table: TranspositionTable::new_default(),
            max_depth: DEFAULT_MAX_DEPTH,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            periodic_function: None,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        Ok(Game::from_board(Board::from_fen(fen)?))
    }

    pub fn from_builder(builder: &BoardBuilder) -> Result<Game, crate::error::BoardBuilderError> {
        Ok(Game::from_board(builder.build()?))
    }

    pub fn board(&self) -> &Board {
        &self.current_board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_turn(&self) -> Color {
        self.current_board.current_turn()
    }

    pub fn set_current_turn(&mut self, who: Color) {
        self.current_board = self.current_board.with_current_turn(who);
    }

    pub fn player(&self, color: Color) -> Player {
        self.players[color.index()]
    }

    pub fn current_player(&self) -> Player {
        self.player(self.current_turn())
    }

    pub fn set_player(&mut self, color: Color, player: Player) {
        self.players[color.index()] = player;
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: i32) {
        self.max_depth = max_depth;
    }

    pub fn search_timeout(&self) -> Duration {
        self.search_timeout
    }

    pub fn set_search_timeout(&mut self, timeout: Duration) {
        self.search_timeout = timeout;
    }

    pub fn set_periodic_function(&mut self, periodic_function: PeriodicFunction) {
        self.periodic_function = Some(periodic_function);
    }

    pub fn legal_moves(&self) -> MoveList {
        generate_legal_moves(&self.current_board, self.current_turn())
    }

    /// Apply a move for the side to move. The move must come from the legal
    /// move list (or `map_coordinates_to_move`).
    pub fn make_move(&mut self, mv: Move) {
        self.current_board = self.current_board.with_move(self.current_turn(), mv);
        self.history.add_position(&self.current_board, mv);
    }

    /// Resolve a source/destination pair against the current position.
    pub fn map_coordinates_to_move(
        &self,
        src: Coord,
        dst: Coord,
        promoted: Option<Piece>,
    ) -> Option<Move> {
        map_coordinates_to_move(&self.current_board, self.current_turn(), src, dst, promoted)
    }

    pub fn status(&self) -> GameStatus {
        let board = &self.current_board;
        let turn = self.current_turn();

        if is_checkmated(board, turn) {
            return GameStatus::Checkmate;
        }
        if is_stalemated(board, turn) {
            return GameStatus::Stalemate;
        }
        if self.history.is_fifth_repetition(board) {
            return GameStatus::FivefoldRepetitionDraw;
        }
        if self.history.is_third_repetition(board) {
            return GameStatus::ThreefoldRepetitionDraw;
        }
        if History::has_been_seventy_five_moves_without_progress(board) {
            return GameStatus::SeventyFiveMovesWithoutProgressDraw;
        }
        if History::has_been_fifty_moves_without_progress(board) {
            return GameStatus::FiftyMovesWithoutProgressDraw;
        }
        if board.material().checkmate_is_possible(board) == CheckmateIsPossible::No {
            return GameStatus::InsufficientMaterialDraw;
        }
        GameStatus::Playing
    }

    /// Run the iterative search for `whom` (or the side to move) and return
    /// the chosen move. `None` means the search was cancelled by the host or
    /// found no move.
    pub fn find_best_move(&mut self, logger: &dyn Logger, whom: Option<Color>) -> Option<Move> {
        let whom = whom.unwrap_or_else(|| self.current_turn());

        let mut timer = MoveTimer::new(self.search_timeout);
        if let Some(periodic_function) = &self.periodic_function {
            timer.set_periodic_function(periodic_function.clone());
        }

        let mut search = IterativeSearch::new(
            &self.current_board,
            &self.history,
            logger,
            timer,
            self.max_depth,
            &mut self.transposition_table,
        );
        let result = search.iteratively_deepen(whom);

        // If the host cancelled the search, discard the result.
        if search.is_cancelled() {
            return None;
        }
        result.mv
    }

    /// Whether the engine would rather take a draw than play on.
    pub fn computer_wants_draw(&self, who: Color) -> bool {
        evaluate(&self.current_board, who, 1) <= MIN_DRAW_SCORE
    }

    /// Save the game: `.fen` files get the single-line FEN of the current
    /// position, anything else gets one move per line ending with `stop`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;

        let is_fen = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("fen"))
            .unwrap_or(false);

        if is_fen {
            writeln!(file, "{}", self.current_board.to_fen_string(self.current_turn()))?;
        } else {
            for mv in self.history.moves() {
                writeln!(file, "{}", mv)?;
            }
            writeln!(file, "stop")?;
        }
        Ok(())
    }

    /// Load a move-per-line game file, replaying each move from the default
    /// position. Reading stops at `stop` or end of file.
    pub fn load<P: AsRef<Path>>(path: P, players: [Player; 2]) -> Result<Game, GameLoadError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut game = Game::new_standard();
        game.players = players;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == "stop" {
                break;
            }

            let parsed = move_parse(trimmed, game.current_turn()).map_err(|source| {
                GameLoadError::Move {
                    line: index + 1,
                    source,
                }
            })?;
            let mv = game
                .map_coordinates_to_move(
                    parsed.src(),
                    parsed.dst(),
                    if parsed.is_promoting() {
                        Some(parsed.promoted_piece().piece_type())
                    } else {
                        None
                    },
                )
                .ok_or_else(|| GameLoadError::IllegalMove {
                    line: index + 1,
                    notation: trimmed.to_string(),
                })?;
            game.make_move(mv);
        }

        Ok(game)
    }

    /// Parse a move string and apply it if legal. Convenience for hosts that
    /// work with raw user input.
    pub fn parse_and_make_move(&mut self, input: &str) -> Result<Move, MoveParseError> {
        let parsed = move_parse(input, self.current_turn())?;
        let mv = self
            .map_coordinates_to_move(
                parsed.src(),
                parsed.dst(),
                if parsed.is_promoting() {
                    Some(parsed.promoted_piece().piece_type())
                } else {
                    None
                },
            )
            .ok_or(MoveParseError::IllegalMove {
                notation: input.trim().to_string(),
            })?;
        self.make_move(mv);
        Ok(mv)
    }
}
