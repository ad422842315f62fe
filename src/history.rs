//! Repetition and progress tracking across a game and a search.
//!
//! Positions come in two flavors: committed entries for moves actually
//! played, and tentative entries pushed while the search walks a line and
//! popped (in LIFO order) as it unwinds. Both count toward repetition.

use std::collections::HashMap;

use crate::board::{Board, BoardCode};
use crate::moves::types::Move;

#[derive(Debug, Clone, Default)]
pub struct History {
    // Repetition counts for positions the game actually reached.
    committed: HashMap<BoardCode, u32>,

    // Codes pushed during search, scanned linearly; search depth keeps this
    // small.
    tentative: Vec<BoardCode>,

    // The played moves, in order, for saving games.
    moves: Vec<Move>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// A history whose first committed entry is the game's starting
    /// position.
    pub fn from_initial_board(board: &Board) -> History {
        let mut history = History::new();
        *history.committed.entry(board.code()).or_insert(0) += 1;
        history
    }

    /// Record a played move and the position it produced.
    pub fn add_position(&mut self, board: &Board, mv: Move) {
        *self.committed.entry(board.code()).or_insert(0) += 1;
        self.moves.push(mv);
    }

    pub fn add_tentative_position(&mut self, board: &Board) {
        self.tentative.push(board.code());
    }

    pub fn remove_last_tentative_position(&mut self) {
        let removed = self.tentative.pop();
        debug_assert!(removed.is_some(), "tentative history underflow");
    }

    fn occurrence_count(&self, code: BoardCode) -> u32 {
        let committed = self.committed.get(&code).copied().unwrap_or(0);
        let tentative = self.tentative.iter().filter(|&&c| c == code).count() as u32;
        committed + tentative
    }

    /// Threefold check used inside the search: counts committed *and*
    /// tentative occurrences of this position.
    pub fn is_probably_third_repetition(&self, board: &Board) -> bool {
        self.occurrence_count(board.code()) >= 3
    }

    /// Threefold check for game status: only positions actually played.
    pub fn is_third_repetition(&self, board: &Board) -> bool {
        self.committed.get(&board.code()).copied().unwrap_or(0) >= 3
    }

    pub fn is_fifth_repetition(&self, board: &Board) -> bool {
        self.committed.get(&board.code()).copied().unwrap_or(0) >= 5
    }

    pub fn has_been_fifty_moves_without_progress(board: &Board) -> bool {
        board.half_move_clock() >= 100
    }

    pub fn has_been_seventy_five_moves_without_progress(board: &Board) -> bool {
        board.half_move_clock() >= 150
    }

    /// The moves played so far, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}
