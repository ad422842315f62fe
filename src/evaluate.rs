//! Position evaluation and post-move legality.

use crate::board::{Board, CastlingEligibility};
use crate::coord::{
    KINGSIDE_CASTLED_KING_COLUMN, KINGSIDE_CASTLED_ROOK_COLUMN, QUEENSIDE_CASTLED_KING_COLUMN,
    QUEENSIDE_CASTLED_ROOK_COLUMN, castling_row_for_color, next_column,
};
use crate::moves::generate::generate_legal_moves;
use crate::moves::types::Move;
use crate::piece::{Color, ColoredPiece, Piece};
use crate::threats::{is_king_threatened, is_king_threatened_at};

pub const INFINITY: i32 = 65_536;
pub const INITIAL_ALPHA: i32 = INFINITY * 3;

/// Every non-mate evaluation falls below this threshold.
pub const MAX_NON_CHECKMATE_SCORE: i32 = INFINITY;

/// Draws score slightly negative for the side searching for a move.
pub const MIN_DRAW_SCORE: i32 = -50;

const CASTLE_PENALTY: i32 = 50;

/// Score for a checkmate discovered `moves_away` plies from the root.
/// Nearer mates score higher, so the search prefers the fastest win.
#[inline(always)]
pub fn checkmate_score_in_moves(moves_away: i32) -> i32 {
    2 * INFINITY - moves_away
}

#[inline(always)]
pub fn is_checkmating_opponent_score(score: i32) -> bool {
    score > MAX_NON_CHECKMATE_SCORE
}

/// Detect a king and rook standing on their post-castle squares. Castling
/// rights are gone once the castle has been executed, so without this the
/// eligibility penalty would punish the act of castling itself.
fn heuristic_is_castled(board: &Board, who: Color) -> bool {
    let king_pos = board.king_position(who);
    let king_row = king_pos.row();
    let king_column = king_pos.column();

    if king_row != castling_row_for_color(who) {
        return false;
    }

    let rook = ColoredPiece::make(who, Piece::Rook);
    if king_column == KINGSIDE_CASTLED_KING_COLUMN {
        board.piece_at_rc(king_row, KINGSIDE_CASTLED_ROOK_COLUMN) == rook
    } else if king_column == QUEENSIDE_CASTLED_KING_COLUMN {
        board.piece_at_rc(king_row, QUEENSIDE_CASTLED_ROOK_COLUMN) == rook
    } else {
        false
    }
}

fn unable_to_castle_penalty(board: &Board, who: Color) -> i32 {
    let castle_state = board.castling_eligibility(who);
    let mut result = 0;
    if castle_state != CastlingEligibility::EITHER_SIDE_ELIGIBLE {
        if !castle_state.can_castle_kingside() {
            result += CASTLE_PENALTY;
        }
        if !castle_state.can_castle_queenside() {
            result += CASTLE_PENALTY;
        }
        if heuristic_is_castled(board, who) {
            result -= 2 * CASTLE_PENALTY;
        }
    }
    result
}

/// Score the position from `who`'s perspective in centipawn-scaled units.
/// `moves_away` is the ply distance from the search root and only affects
/// checkmate scores.
pub fn evaluate(board: &Board, who: Color, moves_away: i32) -> i32 {
    let opponent = who.opposite();

    if is_checkmated(board, who) {
        return -checkmate_score_in_moves(moves_away);
    }
    if is_checkmated(board, opponent) {
        return checkmate_score_in_moves(moves_away);
    }

    let mut score = 0;
    score += board.material().overall_score(who);
    score += board.position().overall_score(who);

    score -= unable_to_castle_penalty(board, who);
    score += unable_to_castle_penalty(board, opponent);

    score
}

/// Terminal score for a side with no legal moves: checkmated if in check,
/// stalemated (drawn, zero) otherwise.
pub fn evaluate_without_legal_moves(board: &Board, who: Color, moves_away: i32) -> i32 {
    let king_coord = board.king_position(who);
    if is_king_threatened(board, who, king_coord) {
        -checkmate_score_in_moves(moves_away)
    } else {
        0
    }
}

pub fn is_checkmated(board: &Board, who: Color) -> bool {
    let coord = board.king_position(who);

    if !is_king_threatened(board, who, coord) {
        return false;
    }

    generate_legal_moves(board, who).is_empty()
}

pub fn is_stalemated(board: &Board, who: Color) -> bool {
    let coord = board.king_position(who);

    !is_king_threatened(board, who, coord) && generate_legal_moves(board, who).is_empty()
}

/// Check the position reached by `mv`: the mover's king must be safe, and a
/// castling king must not have passed through an attacked square.
pub fn is_legal_position_after_move(board: &Board, who: Color, mv: Move) -> bool {
    let king_coord = board.king_position(who);

    if is_king_threatened(board, who, king_coord) {
        return false;
    }

    if mv.is_castling() {
        let castled_pos = mv.dst();
        let castled_row = castled_pos.row();
        let castled_col = castled_pos.column();

        debug_assert_eq!(king_coord.row(), castled_row);
        debug_assert_eq!(king_coord.column(), castled_col);

        // Walk back toward the king's starting square.
        let direction = if mv.is_castling_kingside() { -1 } else { 1 };

        let plus_one_column = next_column(castled_col, direction);
        let plus_two_column = next_column(plus_one_column, direction);

        if is_king_threatened_at(board, who, castled_row, plus_one_column)
            || is_king_threatened_at(board, who, castled_row, plus_two_column)
        {
            return false;
        }
    }

    true
}
