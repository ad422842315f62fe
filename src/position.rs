//! Piece-square positional scoring.
//!
//! Each piece contributes a small bonus or penalty depending on where it
//! stands, accumulated per color and updated incrementally as moves apply.
//! The tables are written from White's point of view; Black positions are
//! mirrored before lookup.

use crate::board::Board;
use crate::coord::{
    Coord, KING_ROOK_COLUMN, KINGSIDE_CASTLED_ROOK_COLUMN, LAST_COLUMN, LAST_ROW,
    QUEEN_ROOK_COLUMN, QUEENSIDE_CASTLED_ROOK_COLUMN, all_coords, castling_row_for_color,
};
use crate::moves::types::{Move, MoveCategory};
use crate::piece::{Color, ColoredPiece, NUM_PLAYERS, Piece};

const POSITION_SCORE_SCALE: i32 = 10;

#[rustfmt::skip]
const PAWN_POSITIONS: [[i32; 8]; 8] = [
    [  0,  0,  0,  0,  0,  0,  0,  0 ],
    [  9,  9,  9,  9,  9,  9,  9,  9 ],
    [  2,  2,  4,  6,  6,  4,  2,  2 ],
    [  1,  1,  2,  5,  5,  2,  1,  1 ],
    [  0,  0,  0,  4,  4,  0,  0,  0 ],
    [  1, -1, -2,  0,  0,  2, -1,  1 ],
    [  1,  2,  2, -4, -4,  2,  2,  1 ],
    [  0,  0,  0,  0,  0,  0,  0,  0 ],
];

#[rustfmt::skip]
const KNIGHT_POSITIONS: [[i32; 8]; 8] = [
    [ -9, -8, -6, -6, -6, -6, -8, -9 ],
    [ -8, -4,  0,  0,  0,  0, -4, -8 ],
    [ -6,  0,  2,  3,  3,  2,  0, -6 ],
    [ -6,  1,  3,  4,  4,  3,  1, -6 ],
    [ -6,  0,  3,  4,  4,  3,  0, -6 ],
    [ -6,  1,  2,  3,  3,  2,  1, -6 ],
    [ -8, -4,  0,  1,  1,  0, -4, -8 ],
    [ -9, -8, -6, -6, -6, -6, -8, -9 ],
];

#[rustfmt::skip]
const BISHOP_POSITIONS: [[i32; 8]; 8] = [
    [ -4, -2, -2, -2, -2, -2, -2, -2 ],
    [ -2,  0,  0,  0,  0,  0,  0, -2 ],
    [ -2,  0,  1,  2,  2,  1,  0, -2 ],
    [ -2,  0,  1,  2,  2,  1,  1, -2 ],
    [ -2,  0,  2,  2,  2,  2,  0, -2 ],
    [ -2,  2,  2,  2,  2,  2,  2, -2 ],
    [ -2,  1,  0,  0,  0,  0,  1, -2 ],
    [ -4, -2, -2, -2, -2, -2, -2, -2 ],
];

#[rustfmt::skip]
const ROOK_POSITIONS: [[i32; 8]; 8] = [
    [  0,  0,  0,  0,  0,  0,  0,  0 ],
    [  1,  2,  2,  2,  2,  2,  2,  1 ],
    [ -1,  0,  0,  0,  0,  0,  0, -1 ],
    [ -1,  0,  0,  0,  0,  0,  0, -1 ],
    [ -1,  0,  0,  0,  0,  0,  0, -1 ],
    [ -1,  0,  0,  0,  0,  0,  0, -1 ],
    [ -1,  0,  0,  0,  0,  0,  0, -1 ],
    [  0,  0,  0,  1,  1,  0,  0,  0 ],
];

#[rustfmt::skip]
const QUEEN_POSITIONS: [[i32; 8]; 8] = [
    [ -4, -2, -2, -1, -1, -2, -2, -4 ],
    [ -2,  0,  0,  0,  0,  0,  0, -2 ],
    [ -2,  0,  1,  1,  1,  1,  0, -2 ],
    [ -1,  0,  1,  1,  1,  1,  0, -1 ],
    [  0,  0,  1,  1,  1,  1,  0, -1 ],
    [ -2,  0,  1,  1,  1,  1,  0, -2 ],
    [ -2,  0,  1,  0,  0,  0,  0, -2 ],
    [ -4, -2, -2, -1, -1, -2, -2, -4 ],
];

#[rustfmt::skip]
const KING_POSITIONS: [[i32; 8]; 8] = [
    [ -6, -8, -8, -9, -9, -4, -4, -6 ],
    [ -6, -8, -8, -9, -9, -4, -4, -6 ],
    [ -6, -8, -8, -9, -9, -4, -4, -6 ],
    [ -6, -8, -8, -9, -9, -8, -8, -6 ],
    [ -4, -6, -6, -8, -8, -6, -6, -2 ],
    [ -2, -4, -4, -4, -4, -4, -4, -2 ],
    [  4,  4,  0,  0,  0,  0,  4,  4 ],
    [  4,  6,  2,  0,  0,  2,  6,  4 ],
];

/// Mirror a coordinate so Black reads the tables from its own side.
fn translate_position(coord: Coord, who: Color) -> Coord {
    if who == Color::White {
        return coord;
    }
    Coord::make(LAST_ROW - coord.row(), LAST_COLUMN - coord.column())
}

fn table_value(coord: Coord, who: Color, piece: ColoredPiece) -> i32 {
    let translated = translate_position(coord, who);
    let row = translated.row() as usize;
    let col = translated.column() as usize;

    match piece.piece_type() {
        Piece::Pawn => PAWN_POSITIONS[row][col],
        Piece::Knight => KNIGHT_POSITIONS[row][col],
        Piece::Bishop => BISHOP_POSITIONS[row][col],
        Piece::Rook => ROOK_POSITIONS[row][col],
        Piece::Queen => QUEEN_POSITIONS[row][col],
        Piece::King => KING_POSITIONS[row][col],
        Piece::None => panic!("Invalid color/piece: empty square has no position value"),
    }
}

/// Per-color piece-square score accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    score: [i32; NUM_PLAYERS],
}

impl Position {
    pub fn new() -> Position {
        Position::default()
    }

    /// Recompute the accumulator from scratch.
    pub fn from_board(board: &Board) -> Position {
        let mut position = Position::new();
        for coord in all_coords() {
            let piece = board.piece_at(coord);
            if !piece.is_none() {
                position.add(piece.color(), coord, piece);
            }
        }
        position
    }

    pub fn add(&mut self, who: Color, coord: Coord, piece: ColoredPiece) {
        self.score[who.index()] += table_value(coord, who, piece);
    }

    pub fn remove(&mut self, who: Color, coord: Coord, piece: ColoredPiece) {
        self.score[who.index()] -= table_value(coord, who, piece);
    }

    pub fn individual_score(&self, who: Color) -> i32 {
        self.score[who.index()]
    }

    pub fn overall_score(&self, who: Color) -> i32 {
        let raw = self.score[who.index()] - self.score[who.opposite().index()];
        raw * POSITION_SCORE_SCALE
    }

    /// Apply the positional deltas of a move: every square that changes
    /// occupancy gets its old contribution removed and its new one added.
    pub fn apply_move(
        &mut self,
        who: Color,
        src_piece: ColoredPiece,
        mv: Move,
        dst_piece: ColoredPiece,
    ) {
        let opponent = who.opposite();
        let src = mv.src();
        let dst = mv.dst();

        self.remove(who, src, src_piece);

        match mv.category() {
            MoveCategory::Default => {}
            MoveCategory::NormalCapturing => {
                self.remove(opponent, dst, dst_piece);
            }
            MoveCategory::EnPassant => {
                let taken_coord = Coord::make(src.row(), dst.column());
                let taken_pawn = ColoredPiece::make(opponent, Piece::Pawn);
                self.remove(opponent, taken_coord, taken_pawn);
            }
            MoveCategory::Castling => {
                let row = castling_row_for_color(who);
                let (rook_src_col, rook_dst_col) = if mv.is_castling_kingside() {
                    (KING_ROOK_COLUMN, KINGSIDE_CASTLED_ROOK_COLUMN)
                } else {
                    (QUEEN_ROOK_COLUMN, QUEENSIDE_CASTLED_ROOK_COLUMN)
                };
                let rook = ColoredPiece::make(who, Piece::Rook);
                self.remove(who, Coord::make(row, rook_src_col), rook);
                self.add(who, Coord::make(row, rook_dst_col), rook);
            }
        }

        let new_piece = if mv.is_promoting() {
            mv.promoted_piece()
        } else {
            src_piece
        };
        self.add(who, dst, new_piece);
    }
}
