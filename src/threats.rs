//! Threat detection: is a given square attacked by the opposing side?
//!
//! Used for check detection, checkmate/stalemate tests, and castling
//! legality, so every lane short-circuits as soon as an answer is known.
//! Sliding threats walk outward from the square and stop at the first
//! occupied square; the other lanes are constant-time probes.

use crate::board::Board;
use crate::coord::{
    Coord, LAST_COLUMN, LAST_ROW, is_valid_column, is_valid_row, next_column, next_row,
};
use crate::piece::{Color, ColoredPiece, Piece, pawn_direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThreatStatus {
    None,
    Blocked,
    Threatened,
}

struct Threats<'a> {
    board: &'a Board,
    opponent: Color,
    king_color: Color,
    king_row: i8,
    king_col: i8,
}

/// True iff any piece of the opposing color attacks `king_coord`. The square
/// is tested as-is, regardless of what stands on it, which lets castling
/// legality probe transit squares with the same oracle.
pub fn is_king_threatened(board: &Board, who: Color, king_coord: Coord) -> bool {
    is_king_threatened_at(board, who, king_coord.row(), king_coord.column())
}

pub fn is_king_threatened_at(board: &Board, who: Color, row: i8, col: i8) -> bool {
    let threats = Threats {
        board,
        opponent: who.opposite(),
        king_color: who,
        king_row: row,
        king_col: col,
    };
    threats.check_all()
}

impl Threats<'_> {
    fn check_all(&self) -> bool {
        self.pawn()
            || self.knight()
            || self.row()
            || self.column()
            || self.diagonal()
            || self.king()
    }

    /// Classify one square along a sliding lane: a threat if it holds an
    /// opposing `sliding_piece` or queen, a blocker if it holds anything
    /// else, open otherwise.
    #[inline(always)]
    fn check_sliding_threat(&self, sliding_piece: Piece, row: i8, col: i8) -> ThreatStatus {
        let piece = self.board.piece_at_rc(row, col);
        let piece_type = piece.piece_type();

        let threatens = (piece_type == sliding_piece || piece_type == Piece::Queen)
            && piece.color() == self.opponent;
        if threatens {
            ThreatStatus::Threatened
        } else if piece_type != Piece::None {
            ThreatStatus::Blocked
        } else {
            ThreatStatus::None
        }
    }

    fn row(&self) -> bool {
        for direction in [-1, 1] {
            let mut col = next_column(self.king_col, direction);
            while is_valid_column(col) {
                match self.check_sliding_threat(Piece::Rook, self.king_row, col) {
                    ThreatStatus::Threatened => return true,
                    ThreatStatus::Blocked => break,
                    ThreatStatus::None => {}
                }
                col = next_column(col, direction);
            }
        }
        false
    }

    fn column(&self) -> bool {
        for direction in [-1, 1] {
            let mut row = next_row(self.king_row, direction);
            while is_valid_row(row) {
                match self.check_sliding_threat(Piece::Rook, row, self.king_col) {
                    ThreatStatus::Threatened => return true,
                    ThreatStatus::Blocked => break,
                    ThreatStatus::None => {}
                }
                row = next_row(row, direction);
            }
        }
        false
    }

    fn diagonal(&self) -> bool {
        for row_direction in [-1, 1] {
            for col_direction in [-1, 1] {
                let mut row = next_row(self.king_row, row_direction);
                let mut col = next_column(self.king_col, col_direction);
                while is_valid_row(row) && is_valid_column(col) {
                    match self.check_sliding_threat(Piece::Bishop, row, col) {
                        ThreatStatus::Threatened => return true,
                        ThreatStatus::Blocked => break,
                        ThreatStatus::None => {}
                    }
                    row = next_row(row, row_direction);
                    col = next_column(col, col_direction);
                }
            }
        }
        false
    }

    fn knight(&self) -> bool {
        const OFFSETS: [(i8, i8); 8] = [
            (-2, -1),
            (-2, 1),
            (-1, -2),
            (-1, 2),
            (1, -2),
            (1, 2),
            (2, -1),
            (2, 1),
        ];

        let opponent_knight = ColoredPiece::make(self.opponent, Piece::Knight);
        for (row_offset, col_offset) in OFFSETS {
            let row = self.king_row + row_offset;
            let col = self.king_col + col_offset;
            if is_valid_row(row)
                && is_valid_column(col)
                && self.board.piece_at_rc(row, col) == opponent_knight
            {
                return true;
            }
        }
        false
    }

    fn pawn(&self) -> bool {
        // Opposing pawns attack from the row the king's own pawns would
        // advance to.
        let target_row = self.king_row + pawn_direction(self.king_color);
        if !is_valid_row(target_row) {
            return false;
        }

        let opponent_pawn = ColoredPiece::make(self.opponent, Piece::Pawn);
        for col_offset in [-1, 1] {
            let col = self.king_col + col_offset;
            if is_valid_column(col) && self.board.piece_at_rc(target_row, col) == opponent_pawn {
                return true;
            }
        }
        false
    }

    fn king(&self) -> bool {
        let opponent_king = ColoredPiece::make(self.opponent, Piece::King);
        let low_row = (self.king_row - 1).max(0);
        let high_row = (self.king_row + 1).min(LAST_ROW);
        let low_col = (self.king_col - 1).max(0);
        let high_col = (self.king_col + 1).min(LAST_COLUMN);

        for row in low_row..=high_row {
            for col in low_col..=high_col {
                if (row, col) == (self.king_row, self.king_col) {
                    continue;
                }
                if self.board.piece_at_rc(row, col) == opponent_king {
                    return true;
                }
            }
        }
        false
    }
}
