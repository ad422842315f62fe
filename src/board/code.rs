use std::fmt;

use crate::board::Board;
use crate::board::castling::CastlingEligibility;
use crate::coord::{Coord, castling_row_for_color};
use crate::hash::zobrist::{en_passant_key, piece_key, zobrist_keys};
use crate::moves::types::{Move, MoveCategory};
use crate::piece::{Color, ColoredPiece, Piece};

/// The square a pawn skipped over on a double advance, capturable en passant
/// by an adjacent opposing pawn on the immediately following move only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassantTarget {
    pub vulnerable_color: Color,
    pub coord: Coord,
}

// Metadata layout (16 bits):
//   bits 0-1   White castling ineligibility (bit 0 kingside, bit 1 queenside)
//   bits 2-3   Black castling ineligibility
//   bits 4-10  en-passant target square
//   bit  11    en-passant vulnerable color (0 = White, 1 = Black)
//   bit  12    en-passant target present
//   bit  13    side to move (0 = White, 1 = Black)
//   bits 14-15 padding
const CASTLING_BITS_PER_COLOR: u16 = 2;
const CASTLING_MASK: u16 = 0b11;
const EN_PASSANT_SQUARE_SHIFT: u16 = 4;
const EN_PASSANT_SQUARE_MASK: u16 = 0x7F;
const EN_PASSANT_COLOR_SHIFT: u16 = 11;
const EN_PASSANT_PRESENT_SHIFT: u16 = 12;
const SIDE_TO_MOVE_SHIFT: u16 = 13;

/// A position's identity: the 64-bit Zobrist hash plus 16 metadata bits
/// (castling state, en-passant target, side to move) kept alongside so that
/// repetition comparisons are exact rather than hash-trusting.
///
/// The default value describes an empty board, White to move, both sides
/// fully eligible to castle, no en-passant target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardCode {
    hash: u64,
    metadata: u16,
}

impl BoardCode {
    /// Recompute a code from scratch. The incremental updates applied during
    /// `Board::with_move` must always agree with this.
    pub fn from_board(board: &Board) -> BoardCode {
        let mut code = BoardCode::default();

        for coord in crate::coord::all_coords() {
            code.add_piece(coord, board.piece_at(coord));
        }
        code.set_castle_state(Color::White, board.castling_eligibility(Color::White));
        code.set_castle_state(Color::Black, board.castling_eligibility(Color::Black));
        match board.en_passant_target() {
            Some(target) => code.set_en_passant_target(target.vulnerable_color, target.coord),
            None => code.clear_en_passant_target(),
        }
        code.set_current_turn(board.current_turn());

        code
    }

    #[inline(always)]
    pub fn hash_code(&self) -> u64 {
        self.hash
    }

    /// XOR a piece in or out of the hash. The empty sentinel is a no-op, so
    /// add/remove are the same operation.
    #[inline(always)]
    pub(crate) fn add_piece(&mut self, coord: Coord, piece: ColoredPiece) {
        if !piece.is_none() {
            self.hash ^= piece_key(piece, coord.index());
        }
    }

    #[inline(always)]
    pub(crate) fn remove_piece(&mut self, coord: Coord, piece: ColoredPiece) {
        self.add_piece(coord, piece);
    }

    pub fn castle_state(&self, who: Color) -> CastlingEligibility {
        let shift = who.index() as u16 * CASTLING_BITS_PER_COLOR;
        CastlingEligibility::from_bits(((self.metadata >> shift) & CASTLING_MASK) as u8)
    }

    pub(crate) fn set_castle_state(&mut self, who: Color, new_state: CastlingEligibility) {
        let old_state = self.castle_state(who);
        let changed = old_state.bits() ^ new_state.bits();

        let keys = zobrist_keys();
        let key_base = who.index() * 2;
        if changed & CastlingEligibility::KINGSIDE_INELIGIBLE.bits() != 0 {
            self.hash ^= keys.castling[key_base];
        }
        if changed & CastlingEligibility::QUEENSIDE_INELIGIBLE.bits() != 0 {
            self.hash ^= keys.castling[key_base + 1];
        }

        let shift = who.index() as u16 * CASTLING_BITS_PER_COLOR;
        self.metadata &= !(CASTLING_MASK << shift);
        self.metadata |= (new_state.bits() as u16) << shift;
    }

    pub fn en_passant_target(&self) -> Option<EnPassantTarget> {
        if self.metadata & (1 << EN_PASSANT_PRESENT_SHIFT) == 0 {
            return None;
        }
        let square = ((self.metadata >> EN_PASSANT_SQUARE_SHIFT) & EN_PASSANT_SQUARE_MASK) as u8;
        let vulnerable_color = if self.metadata & (1 << EN_PASSANT_COLOR_SHIFT) != 0 {
            Color::Black
        } else {
            Color::White
        };
        Some(EnPassantTarget {
            vulnerable_color,
            coord: Coord::from_index(square),
        })
    }

    pub(crate) fn set_en_passant_target(&mut self, vulnerable_color: Color, coord: Coord) {
        self.clear_en_passant_target();

        self.hash ^= en_passant_key(vulnerable_color, coord.index());
        self.metadata |= (coord.index() as u16) << EN_PASSANT_SQUARE_SHIFT;
        if vulnerable_color == Color::Black {
            self.metadata |= 1 << EN_PASSANT_COLOR_SHIFT;
        }
        self.metadata |= 1 << EN_PASSANT_PRESENT_SHIFT;
    }

    pub(crate) fn clear_en_passant_target(&mut self) {
        if let Some(target) = self.en_passant_target() {
            self.hash ^= en_passant_key(target.vulnerable_color, target.coord.index());
            let clear_mask = (EN_PASSANT_SQUARE_MASK << EN_PASSANT_SQUARE_SHIFT)
                | (1 << EN_PASSANT_COLOR_SHIFT)
                | (1 << EN_PASSANT_PRESENT_SHIFT);
            self.metadata &= !clear_mask;
        }
    }

    pub fn current_turn(&self) -> Color {
        if self.metadata & (1 << SIDE_TO_MOVE_SHIFT) != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub(crate) fn set_current_turn(&mut self, who: Color) {
        assert!(who.is_valid());
        if self.current_turn() != who {
            self.hash ^= zobrist_keys().side_to_move;
            self.metadata ^= 1 << SIDE_TO_MOVE_SHIFT;
        }
    }

    /// Apply the piece movements of `mv` to the hash, reading the pre-move
    /// occupancy from `board`. Castling state, en-passant target and side to
    /// move are updated separately by their setters.
    pub(crate) fn apply_move(&mut self, board: &Board, mv: Move) {
        let src = mv.src();
        let dst = mv.dst();

        let src_piece = board.piece_at(src);
        let src_color = src_piece.color();

        match mv.category() {
            MoveCategory::Castling => {
                let row = castling_row_for_color(src_color);
                let (rook_src_col, rook_dst_col) = if mv.is_castling_kingside() {
                    (
                        crate::coord::KING_ROOK_COLUMN,
                        crate::coord::KINGSIDE_CASTLED_ROOK_COLUMN,
                    )
                } else {
                    (
                        crate::coord::QUEEN_ROOK_COLUMN,
                        crate::coord::QUEENSIDE_CASTLED_ROOK_COLUMN,
                    )
                };
                let rook = ColoredPiece::make(src_color, Piece::Rook);
                self.remove_piece(Coord::make(row, rook_src_col), rook);
                self.add_piece(Coord::make(row, rook_dst_col), rook);
            }
            MoveCategory::EnPassant => {
                let taken_coord = Coord::make(src.row(), dst.column());
                let taken_pawn = ColoredPiece::make(src_color.opposite(), Piece::Pawn);
                self.remove_piece(taken_coord, taken_pawn);
            }
            MoveCategory::NormalCapturing => {
                self.remove_piece(dst, board.piece_at(dst));
            }
            MoveCategory::Default => {}
        }

        self.remove_piece(src, src_piece);
        if mv.is_promoting() {
            debug_assert_eq!(src_piece.piece_type(), Piece::Pawn);
            self.add_piece(dst, mv.promoted_piece());
        } else {
            self.add_piece(dst, src_piece);
        }
    }
}

impl fmt::Display for BoardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}:{:04x}", self.hash, self.metadata)
    }
}
