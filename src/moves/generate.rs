//! Pseudo-legal move generation and the legality filter.

use std::cmp::Ordering;

use arrayvec::ArrayVec;
use once_cell::sync::Lazy;

use crate::board::Board;
use crate::board::CastlingEligibility;
use crate::coord::{
    Coord, KING_COLUMN, NUM_SQUARES, all_coords, is_valid_column, is_valid_row, next_column,
    next_row,
};
use crate::evaluate::is_legal_position_after_move;
use crate::material::Material;
use crate::moves::types::{Move, MoveList};
use crate::piece::{Color, ColoredPiece, Piece, pawn_direction};

// Promotion preference order: all else being equal the strongest piece is
// generated (and therefore searched) first.
const ALL_PROMOTABLE_PIECE_TYPES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

type KnightMoveLists = [ArrayVec<Move, 8>; NUM_SQUARES];

/// Knight moves keyed by source square, computed once at startup.
static KNIGHT_MOVES: Lazy<KnightMoveLists> = Lazy::new(|| {
    let mut lists: KnightMoveLists = std::array::from_fn(|_| ArrayVec::new());

    for coord in all_coords() {
        let row = coord.row();
        let col = coord.column();

        for (row_offset, col_offset) in [
            (-2, -1),
            (-2, 1),
            (-1, -2),
            (-1, 2),
            (1, -2),
            (1, 2),
            (2, -1),
            (2, 1),
        ] {
            let target_row = row + row_offset;
            let target_col = col + col_offset;
            if is_valid_row(target_row) && is_valid_column(target_col) {
                let dst = Coord::make(target_row, target_col);
                lists[coord.index()].push(Move::make(coord, dst));
            }
        }
    }

    lists
});

struct MoveGeneration<'a> {
    board: &'a Board,
    moves: MoveList,
    piece_row: i8,
    piece_col: i8,
    who: Color,
}

impl MoveGeneration<'_> {
    fn generate(&mut self, piece: ColoredPiece, coord: Coord) {
        self.piece_row = coord.row();
        self.piece_col = coord.column();

        match piece.piece_type() {
            Piece::None => {}
            Piece::Pawn => self.pawn(),
            Piece::Knight => self.knight(),
            Piece::Bishop => self.bishop(),
            Piece::Rook => self.rook(),
            Piece::Queen => self.queen(),
            Piece::King => self.king(),
        }
    }

    /// Append a candidate, rejecting same-color destinations and tagging
    /// captures that arrive on an occupied square.
    fn append_move(&mut self, mv: Move) {
        let src_piece = self.board.piece_at(mv.src());
        let dst_piece = self.board.piece_at(mv.dst());

        debug_assert!(!src_piece.is_none());

        if !dst_piece.is_none() && src_piece.color() == dst_piece.color() {
            return;
        }

        let transformed = if !dst_piece.is_none() && !mv.is_en_passant() && !mv.is_normal_capturing()
        {
            mv.with_capture()
        } else {
            mv
        };
        self.moves.append(transformed);
    }

    fn src(&self) -> Coord {
        Coord::make(self.piece_row, self.piece_col)
    }

    fn king(&mut self) {
        for row in (self.piece_row - 1)..=(self.piece_row + 1) {
            if !is_valid_row(row) {
                continue;
            }
            for col in (self.piece_col - 1)..=(self.piece_col + 1) {
                if !is_valid_column(col) || (row, col) == (self.piece_row, self.piece_col) {
                    continue;
                }
                self.append_move(Move::make(self.src(), Coord::make(row, col)));
            }
        }

        if self.piece_col == KING_COLUMN {
            if self
                .board
                .able_to_castle(self.who, CastlingEligibility::QUEENSIDE_INELIGIBLE)
            {
                let queenside = Move::make_castling(
                    self.src(),
                    Coord::make(self.piece_row, self.piece_col - 2),
                );
                if self.valid_castling_move(queenside) {
                    self.append_move(queenside);
                }
            }
            if self
                .board
                .able_to_castle(self.who, CastlingEligibility::KINGSIDE_INELIGIBLE)
            {
                let kingside = Move::make_castling(
                    self.src(),
                    Coord::make(self.piece_row, self.piece_col + 2),
                );
                if self.valid_castling_move(kingside) {
                    self.append_move(kingside);
                }
            }
        }
    }

    /// Every square between king and rook must be empty. Check legality is
    /// verified downstream against the resulting position.
    fn valid_castling_move(&self, mv: Move) -> bool {
        let src = mv.src();
        let dst = mv.dst();
        let direction = (dst.column() - src.column()) / 2;

        let between = self.board.piece_at_rc(src.row(), dst.column() - direction);
        let destination = self.board.piece_at_rc(src.row(), dst.column());
        if !between.is_none() || !destination.is_none() {
            return false;
        }

        if direction < 0 {
            // queenside also needs the square next to the rook clear
            let next_to_rook = self.board.piece_at_rc(src.row(), dst.column() - 1);
            if !next_to_rook.is_none() {
                return false;
            }
        }
        true
    }

    fn rook(&mut self) {
        for direction in [-1, 1] {
            let mut row = next_row(self.piece_row, direction);
            while is_valid_row(row) {
                let piece = self.board.piece_at_rc(row, self.piece_col);
                self.append_move(Move::make(self.src(), Coord::make(row, self.piece_col)));
                if !piece.is_none() {
                    break;
                }
                row = next_row(row, direction);
            }

            let mut col = next_column(self.piece_col, direction);
            while is_valid_column(col) {
                let piece = self.board.piece_at_rc(self.piece_row, col);
                self.append_move(Move::make(self.src(), Coord::make(self.piece_row, col)));
                if !piece.is_none() {
                    break;
                }
                col = next_column(col, direction);
            }
        }
    }

    fn bishop(&mut self) {
        for row_direction in [-1, 1] {
            for col_direction in [-1, 1] {
                let mut row = next_row(self.piece_row, row_direction);
                let mut col = next_column(self.piece_col, col_direction);
                while is_valid_row(row) && is_valid_column(col) {
                    let piece = self.board.piece_at_rc(row, col);
                    self.append_move(Move::make(self.src(), Coord::make(row, col)));
                    if !piece.is_none() {
                        break;
                    }
                    row = next_row(row, row_direction);
                    col = next_column(col, col_direction);
                }
            }
        }
    }

    fn queen(&mut self) {
        self.bishop();
        self.rook();
    }

    fn knight(&mut self) {
        let src_index = self.src().index();
        for &mv in &KNIGHT_MOVES[src_index] {
            self.append_move(mv);
        }
    }

    fn pawn(&mut self) {
        let direction = pawn_direction(self.who);

        // A pawn can never stand on its promotion rank, so one step forward
        // is always on the board.
        let row = next_row(self.piece_row, direction);
        debug_assert!(is_valid_row(row));

        let mut all_pawn_moves: [Option<Move>; 4] = [None; 4];

        // single advance
        if self.board.piece_at_rc(row, self.piece_col).is_none() {
            all_pawn_moves[0] = Some(Move::make(self.src(), Coord::make(row, self.piece_col)));
        }

        // double advance from the starting rank
        if self.is_pawn_unmoved() {
            let double_row = next_row(row, direction);
            if all_pawn_moves[0].is_some()
                && self.board.piece_at_rc(double_row, self.piece_col).is_none()
            {
                all_pawn_moves[1] =
                    Some(Move::make(self.src(), Coord::make(double_row, self.piece_col)));
            }
        }

        // diagonal captures
        for col_direction in [-1, 1] {
            let take_col = next_column(self.piece_col, col_direction);
            if !is_valid_column(take_col) {
                continue;
            }
            let target_piece = self.board.piece_at_rc(row, take_col);
            if !target_piece.is_none() && target_piece.color() != self.who {
                let capture =
                    Move::make_normal_capturing(self.src(), Coord::make(row, take_col));
                if col_direction == -1 {
                    all_pawn_moves[2] = Some(capture);
                } else {
                    all_pawn_moves[3] = Some(capture);
                }
            }
        }

        // promotion: each otherwise-valid move in four flavors
        if needs_pawn_promotion(row, self.who) {
            for promotable in ALL_PROMOTABLE_PIECE_TYPES {
                let promoted = ColoredPiece::make(self.who, promotable);
                for pawn_move in all_pawn_moves.iter().flatten() {
                    self.append_move(pawn_move.with_promotion(promoted));
                }
            }
            return;
        }

        // en passant never promotes
        if let Some(en_passant_column) = self.eligible_en_passant_column() {
            self.en_passant(en_passant_column);
        }

        for pawn_move in all_pawn_moves.into_iter().flatten() {
            self.append_move(pawn_move);
        }
    }

    fn is_pawn_unmoved(&self) -> bool {
        if self.who == Color::White {
            self.piece_row == 6
        } else {
            self.piece_row == 1
        }
    }

    /// The opponent's en-passant target must sit on an adjacent column, and
    /// this pawn must stand on the rank such a capture happens from.
    fn eligible_en_passant_column(&self) -> Option<i8> {
        let opponent = self.who.opposite();

        let target = self.board.en_passant_target()?;
        if target.vulnerable_color != opponent {
            return None;
        }

        let capture_rank = if self.who == Color::White { 3 } else { 4 };
        if self.piece_row != capture_rank {
            return None;
        }

        let target_column = target.coord.column();
        if (self.piece_col - target_column).abs() == 1 {
            Some(target_column)
        } else {
            None
        }
    }

    fn en_passant(&mut self, en_passant_column: i8) {
        let direction = pawn_direction(self.who);
        let take_row = next_row(self.piece_row, direction);

        debug_assert_eq!(
            self.board
                .piece_at_rc(self.piece_row, en_passant_column)
                .piece_type(),
            Piece::Pawn
        );

        let mv = Move::make_en_passant(self.src(), Coord::make(take_row, en_passant_column));
        self.append_move(mv);
    }
}

fn needs_pawn_promotion(row: i8, who: Color) -> bool {
    match who {
        Color::White => row == 0,
        Color::Black => row == 7,
        Color::None => panic!("Invalid color in promotion check"),
    }
}

fn material_diff(board: &Board, mv: Move) -> i32 {
    debug_assert!(mv.is_any_capturing());

    if mv.is_en_passant() {
        0
    } else {
        let src_weight = Material::weight(board.piece_at(mv.src()).piece_type());
        let dst_weight = Material::weight(board.piece_at(mv.dst()).piece_type());
        dst_weight - src_weight
    }
}

fn promoting_or_coord_compare(a: Move, b: Move) -> Ordering {
    match (a.is_promoting(), b.is_promoting()) {
        (true, true) => {
            let a_weight = Material::weight(a.promoted_piece().piece_type());
            let b_weight = Material::weight(b.promoted_piece().piece_type());
            b_weight.cmp(&a_weight)
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => (a.src().index(), a.dst().index())
            .cmp(&(b.src().index(), b.dst().index())),
    }
}

/// The generator's move ordering: any-capturing moves first, captures sorted
/// by victim-minus-attacker weight, then promotions by promoted weight, with
/// source/destination indices as the deterministic tie-break.
fn compare_moves(board: &Board, a: Move, b: Move) -> Ordering {
    match (a.is_any_capturing(), b.is_any_capturing()) {
        (false, false) => promoting_or_coord_compare(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => {
            let a_diff = material_diff(board, a);
            let b_diff = material_diff(board, b);
            b_diff
                .cmp(&a_diff)
                .then_with(|| promoting_or_coord_compare(a, b))
        }
    }
}

/// Enumerate every pseudo-legal move for `who`, sorted for the search.
pub fn generate_all_potential_moves(board: &Board, who: Color) -> MoveList {
    let mut generation = MoveGeneration {
        board,
        moves: MoveList::new(),
        piece_row: 0,
        piece_col: 0,
        who,
    };

    for coord in all_coords() {
        let piece = board.piece_at(coord);
        if piece.color() != who {
            continue;
        }
        generation.generate(piece, coord);
    }

    let mut moves = generation.moves;
    moves.sort_by(|&a, &b| compare_moves(board, a, b));
    moves
}

/// Pseudo-legal moves filtered by simulating each one and testing the
/// mover's king safety on the resulting board.
pub fn generate_legal_moves(board: &Board, who: Color) -> MoveList {
    let mut legal = MoveList::new();

    for &mv in &generate_all_potential_moves(board, who) {
        let new_board = board.with_move(who, mv);
        if is_legal_position_after_move(&new_board, who, mv) {
            legal.append(mv);
        }
    }

    legal
}

/// Resolve a bare source/destination pair (plus optional promotion choice)
/// against the legal moves of the position, recovering the full category
/// flags. Returns `None` when no legal move matches.
pub fn map_coordinates_to_move(
    board: &Board,
    who: Color,
    src: Coord,
    dst: Coord,
    promoted: Option<Piece>,
) -> Option<Move> {
    generate_legal_moves(board, who)
        .iter()
        .copied()
        .find(|mv| {
            if mv.src() != src || mv.dst() != dst {
                return false;
            }
            match promoted {
                Some(piece) => {
                    mv.is_promoting() && mv.promoted_piece().piece_type() == piece
                }
                None => !mv.is_promoting() || mv.promoted_piece().piece_type() == Piece::Queen,
            }
        })
}
