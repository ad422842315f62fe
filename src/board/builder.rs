use crate::board::castling::CastlingEligibility;
use crate::board::code::{BoardCode, EnPassantTarget};
use crate::board::Board;
use crate::coord::{
    Coord, KING_COLUMN, KING_ROOK_COLUMN, NUM_SQUARES, QUEEN_ROOK_COLUMN, all_coords,
    castling_row_for_color,
};
use crate::error::BoardBuilderError;
use crate::material::Material;
use crate::piece::{Color, ColoredPiece, NUM_PLAYERS, PIECE_AND_COLOR_NONE, Piece};
use crate::position::Position;

/// Assembles a `Board` piece by piece. Placement errors are reported as
/// typed, recoverable errors; `build` checks that the result is playable
/// (exactly one king per side).
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    squares: [ColoredPiece; NUM_SQUARES],
    current_turn: Color,
    // None means "derive from the piece placement".
    castling: [Option<CastlingEligibility>; NUM_PLAYERS],
    en_passant_target: Option<EnPassantTarget>,
    half_move_clock: u32,
    full_move_clock: u32,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        BoardBuilder::new()
    }
}

impl BoardBuilder {
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            squares: [PIECE_AND_COLOR_NONE; NUM_SQUARES],
            current_turn: Color::White,
            castling: [None, None],
            en_passant_target: None,
            half_move_clock: 0,
            full_move_clock: 1,
        }
    }

    pub fn from_default_position() -> BoardBuilder {
        let mut builder = BoardBuilder::new();

        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (col, &piece) in back_rank.iter().enumerate() {
            builder
                .add_piece_rc(0, col as i8, Color::Black, piece)
                .expect("default back rank placement");
            builder
                .add_piece_rc(7, col as i8, Color::White, piece)
                .expect("default back rank placement");
        }
        for col in 0..8 {
            builder
                .add_piece_rc(1, col, Color::Black, Piece::Pawn)
                .expect("default pawn placement");
            builder
                .add_piece_rc(6, col, Color::White, Piece::Pawn)
                .expect("default pawn placement");
        }

        builder
    }

    pub fn add_piece(
        &mut self,
        square: &str,
        color: Color,
        piece: Piece,
    ) -> Result<&mut Self, BoardBuilderError> {
        let coord: Coord = square
            .parse()
            .map_err(|_| BoardBuilderError::InvalidCoordinate {
                notation: square.to_string(),
            })?;
        self.add_piece_at(coord, color, piece)
    }

    pub fn add_piece_rc(
        &mut self,
        row: i8,
        col: i8,
        color: Color,
        piece: Piece,
    ) -> Result<&mut Self, BoardBuilderError> {
        if !crate::coord::is_valid_row(row) || !crate::coord::is_valid_column(col) {
            return Err(BoardBuilderError::InvalidCoordinate {
                notation: format!("({row}, {col})"),
            });
        }
        self.add_piece_at(Coord::make(row, col), color, piece)
    }

    pub fn add_piece_at(
        &mut self,
        coord: Coord,
        color: Color,
        piece: Piece,
    ) -> Result<&mut Self, BoardBuilderError> {
        if !self.squares[coord.index()].is_none() {
            return Err(BoardBuilderError::OccupiedSquare {
                notation: coord.to_string(),
            });
        }
        self.squares[coord.index()] = ColoredPiece::make(color, piece);
        Ok(self)
    }

    /// Bulk placement used heavily by tests: `("e4", Piece::King)` pairs.
    pub fn add_pieces(
        &mut self,
        color: Color,
        pieces: &[(&str, Piece)],
    ) -> Result<&mut Self, BoardBuilderError> {
        for &(square, piece) in pieces {
            self.add_piece(square, color, piece)?;
        }
        Ok(self)
    }

    pub fn set_current_turn(&mut self, who: Color) -> &mut Self {
        self.current_turn = who;
        self
    }

    pub fn set_castling(&mut self, who: Color, state: CastlingEligibility) -> &mut Self {
        self.castling[who.index()] = Some(state);
        self
    }

    pub fn set_en_passant_target(
        &mut self,
        vulnerable_color: Color,
        square: &str,
    ) -> Result<&mut Self, BoardBuilderError> {
        let coord: Coord = square
            .parse()
            .map_err(|_| BoardBuilderError::InvalidEnPassantTarget {
                notation: square.to_string(),
            })?;
        // The skipped square is always on rank 3 or rank 6.
        if coord.row() != 2 && coord.row() != 5 {
            return Err(BoardBuilderError::InvalidEnPassantTarget {
                notation: square.to_string(),
            });
        }
        self.en_passant_target = Some(EnPassantTarget {
            vulnerable_color,
            coord,
        });
        Ok(self)
    }

    pub fn set_half_moves_clock(&mut self, half_moves: u32) -> &mut Self {
        self.half_move_clock = half_moves;
        self
    }

    pub fn set_full_moves(&mut self, full_moves: u32) -> &mut Self {
        self.full_move_clock = full_moves;
        self
    }

    /// Castling eligibility a side would have purely from where its king
    /// and rooks stand. Explicit `set_castling` overrides this.
    fn derive_castle_state(&self, who: Color) -> CastlingEligibility {
        let row = castling_row_for_color(who);
        let king = ColoredPiece::make(who, Piece::King);
        let rook = ColoredPiece::make(who, Piece::Rook);

        let king_home = self.squares[Coord::make(row, KING_COLUMN).index()] == king;
        let mut state = CastlingEligibility::EITHER_SIDE_ELIGIBLE;

        if !king_home || self.squares[Coord::make(row, KING_ROOK_COLUMN).index()] != rook {
            state |= CastlingEligibility::KINGSIDE_INELIGIBLE;
        }
        if !king_home || self.squares[Coord::make(row, QUEEN_ROOK_COLUMN).index()] != rook {
            state |= CastlingEligibility::QUEENSIDE_INELIGIBLE;
        }
        state
    }

    pub fn build(&self) -> Result<Board, BoardBuilderError> {
        let mut king_pos: [Option<Coord>; NUM_PLAYERS] = [None, None];
        let mut king_count = [0usize; NUM_PLAYERS];
        let mut material = Material::new();
        let mut position = Position::new();

        for coord in all_coords() {
            let piece = self.squares[coord.index()];
            if piece.is_none() {
                continue;
            }
            material.add(piece);
            position.add(piece.color(), coord, piece);
            if piece.piece_type() == Piece::King {
                let index = piece.color().index();
                king_count[index] += 1;
                king_pos[index] = Some(coord);
            }
        }

        for (index, &count) in king_count.iter().enumerate() {
            if count != 1 {
                return Err(BoardBuilderError::WrongKingCount {
                    color: if index == 0 { "White" } else { "Black" },
                    found: count,
                });
            }
        }

        let mut code = BoardCode::default();
        for coord in all_coords() {
            code.add_piece(coord, self.squares[coord.index()]);
        }
        for &who in &[Color::White, Color::Black] {
            let state = self.castling[who.index()].unwrap_or_else(|| self.derive_castle_state(who));
            code.set_castle_state(who, state);
        }
        if let Some(target) = self.en_passant_target {
            code.set_en_passant_target(target.vulnerable_color, target.coord);
        }
        code.set_current_turn(self.current_turn);

        Ok(Board {
            squares: self.squares,
            code,
            half_move_clock: self.half_move_clock,
            full_move_clock: self.full_move_clock,
            position,
            material,
            king_pos: [king_pos[0].unwrap(), king_pos[1].unwrap()],
        })
    }
}
