//! FEN parsing and emission.

use crate::board::castling::CastlingEligibility;
use crate::board::{Board, BoardBuilder};
use crate::coord::all_coords;
use crate::error::FenError;
use crate::piece::{Color, Piece};

pub(super) fn parse_fen(source: &str) -> Result<Board, FenError> {
    let mut fields = source.split_whitespace();

    let placement = fields
        .next()
        .ok_or(FenError::MissingField { field: "piece placement" })?;
    let active_color = fields
        .next()
        .ok_or(FenError::MissingField { field: "active color" })?;
    let castling = fields
        .next()
        .ok_or(FenError::MissingField { field: "castling availability" })?;
    let en_passant = fields
        .next()
        .ok_or(FenError::MissingField { field: "en passant target" })?;
    let half_moves = fields
        .next()
        .ok_or(FenError::MissingField { field: "halfmove clock" })?;
    let full_moves = fields
        .next()
        .ok_or(FenError::MissingField { field: "fullmove number" })?;

    let mut builder = BoardBuilder::new();
    parse_placement(&mut builder, placement)?;

    let active_player = parse_active_color(active_color)?;
    builder.set_current_turn(active_player);

    parse_castling(&mut builder, castling)?;

    if en_passant != "-" {
        builder
            .set_en_passant_target(active_player.opposite(), en_passant)
            .map_err(|_| FenError::InvalidEnPassant {
                found: en_passant.to_string(),
            })?;
    }

    let half_move_clock: u32 = half_moves.parse().map_err(|_| FenError::InvalidClock {
        field: "halfmove clock",
        found: half_moves.to_string(),
    })?;
    let full_move_clock: u32 = full_moves.parse().map_err(|_| FenError::InvalidClock {
        field: "fullmove number",
        found: full_moves.to_string(),
    })?;
    builder.set_half_moves_clock(half_move_clock);
    builder.set_full_moves(full_move_clock);

    builder.build().map_err(|err| FenError::InvalidPosition {
        reason: err.to_string(),
    })
}

fn parse_placement(builder: &mut BoardBuilder, placement: &str) -> Result<(), FenError> {
    let mut row: i8 = 0;
    let mut col: i8 = 0;

    for ch in placement.chars() {
        if ch == '/' {
            row += 1;
            col = 0;
            if row > 7 {
                return Err(FenError::TooManyRanks);
            }
        } else if let Some(digit) = ch.to_digit(10) {
            col += digit as i8;
            if col > 8 {
                return Err(FenError::TooManyFiles { rank: row as usize });
            }
        } else if ch.is_ascii_alphabetic() {
            let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece { ch })?;
            let color = if ch.is_ascii_lowercase() {
                Color::Black
            } else {
                Color::White
            };
            if col > 7 {
                return Err(FenError::TooManyFiles { rank: row as usize });
            }
            builder
                .add_piece_rc(row, col, color, piece)
                .map_err(|err| FenError::InvalidPosition {
                    reason: err.to_string(),
                })?;
            col += 1;
        } else {
            return Err(FenError::InvalidPiece { ch });
        }
    }

    Ok(())
}

fn parse_active_color(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(FenError::InvalidActiveColor {
            found: other.to_string(),
        }),
    }
}

fn parse_castling(builder: &mut BoardBuilder, field: &str) -> Result<(), FenError> {
    let mut white = CastlingEligibility::NEITHER_SIDE_ELIGIBLE;
    let mut black = CastlingEligibility::NEITHER_SIDE_ELIGIBLE;

    if field != "-" {
        for ch in field.chars() {
            let (state, side) = match ch {
                'K' => (&mut white, CastlingEligibility::KINGSIDE_INELIGIBLE),
                'Q' => (&mut white, CastlingEligibility::QUEENSIDE_INELIGIBLE),
                'k' => (&mut black, CastlingEligibility::KINGSIDE_INELIGIBLE),
                'q' => (&mut black, CastlingEligibility::QUEENSIDE_INELIGIBLE),
                other => return Err(FenError::InvalidCastling { ch: other }),
            };
            // clear the ineligibility bit this letter grants back
            *state ^= side;
        }
    }

    builder.set_castling(Color::White, white);
    builder.set_castling(Color::Black, black);
    Ok(())
}

impl Board {
    /// Emit the position as a FEN string with `turn` as the active color.
    pub fn to_fen_string(&self, turn: Color) -> String {
        let mut fen = String::with_capacity(90);

        let mut empty_run = 0;
        for coord in all_coords() {
            if coord.column() == 0 && coord.row() > 0 {
                if empty_run > 0 {
                    fen.push(char::from_digit(empty_run, 10).unwrap());
                    empty_run = 0;
                }
                fen.push('/');
            }
            let piece = self.piece_at(coord);
            if piece.is_none() {
                empty_run += 1;
            } else {
                if empty_run > 0 {
                    fen.push(char::from_digit(empty_run, 10).unwrap());
                    empty_run = 0;
                }
                fen.push(piece.to_fen_char());
            }
        }
        if empty_run > 0 {
            fen.push(char::from_digit(empty_run, 10).unwrap());
        }

        fen.push(' ');
        fen.push(if turn == Color::Black { 'b' } else { 'w' });

        fen.push(' ');
        let white = self.castling_eligibility(Color::White);
        let black = self.castling_eligibility(Color::Black);
        let mut any_castling = false;
        for (available, letter) in [
            (white.can_castle_kingside(), 'K'),
            (white.can_castle_queenside(), 'Q'),
            (black.can_castle_kingside(), 'k'),
            (black.can_castle_queenside(), 'q'),
        ] {
            if available {
                fen.push(letter);
                any_castling = true;
            }
        }
        if !any_castling {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_target() {
            Some(target) => fen.push_str(&target.coord.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(
            " {} {}",
            self.half_move_clock(),
            self.full_move_clock()
        ));
        fen
    }
}
