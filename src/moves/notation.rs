//! Move notation: the canonical printer and a tolerant parser.
//!
//! Accepted inputs (case-insensitive, whitespace-tolerant): `e2e4`,
//! `e2 e4`, `e2xe5`, `e7e8(Q)`, `e2xd3 (Q)`, `e5d6 ep`, `o-o`, `o-o-o`.
//! The printer emits the canonical forms: `e2 e4`, `e2xe5`, `e5 f6 ep`,
//! `e7 e8(Q)`, `O-O`, `O-O-O`.

use std::fmt;

use crate::coord::Coord;
use crate::error::MoveParseError;
use crate::moves::types::{Move, castling_king_move};
use crate::piece::{Color, ColoredPiece, Piece};

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_castling() {
            return if self.is_castling_queenside() {
                write!(f, "O-O-O")
            } else {
                write!(f, "O-O")
            };
        }

        let separator = if self.is_capturing() { "x" } else { " " };
        write!(f, "{}{}{}", self.src(), separator, self.dst())?;

        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        if self.is_promoting() {
            write!(f, "({})", self.promoted_piece().piece_type().to_char())?;
        }
        Ok(())
    }
}

fn castle_parse(text: &str, who: Color) -> Result<Move, MoveParseError> {
    if !who.is_valid() {
        return Err(MoveParseError::CastlingRequiresColor);
    }

    match text {
        "O-O-O" => Ok(castling_king_move(who, false)),
        "O-O" => Ok(castling_king_move(who, true)),
        _ => Err(MoveParseError::InvalidSuffix {
            found: text.to_string(),
        }),
    }
}

/// Parse a move string for the given color. The color is needed for
/// castling (which row) and promotion (whose piece).
pub fn move_parse(input: &str, who: Color) -> Result<Move, MoveParseError> {
    let condensed: String = input
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();

    if condensed.is_empty() {
        return Err(MoveParseError::TooShort {
            found: input.to_string(),
        });
    }

    if condensed.starts_with('O') {
        return castle_parse(&condensed, who);
    }

    if condensed.len() < 4 {
        return Err(MoveParseError::TooShort {
            found: input.to_string(),
        });
    }

    let src: Coord = condensed[0..2].parse()?;

    let mut offset = 2;
    let mut is_capturing = false;
    if condensed[offset..].starts_with('X') {
        offset += 1;
        is_capturing = true;
    }

    if condensed.len() < offset + 2 {
        return Err(MoveParseError::TooShort {
            found: input.to_string(),
        });
    }
    let dst: Coord = condensed[offset..offset + 2].parse()?;
    offset += 2;

    let mut mv = Move::make(src, dst);
    if is_capturing {
        mv = mv.with_capture();
    }

    match &condensed[offset..] {
        "" => {}
        "EP" => {
            mv = Move::make_en_passant(src, dst);
        }
        "(Q)" => mv = mv.with_promotion(ColoredPiece::make(who, Piece::Queen)),
        "(R)" => mv = mv.with_promotion(ColoredPiece::make(who, Piece::Rook)),
        "(B)" => mv = mv.with_promotion(ColoredPiece::make(who, Piece::Bishop)),
        "(N)" => mv = mv.with_promotion(ColoredPiece::make(who, Piece::Knight)),
        rest => {
            return Err(MoveParseError::InvalidSuffix {
                found: rest.to_string(),
            });
        }
    }

    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_and_capture_forms() {
        let plain = move_parse("e2e4", Color::White).unwrap();
        assert_eq!(plain, move_parse("e2 e4", Color::White).unwrap());
        assert_eq!(plain.src().to_string(), "e2");
        assert_eq!(plain.dst().to_string(), "e4");
        assert!(!plain.is_capturing());

        let capture = move_parse("e2xe5", Color::White).unwrap();
        assert!(capture.is_capturing());
        assert_eq!(capture.to_string(), "e2xe5");
    }

    #[test]
    fn parses_promotion_and_en_passant() {
        let promotion = move_parse("e7e8(Q)", Color::White).unwrap();
        assert!(promotion.is_promoting());
        assert_eq!(promotion.promoted_piece().piece_type(), Piece::Queen);
        assert_eq!(promotion.promoted_piece().color(), Color::White);

        let capture_promotion = move_parse("e2xd3 (N)", Color::White).unwrap();
        assert!(capture_promotion.is_capturing());
        assert_eq!(
            capture_promotion.promoted_piece().piece_type(),
            Piece::Knight
        );

        let en_passant = move_parse("e5d6 ep", Color::White).unwrap();
        assert!(en_passant.is_en_passant());
        assert_eq!(en_passant.to_string(), "e5 d6 ep");
    }

    #[test]
    fn parses_castling_in_either_case() {
        let kingside = move_parse("o-o", Color::White).unwrap();
        assert!(kingside.is_castling_kingside());
        assert_eq!(kingside.to_string(), "O-O");

        let queenside = move_parse("O-O-O", Color::Black).unwrap();
        assert!(queenside.is_castling_queenside());
        assert_eq!(queenside.src().to_string(), "e8");
        assert_eq!(queenside.dst().to_string(), "c8");

        assert!(move_parse("o-o", Color::None).is_err());
    }

    #[test]
    fn print_parse_round_trip() {
        for (text, who) in [
            ("e2 e4", Color::White),
            ("e2xe5", Color::White),
            ("e7 e8(Q)", Color::White),
            ("a2xb1(N)", Color::Black),
            ("e5 f6 ep", Color::White),
            ("O-O", Color::Black),
            ("O-O-O", Color::White),
        ] {
            let mv = move_parse(text, who).unwrap();
            assert_eq!(move_parse(&mv.to_string(), who).unwrap(), mv);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(move_parse("", Color::White).is_err());
        assert!(move_parse("e2", Color::White).is_err());
        assert!(move_parse("z9a1", Color::White).is_err());
        assert!(move_parse("e2e4(K)", Color::White).is_err());
    }
}
