//! Error types for parsing and board construction.
//!
//! Parse and builder failures are recoverable and surfaced as typed errors;
//! internal invariant violations are panics, not errors.

use std::fmt;
use std::io;

/// Error type for algebraic coordinate parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    /// Coordinate must be exactly two characters
    InvalidLength { found: usize },
    /// Characters do not name a square on the board
    InvalidSquare { notation: String },
}

impl fmt::Display for CoordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordParseError::InvalidLength { found } => {
                write!(f, "Coordinate must be 2 characters, found {found}")
            }
            CoordParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square '{notation}'")
            }
        }
    }
}

impl std::error::Error for CoordParseError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// One of the six whitespace-separated fields is absent
    MissingField { field: &'static str },
    /// Invalid piece character in the placement field
    InvalidPiece { ch: char },
    /// More than 8 ranks in the placement field
    TooManyRanks,
    /// A rank describes more than 8 files
    TooManyFiles { rank: usize },
    /// Active color must be 'w' or 'b'
    InvalidActiveColor { found: String },
    /// Castling availability may only contain K, Q, k, q or '-'
    InvalidCastling { ch: char },
    /// En passant field is neither '-' nor a valid square
    InvalidEnPassant { found: String },
    /// Halfmove or fullmove clock is not an integer
    InvalidClock { field: &'static str, found: String },
    /// The described position cannot be built into a board
    InvalidPosition { reason: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::MissingField { field } => {
                write!(f, "Missing {field} field parsing FEN string")
            }
            FenError::InvalidPiece { ch } => {
                write!(f, "Invalid piece character '{ch}' in FEN")
            }
            FenError::TooManyRanks => write!(f, "Too many ranks in FEN placement"),
            FenError::TooManyFiles { rank } => {
                write!(f, "Too many files in FEN rank {rank}")
            }
            FenError::InvalidActiveColor { found } => {
                write!(f, "Invalid active color '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { ch } => {
                write!(f, "Invalid castling character '{ch}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}' in FEN")
            }
            FenError::InvalidClock { field, found } => {
                write!(f, "Invalid {field} '{found}' in FEN")
            }
            FenError::InvalidPosition { reason } => {
                write!(f, "FEN describes an invalid position: {reason}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move notation parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Input was empty or too short to name two squares
    TooShort { found: String },
    /// A coordinate inside the move string is invalid
    InvalidCoord { source: CoordParseError },
    /// Trailing text was not ` ep` or a promotion suffix
    InvalidSuffix { found: String },
    /// Castling notation needs to know which color is moving
    CastlingRequiresColor,
    /// The move parses but is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::TooShort { found } => {
                write!(f, "Move string '{found}' is too short")
            }
            MoveParseError::InvalidCoord { source } => {
                write!(f, "Invalid coordinate in move: {source}")
            }
            MoveParseError::InvalidSuffix { found } => {
                write!(f, "Invalid move suffix '{found}'")
            }
            MoveParseError::CastlingRequiresColor => {
                write!(f, "Castling notation requires a color to parse")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Move '{notation}' is not legal here")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

impl From<CoordParseError> for MoveParseError {
    fn from(source: CoordParseError) -> Self {
        MoveParseError::InvalidCoord { source }
    }
}

/// Error type for invalid `BoardBuilder` configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardBuilderError {
    /// A piece placement lies off the board
    InvalidCoordinate { notation: String },
    /// A square was assigned twice
    OccupiedSquare { notation: String },
    /// Each side needs exactly one king to build a playable board
    WrongKingCount { color: &'static str, found: usize },
    /// En passant target is not on a valid skipped-square rank
    InvalidEnPassantTarget { notation: String },
}

impl fmt::Display for BoardBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardBuilderError::InvalidCoordinate { notation } => {
                write!(f, "Invalid coordinate '{notation}'")
            }
            BoardBuilderError::OccupiedSquare { notation } => {
                write!(f, "Square '{notation}' is already occupied")
            }
            BoardBuilderError::WrongKingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            BoardBuilderError::InvalidEnPassantTarget { notation } => {
                write!(f, "Invalid en passant target '{notation}'")
            }
        }
    }
}

impl std::error::Error for BoardBuilderError {}

/// Error type for loading a saved game
#[derive(Debug)]
pub enum GameLoadError {
    Io(io::Error),
    Move { line: usize, source: MoveParseError },
    IllegalMove { line: usize, notation: String },
    Fen(FenError),
}

impl fmt::Display for GameLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameLoadError::Io(err) => write!(f, "I/O error loading game: {err}"),
            GameLoadError::Move { line, source } => {
                write!(f, "Bad move on line {line}: {source}")
            }
            GameLoadError::IllegalMove { line, notation } => {
                write!(f, "Illegal move '{notation}' on line {line}")
            }
            GameLoadError::Fen(err) => write!(f, "Bad FEN in saved game: {err}"),
        }
    }
}

impl std::error::Error for GameLoadError {}

impl From<io::Error> for GameLoadError {
    fn from(err: io::Error) -> Self {
        GameLoadError::Io(err)
    }
}

impl From<FenError> for GameLoadError {
    fn from(err: FenError) -> Self {
        GameLoadError::Fen(err)
    }
}
