//! Zobrist keys for incremental position hashing.
//!
//! One random 64-bit key per (color, piece, square), plus keys for the side
//! to move, each lost castling right, and each possible en-passant target.
//! The keys are generated once at startup; the `deterministic_zobrist`
//! feature pins the seed so hashes are reproducible across runs.

use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::coord::NUM_SQUARES;
use crate::piece::{Color, ColoredPiece, NUM_PLAYERS};

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

fn make_zobrist_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

pub struct ZobristKeys {
    /// [color][piece-type - 1][square] with {White=0, Black=1} and
    /// {P,N,B,R,Q,K} = {0..5}
    pub piece: [[[u64; NUM_SQUARES]; 6]; NUM_PLAYERS],
    /// XORed in while Black is to move
    pub side_to_move: u64,
    /// One key per *lost* castling right: [0]=White kingside,
    /// [1]=White queenside, [2]=Black kingside, [3]=Black queenside
    pub castling: [u64; 4],
    /// [vulnerable color][target square]
    pub en_passant: [[u64; NUM_SQUARES]; NUM_PLAYERS],
}

static KEYS: OnceCell<ZobristKeys> = OnceCell::new();

pub fn zobrist_keys() -> &'static ZobristKeys {
    KEYS.get_or_init(|| {
        let mut rng = make_zobrist_rng();

        let mut keys = ZobristKeys {
            piece: [[[0; NUM_SQUARES]; 6]; NUM_PLAYERS],
            side_to_move: rng.next_u64(),
            castling: [0; 4],
            en_passant: [[0; NUM_SQUARES]; NUM_PLAYERS],
        };

        for color in 0..NUM_PLAYERS {
            for piece in 0..6 {
                for square in 0..NUM_SQUARES {
                    keys.piece[color][piece][square] = rng.next_u64();
                }
            }
        }
        for right in keys.castling.iter_mut() {
            *right = rng.next_u64();
        }
        for color in 0..NUM_PLAYERS {
            for square in 0..NUM_SQUARES {
                keys.en_passant[color][square] = rng.next_u64();
            }
        }

        keys
    })
}

/// Key for an occupied square. Panics if the piece is the empty sentinel.
#[inline(always)]
pub fn piece_key(piece: ColoredPiece, square: usize) -> u64 {
    let keys = zobrist_keys();
    let color_index = piece.color().index();
    let piece_index = piece.piece_type().index() - 1;
    keys.piece[color_index][piece_index][square]
}

#[inline(always)]
pub fn en_passant_key(vulnerable_color: Color, square: usize) -> u64 {
    zobrist_keys().en_passant[vulnerable_color.index()][square]
}
