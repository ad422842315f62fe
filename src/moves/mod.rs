pub mod generate;
pub mod notation;
pub mod perft;
pub mod types;

pub use generate::{generate_all_potential_moves, generate_legal_moves, map_coordinates_to_move};
pub use notation::move_parse;
pub use types::{Move, MoveCategory, MoveList};
