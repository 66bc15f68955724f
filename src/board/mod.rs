//! Board primitives.
//!
//! Contains the square indexing scheme and the piece/color types shared by
//! the encoder, the move codec, and the rules seam.

pub mod piece;
pub mod square;

pub use piece::{Piece, PieceColor, PieceKind, ALL_KINDS};
pub use square::{Square, SquareError, SQUARE_COUNT};
