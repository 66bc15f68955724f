//! Neural network feature encoding.
//!
//! Converts FEN positions into the fixed-shape binary tensors the trained
//! policy model consumes: 8x8x12 piece occupancy, or 8x8x25 with the
//! side-to-move indicator and per-kind attack maps added.

pub mod encoding;
pub mod tensor;

pub use encoding::{encode, encode_batch, BatchStats, EncodeError};
pub use tensor::{
    EncodingVariant, FeatureTensor, BOARD_FILES, BOARD_RANKS, EXTENDED_PLANES,
    OPPONENT_ATTACKS_PLANE, OWN_ATTACKS_PLANE, PIECE_PLANES, SIDE_TO_MOVE_PLANE,
};
