//! Feature tensor layout.
//!
//! Tensors are flat row-major `f32` buffers addressed as `(row, col, plane)`,
//! matching the `(8, 8, C)` array layout the model was trained against.
//! Row 0 is rank 8 (the first rank written in a FEN string).

use serde::{Deserialize, Serialize};

/// Board rows per tensor.
pub const BOARD_RANKS: usize = 8;

/// Board columns per tensor.
pub const BOARD_FILES: usize = 8;

/// Planes in the piece-occupancy encoding.
pub const PIECE_PLANES: usize = 12;

/// Planes in the extended encoding.
pub const EXTENDED_PLANES: usize = 25;

/// The side-to-move indicator plane (extended encoding only).
pub const SIDE_TO_MOVE_PLANE: usize = 12;

/// First of the six planes holding the side to move's attack maps.
pub const OWN_ATTACKS_PLANE: usize = 13;

/// First of the six planes holding the opponent's attack maps.
pub const OPPONENT_ATTACKS_PLANE: usize = 19;

/// Which feature encoding to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingVariant {
    /// 8x8x12 piece occupancy only.
    Basic12,
    /// 8x8x25: occupancy, side-to-move indicator, and per-kind attack maps
    /// for both colors.
    Extended25,
}

impl EncodingVariant {
    /// Number of planes this variant produces.
    pub const fn planes(self) -> usize {
        match self {
            EncodingVariant::Basic12 => PIECE_PLANES,
            EncodingVariant::Extended25 => EXTENDED_PLANES,
        }
    }
}

/// A binary feature tensor over the board.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTensor {
    variant: EncodingVariant,
    data: Vec<f32>,
}

impl FeatureTensor {
    /// An all-zero tensor of the given variant's shape.
    pub(crate) fn zeros(variant: EncodingVariant) -> FeatureTensor {
        FeatureTensor {
            variant,
            data: vec![0.0; BOARD_RANKS * BOARD_FILES * variant.planes()],
        }
    }

    /// The variant this tensor was encoded with.
    pub fn variant(&self) -> EncodingVariant {
        self.variant
    }

    /// Shape as `[rows, cols, planes]`.
    pub fn shape(&self) -> [usize; 3] {
        [BOARD_RANKS, BOARD_FILES, self.variant.planes()]
    }

    fn offset(&self, row: usize, col: usize, plane: usize) -> usize {
        (row * BOARD_FILES + col) * self.variant.planes() + plane
    }

    /// Value at `(row, col, plane)`.
    pub fn at(&self, row: usize, col: usize, plane: usize) -> f32 {
        self.data[self.offset(row, col, plane)]
    }

    /// Sets `(row, col, plane)` to 1.
    pub(crate) fn mark(&mut self, row: usize, col: usize, plane: usize) {
        let offset = self.offset(row, col, plane);
        self.data[offset] = 1.0;
    }

    /// Fills an entire plane with the given value.
    pub(crate) fn fill_plane(&mut self, plane: usize, value: f32) {
        for row in 0..BOARD_RANKS {
            for col in 0..BOARD_FILES {
                let offset = self.offset(row, col, plane);
                self.data[offset] = value;
            }
        }
    }

    /// The flat row-major buffer, length `8 * 8 * planes`.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Number of set cells in one plane. Test and diagnostics helper.
    pub fn plane_count(&self, plane: usize) -> usize {
        let mut count = 0;
        for row in 0..BOARD_RANKS {
            for col in 0..BOARD_FILES {
                if self.at(row, col, plane) != 0.0 {
                    count += 1;
                }
            }
        }
        count
    }
}
