//! Square naming and indexing.
//!
//! A square is an integer in 0..64 laid out in FEN order: row 0 is the top
//! rank as written in a FEN string (rank 8 on the board), file 0 is file 'a'.
//! The index of a square is `row * 8 + file`.

use serde::{Deserialize, Serialize};

/// Number of squares on the board.
pub const SQUARE_COUNT: usize = 64;

/// Errors that can occur when parsing or constructing a square.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    #[error("square name must be exactly two characters: '{0}'")]
    WrongLength(String),

    #[error("file character out of range 'a'..='h': '{0}'")]
    FileOutOfRange(char),

    #[error("rank character out of range '1'..='8': '{0}'")]
    RankOutOfRange(char),

    #[error("square index out of range 0..64: {0}")]
    IndexOutOfRange(usize),
}

/// A board square, stored as its 0..64 index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// Builds a square from row (0 = rank 8) and file (0 = file 'a').
    /// Both must be in 0..8.
    pub(crate) const fn from_coords(row: u8, file: u8) -> Square {
        Square(row * 8 + file)
    }

    /// Builds a square from its flat index.
    pub fn from_index(index: usize) -> Result<Square, SquareError> {
        if index >= SQUARE_COUNT {
            return Err(SquareError::IndexOutOfRange(index));
        }
        Ok(Square(index as u8))
    }

    /// Parses a two-character algebraic name such as "e4".
    ///
    /// The rank digit is mapped top-down (`row = 8 - digit`), so "a8" is
    /// index 0 and "h1" is index 63 -- the same orientation a FEN
    /// piece-placement walk produces.
    pub fn from_algebraic(name: &str) -> Result<Square, SquareError> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 || !name.is_ascii() {
            return Err(SquareError::WrongLength(name.to_string()));
        }

        let file_char = bytes[0] as char;
        let rank_char = bytes[1] as char;

        if !('a'..='h').contains(&file_char) {
            return Err(SquareError::FileOutOfRange(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::RankOutOfRange(rank_char));
        }

        let file = bytes[0] - b'a';
        let row = 8 - (bytes[1] - b'0');
        Ok(Square::from_coords(row, file))
    }

    /// Renders the square back to its algebraic name.
    pub fn to_algebraic(self) -> String {
        let file_char = (b'a' + self.file()) as char;
        let rank_char = (b'0' + (8 - self.row())) as char;
        let mut s = String::with_capacity(2);
        s.push(file_char);
        s.push(rank_char);
        s
    }

    /// The flat 0..64 index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row in 0..8; row 0 is rank 8.
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// File in 0..8; file 0 is 'a'.
    pub const fn file(self) -> u8 {
        self.0 % 8
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}
