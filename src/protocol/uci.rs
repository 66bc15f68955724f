//! UCI move notation and the dense policy index space.
//!
//! A UCI move is `<from><to>` in algebraic squares, optionally followed by a
//! promotion piece letter (`e2e4`, `e7e8q`). The policy index of a move is
//! `from * 64 + to`, giving a space of 4096 indices.
//!
//! The index space is deliberately lossy: the promotion piece is accepted on
//! input but not represented, so an under-promotion is indistinguishable
//! from a queen promotion. The trained model's output is aligned with this
//! space, so the collapse must be preserved exactly.

use crate::board::square::{Square, SquareError};

/// Size of the policy index space: 64 origin squares times 64 targets.
pub const POLICY_SIZE: usize = 4096;

/// Errors that can occur in the move codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UciError {
    #[error("move must be 4 or 5 ASCII characters: '{0}'")]
    WrongLength(String),

    #[error("bad origin square in '{uci}'")]
    BadFrom {
        uci: String,
        #[source]
        source: SquareError,
    },

    #[error("bad target square in '{uci}'")]
    BadTo {
        uci: String,
        #[source]
        source: SquareError,
    },

    #[error("bad promotion letter '{promo}' in '{uci}'")]
    BadPromotion { uci: String, promo: char },

    #[error("move index out of range 0..{POLICY_SIZE}: {0}")]
    IndexOutOfRange(usize),
}

/// Maps a UCI move string to its policy index.
///
/// A trailing promotion letter is validated but collapsed: `e7e8q` and an
/// (illegal) `e7e8` map to the same index.
pub fn move_to_index(uci: &str) -> Result<usize, UciError> {
    if !uci.is_ascii() || uci.len() < 4 || uci.len() > 5 {
        return Err(UciError::WrongLength(uci.to_string()));
    }

    if uci.len() == 5 {
        let promo = uci.as_bytes()[4] as char;
        if !matches!(promo, 'n' | 'b' | 'r' | 'q') {
            return Err(UciError::BadPromotion {
                uci: uci.to_string(),
                promo,
            });
        }
    }

    let from = Square::from_algebraic(&uci[0..2]).map_err(|source| UciError::BadFrom {
        uci: uci.to_string(),
        source,
    })?;
    let to = Square::from_algebraic(&uci[2..4]).map_err(|source| UciError::BadTo {
        uci: uci.to_string(),
        source,
    })?;

    Ok(from.index() * 64 + to.index())
}

/// Maps a policy index back to a 4-character UCI move string.
///
/// Never emits a promotion suffix; an index arriving from this codec is
/// always in range, so an out-of-range argument is a contract violation at
/// the call site rather than bad user input.
pub fn index_to_move(index: usize) -> Result<String, UciError> {
    if index >= POLICY_SIZE {
        return Err(UciError::IndexOutOfRange(index));
    }

    // from_index cannot fail here: index / 64 and index % 64 are both < 64.
    let from = Square::from_index(index / 64).map_err(|_| UciError::IndexOutOfRange(index))?;
    let to = Square::from_index(index % 64).map_err(|_| UciError::IndexOutOfRange(index))?;

    let mut uci = from.to_algebraic();
    uci.push_str(&to.to_algebraic());
    Ok(uci)
}
