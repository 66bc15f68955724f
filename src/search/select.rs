//! Legal-move selection over raw policy output.
//!
//! The model emits a probability for every index in the 4096-move space,
//! legal or not. Selection restricts that output to the legal-move set
//! supplied by the rules provider and keeps the strict maximum.

use serde::{Deserialize, Serialize};

use crate::protocol::uci::{move_to_index, UciError, POLICY_SIZE};

/// Errors that can occur during selection.
///
/// Every variant signals an inconsistency between the legal-move source,
/// the codec, and the model output -- a contract bug rather than bad user
/// input -- so callers should surface these loudly instead of skipping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("policy vector has length {0}, expected {POLICY_SIZE}")]
    WrongPolicyLength(usize),

    #[error("legal move '{uci}' does not map into the policy index space")]
    EncodingMismatch {
        uci: String,
        #[source]
        source: UciError,
    },

    #[error("legal move '{uci}' maps to index {index}, outside the policy vector")]
    IndexOutOfBounds { uci: String, index: usize },
}

/// Outcome of policy-guided selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// The legal move with the highest policy probability.
    Best(String),
    /// The position has no legal moves: checkmate or stalemate. A normal
    /// terminal outcome, not an error.
    NoLegalMove,
}

impl Selection {
    /// The selected move, if any.
    pub fn as_move(&self) -> Option<&str> {
        match self {
            Selection::Best(uci) => Some(uci),
            Selection::NoLegalMove => None,
        }
    }
}

fn policy_index(uci: &str, probs: &[f32]) -> Result<usize, SelectError> {
    let index = move_to_index(uci).map_err(|source| SelectError::EncodingMismatch {
        uci: uci.to_string(),
        source,
    })?;
    // The codec already guarantees the range; kept as a guard against a
    // desync between codec and vector length.
    if index >= probs.len() {
        return Err(SelectError::IndexOutOfBounds {
            uci: uci.to_string(),
            index,
        });
    }
    Ok(index)
}

/// Picks the legal move with the strictly highest policy probability.
///
/// Ties go to the first-encountered move in the iteration order of
/// `legal_moves`. This is a deliberate, reproducible tie-break: the rules
/// provider's ordering is deterministic, so repeated calls with identical
/// input select the identical move.
///
/// An empty legal-move set yields [`Selection::NoLegalMove`].
pub fn select_best_legal<S: AsRef<str>>(
    probs: &[f32],
    legal_moves: &[S],
) -> Result<Selection, SelectError> {
    if probs.len() != POLICY_SIZE {
        return Err(SelectError::WrongPolicyLength(probs.len()));
    }

    let mut moves = legal_moves.iter();
    let first = match moves.next() {
        Some(mv) => mv.as_ref(),
        None => return Ok(Selection::NoLegalMove),
    };

    let mut best_move = first;
    let mut best_prob = probs[policy_index(first, probs)?];

    for mv in moves {
        let uci = mv.as_ref();
        let prob = probs[policy_index(uci, probs)?];
        if prob > best_prob {
            best_move = uci;
            best_prob = prob;
        }
    }

    Ok(Selection::Best(best_move.to_string()))
}

/// The all-zeros policy vector. Deterministic stand-in for a model in
/// wiring tests; with it, selection degenerates to the tie-break.
pub fn uniform_policy() -> Vec<f32> {
    vec![0.0; POLICY_SIZE]
}
