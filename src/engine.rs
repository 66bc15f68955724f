//! Prediction façade.
//!
//! Ties the pipeline together: FEN -> legal moves -> feature tensor ->
//! model inference -> legal-move selection. The model handle and rules
//! provider are constructed by the caller and owned here immutably; there
//! is no lazily-initialized global model.

use crate::eval::{ModelError, PolicyModel};
use crate::nn::encoding::{encode, EncodeError};
use crate::nn::tensor::EncodingVariant;
use crate::rules::{Rules, RulesError};
use crate::search::select::{select_best_legal, SelectError, Selection};

/// Errors from the full prediction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Predicts the best legal move for a position using a loaded policy model.
pub struct MovePredictor<M, R> {
    model: M,
    rules: R,
    variant: EncodingVariant,
}

impl<M: PolicyModel, R: Rules> MovePredictor<M, R> {
    /// Builds a predictor around an explicitly loaded model handle. The
    /// variant must match the encoding the model was trained with.
    pub fn new(model: M, rules: R, variant: EncodingVariant) -> MovePredictor<M, R> {
        MovePredictor {
            model,
            rules,
            variant,
        }
    }

    /// The encoding variant this predictor feeds the model.
    pub fn variant(&self) -> EncodingVariant {
        self.variant
    }

    /// Predicts the best legal move for the position.
    ///
    /// Terminal positions (no legal moves) short-circuit to
    /// [`Selection::NoLegalMove`] without touching the model.
    pub fn predict(&self, fen: &str) -> Result<Selection, PredictError> {
        let legal_moves = self.rules.legal_moves(fen)?;
        if legal_moves.is_empty() {
            return Ok(Selection::NoLegalMove);
        }

        let tensor = encode(fen, self.variant, &self.rules)?;
        let probs = self.model.infer(&tensor)?;
        Ok(select_best_legal(&probs, &legal_moves)?)
    }
}
