//! Inference artifact seam.
//!
//! The trained model is an external capability: a function from a feature
//! tensor to a probability distribution over the 4096-move policy space
//! (plus a scalar position value this layer does not consume). Callers
//! construct a handle once and pass it by reference; there is no implicit
//! global model state.

#[cfg(feature = "neural")]
pub mod neural;

#[cfg(feature = "neural")]
pub use neural::OnnxPolicy;

use crate::nn::tensor::FeatureTensor;

/// Errors reported by a policy model implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load model '{path}': {message}")]
    Load { path: String, message: String },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model returned {got} policy values, expected at least {expected}")]
    OutputLength { expected: usize, got: usize },
}

/// A loaded policy model.
///
/// Implementations must be deterministic for identical input tensors and
/// must not retain or mutate state across calls.
pub trait PolicyModel {
    /// Runs inference, returning one probability per policy index.
    ///
    /// The returned vector is exactly `POLICY_SIZE` long and index-aligned
    /// with the move codec; no distribution property (such as summing to 1)
    /// is assumed or enforced.
    fn infer(&self, tensor: &FeatureTensor) -> Result<Vec<f32>, ModelError>;
}
