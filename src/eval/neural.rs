//! ONNX-backed policy model via ONNX Runtime.
//!
//! Loads a trained policy network and runs single-position inference using
//! the `ort` crate. Only the policy head is consumed; a value head, if the
//! artifact exports one, is ignored.

use std::sync::Mutex;

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use super::{ModelError, PolicyModel};
use crate::nn::tensor::FeatureTensor;
use crate::protocol::uci::POLICY_SIZE;

/// An ONNX policy model session.
///
/// Constructed explicitly by the serving layer and passed by reference into
/// the predictor; the session itself is the only shared resource, guarded
/// by a mutex because `ort` runs inference on `&mut Session`.
pub struct OnnxPolicy {
    session: Mutex<Session>,
}

impl OnnxPolicy {
    /// Loads an ONNX model from a file path.
    pub fn load(path: &str) -> Result<OnnxPolicy, ModelError> {
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(4))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| ModelError::Load {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        eprintln!("info string loaded policy model from {}", path);

        Ok(OnnxPolicy {
            session: Mutex::new(session),
        })
    }
}

impl PolicyModel for OnnxPolicy {
    fn infer(&self, tensor: &FeatureTensor) -> Result<Vec<f32>, ModelError> {
        let [rows, cols, planes] = tensor.shape();

        let input = Value::from_array(([1, rows, cols, planes], tensor.as_slice().to_vec()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("model session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        if data.len() < POLICY_SIZE {
            return Err(ModelError::OutputLength {
                expected: POLICY_SIZE,
                got: data.len(),
            });
        }

        Ok(data[..POLICY_SIZE].to_vec())
    }
}
