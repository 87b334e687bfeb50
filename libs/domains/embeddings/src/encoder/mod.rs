//! Text encoders producing fixed-size sentence vectors.
//!
//! [`MiniLmEncoder`] runs the all-MiniLM-L6-v2 model locally via candle;
//! [`HashEncoder`] is a deterministic stand-in for environments without
//! model weights.

mod hash;
mod minilm;

pub use hash::HashEncoder;
pub use minilm::MiniLmEncoder;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncoderError {
    /// Model weights or tokenizer could not be loaded. Fatal at startup.
    #[error("Failed to initialize encoder: {0}")]
    Init(String),

    #[error("Cannot encode empty text")]
    EmptyText,

    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// A deterministic text-to-vector encoder.
///
/// Implementations must return L2-normalized vectors of exactly
/// `dimension()` elements and produce identical output for identical input.
pub trait TextEncoder: Send + Sync {
    /// Output vector length
    fn dimension(&self) -> usize;

    /// Encode a single piece of text
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError>;
}

/// L2-normalize in place. Leaves an all-zero vector untouched.
pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
