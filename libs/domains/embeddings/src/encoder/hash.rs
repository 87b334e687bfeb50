use std::hash::{Hash, Hasher};

use twox_hash::XxHash64;

use crate::encoder::{EncoderError, TextEncoder, l2_normalize};
use crate::models::EMBEDDING_DIM;

const HASH_SEED: u64 = 0;

/// Deterministic token-hashing encoder.
///
/// Each whitespace token is hashed into a bucket of the output vector, so
/// equal texts always produce equal vectors. Useful for tests and for
/// running the worker without model weights.
pub struct HashEncoder {
    dim: usize,
}

impl HashEncoder {
    pub fn new() -> Self {
        Self { dim: EMBEDDING_DIM }
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder for HashEncoder {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        if text.trim().is_empty() {
            return Err(EncoderError::EmptyText);
        }

        let mut vector = vec![0f32; self.dim];
        for (position, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(HASH_SEED);
            token.hash(&mut hasher);
            let h = hasher.finish();

            let bucket = (h as usize) % self.dim;
            let weight = ((h >> 32) as u32) as f32 / u32::MAX as f32;
            vector[bucket] += weight + (position % 3) as f32 * 0.01;
        }

        l2_normalize(&mut vector);
        Ok(vector)
    }
}
