use std::path::Path;

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;

use crate::encoder::{EncoderError, TextEncoder, l2_normalize};
use crate::models::EMBEDDING_DIM;

const MAX_TOKENS: usize = 256;

/// all-MiniLM-L6-v2 sentence encoder running on CPU via candle.
///
/// Expects a model directory containing `tokenizer.json`, `config.json`
/// and `model.safetensors`.
pub struct MiniLmEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl MiniLmEncoder {
    pub fn load(model_dir: &Path) -> Result<Self, EncoderError> {
        let device = Device::Cpu;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            EncoderError::Init(format!(
                "Failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            ))
        })?;

        let config_path = model_dir.join("config.json");
        let config_json = std::fs::read_to_string(&config_path).map_err(|e| {
            EncoderError::Init(format!(
                "Failed to read config from {}: {}",
                config_path.display(),
                e
            ))
        })?;
        let config: BertConfig = serde_json::from_str(&config_json)
            .map_err(|e| EncoderError::Init(format!("Invalid model config: {}", e)))?;

        if config.hidden_size != EMBEDDING_DIM {
            return Err(EncoderError::Init(format!(
                "Model hidden size is {}, expected {}",
                config.hidden_size, EMBEDDING_DIM
            )));
        }

        let weights_path = model_dir.join("model.safetensors");
        let tensors = candle_core::safetensors::load(&weights_path, &device).map_err(|e| {
            EncoderError::Init(format!(
                "Failed to load weights from {}: {}",
                weights_path.display(),
                e
            ))
        })?;
        let vb = VarBuilder::from_tensors(tensors, DTYPE, &device);
        let model = BertModel::load(vb, &config)
            .map_err(|e| EncoderError::Init(format!("Failed to build model: {}", e)))?;

        tracing::info!(model_dir = %model_dir.display(), "Loaded MiniLM encoder");
        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn encode_tensor(&self, text: &str) -> Result<Vec<f32>, candle_core::Error> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| candle_core::Error::Msg(format!("Tokenization failed: {}", e)))?;

        let mut ids = encoding.get_ids().to_vec();
        let mut mask = encoding.get_attention_mask().to_vec();
        ids.truncate(MAX_TOKENS);
        mask.truncate(MAX_TOKENS);

        let len = ids.len();
        let input_ids = Tensor::from_vec(ids, (1, len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (1, len), &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Mean pooling over non-padding tokens
        let mask_f = attention_mask.to_dtype(hidden.dtype())?.unsqueeze(2)?;
        let masked = hidden.broadcast_mul(&mask_f)?;
        let summed = masked.sum(1)?;
        let counts = mask_f.sum(1)?.clamp(1e-9, f64::INFINITY)?;
        let pooled = summed.broadcast_div(&counts)?;

        pooled.squeeze(0)?.to_vec1::<f32>()
    }
}

impl TextEncoder for MiniLmEncoder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        if text.trim().is_empty() {
            return Err(EncoderError::EmptyText);
        }

        let mut vector = self
            .encode_tensor(text)
            .map_err(|e| EncoderError::Encode(e.to_string()))?;

        if vector.len() != EMBEDDING_DIM {
            return Err(EncoderError::Encode(format!(
                "Model produced a {}-dimensional vector, expected {}",
                vector.len(),
                EMBEDDING_DIM
            )));
        }

        l2_normalize(&mut vector);
        Ok(vector)
    }
}
