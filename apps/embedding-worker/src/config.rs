//! Configuration for the embedding worker

use std::path::PathBuf;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};
use database::postgres::PostgresConfig;

/// Which encoder implementation the worker should run
#[derive(Debug, Clone)]
pub enum EncoderConfig {
    /// all-MiniLM-L6-v2 via candle, loaded from a local model directory
    MiniLm { model_dir: PathBuf },
    /// Deterministic hash encoder, no model weights needed
    Hash,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database: PostgresConfig,
    pub encoder: EncoderConfig,
    /// Sleep between successful passes, including empty ones
    pub poll_interval_secs: u64,
    /// Sleep after a failed fetch of the pending batch
    pub error_interval_secs: u64,
}

impl WorkerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn error_interval(&self) -> Duration {
        Duration::from_secs(self.error_interval_secs)
    }
}

impl FromEnv for WorkerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let encoder = match env_or_default("EMBEDDING_ENCODER", "minilm").as_str() {
            "hash" => EncoderConfig::Hash,
            "minilm" => EncoderConfig::MiniLm {
                model_dir: PathBuf::from(env_required("EMBEDDING_MODEL_DIR")?),
            },
            other => {
                return Err(ConfigError::ParseError {
                    key: "EMBEDDING_ENCODER".to_string(),
                    details: format!("unknown encoder '{}', expected 'minilm' or 'hash'", other),
                });
            }
        };

        Ok(Self {
            database: PostgresConfig::from_env()?,
            encoder,
            poll_interval_secs: env_parse_or_default("EMBEDDING_POLL_INTERVAL_SECS", "10")?,
            error_interval_secs: env_parse_or_default("EMBEDDING_ERROR_INTERVAL_SECS", "30")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/test")),
                ("EMBEDDING_ENCODER", Some("hash")),
                ("EMBEDDING_POLL_INTERVAL_SECS", None),
                ("EMBEDDING_ERROR_INTERVAL_SECS", None),
            ],
            || {
                let config = WorkerConfig::from_env().unwrap();
                assert_eq!(config.poll_interval(), Duration::from_secs(10));
                assert_eq!(config.error_interval(), Duration::from_secs(30));
                assert!(matches!(config.encoder, EncoderConfig::Hash));
            },
        );
    }

    #[test]
    fn test_minilm_requires_model_dir() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/test")),
                ("EMBEDDING_ENCODER", Some("minilm")),
                ("EMBEDDING_MODEL_DIR", None),
            ],
            || {
                let result = WorkerConfig::from_env();
                assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
            },
        );
    }

    #[test]
    fn test_unknown_encoder_rejected() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/test")),
                ("EMBEDDING_ENCODER", Some("openai")),
            ],
            || {
                let result = WorkerConfig::from_env();
                assert!(matches!(result, Err(ConfigError::ParseError { .. })));
            },
        );
    }
}
