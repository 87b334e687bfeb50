//! Embeddings Domain
//!
//! Project text is enqueued as an [`EmbeddingRecord`] with an unset vector.
//! A background worker polls for pending records, encodes each text with a
//! [`encoder::TextEncoder`] and commits the resulting 384-dimensional vector
//! back to the store. Each record is committed independently, so one bad
//! record never blocks the rest of a batch.

pub mod encoder;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod processor;
pub mod repository;

pub use encoder::{EncoderError, HashEncoder, MiniLmEncoder, TextEncoder};
pub use error::{EmbeddingError, EmbeddingResult};
pub use models::{CreateEmbeddingRecord, EMBEDDING_DIM, EmbeddingRecord, EmbeddingType};
pub use postgres::PgEmbeddingRepository;
pub use processor::{RecordOutcome, RecordProcessor};
pub use repository::{EmbeddingRepository, InMemoryEmbeddingRepository};
