use moodmix_core::ports::CacheError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("connection error: {0}")]
  Connection(String),

  #[error("pool error: {0}")]
  Pool(#[from] diesel::r2d2::PoolError),

  #[error("query error: {0}")]
  Query(#[from] diesel::result::Error),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("corrupt row: {0}")]
  Corrupt(String),

  #[error("blocking task failed: {0}")]
  Task(String),
}

impl From<StorageError> for CacheError {
  fn from(e: StorageError) -> Self {
    match e {
      StorageError::Serialization(e) => CacheError::Serialization(e.to_string()),
      other => CacheError::Storage(other.to_string()),
    }
  }
}
