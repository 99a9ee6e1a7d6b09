use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}
