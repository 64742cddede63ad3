use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Key contains path traversal or is otherwise unusable.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// No object is stored under the key.
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
