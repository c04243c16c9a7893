#[derive(Debug, thiserror::Error)]
pub enum QuickdexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("discovery failed: {0}")]
    Discovery(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("revision conflict for document {0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, QuickdexError>;
