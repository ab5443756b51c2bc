use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Column not found in result set: {column}")]
    ColumnNotFound { column: String },

    #[error("Column {column} cannot be read as {expected}")]
    TypeMismatch { column: String, expected: String },

    #[error("Cursor column index out of range: {0}")]
    ColumnOutOfRange(usize),

    #[error("Cursor is not positioned on a row")]
    NoCurrentRow,

    #[error("Cursor already closed")]
    CursorClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
