//! Error handling for the compression planner

use thiserror::Error;

/// Main error type for compression estimation and classification
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported compression type: {0}")]
    UnsupportedCompression(String),

    #[error("Bitmap extraction failed: {0}")]
    Bitmap(String),

    #[error("Size model error: {0}")]
    SizeModel(String),

    #[error("Worker pool error: {0}")]
    Worker(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for compression operations
pub type CompressionResult<T> = std::result::Result<T, CompressionError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_err {
    ($msg:expr) => {
        $crate::common::error::CompressionError::InvalidConfig($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::CompressionError::InvalidConfig(format!($fmt, $($arg)*))
    };
}

/// Macro for creating invalid argument errors
#[macro_export]
macro_rules! invalid_arg_err {
    ($msg:expr) => {
        $crate::common::error::CompressionError::InvalidArgument($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::CompressionError::InvalidArgument(format!($fmt, $($arg)*))
    };
}
