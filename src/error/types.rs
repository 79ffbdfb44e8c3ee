use thiserror::Error;

use crate::block::BlockId;
use crate::logging::LoggingError;

/// Unified result type for the block canvas crate.
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Errors surfaced by the board and its configuration. The layout engine
/// itself is total and never produces one.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("block `{0}` not found")]
    BlockNotFound(BlockId),
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
    #[error("layout config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
