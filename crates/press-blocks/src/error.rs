//! Block tree error types.

use thiserror::Error;

/// Errors that can occur when loading a block tree.
#[derive(Error, Debug)]
pub enum BlockError {
    /// The input is not a valid parsed block tree.
    #[error("Invalid block tree: {0}")]
    InvalidTree(#[from] serde_json::Error),
}
