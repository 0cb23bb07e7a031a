//! Error types for cloudsketch operations.
//!
//! [`DiagramBuilder::generate`](crate::DiagramBuilder::generate) never returns
//! these: it converts them into a fallback diagram. They surface through
//! [`DiagramBuilder::try_generate`](crate::DiagramBuilder::try_generate) and
//! the CLI.

use std::io;

use thiserror::Error;

/// The main error type for cloudsketch operations.
#[derive(Debug, Error)]
pub enum CloudsketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recognition error: {0}")]
    Recognize(#[from] cloudsketch_parser::error::Error),
}
