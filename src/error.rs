//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while converting note content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The input is missing a structural element its format requires
    /// (for ENML, the `<en-note>` root)
    #[error("Format error: {0}")]
    Format(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConversionError>;
