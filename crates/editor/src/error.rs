//! Error types for the editor crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors that can occur during editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// No image has been loaded yet
    #[error("No image loaded")]
    NotLoaded,

    /// `load` was called without a path and no source file was set
    #[error("No source file set")]
    NoSourceFile,

    /// `save` was called without a path and no target file was set
    #[error("No target file set")]
    NoTargetFile,

    /// Source file does not exist
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Requested or derived dimensions cannot be used as pixel sizes
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested or derived width
        width: f64,
        /// Requested or derived height
        height: f64,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Decode, encode or resize failure from the imaging library
    #[error("Image processing error: {0}")]
    ProcessingError(#[from] image::ImageError),
}
