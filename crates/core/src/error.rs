//! Error types for Markdown-to-slide conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a Markdown document into a deck.
///
/// Most problems met during parsing and placement are not errors at all: they
/// are recorded as warnings and the conversion carries on. Only the variants
/// below ever reach the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read an input or write an output file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document produced no slides at all.
    #[error("No slides generated from Markdown content")]
    NoSlides,

    /// The rendering backend rejected a single slide.
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// The rendering backend could not write the finished deck.
    #[error("Failed to save: {0}")]
    FinalizeError(String),

    /// A theme definition could not be loaded.
    #[error("Invalid theme: {0}")]
    ThemeError(String),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
