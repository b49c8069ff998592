//! Error types for notion-blocks.

use std::io;
use thiserror::Error;

/// Result type alias for notion-blocks operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, converting or writing content.
///
/// Markdown-to-block conversion itself never fails as a whole; element-level
/// failures are reported through [`crate::parser::ConversionResult::errors`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed block or page JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Caller-supplied argument is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failure to map one Markdown element to a block.
///
/// These never abort a conversion; the element is skipped and the message is
/// recorded alongside the blocks that did convert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    /// Inline markup opened and closed out of order.
    #[error("unbalanced {0} markup")]
    Unbalanced(&'static str),

    /// A list element without any item.
    #[error("list has no items")]
    EmptyList,

    /// An image with an empty destination.
    #[error("image has no URL")]
    MissingImageUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("batch size must be at least 1".into());
        assert_eq!(err.to_string(), "Invalid input: batch size must be at least 1");

        let err = Error::Render("bad".into());
        assert_eq!(err.to_string(), "Rendering error: bad");
    }

    #[test]
    fn test_element_error_display() {
        assert_eq!(
            ElementError::Unbalanced("emphasis").to_string(),
            "unbalanced emphasis markup"
        );
        assert_eq!(ElementError::MissingImageUrl.to_string(), "image has no URL");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
