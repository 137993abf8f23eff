//! Error types for document load and save.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or saving a document.
///
/// Any of these aborts the whole operation: the loader never hands back
/// a partially built tree, and the writer leaves no partial file behind
/// where avoidable.
#[derive(Debug, Error)]
pub enum FormatError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Malformed document structure.
    #[error("malformed document: {message}")]
    Malformed { message: String },

    /// A float token that does not parse.
    #[error("invalid numeric token: {token:?}")]
    NumericToken { token: String },

    /// A stroke body with an odd number of coordinate tokens.
    #[error("stroke has an odd number of coordinate tokens ({count})")]
    OddCoordinateCount { count: usize },

    /// Unrecognized page background token.
    #[error("unknown page background: {value:?}")]
    UnknownPageType { value: String },

    /// A required attribute is missing from an element.
    #[error("element <{tag}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },

    /// Recognized container, incompatible document version.
    #[error("unsupported document version: {version:?}")]
    UnsupportedVersion { version: String },

    /// Markup syntax error from the XML parser.
    #[error("markup error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax.
    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid escape sequence in markup text.
    #[error("escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Text decoding error from the markup parser.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Archive container error.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

impl FormatError {
    /// Create a Malformed error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a MissingAttribute error.
    pub fn missing_attribute(tag: &'static str, attribute: &'static str) -> Self {
        Self::MissingAttribute { tag, attribute }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormatError::malformed("unexpected tag");
        assert_eq!(format!("{err}"), "malformed document: unexpected tag");

        let err = FormatError::missing_attribute("stroke", "width");
        assert_eq!(
            format!("{err}"),
            "element <stroke> is missing required attribute \"width\""
        );

        let err = FormatError::OddCoordinateCount { count: 3 };
        assert!(format!("{err}").contains("odd number"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: FormatError = io_err.into();
        assert!(matches!(err, FormatError::Io(_)));
    }
}
