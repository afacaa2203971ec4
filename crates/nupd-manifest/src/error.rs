//! Error types for the manifest crate.
//!
//! Only document-level failures are errors. Individual fields that fail to
//! convert are never surfaced here; see [`crate::warning`] for the optional
//! diagnostics channel.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort decoding of a whole manifest.
#[derive(Error, Diagnostic, Debug)]
pub enum ManifestError {
    #[error("Malformed manifest at line {line}, column {col}: {msg}")]
    #[diagnostic(
        code(nupd_manifest::malformed),
        help("The manifest could not be tokenized as INI text; check section headers and key lines")
    )]
    MalformedDocument {
        line: usize,
        col: usize,
        msg: String,
    },

    #[error("Manifest is not valid UTF-8: {0}")]
    #[diagnostic(
        code(nupd_manifest::encoding),
        help("The manifest file may be truncated or corrupted")
    )]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

impl From<ini::ParseError> for ManifestError {
    fn from(err: ini::ParseError) -> Self {
        Self::MalformedDocument {
            line: err.line,
            col: err.col,
            msg: err.msg.to_string(),
        }
    }
}

/// A specialized Result type for manifest decoding.
pub type Result<T> = std::result::Result<T, ManifestError>;
