//! Error types for the pdftext-core library.

use thiserror::Error;

use crate::pdf::error_code::{ErrorCode, OpenErrorKind};

/// Main error type for the pdftext library.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source argument was rejected before the engine was involved.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// The engine could not open the document.
    #[error(transparent)]
    Open(#[from] OpenError),

    /// The requested page window is empty or inverted.
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Errors raised while validating the document source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A path source was given as an empty string.
    #[error("path cannot be empty")]
    EmptyPath,

    /// The path does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// The path exists but is not a regular file.
    #[error("path is not a file: {0}")]
    NotAFile(String),
}

/// The engine refused to open a document.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", .code.message())]
pub struct OpenError {
    /// Engine failure code reported for the open attempt.
    pub code: ErrorCode,
}

impl OpenError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code }
    }

    /// Category of the failure.
    pub fn kind(&self) -> OpenErrorKind {
        self.code.kind()
    }
}

/// The resolved page window is empty.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid page range: start {start:?}, end {end:?} for a document with {page_count} pages")]
pub struct RangeError {
    /// Requested 1-based start page, if any.
    pub start: Option<i64>,
    /// Requested 1-based end page, if any.
    pub end: Option<i64>,
    /// Number of pages in the document.
    pub page_count: usize,
}

/// Result type for the pdftext library.
pub type Result<T> = std::result::Result<T, ExtractError>;
