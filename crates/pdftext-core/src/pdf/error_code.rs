//! Engine failure codes and their user-facing messages.

use serde::{Deserialize, Serialize};

/// Failure code reported by a [`PdfEngine`](super::PdfEngine) when a document cannot be opened.
///
/// Numeric values follow the PDFium convention so codes coming from a native
/// engine can be passed through [`ErrorCode::from_raw`] unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    File,
    Format,
    Password,
    Security,
    Page,
    /// Any code without a dedicated category, including the engine's own "unknown".
    Unknown(u32),
}

/// Category of an open failure, as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenErrorKind {
    Success,
    FileAccess,
    BadFormat,
    PasswordRequiredOrIncorrect,
    SecurityViolation,
    PageProcessingError,
    Unknown,
}

impl ErrorCode {
    pub const RAW_SUCCESS: u32 = 0;
    pub const RAW_UNKNOWN: u32 = 1;
    pub const RAW_FILE: u32 = 2;
    pub const RAW_FORMAT: u32 = 3;
    pub const RAW_PASSWORD: u32 = 4;
    pub const RAW_SECURITY: u32 = 5;
    pub const RAW_PAGE: u32 = 6;

    /// Convert a raw engine code.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            Self::RAW_SUCCESS => Self::Success,
            Self::RAW_FILE => Self::File,
            Self::RAW_FORMAT => Self::Format,
            Self::RAW_PASSWORD => Self::Password,
            Self::RAW_SECURITY => Self::Security,
            Self::RAW_PAGE => Self::Page,
            other => Self::Unknown(other),
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            Self::Success => Self::RAW_SUCCESS,
            Self::File => Self::RAW_FILE,
            Self::Format => Self::RAW_FORMAT,
            Self::Password => Self::RAW_PASSWORD,
            Self::Security => Self::RAW_SECURITY,
            Self::Page => Self::RAW_PAGE,
            Self::Unknown(raw) => raw,
        }
    }

    pub fn kind(self) -> OpenErrorKind {
        match self {
            Self::Success => OpenErrorKind::Success,
            Self::File => OpenErrorKind::FileAccess,
            Self::Format => OpenErrorKind::BadFormat,
            Self::Password => OpenErrorKind::PasswordRequiredOrIncorrect,
            Self::Security => OpenErrorKind::SecurityViolation,
            Self::Page => OpenErrorKind::PageProcessingError,
            Self::Unknown(_) => OpenErrorKind::Unknown,
        }
    }

    /// User-facing message for this code. See [`describe`].
    pub fn message(&self) -> &'static str {
        describe(*self)
    }
}

/// Map an engine failure code to its descriptive message.
///
/// This is the only place open-failure messages are defined. Every code,
/// known or not, yields a message.
pub fn describe(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::Success => "success",
        ErrorCode::File => "file error (not found or inaccessible)",
        ErrorCode::Format => "invalid or corrupted file format",
        ErrorCode::Password => "password-protected PDF (password incorrect or missing)",
        ErrorCode::Security => "security error while opening the PDF",
        ErrorCode::Page => "error while processing a page",
        ErrorCode::Unknown(_) => "failed to open PDF",
    }
}
