//! Core library for page-range-aware PDF text extraction.
//!
//! This crate provides:
//! - A document engine seam ([`PdfEngine`]) with a lopdf implementation
//! - Page window resolution over 1-based inclusive ranges
//! - Per-page text extraction with fault isolation
//! - Title/author metadata and UTF-16 to UTF-8 conversion
//!
//! ```no_run
//! use pdftext_core::{ExtractOptions, Library, LopdfEngine};
//! use std::path::Path;
//!
//! let library = Library::start(LopdfEngine::new());
//! let options = ExtractOptions::new().with_page_start(2).with_page_end(4);
//! let result = library.extract(Path::new("report.pdf"), &options)?;
//! for page in &result.pages {
//!     println!("{}: {}", page.page_number, page.text);
//! }
//! # Ok::<(), pdftext_core::ExtractError>(())
//! ```

pub mod error;
pub mod extract;
pub mod metadata;
pub mod models;
pub mod pdf;
pub mod range;
pub mod text;

pub use error::{ExtractError, InputError, OpenError, RangeError, Result};
pub use extract::{ExtractOptions, extract, validate_path};
pub use models::config::PdftextConfig;
pub use models::result::{DocumentMetadata, ExtractionResult, PageRecord};
pub use pdf::{ErrorCode, Library, LopdfEngine, OpenErrorKind, PdfEngine, Source};
pub use range::PageRange;
pub use text::NormalizeOptions;
