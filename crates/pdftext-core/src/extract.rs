//! Extraction driver: open, resolve the page window, read metadata, pull
//! page text, close.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{InputError, OpenError, Result};
use crate::metadata::read_field;
use crate::models::result::{DocumentMetadata, ExtractionResult, PageRecord};
use crate::pdf::{PdfDocument, PdfEngine, PdfPage, PdfTextPage, Source};
use crate::range;
use crate::text::utf16_to_utf8;

/// Options for one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Document password. `None` and `Some("")` both mean no password.
    pub password: Option<String>,
    /// First page, 1-based inclusive. `None` or `<= 0` means the first page.
    pub page_start: Option<i64>,
    /// Last page, 1-based inclusive. `None` or `<= 0` means the last page.
    pub page_end: Option<i64>,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_page_start(mut self, page: i64) -> Self {
        self.page_start = Some(page);
        self
    }

    pub fn with_page_end(mut self, page: i64) -> Self {
        self.page_end = Some(page);
        self
    }

    /// Password to hand to the engine.
    fn engine_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Extract metadata and per-page text from `source`.
///
/// Fails only when the source is rejected, the document cannot be opened, or
/// the page window is empty. A page that cannot be loaded or read still gets
/// a record, with empty text.
pub fn extract<E: PdfEngine>(
    engine: &E,
    source: Source<'_>,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    if let Source::Path(path) = source {
        if path.as_os_str().is_empty() {
            return Err(InputError::EmptyPath.into());
        }
    }

    let document = engine
        .load_document(source, options.engine_password())
        .map_err(|code| {
            debug!("open failed with code {:?}", code);
            OpenError::new(code)
        })?;

    let page_count = document.page_count();
    let window = range::resolve(options.page_start, options.page_end, page_count)?;
    debug!(
        "Extracting pages {}..={} of {}",
        window.start_index() + 1,
        window.end_index() + 1,
        page_count
    );

    let metadata = DocumentMetadata {
        title: read_field(&document, "Title"),
        author: read_field(&document, "Author"),
        page_count,
    };

    let mut pages = Vec::with_capacity(window.len());
    for index in window.indices() {
        pages.push(PageRecord {
            page_number: index + 1,
            text: page_text(&document, index),
        });
    }

    drop(document);

    Ok(ExtractionResult { metadata, pages })
}

/// Text of the page at `index`, or an empty string when the page cannot be
/// loaded or read.
fn page_text<D: PdfDocument>(document: &D, index: usize) -> String {
    let Some(page) = document.load_page(index) else {
        warn!("Failed to load page {}", index + 1);
        return String::new();
    };
    let Some(text_page) = page.load_text_page() else {
        warn!("Failed to open text session for page {}", index + 1);
        return String::new();
    };

    let count = text_page.count_chars();
    trace!("Page {} has {} characters", index + 1, count);
    if count == 0 {
        return String::new();
    }

    // one extra slot for the terminator
    let mut buffer = vec![0u16; count + 1];
    let written = text_page.get_text(0, count, &mut buffer);
    if written == 0 {
        warn!("Failed to read text of page {}", index + 1);
        return String::new();
    }

    let len = (written - 1).min(count);
    utf16_to_utf8(&buffer[..len])
}

/// Check that `path` names an existing regular file.
pub fn validate_path(path: &Path) -> std::result::Result<(), InputError> {
    if path.as_os_str().is_empty() {
        return Err(InputError::EmptyPath);
    }
    let display = path.display().to_string();
    let metadata = std::fs::metadata(path).map_err(|_| InputError::NotFound(display.clone()))?;
    if !metadata.is_file() {
        return Err(InputError::NotAFile(display));
    }
    Ok(())
}
