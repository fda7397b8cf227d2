//! Document engine abstraction.
//!
//! The extraction pipeline talks to the PDF engine only through the traits in
//! this module. Handles are plain owned values released on drop: a page
//! borrows its document and a text session borrows its page, so the borrow
//! checker enforces release order.

pub mod error_code;
mod extractor;
mod library;

#[cfg(test)]
pub(crate) mod testing;

pub use error_code::{ErrorCode, OpenErrorKind, describe};
pub use extractor::LopdfEngine;
pub use library::Library;

use std::path::Path;

/// Where the document bytes come from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// The engine opens and reads the file itself.
    Path(&'a Path),
    /// The whole document held in memory by the caller.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Bytes(bytes.as_slice())
    }
}

/// A document engine.
///
/// `initialize` and `shutdown` are library-wide hooks; they are driven by
/// [`Library`] and never called per document.
pub trait PdfEngine {
    /// An open document. May borrow the source buffer.
    type Document<'src>: PdfDocument;

    /// One-time library setup.
    fn initialize(&self) {}

    /// One-time library teardown.
    fn shutdown(&self) {}

    /// Open a document. `password` is `None` when no password was supplied.
    fn load_document<'src>(
        &self,
        source: Source<'src>,
        password: Option<&str>,
    ) -> Result<Self::Document<'src>, ErrorCode>;
}

/// An open document handle.
pub trait PdfDocument {
    type Page<'doc>: PdfPage
    where
        Self: 'doc;

    fn page_count(&self) -> usize;

    /// Copy the `/Info` entry `tag` into `buffer` as UTF-16 code units
    /// followed by a NUL terminator.
    ///
    /// Returns the number of bytes required, terminator included. A missing
    /// entry still reports 2 (just the terminator). The buffer is only
    /// written when it is large enough, so calling with an empty buffer is a
    /// pure size query.
    fn meta_text(&self, tag: &str, buffer: &mut [u16]) -> usize;

    /// Load the page at 0-based `index`. `None` when the page cannot be loaded.
    fn load_page(&self, index: usize) -> Option<Self::Page<'_>>;
}

/// A loaded page handle.
pub trait PdfPage {
    type TextPage<'page>: PdfTextPage
    where
        Self: 'page;

    /// Open a text-extraction session for this page.
    fn load_text_page(&self) -> Option<Self::TextPage<'_>>;
}

/// A text-extraction session for one page.
pub trait PdfTextPage {
    /// Number of UTF-16 code units available on the page.
    fn count_chars(&self) -> usize;

    /// Copy up to `count` code units starting at `start` into `buffer`,
    /// followed by a NUL terminator.
    ///
    /// Returns the number of units written including the terminator, or 0 on
    /// failure.
    fn get_text(&self, start: usize, count: usize, buffer: &mut [u16]) -> usize;
}
