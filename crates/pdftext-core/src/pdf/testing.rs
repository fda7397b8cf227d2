//! Scripted in-memory engine for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{ErrorCode, PdfDocument, PdfEngine, PdfPage, PdfTextPage, Source};
use crate::text::utf8_to_utf16;

/// Behaviour of one scripted page.
#[derive(Debug, Clone)]
pub enum FakePage {
    /// Loads and yields these code units.
    Text(Vec<u16>),
    /// `load_page` fails.
    Broken,
    /// The page loads but no text session can be opened.
    NoTextSession,
    /// The text session reports characters but `get_text` fails.
    Unreadable,
}

impl FakePage {
    pub fn text(text: &str) -> Self {
        FakePage::Text(utf8_to_utf16(text))
    }
}

#[derive(Debug, Default)]
struct Counters {
    initialized: Cell<usize>,
    shut_down: Cell<usize>,
    docs_opened: Cell<usize>,
    docs_closed: Cell<usize>,
    pages_opened: Cell<usize>,
    pages_closed: Cell<usize>,
    text_pages_opened: Cell<usize>,
    text_pages_closed: Cell<usize>,
    passwords: RefCell<Vec<Option<String>>>,
    sources: RefCell<Vec<String>>,
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

/// Shared view of everything the fake engine did.
#[derive(Debug, Clone, Default)]
pub struct FakeStats(Rc<Counters>);

impl FakeStats {
    pub fn initialized(&self) -> usize {
        self.0.initialized.get()
    }

    pub fn shut_down(&self) -> usize {
        self.0.shut_down.get()
    }

    pub fn docs_opened(&self) -> usize {
        self.0.docs_opened.get()
    }

    pub fn docs_closed(&self) -> usize {
        self.0.docs_closed.get()
    }

    pub fn pages_opened(&self) -> usize {
        self.0.pages_opened.get()
    }

    pub fn pages_closed(&self) -> usize {
        self.0.pages_closed.get()
    }

    pub fn text_pages_opened(&self) -> usize {
        self.0.text_pages_opened.get()
    }

    pub fn text_pages_closed(&self) -> usize {
        self.0.text_pages_closed.get()
    }

    /// Password argument of every `load_document` call.
    pub fn passwords(&self) -> Vec<Option<String>> {
        self.0.passwords.borrow().clone()
    }

    /// `"path"` or `"bytes"` for every `load_document` call.
    pub fn sources(&self) -> Vec<String> {
        self.0.sources.borrow().clone()
    }
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    pages: Vec<FakePage>,
    meta: Vec<(String, Vec<u16>)>,
    password: Option<String>,
    open_error: Option<ErrorCode>,
    stats: FakeStats,
}

impl FakeEngine {
    pub fn with_pages(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn with_meta(mut self, tag: &str, value: &str) -> Self {
        self.meta.push((tag.to_string(), utf8_to_utf16(value)));
        self
    }

    /// Require `password` to open.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Fail every open with `code`.
    pub fn failing_with(mut self, code: ErrorCode) -> Self {
        self.open_error = Some(code);
        self
    }

    pub fn stats(&self) -> FakeStats {
        self.stats.clone()
    }
}

impl PdfEngine for FakeEngine {
    type Document<'src> = FakeDocument;

    fn initialize(&self) {
        bump(&self.stats.0.initialized);
    }

    fn shutdown(&self) {
        bump(&self.stats.0.shut_down);
    }

    fn load_document<'src>(
        &self,
        source: Source<'src>,
        password: Option<&str>,
    ) -> Result<FakeDocument, ErrorCode> {
        let counters = &self.stats.0;
        counters.passwords.borrow_mut().push(password.map(str::to_string));
        counters.sources.borrow_mut().push(
            match source {
                Source::Path(_) => "path",
                Source::Bytes(_) => "bytes",
            }
            .to_string(),
        );

        if let Some(code) = self.open_error {
            return Err(code);
        }
        if self.password.is_some() && self.password.as_deref() != password {
            return Err(ErrorCode::Password);
        }

        bump(&counters.docs_opened);
        Ok(FakeDocument {
            pages: self.pages.clone(),
            meta: self.meta.clone(),
            refill: Vec::new(),
            stats: self.stats.clone(),
            meta_calls: Cell::new(0),
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeDocument {
    pages: Vec<FakePage>,
    meta: Vec<(String, Vec<u16>)>,
    /// Values served to fill calls (non-empty buffer) instead of `meta`.
    refill: Vec<(String, Vec<u16>)>,
    stats: FakeStats,
    meta_calls: Cell<usize>,
}

impl FakeDocument {
    pub fn with_meta(self, tag: &str, value: &str) -> Self {
        self.with_raw_meta(tag, utf8_to_utf16(value))
    }

    pub fn with_raw_meta(mut self, tag: &str, units: Vec<u16>) -> Self {
        self.meta.push((tag.to_string(), units));
        self
    }

    /// Make `tag` read as `value` once a buffer is supplied, as if the
    /// field changed between the size query and the fill.
    pub fn changing_after_query(mut self, tag: &str, value: &str) -> Self {
        self.refill.push((tag.to_string(), utf8_to_utf16(value)));
        self
    }

    pub fn meta_calls(&self) -> usize {
        self.meta_calls.get()
    }
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        bump(&self.stats.0.docs_closed);
    }
}

impl PdfDocument for FakeDocument {
    type Page<'doc> = FakePageHandle<'doc>;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn meta_text(&self, tag: &str, buffer: &mut [u16]) -> usize {
        bump(&self.meta_calls);
        let filling = !buffer.is_empty();
        let units = self
            .refill
            .iter()
            .filter(|_| filling)
            .chain(&self.meta)
            .find(|(t, _)| t == tag)
            .map(|(_, units)| units.as_slice())
            .unwrap_or(&[]);

        let needed = (units.len() + 1) * 2;
        if buffer.len() * 2 >= needed {
            buffer[..units.len()].copy_from_slice(units);
            buffer[units.len()] = 0;
        }
        needed
    }

    fn load_page(&self, index: usize) -> Option<FakePageHandle<'_>> {
        match self.pages.get(index)? {
            FakePage::Broken => None,
            page => {
                bump(&self.stats.0.pages_opened);
                Some(FakePageHandle {
                    page,
                    stats: &self.stats,
                })
            }
        }
    }
}

pub struct FakePageHandle<'doc> {
    page: &'doc FakePage,
    stats: &'doc FakeStats,
}

impl Drop for FakePageHandle<'_> {
    fn drop(&mut self) {
        bump(&self.stats.0.pages_closed);
    }
}

impl PdfPage for FakePageHandle<'_> {
    type TextPage<'page>
        = FakeTextPage<'page>
    where
        Self: 'page;

    fn load_text_page(&self) -> Option<FakeTextPage<'_>> {
        if let FakePage::NoTextSession = self.page {
            return None;
        }
        bump(&self.stats.0.text_pages_opened);
        Some(FakeTextPage {
            page: self.page,
            stats: self.stats,
        })
    }
}

pub struct FakeTextPage<'page> {
    page: &'page FakePage,
    stats: &'page FakeStats,
}

impl Drop for FakeTextPage<'_> {
    fn drop(&mut self) {
        bump(&self.stats.0.text_pages_closed);
    }
}

impl PdfTextPage for FakeTextPage<'_> {
    fn count_chars(&self) -> usize {
        match self.page {
            FakePage::Text(units) => units.len(),
            FakePage::Unreadable => 5,
            _ => 0,
        }
    }

    fn get_text(&self, start: usize, count: usize, buffer: &mut [u16]) -> usize {
        let FakePage::Text(units) = self.page else {
            return 0;
        };
        let end = (start + count).min(units.len());
        let slice = &units[start.min(end)..end];
        if buffer.len() < slice.len() + 1 {
            return 0;
        }
        buffer[..slice.len()].copy_from_slice(slice);
        buffer[slice.len()] = 0;
        slice.len() + 1
    }
}
