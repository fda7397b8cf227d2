//! Page window resolution.

use crate::error::RangeError;

/// A validated, non-empty window of 0-based page indices, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: usize,
    end: usize,
}

impl PageRange {
    /// First 0-based page index.
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Last 0-based page index.
    pub fn end_index(&self) -> usize {
        self.end
    }

    /// Number of pages in the window.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: an empty window is a [`RangeError`].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Page indices in ascending order.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Resolve a 1-based inclusive request against a document of `page_count` pages.
///
/// `None` or a value `<= 0` leaves that end unbounded. Out-of-range values are
/// clamped to the document, so `5..=1000` on a 10-page document gives pages
/// 5 to 10. The request fails only when the clamped window is empty.
pub fn resolve(
    requested_start: Option<i64>,
    requested_end: Option<i64>,
    page_count: usize,
) -> Result<PageRange, RangeError> {
    let last = page_count as i64 - 1;

    let start = match requested_start {
        Some(s) if s > 0 => (s - 1).max(0),
        _ => 0,
    };
    let end = match requested_end {
        Some(e) if e > 0 => (e - 1).min(last),
        _ => last,
    };

    if start > end {
        return Err(RangeError {
            start: requested_start,
            end: requested_end,
            page_count,
        });
    }

    Ok(PageRange {
        start: start as usize,
        end: end as usize,
    })
}
