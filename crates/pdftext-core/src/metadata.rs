//! Document-level metadata fields.

use tracing::trace;

use crate::pdf::PdfDocument;
use crate::text::utf16_to_utf8;

/// Size the engine reports for a field with no content: just the NUL terminator.
const EMPTY_FIELD_BYTES: usize = 2;

/// Read the `/Info` text field `tag` as UTF-8.
///
/// A missing or empty field is an empty string, never an error.
pub fn read_field<D: PdfDocument>(document: &D, tag: &str) -> String {
    let bytes = document.meta_text(tag, &mut []);
    if bytes <= EMPTY_FIELD_BYTES {
        trace!("metadata field {} is empty", tag);
        return String::new();
    }

    let mut buffer = vec![0u16; bytes.div_ceil(2)];
    let filled = document.meta_text(tag, &mut buffer);
    if filled > buffer.len() * 2 {
        // the field grew between the two calls; the buffer was left untouched
        trace!("metadata field {} changed size during read", tag);
        return String::new();
    }
    utf16_to_utf8(&buffer[..filled / 2])
}
