//! PDF engine backed by lopdf.

use lopdf::encryption::DecryptionError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{ErrorCode, PdfDocument, PdfEngine, PdfPage, PdfTextPage, Source};
use crate::text::utf8_to_utf16;

/// Document engine using lopdf for parsing, decryption and text extraction.
///
/// lopdf needs no library-wide setup, so the lifecycle hooks are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfEngine;

impl LopdfEngine {
    /// Create a new lopdf engine.
    pub fn new() -> Self {
        Self
    }
}

impl PdfEngine for LopdfEngine {
    type Document<'src> = LopdfDocument;

    fn load_document<'src>(
        &self,
        source: Source<'src>,
        password: Option<&str>,
    ) -> Result<LopdfDocument, ErrorCode> {
        let parsed = match source {
            Source::Path(path) => {
                let data = std::fs::read(path).map_err(|e| {
                    debug!("Cannot read {}: {}", path.display(), e);
                    ErrorCode::File
                })?;
                Document::load_mem(&data)
            }
            Source::Bytes(data) => Document::load_mem(data),
        };
        let mut doc = parsed.map_err(|e| {
            debug!("Failed to parse PDF: {}", e);
            ErrorCode::Format
        })?;

        if doc.is_encrypted() {
            doc.decrypt(password.unwrap_or("")).map_err(|e| {
                debug!("Failed to decrypt PDF: {}", e);
                decrypt_error_code(&e)
            })?;
            debug!("Decrypted PDF");
        }

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        debug!("Loaded PDF with {} pages", pages.len());

        Ok(LopdfDocument { doc, pages })
    }
}

/// Classify a failed `Document::decrypt`.
fn decrypt_error_code(error: &lopdf::Error) -> ErrorCode {
    match error {
        lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => ErrorCode::Password,
        lopdf::Error::Decryption(
            DecryptionError::UnsupportedEncryption
            | DecryptionError::InvalidKeyLength
            | DecryptionError::InvalidRevision,
        ) => ErrorCode::Security,
        // missing /O, /P, /R or /ID entries, or entries of the wrong type
        lopdf::Error::Decryption(_) => ErrorCode::Format,
        // lopdf 0.35 decrypts only through a /CF/StdCF crypt filter, which
        // V1 and V2 security handlers do not have
        _ => ErrorCode::Security,
    }
}

/// An open lopdf document.
pub struct LopdfDocument {
    doc: Document,
    /// Page object ids in document order.
    pages: Vec<ObjectId>,
}

impl LopdfDocument {
    fn info_dictionary(&self) -> Option<&Dictionary> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        match self.doc.dereference(info).ok()? {
            (_, Object::Dictionary(dict)) => Some(dict),
            _ => None,
        }
    }

    fn info_text(&self, tag: &str) -> Vec<u16> {
        let Some(info) = self.info_dictionary() else {
            return Vec::new();
        };
        let Ok(value) = info.get(tag.as_bytes()) else {
            return Vec::new();
        };
        match self.doc.dereference(value) {
            Ok((_, Object::String(bytes, _))) => decode_text_string(bytes),
            _ => {
                trace!("/Info entry {} is not a string", tag);
                Vec::new()
            }
        }
    }
}

impl PdfDocument for LopdfDocument {
    type Page<'doc> = LopdfPage<'doc>;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn meta_text(&self, tag: &str, buffer: &mut [u16]) -> usize {
        let units = self.info_text(tag);
        let needed = (units.len() + 1) * 2;
        if buffer.len() * 2 >= needed {
            buffer[..units.len()].copy_from_slice(&units);
            buffer[units.len()] = 0;
        }
        needed
    }

    fn load_page(&self, index: usize) -> Option<LopdfPage<'_>> {
        let id = *self.pages.get(index)?;
        self.doc.get_dictionary(id).ok()?;
        Some(LopdfPage {
            document: self,
            number: index as u32 + 1,
        })
    }
}

/// A page of a [`LopdfDocument`].
pub struct LopdfPage<'doc> {
    document: &'doc LopdfDocument,
    /// 1-based page number, as lopdf counts pages.
    number: u32,
}

impl PdfPage for LopdfPage<'_> {
    type TextPage<'page>
        = LopdfTextPage
    where
        Self: 'page;

    fn load_text_page(&self) -> Option<LopdfTextPage> {
        match self.document.doc.extract_text(&[self.number]) {
            Ok(text) => Some(LopdfTextPage {
                units: utf8_to_utf16(&text),
            }),
            Err(e) => {
                debug!("Text extraction failed on page {}: {}", self.number, e);
                None
            }
        }
    }
}

/// Text of one page as UTF-16 code units.
pub struct LopdfTextPage {
    units: Vec<u16>,
}

impl PdfTextPage for LopdfTextPage {
    fn count_chars(&self) -> usize {
        self.units.len()
    }

    fn get_text(&self, start: usize, count: usize, buffer: &mut [u16]) -> usize {
        let start = start.min(self.units.len());
        let end = start.saturating_add(count).min(self.units.len());
        let run = &self.units[start..end];
        if buffer.len() <= run.len() {
            return 0;
        }
        buffer[..run.len()].copy_from_slice(run);
        buffer[run.len()] = 0;
        run.len() + 1
    }
}

/// Decode a PDF text string to UTF-16 code units.
///
/// Text strings are UTF-16BE with a byte order mark, UTF-8 with a BOM
/// (PDF 2.0), or PDFDocEncoding.
fn decode_text_string(bytes: &[u8]) -> Vec<u16> {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect(),
        [0xFF, 0xFE, rest @ ..] => rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8_to_utf16(&String::from_utf8_lossy(rest)),
        _ => bytes.iter().map(|&b| pdf_doc_encoding(b)).collect(),
    }
}

/// PDFDocEncoding to UTF-16. Matches Latin-1 except for the ranges below.
fn pdf_doc_encoding(byte: u8) -> u16 {
    const LOW: [u16; 8] = [
        0x02D8, 0x02C7, 0x02C6, 0x02D9, 0x02DD, 0x02DB, 0x02DA, 0x02DC,
    ];
    const HIGH: [u16; 33] = [
        0x2022, 0x2020, 0x2021, 0x2026, 0x2014, 0x2013, 0x0192, 0x2044, 0x2039, 0x203A, 0x2212,
        0x2030, 0x201E, 0x201C, 0x201D, 0x2018, 0x2019, 0x201A, 0x2122, 0xFB01, 0xFB02, 0x0141,
        0x0152, 0x0160, 0x0178, 0x017D, 0x0131, 0x0142, 0x0153, 0x0161, 0x017E, 0xFFFD, 0x20AC,
    ];
    match byte {
        0x18..=0x1F => LOW[(byte - 0x18) as usize],
        0x80..=0xA0 => HIGH[(byte - 0x80) as usize],
        _ => byte as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::utf16_to_utf8;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_utf16be_text_string() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9, 0xD8, 0x3D, 0xDE, 0x00];
        assert_eq!(utf16_to_utf8(&decode_text_string(&bytes)), "Hé\u{1F600}");
    }

    #[test]
    fn test_decode_pdf_doc_encoding() {
        let bytes = [b'C', 0xE9, b'u', 0x84, b'x', 0x92, 0xA0];
        assert_eq!(utf16_to_utf8(&decode_text_string(&bytes)), "Céu\u{2014}x\u{2122}\u{20AC}");
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("Ação".as_bytes());
        assert_eq!(utf16_to_utf8(&decode_text_string(&bytes)), "Ação");
    }

    #[test]
    fn test_get_text_needs_terminator_slot() {
        let text_page = LopdfTextPage {
            units: utf8_to_utf16("abc"),
        };
        let mut small = [0u16; 3];
        assert_eq!(text_page.get_text(0, 3, &mut small), 0);
        let mut exact = [0u16; 4];
        assert_eq!(text_page.get_text(0, 3, &mut exact), 4);
        assert_eq!(text_page.get_text(1, 10, &mut exact), 3);
    }

    #[test]
    fn test_decrypt_error_code() {
        let code = |e: DecryptionError| decrypt_error_code(&lopdf::Error::Decryption(e));

        assert_eq!(code(DecryptionError::IncorrectPassword), ErrorCode::Password);
        assert_eq!(code(DecryptionError::UnsupportedEncryption), ErrorCode::Security);
        assert_eq!(code(DecryptionError::InvalidKeyLength), ErrorCode::Security);
        assert_eq!(code(DecryptionError::InvalidRevision), ErrorCode::Security);
        assert_eq!(code(DecryptionError::MissingOwnerPassword), ErrorCode::Format);
        assert_eq!(code(DecryptionError::MissingFileID), ErrorCode::Format);
        assert_eq!(code(DecryptionError::InvalidType), ErrorCode::Format);
        assert_eq!(
            decrypt_error_code(&lopdf::Error::DictKey("CF".into())),
            ErrorCode::Security
        );
    }

    #[test]
    fn test_garbage_is_format_error() {
        let result = LopdfEngine::new().load_document(Source::Bytes(b"not a pdf at all"), None);
        assert_eq!(result.err(), Some(ErrorCode::Format));
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");
        let result = LopdfEngine::new().load_document(Source::Path(&path), None);
        assert_eq!(result.err(), Some(ErrorCode::File));
    }
}
