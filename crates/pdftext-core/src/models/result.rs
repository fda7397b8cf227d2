//! Extraction output.

use serde::{Deserialize, Serialize};

use crate::text::{NormalizeOptions, normalize};

/// Document-level metadata.
///
/// Fields unknown to the document are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    /// Total pages in the document, independent of the requested window.
    #[serde(rename = "pages")]
    pub page_count: usize,
}

/// Text of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Absolute 1-based position of the page in the document.
    #[serde(rename = "page")]
    pub page_number: usize,
    pub text: String,
}

/// Metadata plus one record per page of the resolved window, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub metadata: DocumentMetadata,
    pub pages: Vec<PageRecord>,
}

impl ExtractionResult {
    /// All page texts joined with `separator`.
    pub fn joined_text(&self, separator: &str) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// A copy with every page's text normalized.
    pub fn normalized(&self, options: &NormalizeOptions) -> Self {
        Self {
            metadata: self.metadata.clone(),
            pages: self
                .pages
                .iter()
                .map(|p| PageRecord {
                    page_number: p.page_number,
                    text: normalize(&p.text, options),
                })
                .collect(),
        }
    }
}
