//! Extracted document types supplied by the document-extraction collaborator.
//!
//! The engine never reads PDFs itself. An upstream extractor delivers each
//! document as a sequence of pages, each page carrying its plain text and
//! zero or more tables of optionally-absent string cells. These types are
//! the whole contract between that collaborator and the engine.

use serde::{Deserialize, Serialize};

/// One extracted table: an ordered sequence of rows of optional cells.
///
/// A cell is `None` when the extractor could not recover any text for it,
/// which is common in OCR-damaged scans.
pub type Table = Vec<Vec<Option<String>>>;

/// One page of an extracted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// The plain text extracted from the page.
    pub text: String,
    /// The tables extracted from the page, in reading order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A fully extracted source document.
///
/// # Example
///
/// ```
/// use invoice_engine::document::{ExtractedDocument, Page};
///
/// let doc = ExtractedDocument {
///     source: "timesheet_week_3.pdf".to_string(),
///     pages: vec![Page {
///         text: "SERVICE TIME SHEET".to_string(),
///         tables: vec![],
///     }],
/// };
/// assert_eq!(doc.first_page_text(), "SERVICE TIME SHEET");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Identifier of the original source (typically the file name), carried
    /// through to every entry for traceability.
    pub source: String,
    /// The extracted pages, in order.
    pub pages: Vec<Page>,
}

impl ExtractedDocument {
    /// Returns the text of the first page, or an empty string for an
    /// empty document.
    pub fn first_page_text(&self) -> &str {
        self.pages.first().map_or("", |p| p.text.as_str())
    }
}
