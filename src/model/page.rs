//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{HierarchyPath, Rect, Span, Word};

/// A header line detected from oversized spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Bounding box of the first span merged into the header
    pub rect: Rect,
    /// Space-joined text of the merged spans
    pub text: String,
}

impl Header {
    /// Create a new header.
    pub fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            rect,
            text: text.into(),
        }
    }

    /// Bottom edge of the header.
    pub fn y(&self) -> f64 {
        self.rect.y1
    }
}

/// Everything known about one page.
///
/// A context is rebuilt from scratch for every page; nothing in it is shared
/// with other pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContext {
    /// Page index (0-indexed)
    pub index: u32,

    /// Words as delivered by the provider
    pub words: Vec<Word>,

    /// Spans in block/line order
    pub spans: Vec<Span>,

    /// Plain text rendering of the page
    pub plain_text: String,

    /// Detected headers in span order
    pub headers: Vec<Header>,

    /// Highlighted words in (bottom, left) order
    pub highlighted: Vec<Word>,

    /// Bold/italic spans that overlap highlighted words
    pub emphasis: Vec<Span>,

    /// Position of the page in the document outline
    pub hierarchy: HierarchyPath,
}

impl PageContext {
    /// Create an empty context for a page.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Page number (1-indexed).
    pub fn page_number(&self) -> u32 {
        self.index + 1
    }

    /// Whether anything on the page is highlighted.
    pub fn has_highlights(&self) -> bool {
        !self.highlighted.is_empty()
    }
}
