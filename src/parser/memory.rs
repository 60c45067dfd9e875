//! In-memory geometry provider.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::GeometryProvider;
use crate::error::{Error, Result};
use crate::layout::HighlightQuads;
use crate::model::{Quad, Span, TocEntry, Word};

/// Geometry of a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    /// Words in block/line/word order
    pub words: Vec<Word>,
    /// Spans in block/line order
    pub spans: Vec<Span>,
    /// Highlight annotations, one quad list each
    pub highlights: Vec<HighlightQuads>,
    /// Plain text rendering
    pub plain_text: String,
}

impl PageGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }

    pub fn with_spans(mut self, spans: Vec<Span>) -> Self {
        self.spans = spans;
        self
    }

    /// Add a highlight annotation covering the given quads.
    pub fn with_highlight(mut self, quads: Vec<Quad>) -> Self {
        self.highlights.push(quads);
        self
    }

    pub fn with_plain_text(mut self, text: impl Into<String>) -> Self {
        self.plain_text = text.into();
        self
    }
}

/// A document held entirely in memory.
///
/// Serializes to and from JSON, which makes it suitable for geometry dumps
/// and test fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryProvider {
    /// Outline entries
    pub toc: Vec<TocEntry>,
    /// Pages in order
    pub pages: Vec<PageGeometry>,
}

impl MemoryProvider {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outline.
    pub fn with_toc(mut self, toc: Vec<TocEntry>) -> Self {
        self.toc = toc;
        self
    }

    /// Append a page.
    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.pages.push(page);
        self
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Capture every page of another provider.
    pub fn snapshot<G: GeometryProvider + ?Sized>(source: &G) -> Result<Self> {
        let mut provider = Self::new().with_toc(source.toc()?);
        for page in 0..source.page_count() {
            provider.pages.push(PageGeometry {
                words: source.words(page)?,
                spans: source.spans(page)?,
                highlights: source.highlight_annotations(page)?,
                plain_text: source.plain_text(page)?,
            });
        }
        Ok(provider)
    }

    fn page(&self, page: u32) -> Result<&PageGeometry> {
        self.pages
            .get(page as usize)
            .ok_or(Error::PageOutOfRange(page + 1, self.page_count()))
    }
}

impl GeometryProvider for MemoryProvider {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn words(&self, page: u32) -> Result<Vec<Word>> {
        Ok(self.page(page)?.words.clone())
    }

    fn spans(&self, page: u32) -> Result<Vec<Span>> {
        Ok(self.page(page)?.spans.clone())
    }

    fn highlight_annotations(&self, page: u32) -> Result<Vec<HighlightQuads>> {
        Ok(self.page(page)?.highlights.clone())
    }

    fn toc(&self) -> Result<Vec<TocEntry>> {
        Ok(self.toc.clone())
    }

    fn plain_text(&self, page: u32) -> Result<String> {
        Ok(self.page(page)?.plain_text.clone())
    }
}
