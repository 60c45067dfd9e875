//! Page geometry sources.
//!
//! Everything the layout engine knows about a page comes through
//! [`GeometryProvider`]: positioned words and spans, highlight annotation
//! quads, the plain-text rendering and the document outline.

mod content;
mod memory;
mod pdf_parser;

pub use memory::{MemoryProvider, PageGeometry};
pub use pdf_parser::PdfProvider;

use crate::error::Result;
use crate::layout::HighlightQuads;
use crate::model::{Span, TocEntry, Word};

/// Source of per-page geometry.
///
/// Pages are addressed by zero-based index. Implementations fail with
/// [`Error::PageOutOfRange`](crate::Error::PageOutOfRange), carrying the
/// 1-based page number, for indices past the last page. Coordinates use a
/// top-left origin with `y` growing downward.
pub trait GeometryProvider {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Words sorted by bottom edge, then left edge. Callers treat the order
    /// as a hint and rebuild reading order themselves.
    fn words(&self, page: u32) -> Result<Vec<Word>>;

    /// Text spans in block/line order, with font name and size.
    fn spans(&self, page: u32) -> Result<Vec<Span>>;

    /// Highlight annotations on the page, one quad list per annotation.
    fn highlight_annotations(&self, page: u32) -> Result<Vec<HighlightQuads>>;

    /// Document outline as flat `(level, title, page)` entries, pages
    /// 1-indexed.
    fn toc(&self) -> Result<Vec<TocEntry>>;

    /// Plain text of the page with one physical line per `\n`.
    fn plain_text(&self, page: u32) -> Result<String>;
}

impl<P: GeometryProvider + ?Sized> GeometryProvider for Box<P> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn words(&self, page: u32) -> Result<Vec<Word>> {
        (**self).words(page)
    }

    fn spans(&self, page: u32) -> Result<Vec<Span>> {
        (**self).spans(page)
    }

    fn highlight_annotations(&self, page: u32) -> Result<Vec<HighlightQuads>> {
        (**self).highlight_annotations(page)
    }

    fn toc(&self) -> Result<Vec<TocEntry>> {
        (**self).toc()
    }

    fn plain_text(&self, page: u32) -> Result<String> {
        (**self).plain_text(page)
    }
}
