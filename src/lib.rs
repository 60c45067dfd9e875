//! # highlight-md
//!
//! Turn highlighted passages of a PDF into Markdown notes organised by the
//! document's table of contents.
//!
//! For every page the library recovers reading order from word geometry,
//! detects headers from font-size statistics, locates the page in the
//! outline, collects the words covered by highlight annotations, marks
//! bold/italic runs and renders the result as Markdown with a `Page: <n>`
//! footer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use highlight_md::{open_pdf, MarkdownWorkspace};
//!
//! fn main() -> highlight_md::Result<()> {
//!     let mut extractor = open_pdf("biology.pdf")?;
//!     let workspace = MarkdownWorkspace::for_pdf("notes", "biology.pdf");
//!
//!     for page in 40..52 {
//!         let context = extractor.setup_page(page)?;
//!         if !context.has_highlights() {
//!             continue;
//!         }
//!         let path = extractor.resolve_hierarchy()?;
//!         workspace.write(&path, &extractor.markdown()?, page)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Geometry sources
//!
//! Layout passes only see what a [`GeometryProvider`] hands them.
//! [`PdfProvider`] reads real PDF files; [`MemoryProvider`] holds geometry in
//! memory and round-trips through JSON, which is convenient for fixtures.

pub mod config;
pub mod error;
pub mod extractor;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod workspace;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use extractor::Extractor;
pub use layout::LayoutOptions;
pub use model::{
    Header, HierarchyEntry, HierarchyPath, PageContext, Point, Quad, Rect, Span, TocEntry, Word,
    WordKey,
};
pub use parser::{GeometryProvider, MemoryProvider, PageGeometry, PdfProvider};
pub use render::{JsonFormat, MarkdownFormatter};
pub use workspace::{MarkdownWorkspace, WriteOutcome};

use std::path::Path;

/// Open a PDF file for page-by-page extraction.
///
/// # Example
///
/// ```no_run
/// use highlight_md::open_pdf;
///
/// let mut extractor = open_pdf("document.pdf").unwrap();
/// extractor.setup_page(1).unwrap();
/// println!("{}", extractor.markdown().unwrap());
/// ```
pub fn open_pdf<P: AsRef<Path>>(path: P) -> Result<Extractor<PdfProvider>> {
    Extractor::new(PdfProvider::open(path)?)
}

/// Open a PDF file with custom layout options.
pub fn open_pdf_with_options<P: AsRef<Path>>(
    path: P,
    options: LayoutOptions,
) -> Result<Extractor<PdfProvider>> {
    Extractor::with_options(PdfProvider::open(path)?, options)
}

/// Read a PDF's outline as flat TOC entries.
pub fn read_toc<P: AsRef<Path>>(path: P) -> Result<Vec<TocEntry>> {
    PdfProvider::open(path)?.toc()
}

/// Render the highlights of one page (1-indexed) of a PDF file.
///
/// Returns an empty string for pages without highlights.
pub fn page_to_markdown<P: AsRef<Path>>(path: P, page_number: u32) -> Result<String> {
    let mut extractor = open_pdf(path)?;
    extractor.setup_page(page_number)?;
    extractor.markdown()
}
