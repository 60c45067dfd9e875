//! Page-at-a-time extraction driver.
//!
//! An [`Extractor`] owns a geometry provider and the document outline, and
//! holds the [`PageContext`] of the page currently being processed. Every
//! call to [`Extractor::setup_page`] replaces that context wholesale.

use crate::error::{Error, Result};
use crate::layout::{
    detect_headers, extract_highlighted, match_emphasis, resolve_hierarchy, LayoutOptions,
};
use crate::model::{Header, HierarchyPath, PageContext, Span, TocEntry, Word};
use crate::parser::GeometryProvider;
use crate::render::MarkdownFormatter;

impl PageContext {
    /// Load a page's geometry and run every layout pass over it.
    ///
    /// `page_index` is zero-based.
    pub fn build<P: GeometryProvider + ?Sized>(
        provider: &P,
        toc: &[TocEntry],
        page_index: u32,
        options: &LayoutOptions,
    ) -> Result<Self> {
        let words = provider.words(page_index)?;
        let spans = provider.spans(page_index)?;
        let plain_text = provider.plain_text(page_index)?;
        let annotations = provider.highlight_annotations(page_index)?;

        let headers = detect_headers(&spans, options.header_merge_epsilon);
        let hierarchy = resolve_hierarchy(toc, page_index, &headers);
        let highlighted = extract_highlighted(&annotations, &words, options.highlight_margin);
        let emphasis = match_emphasis(&spans, &highlighted);

        log::debug!(
            "Page {}: {} words, {} headers, {} highlighted, path depth {}",
            page_index + 1,
            words.len(),
            headers.len(),
            highlighted.len(),
            hierarchy.len()
        );

        Ok(Self {
            index: page_index,
            words,
            spans,
            plain_text,
            headers,
            highlighted,
            emphasis,
            hierarchy,
        })
    }
}

/// Drives extraction one page at a time.
pub struct Extractor<P: GeometryProvider> {
    provider: P,
    toc: Vec<TocEntry>,
    options: LayoutOptions,
    page: Option<PageContext>,
}

impl<P: GeometryProvider> Extractor<P> {
    /// Create an extractor with default layout options.
    ///
    /// The document outline is read once here and reused for every page.
    pub fn new(provider: P) -> Result<Self> {
        Self::with_options(provider, LayoutOptions::default())
    }

    /// Create an extractor with custom layout options.
    pub fn with_options(provider: P, options: LayoutOptions) -> Result<Self> {
        let toc = provider.toc()?;
        log::debug!("Outline has {} entries", toc.len());
        Ok(Self {
            provider,
            toc,
            options,
            page: None,
        })
    }

    /// Load a page, addressed by its 1-indexed page number.
    pub fn setup_page(&mut self, page_number: u32) -> Result<&PageContext> {
        let count = self.provider.page_count();
        if page_number == 0 || page_number > count {
            return Err(Error::PageOutOfRange(page_number, count));
        }

        let page = PageContext::build(&self.provider, &self.toc, page_number - 1, &self.options)?;
        Ok(self.page.insert(page))
    }

    /// The current page context.
    pub fn page(&self) -> Result<&PageContext> {
        self.page
            .as_ref()
            .ok_or_else(|| Error::InvalidState("no page has been set up".to_string()))
    }

    /// Position of the current page in the document outline.
    pub fn resolve_hierarchy(&self) -> Result<HierarchyPath> {
        let page = self.page()?;
        Ok(resolve_hierarchy(&self.toc, page.index, &page.headers))
    }

    /// Headers detected on the current page.
    pub fn headers(&self) -> Result<&[Header]> {
        Ok(&self.page()?.headers)
    }

    /// Highlighted words on the current page.
    pub fn highlighted_text(&self) -> Result<&[Word]> {
        Ok(&self.page()?.highlighted)
    }

    /// Bold or italic spans overlapping the current page's highlights.
    pub fn bold_italic_text(&self) -> Result<&[Span]> {
        Ok(&self.page()?.emphasis)
    }

    /// Markdown fragments for the current page.
    pub fn render_page(&self) -> Result<Vec<String>> {
        let page = self.page()?;
        Ok(MarkdownFormatter::new(self.options.clone()).render(page))
    }

    /// Markdown text for the current page.
    pub fn markdown(&self) -> Result<String> {
        Ok(self.render_page()?.concat())
    }

    /// The document outline.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    pub fn page_count(&self) -> u32 {
        self.provider.page_count()
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quad, Rect};
    use crate::parser::{MemoryProvider, PageGeometry};

    fn provider() -> MemoryProvider {
        let word = Word::new(Rect::new(10.0, 90.0, 40.0, 100.0), "marked");
        let page = PageGeometry::new()
            .with_words(vec![word])
            .with_highlight(vec![Quad::from_rect(Rect::new(0.0, 88.0, 60.0, 102.0))]);
        MemoryProvider::new()
            .with_toc(vec![TocEntry::new(1, "Chapter", 1)])
            .with_page(page)
            .with_page(PageGeometry::new())
    }

    #[test]
    fn test_requires_setup() {
        let extractor = Extractor::new(provider()).unwrap();
        assert!(matches!(extractor.render_page(), Err(Error::InvalidState(_))));
        assert!(matches!(extractor.resolve_hierarchy(), Err(Error::InvalidState(_))));
        assert!(matches!(extractor.headers(), Err(Error::InvalidState(_))));
        assert!(matches!(extractor.highlighted_text(), Err(Error::InvalidState(_))));
        assert!(matches!(extractor.bold_italic_text(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_page_numbers_are_one_based() {
        let mut extractor = Extractor::new(provider()).unwrap();
        assert!(matches!(extractor.setup_page(0), Err(Error::PageOutOfRange(0, 2))));
        assert!(matches!(extractor.setup_page(3), Err(Error::PageOutOfRange(3, 2))));

        let page = extractor.setup_page(1).unwrap();
        assert_eq!(page.index, 0);
        assert_eq!(extractor.highlighted_text().unwrap().len(), 1);
    }

    #[test]
    fn test_setup_replaces_page() {
        let mut extractor = Extractor::new(provider()).unwrap();
        extractor.setup_page(1).unwrap();
        assert!(extractor.markdown().unwrap().contains("Page: 1"));

        extractor.setup_page(2).unwrap();
        assert!(extractor.highlighted_text().unwrap().is_empty());
        assert!(extractor.render_page().unwrap().is_empty());
    }

    #[test]
    fn test_hierarchy_uses_loaded_toc() {
        let mut extractor = Extractor::new(provider()).unwrap();
        extractor.setup_page(2).unwrap();
        let path = extractor.resolve_hierarchy().unwrap();
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![(1, "Chapter")]);
    }
}
