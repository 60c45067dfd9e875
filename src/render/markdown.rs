//! Markdown rendering for highlighted page text.

use crate::layout::{
    apply_emphasis, band_lines, locate_candidates, paragraph_candidates, paragraph_ends,
    sort_reading_order, titles_equal, LayoutOptions,
};
use crate::model::{Header, HierarchyPath, PageContext, Word};

/// Prefix of the line that closes every rendered page.
pub const PAGE_MARKER_PREFIX: &str = "Page: ";

/// Horizontal rule emitted after the page marker.
pub const PAGE_RULE: &str = "\n\n---\n\n";

/// The `Page: <n>` marker for a 1-indexed page number.
pub fn page_marker(page_number: u32) -> String {
    format!("{}{}", PAGE_MARKER_PREFIX, page_number)
}

/// Render a page into Markdown fragments.
pub fn render_page(page: &PageContext, options: &LayoutOptions) -> Vec<String> {
    MarkdownFormatter::new(options.clone()).render(page)
}

/// Render a page into a single Markdown string.
pub fn to_markdown(page: &PageContext, options: &LayoutOptions) -> String {
    render_page(page, options).concat()
}

/// Composes highlighted words, headers and paragraph breaks into Markdown.
pub struct MarkdownFormatter {
    options: LayoutOptions,
}

impl MarkdownFormatter {
    /// Create a new formatter.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Render a page into text fragments whose concatenation is the page's
    /// Markdown body.
    ///
    /// Pages without highlighted words produce no fragments at all, not even
    /// the page marker.
    pub fn render(&self, page: &PageContext) -> Vec<String> {
        if page.highlighted.is_empty() {
            return Vec::new();
        }

        let headers = leveled_headers(&page.headers, &page.hierarchy);
        let tagged = apply_emphasis(&page.highlighted, &page.emphasis);
        let tokens = interleave_headers(&tagged, &headers);

        let anchors = locate_candidates(&page.words, &paragraph_candidates(&page.plain_text));
        let sorted = sort_reading_order(tokens, self.options.vertical_threshold);
        let ends = paragraph_ends(&sorted, &anchors);

        let bands = band_lines(&sorted, self.options.vertical_threshold);
        let line_count = bands.len();
        let mut fragments = Vec::with_capacity(line_count + 2);

        for (n, band) in bands.into_iter().enumerate() {
            let line = band
                .map(|i| {
                    if ends.contains(&i) {
                        format!("{}\n\n", sorted[i].text)
                    } else {
                        sorted[i].text.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            fragments.push(finish_line(line, n + 1 == line_count));
        }

        fragments.push(page_marker(page.page_number()));
        fragments.push(PAGE_RULE.to_string());
        fragments
    }
}

/// Trailing whitespace and artifact cleanup for one rendered line.
fn finish_line(mut line: String, last: bool) -> String {
    if !line.ends_with('\n') {
        line.push(' ');
    }
    if last {
        line.push_str("\n\n");
    }
    // Words merged next to a header marker can leave a stray break.
    line.replace("\n\n ", " ")
}

/// Prefix headers that appear in the hierarchy path with `level - 1` pound
/// signs. Headers outside the path keep their text.
pub fn leveled_headers(headers: &[Header], path: &HierarchyPath) -> Vec<Header> {
    headers
        .iter()
        .map(|header| {
            match path.iter().find(|(_, title)| titles_equal(&header.text, title)) {
                Some((level, _)) => Header::new(
                    header.rect,
                    format!("{} {}", "#".repeat(level.saturating_sub(1) as usize), header.text),
                ),
                None => header.clone(),
            }
        })
        .collect()
}

/// Insert header markers in front of the first word below each header.
///
/// A header owns the vertical band between its bottom edge and the next
/// header's bottom edge (the last header's band is open-ended). Each header
/// is emitted at most once, before the first word that falls in its band.
pub fn interleave_headers(words: &[Word], headers: &[Header]) -> Vec<Word> {
    let mut used = vec![false; headers.len()];
    let mut tokens = Vec::with_capacity(words.len() + headers.len());

    for word in words {
        for (i, header) in headers.iter().enumerate() {
            let upper = headers.get(i + 1).map_or(f64::INFINITY, Header::y);
            if !used[i] && header.y() < word.y() && word.y() < upper {
                tokens.push(Word::new(header.rect, format!("\n\n\n{}\n\n\n", header.text)));
                used[i] = true;
                break;
            }
        }
        tokens.push(word.clone());
    }

    tokens
}
