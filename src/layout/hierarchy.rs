//! Resolve where a page sits in the document table of contents.
//!
//! Only the TOC history up to the page is considered. Walking it backwards
//! from the entry nearest the page, every entry whose title contains one of
//! the page's headers is kept, and from then on the nearest preceding entry
//! of each missing parent level is kept as well. The result is the chain of
//! ancestors for whatever headers actually rendered on the page, even when
//! the ancestors' own titles appear on earlier pages.

use std::collections::HashSet;

use crate::model::{Header, HierarchyEntry, HierarchyPath, TocEntry};

use super::normalize::normalize_title;

/// TOC entries starting on or before the page, in original order.
pub fn toc_history(toc: &[TocEntry], page_index: u32) -> Vec<&TocEntry> {
    let page_number = page_index + 1;
    toc.iter().filter(|entry| entry.page <= page_number).collect()
}

/// Resolve the root-to-leaf hierarchy path of a page.
///
/// When the page has no headers, the title of the last TOC entry starting
/// on or before the page stands in for one, so a header-less page still
/// inherits the ancestry of the section it continues.
pub fn resolve_hierarchy(toc: &[TocEntry], page_index: u32, headers: &[Header]) -> HierarchyPath {
    let history = toc_history(toc, page_index);

    let synthesized = if headers.is_empty() {
        history.last().map(|entry| entry.title.as_str())
    } else {
        None
    };

    let path = resolve_with_ancestor(&history, headers, synthesized);
    log::debug!(
        "Page {} resolved to {} hierarchy levels ({} TOC entries in history)",
        page_index + 1,
        path.len(),
        history.len()
    );
    path
}

/// Match headers, plus an optional stand-in title, against the TOC history.
fn resolve_with_ancestor(
    history: &[&TocEntry],
    headers: &[Header],
    synthesized_ancestor: Option<&str>,
) -> HierarchyPath {
    // An empty needle would be contained in every title.
    let needles: Vec<String> = headers
        .iter()
        .map(|h| h.text.as_str())
        .chain(synthesized_ancestor)
        .map(normalize_title)
        .filter(|needle| !needle.is_empty())
        .collect();

    if needles.is_empty() {
        return HierarchyPath::new();
    }

    let mut needed_levels: HashSet<u32> = HashSet::new();
    let mut nearest_first = Vec::new();

    for entry in history.iter().rev() {
        let title = normalize_title(&entry.title);
        let matched = needles.iter().any(|needle| title.contains(needle.as_str()));

        if matched || needed_levels.contains(&entry.level) {
            nearest_first.push(HierarchyEntry::new(entry.level, entry.title.clone()));
            needed_levels.remove(&entry.level);
            needed_levels.insert(entry.level.saturating_sub(1));
        }
    }

    nearest_first.reverse();
    HierarchyPath::from_entries(nearest_first)
}
