//! Table of contents and hierarchy path types.

use serde::{Deserialize, Serialize};

/// A single table of contents (bookmark) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Nesting level (1 = top level)
    pub level: u32,
    /// Entry title
    pub title: String,
    /// Page where the entry starts (1-indexed)
    pub page: u32,
}

impl TocEntry {
    /// Create a new TOC entry.
    pub fn new(level: u32, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

/// One step of a hierarchy path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub level: u32,
    pub title: String,
}

impl HierarchyEntry {
    pub fn new(level: u32, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }
}

impl From<(u32, &str)> for HierarchyEntry {
    fn from((level, title): (u32, &str)) -> Self {
        Self::new(level, title)
    }
}

/// Root-to-leaf chain of TOC titles describing where a page sits in the
/// document outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyPath {
    entries: Vec<HierarchyEntry>,
}

impl HierarchyPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from root-to-leaf entries.
    pub fn from_entries(entries: Vec<HierarchyEntry>) -> Self {
        Self { entries }
    }

    /// Entries in root-to-leaf order.
    pub fn entries(&self) -> &[HierarchyEntry] {
        &self.entries
    }

    /// Get the entry at a depth (0 = root).
    pub fn get(&self, depth: usize) -> Option<&HierarchyEntry> {
        self.entries.get(depth)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(level, title)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|e| (e.level, e.title.as_str()))
    }

    /// Check that levels never decrease and never skip a level going deeper.
    pub fn is_well_formed(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[1].level >= w[0].level && w[1].level <= w[0].level + 1)
    }
}

impl<'a> FromIterator<(u32, &'a str)> for HierarchyPath {
    fn from_iter<I: IntoIterator<Item = (u32, &'a str)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(HierarchyEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_pairs() {
        let path: HierarchyPath = [(1, "2 Evolution"), (2, "2.1 What is evolution")]
            .into_iter()
            .collect();
        assert_eq!(path.len(), 2);
        assert_eq!(path.get(1).map(|e| e.title.as_str()), Some("2.1 What is evolution"));
        assert!(path.is_well_formed());
    }

    #[test]
    fn test_path_well_formed() {
        let siblings: HierarchyPath = [(1, "a"), (2, "b"), (3, "c"), (3, "d")]
            .into_iter()
            .collect();
        assert!(siblings.is_well_formed());

        let skipping: HierarchyPath = [(1, "a"), (3, "c")].into_iter().collect();
        assert!(!skipping.is_well_formed());

        let backwards: HierarchyPath = [(2, "b"), (1, "a")].into_iter().collect();
        assert!(!backwards.is_well_formed());

        assert!(HierarchyPath::new().is_well_formed());
    }
}
