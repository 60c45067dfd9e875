//! Markdown workspace writer.
//!
//! Rendered pages are filed under `<root>/<book>/<chapter>/<section>.md`,
//! where chapter and section are the first two titles of the page's
//! hierarchy path. Pages are appended in the order they are written and a
//! page already present in a file is never written twice.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::HierarchyPath;
use crate::render::page_marker;

/// What [`MarkdownWorkspace::write_page`] did with a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was created with a banner.
    Created,
    /// The page was appended to an existing file.
    Appended,
    /// The file already held this page.
    Skipped,
}

/// A directory tree of Markdown notes for one book.
#[derive(Debug, Clone)]
pub struct MarkdownWorkspace {
    book_dir: PathBuf,
    book_name: String,
}

impl MarkdownWorkspace {
    /// Create a workspace rooted at `root` for the book `book_name`.
    pub fn new(root: impl AsRef<Path>, book_name: impl Into<String>) -> Self {
        let book_name = sanitize(&book_name.into());
        Self {
            book_dir: root.as_ref().join(&book_name),
            book_name,
        }
    }

    /// Create a workspace named after a PDF file's stem.
    pub fn for_pdf(root: impl AsRef<Path>, pdf_path: impl AsRef<Path>) -> Self {
        let stem = pdf_path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "book".to_string());
        Self::new(root, stem)
    }

    /// Directory holding this book's notes.
    pub fn book_dir(&self) -> &Path {
        &self.book_dir
    }

    /// File that receives pages with the given hierarchy path.
    ///
    /// Paths shorter than two entries fall back to the book directory (no
    /// entries) or to a file named after the only entry.
    pub fn target_for(&self, path: &HierarchyPath) -> PathBuf {
        match (path.get(0), path.get(1)) {
            (Some(chapter), Some(section)) => {
                let chapter = sanitize(&chapter.title);
                self.book_dir
                    .join(chapter)
                    .join(format!("{}.md", sanitize(&section.title)))
            }
            (Some(chapter), None) => {
                let chapter = sanitize(&chapter.title);
                self.book_dir.join(&chapter).join(format!("{}.md", chapter))
            }
            _ => self.book_dir.join(format!("{}.md", self.book_name)),
        }
    }

    /// Write a rendered page for a hierarchy path.
    pub fn write(&self, path: &HierarchyPath, text: &str, page_number: u32) -> Result<WriteOutcome> {
        self.write_page(&self.target_for(path), text, page_number)
    }

    /// Create or append to `file`.
    ///
    /// New files start with a creation banner. Existing files are appended
    /// to unless they already contain the page's `Page: <n>` line.
    pub fn write_page(&self, file: &Path, text: &str, page_number: u32) -> Result<WriteOutcome> {
        if let Some(dir) = file.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
                log::info!("Created folder {}", dir.display());
            }
        }

        if !file.exists() {
            fs::write(file, format!("{}{}", banner(), text))?;
            log::info!("Created {}", file.display());
            return Ok(WriteOutcome::Created);
        }

        let existing = fs::read_to_string(file)?;
        let marker = page_marker(page_number);
        if existing.lines().any(|line| line.trim() == marker) {
            log::info!("Page {} already in {}, skipping", page_number, file.display());
            return Ok(WriteOutcome::Skipped);
        }

        let mut handle = OpenOptions::new().append(true).open(file)?;
        handle.write_all(text.as_bytes())?;
        log::info!("Appended page {} to {}", page_number, file.display());
        Ok(WriteOutcome::Appended)
    }
}

/// Header written at the top of every new note file.
fn banner() -> String {
    let now = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
    format!("\n---\n\n# Created: {}\n\n---\n\n", now)
}

/// Make a title usable as a single path component.
fn sanitize(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "untitled".to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(entries: &[(u32, &str)]) -> HierarchyPath {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_target_for() {
        let ws = MarkdownWorkspace::new("/notes", "Biology");
        assert_eq!(
            ws.target_for(&path(&[(1, "2 Evolution"), (2, "2.1 Intro"), (3, "Exercises")])),
            PathBuf::from("/notes/Biology/2 Evolution/2.1 Intro.md")
        );
        assert_eq!(
            ws.target_for(&path(&[(1, "Preface")])),
            PathBuf::from("/notes/Biology/Preface/Preface.md")
        );
        assert_eq!(
            ws.target_for(&HierarchyPath::new()),
            PathBuf::from("/notes/Biology/Biology.md")
        );
    }

    #[test]
    fn test_for_pdf_uses_stem() {
        let ws = MarkdownWorkspace::for_pdf("/notes", "/books/Algorithms.pdf");
        assert_eq!(ws.book_dir(), Path::new("/notes/Algorithms"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Input/Output"), "Input-Output");
        assert_eq!(sanitize(" .. "), "untitled");
        assert_eq!(sanitize("Plain"), "Plain");
    }

    #[test]
    fn test_banner() {
        let banner = banner();
        assert!(banner.starts_with("\n---\n\n# Created: "));
        assert!(banner.ends_with("\n\n---\n\n"));
    }
}
