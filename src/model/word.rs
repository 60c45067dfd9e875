//! Word and span types produced by a geometry provider.

use serde::{Deserialize, Serialize};

use super::Rect;

/// A single token with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Bounding box
    pub rect: Rect,
    /// Token text
    pub text: String,
    /// Index of the source text block on the page
    pub block_no: usize,
    /// Index of the line within its block
    pub line_no: usize,
    /// Index of the word within its line
    pub word_no: usize,
}

impl Word {
    /// Create a new word.
    pub fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            rect,
            text: text.into(),
            block_no: 0,
            line_no: 0,
            word_no: 0,
        }
    }

    /// Set block, line and word indices.
    pub fn with_position(mut self, block_no: usize, line_no: usize, word_no: usize) -> Self {
        self.block_no = block_no;
        self.line_no = line_no;
        self.word_no = word_no;
        self
    }

    /// Bottom edge, used as the word's vertical position.
    pub fn y(&self) -> f64 {
        self.rect.y1
    }

    /// Copy of this word carrying different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Whether the text carries an embedded line break (header markers do).
    pub fn has_line_break(&self) -> bool {
        self.text.contains('\n')
    }
}

/// A run of text sharing one font and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Bounding box
    pub rect: Rect,
    /// Text content
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Font size in points
    pub size: f64,
    /// Index of the text block on the page
    #[serde(default)]
    pub block_no: usize,
    /// Index of the line within its block
    #[serde(default)]
    pub line_no: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(rect: Rect, text: impl Into<String>, font: impl Into<String>, size: f64) -> Self {
        Self {
            rect,
            text: text.into(),
            font: font.into(),
            size,
            block_no: 0,
            line_no: 0,
        }
    }

    /// Set block and line indices.
    pub fn with_position(mut self, block_no: usize, line_no: usize) -> Self {
        self.block_no = block_no;
        self.line_no = line_no;
        self
    }

    /// Whether the font name marks the span as bold or italic.
    pub fn is_bold_or_italic(&self) -> bool {
        let font = self.font.to_lowercase();
        font.contains("bold") || font.contains("italic")
    }
}
