//! Data model shared by providers, layout analysis and rendering.
//!
//! All geometry uses a top-left origin with `y` growing downward.

mod geometry;
mod outline;
mod page;
mod word;

pub use geometry::{Point, Quad, Rect, WordKey};
pub use outline::{HierarchyEntry, HierarchyPath, TocEntry};
pub use page::{Header, PageContext};
pub use word::{Span, Word};
