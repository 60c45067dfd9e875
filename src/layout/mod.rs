//! Layout reconstruction: reading order, paragraphs, headers, outline
//! position, highlights and emphasis.
//!
//! Every function here is a pure computation over one page's geometry.

pub mod emphasis;
pub mod headers;
pub mod hierarchy;
pub mod highlight;
pub mod normalize;
mod options;
pub mod paragraph;
pub mod reading_order;

pub use emphasis::{apply_emphasis, emphasize, match_emphasis};
pub use headers::{detect_headers, header_threshold, FontStatistics};
pub use hierarchy::{resolve_hierarchy, toc_history};
pub use highlight::{extract_highlighted, HighlightQuads};
pub use normalize::{header_matches_title, normalize_title, titles_equal};
pub use options::{
    LayoutOptions, DEFAULT_HEADER_MERGE_EPSILON, DEFAULT_HIGHLIGHT_MARGIN,
    DEFAULT_VERTICAL_THRESHOLD,
};
pub use paragraph::{locate_candidates, paragraph_candidates, paragraph_ends, ParagraphCandidate};
pub use reading_order::{band_lines, sort_reading_order};
