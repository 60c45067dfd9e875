//! Rendering of processed pages to Markdown and JSON.

mod json;
mod markdown;

pub use json::{to_json, JsonFormat};
pub use markdown::{
    interleave_headers, leveled_headers, page_marker, render_page, to_markdown,
    MarkdownFormatter, PAGE_MARKER_PREFIX, PAGE_RULE,
};
