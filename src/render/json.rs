//! JSON rendering of page contexts.

use crate::error::Result;
use crate::model::PageContext;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a page context, including its geometry and derived layout.
pub fn to_json(page: &PageContext, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(page)?,
        JsonFormat::Compact => serde_json::to_string(page)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rect, Word};

    #[test]
    fn test_to_json_pretty() {
        let mut page = PageContext::new(2);
        page.highlighted.push(Word::new(Rect::new(0.0, 0.0, 10.0, 10.0), "marked"));

        let json = to_json(&page, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"highlighted\""));
        assert!(json.contains("marked"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&PageContext::new(0), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let back: PageContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, 0);
    }
}
