//! Bold and italic detection for highlighted words.

use crate::model::{Span, Word};

/// Wrap text in combined bold-italic Markdown markers.
pub fn emphasize(text: &str) -> String {
    format!("**_{}_**", text)
}

/// Find the bold/italic spans that overlap highlighted words.
///
/// Each highlighted word claims the first unclaimed overlapping span, so a
/// span shared by several words is reported once.
pub fn match_emphasis(spans: &[Span], highlighted: &[Word]) -> Vec<Span> {
    let styled: Vec<&Span> = spans.iter().filter(|s| s.is_bold_or_italic()).collect();
    let mut claimed = vec![false; styled.len()];
    let mut matched = Vec::new();

    for word in highlighted {
        let hit = styled
            .iter()
            .enumerate()
            .find(|(i, span)| !claimed[*i] && span.rect.intersects(&word.rect));

        if let Some((i, span)) = hit {
            claimed[i] = true;
            let mut span = (*span).clone();
            span.text = span.text.trim().to_string();
            matched.push(span);
        }
    }

    matched
}

/// Tag every word that overlaps one of the matched emphasis spans.
pub fn apply_emphasis(words: &[Word], emphasis: &[Span]) -> Vec<Word> {
    words
        .iter()
        .map(|word| {
            if emphasis.iter().any(|span| word.rect.intersects(&span.rect)) {
                word.with_text(emphasize(&word.text))
            } else {
                word.clone()
            }
        })
        .collect()
}
