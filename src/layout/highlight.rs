//! Match highlight annotation quads against page words.

use std::collections::HashSet;

use crate::model::{Quad, Word, WordKey};

/// A highlight annotation: one quad per covered line fragment.
pub type HighlightQuads = Vec<Quad>;

/// Collect the words covered by highlight annotations.
///
/// Each quad's bounding box is trimmed by `margin` at the top and bottom so
/// that words on neighbouring lines whose ascenders or descenders graze the
/// highlight are not captured. A word covered by several quads is returned
/// once. The result is ordered by bottom edge, then left edge.
pub fn extract_highlighted(annotations: &[HighlightQuads], words: &[Word], margin: f64) -> Vec<Word> {
    let mut seen: HashSet<WordKey> = HashSet::new();
    let mut highlighted = Vec::new();

    for quad in annotations.iter().flatten() {
        let region = quad.rect().shrink_vertical(margin);
        for word in words {
            if word.rect.intersects(&region) && seen.insert(WordKey::new(&word.rect, &word.text)) {
                highlighted.push(word.clone());
            }
        }
    }

    highlighted.sort_by(|a, b| {
        a.rect
            .y1
            .total_cmp(&b.rect.y1)
            .then(a.rect.x0.total_cmp(&b.rect.x0))
    });

    log::debug!(
        "{} highlighted words from {} annotations",
        highlighted.len(),
        annotations.len()
    );
    highlighted
}
