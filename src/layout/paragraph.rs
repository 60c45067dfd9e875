//! Paragraph boundary detection.
//!
//! The plain-text rendering of a page tells which physical lines end with a
//! full stop; the word geometry tells where those words are. Cross-referencing
//! both yields anchor words whose bottom edges bound each paragraph, which are
//! then aligned against an ordered word list.

use std::collections::BTreeSet;

use crate::model::Word;

/// The last word of a plain-text line that ends a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParagraphCandidate {
    /// Zero-based index of the last token within its line
    pub word_no: usize,
    /// Second-to-last token of the line
    pub previous: String,
    /// Last token of the line
    pub last: String,
}

/// Lines ending in "." with more than one token.
pub fn paragraph_candidates(plain_text: &str) -> Vec<ParagraphCandidate> {
    plain_text
        .split('\n')
        .filter(|line| line.ends_with('.'))
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 {
                return None;
            }
            Some(ParagraphCandidate {
                word_no: tokens.len() - 1,
                previous: tokens[tokens.len() - 2].to_string(),
                last: tokens[tokens.len() - 1].to_string(),
            })
        })
        .collect()
}

/// Find the page words that correspond to paragraph candidates.
///
/// A word matches when its index within its source line, the previous word's
/// text and its own text all agree with a candidate; the previous word
/// disambiguates repeated tokens. Candidates without a match are dropped.
pub fn locate_candidates(words: &[Word], candidates: &[ParagraphCandidate]) -> Vec<Word> {
    words
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(i, word)| {
            let previous = &words[i - 1].text;
            candidates.iter().any(|c| {
                c.word_no == word.word_no && c.previous == *previous && c.last == word.text
            })
        })
        .map(|(_, word)| word.clone())
        .collect()
}

/// Indices of words that close a paragraph.
///
/// Walks `words` (already in reading order) against `anchors` taken top to
/// bottom. Words whose bottom edge stays within the current anchor's belong
/// to the current paragraph; the first word past it closes the paragraph at
/// the preceding index and moves on to the next anchor, unless the
/// transition involves a header marker.
pub fn paragraph_ends(words: &[Word], anchors: &[Word]) -> BTreeSet<usize> {
    let mut anchors: Vec<&Word> = anchors.iter().collect();
    anchors.sort_by(|a, b| a.y().total_cmp(&b.y()));

    let mut ends = BTreeSet::new();
    let mut anchor_index = 0;

    for i in 0..words.len() {
        let Some(anchor) = anchors.get(anchor_index) else {
            break;
        };

        if words[i].y() <= anchor.y() {
            continue;
        }

        let at_header = words[i].has_line_break() || (i > 0 && words[i - 1].has_line_break());
        if !at_header {
            if i > 0 {
                ends.insert(i - 1);
            }
            anchor_index += 1;
        }
    }

    ends
}
