//! Reading-order recovery for word lists.
//!
//! Words are banded into visual lines by comparing each word's vertical
//! center with the previous word's, then each band is ordered left to right.

use std::ops::Range;

use crate::model::Word;

/// Split a word sequence into visual lines.
///
/// A new line starts whenever a word's vertical center differs from the
/// previous word's by more than `threshold`. Returned ranges index into
/// `words` and appear in the order the lines were opened.
pub fn band_lines(words: &[Word], threshold: f64) -> Vec<Range<usize>> {
    let mut bands = Vec::new();
    let mut start = 0;

    for i in 1..words.len() {
        let previous = words[i - 1].rect.center_y();
        let current = words[i].rect.center_y();
        if (current - previous).abs() > threshold {
            bands.push(start..i);
            start = i;
        }
    }

    if start < words.len() {
        bands.push(start..words.len());
    }

    bands
}

/// Order words line by line, left to right within each line.
pub fn sort_reading_order(words: Vec<Word>, threshold: f64) -> Vec<Word> {
    let bands = band_lines(&words, threshold);
    log::debug!("Banded {} words into {} lines", words.len(), bands.len());

    let mut slots: Vec<Option<Word>> = words.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for band in bands {
        let mut line: Vec<Word> = slots[band].iter_mut().filter_map(Option::take).collect();
        line.sort_by(|a, b| a.rect.x0.total_cmp(&b.rect.x0));
        ordered.extend(line);
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn word(x: f64, y: f64, text: &str) -> Word {
        Word::new(Rect::new(x, y - 10.0, x + 20.0, y), text)
    }

    fn texts(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_close_words_share_a_line() {
        let words = vec![word(50.0, 10.03, "second"), word(10.0, 10.0, "first")];
        let sorted = sort_reading_order(words, 5.0);
        assert_eq!(texts(&sorted), vec!["first", "second"]);
    }

    #[test]
    fn test_lines_keep_opening_order() {
        let words = vec![
            word(80.0, 20.0, "b"),
            word(10.0, 21.0, "a"),
            word(40.0, 40.0, "d"),
            word(5.0, 39.0, "c"),
        ];
        let sorted = sort_reading_order(words, 5.0);
        assert_eq!(texts(&sorted), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_band_lines() {
        let words = vec![
            word(0.0, 10.0, "a"),
            word(30.0, 12.0, "b"),
            word(0.0, 30.0, "c"),
        ];
        assert_eq!(band_lines(&words, 5.0), vec![0..2, 2..3]);
        assert!(band_lines(&[], 5.0).is_empty());
    }

    #[test]
    fn test_order_independent_within_line() {
        let a = vec![
            word(10.0, 10.0, "one"),
            word(30.0, 10.5, "two"),
            word(50.0, 9.8, "three"),
        ];
        let mut b = a.clone();
        b.reverse();
        let mut c = a.clone();
        c.swap(0, 1);

        let expected = texts(&sort_reading_order(a, 5.0))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        for permutation in [b, c] {
            let sorted = sort_reading_order(permutation, 5.0);
            assert_eq!(texts(&sorted), expected);
        }
    }
}
