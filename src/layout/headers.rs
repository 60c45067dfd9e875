//! Header detection from font size statistics.
//!
//! A span is a header candidate when its size is strictly above
//! `median + population standard deviation` of every span size on the page.
//! Candidates keep span order (block, line, span), and consecutive
//! candidates whose bottom edges nearly coincide are merged into one header.

use crate::model::{Header, Span};

/// Font size statistics for a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontStatistics {
    /// Median font size
    pub median: f64,
    /// Population standard deviation of font sizes
    pub std_dev: f64,
}

impl FontStatistics {
    /// Compute statistics from a list of sizes.
    pub fn from_sizes(sizes: &[f64]) -> Self {
        if sizes.is_empty() {
            return Self::default();
        }

        let mut sorted = sizes.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        // Summing the sorted copy keeps the result independent of span order.
        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Self {
            median,
            std_dev: variance.sqrt(),
        }
    }

    /// Sizes strictly above this value are treated as headers.
    pub fn threshold(&self) -> f64 {
        self.median + self.std_dev
    }
}

/// Header threshold for a page's spans. Zero when there are no spans.
pub fn header_threshold(spans: &[Span]) -> f64 {
    let sizes: Vec<f64> = spans.iter().map(|s| s.size).collect();
    FontStatistics::from_sizes(&sizes).threshold()
}

/// Detect header lines among the spans of a page.
pub fn detect_headers(spans: &[Span], merge_epsilon: f64) -> Vec<Header> {
    let threshold = header_threshold(spans);
    log::debug!("Header font size threshold: {:.3}", threshold);

    let candidates = spans
        .iter()
        .filter(|span| span.size > threshold)
        .map(|span| Header::new(span.rect, span.text.clone()));

    merge_candidates(candidates, merge_epsilon)
}

/// Merge consecutive candidates sitting on the same baseline.
///
/// The merged header keeps the rectangle of its first piece.
fn merge_candidates(candidates: impl IntoIterator<Item = Header>, epsilon: f64) -> Vec<Header> {
    let mut headers = Vec::new();
    let mut current: Option<Header> = None;

    for candidate in candidates {
        current = match current.take() {
            Some(mut header) if (header.y() - candidate.y()).abs() < epsilon => {
                header.text.push(' ');
                header.text.push_str(&candidate.text);
                Some(header)
            }
            Some(header) => {
                headers.push(header);
                Some(candidate)
            }
            None => Some(candidate),
        };
    }

    headers.extend(current);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn header(y0: f64, y1: f64, text: &str) -> Header {
        Header::new(Rect::new(0.0, y0, 50.0, y1), text)
    }

    fn span(y0: f64, y1: f64, size: f64, text: &str) -> Span {
        Span::new(Rect::new(0.0, y0, 50.0, y1), text, "Helvetica", size)
    }

    #[test]
    fn test_threshold_is_median_plus_std() {
        let stats = FontStatistics::from_sizes(&[10.0, 12.0, 14.0, 16.0, 18.0]);
        assert_eq!(stats.median, 14.0);
        assert!((stats.std_dev - 8.0_f64.sqrt()).abs() < 1e-12);
        assert!((stats.threshold() - (14.0 + 8.0_f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_even_count_median() {
        let stats = FontStatistics::from_sizes(&[10.0, 10.0, 12.0, 20.0]);
        assert_eq!(stats.median, 11.0);
    }

    #[test]
    fn test_threshold_is_deterministic() {
        let sizes = [9.5, 11.0, 11.0, 11.0, 24.0, 14.0];
        let mut shuffled = sizes;
        shuffled.reverse();
        assert_eq!(
            FontStatistics::from_sizes(&sizes).threshold(),
            FontStatistics::from_sizes(&shuffled).threshold()
        );
    }

    #[test]
    fn test_no_spans_means_no_headers() {
        assert_eq!(header_threshold(&[]), 0.0);
        assert!(detect_headers(&[], 0.1).is_empty());
    }

    #[test]
    fn test_candidates_on_distinct_lines_stay_separate() {
        let candidates = vec![
            header(0.0, 10.0, "Header1"),
            header(10.0, 20.0, "Subheader1"),
            header(20.0, 30.0, "Header2"),
            header(30.0, 40.0, "Subheader2"),
            header(31.0, 41.0, "Subheader3"),
        ];
        let merged = merge_candidates(candidates.clone(), 0.1);
        assert_eq!(merged, candidates);
    }

    #[test]
    fn test_document_order_is_kept() {
        let candidates = vec![header(10.0, 10.0, "Subheader1"), header(0.0, 20.0, "Header1")];
        let merged = merge_candidates(candidates.clone(), 0.1);
        assert_eq!(merged, candidates);
    }

    #[test]
    fn test_split_header_is_merged() {
        let candidates = vec![
            header(0.0, 10.3123, "- "),
            header(10.0, 10.3223, "Main header"),
            header(10.0, 14.0, "Sub header"),
        ];
        let merged = merge_candidates(candidates, 0.1);
        assert_eq!(
            merged,
            vec![header(0.0, 10.3123, "-  Main header"), header(10.0, 14.0, "Sub header")]
        );
    }

    #[test]
    fn test_ligature_break_is_merged() {
        let candidates = vec![
            header(0.0, 335.7464599609375, "O"),
            header(10.0, 335.7285461425781, "-notation"),
        ];
        let merged = merge_candidates(candidates, 0.1);
        assert_eq!(merged, vec![header(0.0, 335.7464599609375, "O -notation")]);
    }

    #[test]
    fn test_detect_headers_uses_threshold() {
        let spans = vec![
            span(0.0, 20.0, 24.0, "Chapter"),
            span(0.0, 20.01, 24.0, "One"),
            span(30.0, 40.0, 10.0, "body"),
            span(40.0, 50.0, 10.0, "body"),
            span(50.0, 60.0, 10.0, "body"),
            span(60.0, 70.0, 10.0, "body"),
        ];
        let headers = detect_headers(&spans, 0.1);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].text, "Chapter One");
    }

    #[test]
    fn test_uniform_sizes_have_no_headers() {
        let spans = vec![span(0.0, 10.0, 11.0, "a"), span(10.0, 20.0, 11.0, "b")];
        assert!(detect_headers(&spans, 0.1).is_empty());
    }
}
