//! Integration tests for outline hierarchy resolution.

use highlight_md::layout::resolve_hierarchy;
use highlight_md::{Header, HierarchyPath, Rect, TocEntry};

fn toc(entries: &[(u32, &str, u32)]) -> Vec<TocEntry> {
    entries
        .iter()
        .map(|&(level, title, page)| TocEntry::new(level, title, page))
        .collect()
}

fn header(text: &str) -> Header {
    Header::new(Rect::new(0.0, 20.0, 50.0, 30.0), text)
}

fn pairs(path: &HierarchyPath) -> Vec<(u32, &str)> {
    path.iter().collect()
}

fn textbook_toc() -> Vec<TocEntry> {
    toc(&[
        (1, "1 Introduction", 29),
        (2, "1.1 What Is an Algorithm?", 31),
        (3, "Exercises 1.1", 35),
        (2, "1.2 Fundamentals of Algorithmic Problem Solving", 37),
        (3, "Understanding the Problem", 37),
        (3, "Ascertaining the Capabilities of the Computational Device", 37),
        (1, "2 Evolution", 45),
        (2, "2.1 What is evolution", 50),
        (3, "Exercises 2.1", 52),
        (2, "2.2 More evolution", 60),
        (3, "Importance ofevolution", 65),
    ])
}

fn efficiency_toc() -> Vec<TocEntry> {
    toc(&[
        (1, "1 Introduction", 29),
        (2, "1.1 What Is an Algorithm?", 31),
        (3, "Exercises 1.1", 35),
        (1, "2 fundamentals of the analysis of algorithm efficiency", 75),
        (2, "2.2 Asymptotic Notations and Basic Efficiency Classes", 67),
        (3, "O-notation", 81),
    ])
}

#[test]
fn test_header_on_page_resolves_ancestors() {
    let path = resolve_hierarchy(&textbook_toc(), 52, &[header("Exercises 2.1")]);
    assert_eq!(
        pairs(&path),
        vec![
            (1, "2 Evolution"),
            (2, "2.1 What is evolution"),
            (3, "Exercises 2.1"),
        ]
    );
    assert!(path.is_well_formed());
}

#[test]
fn test_sibling_headers_on_same_page() {
    let toc = toc(&[
        (1, "1 Introduction", 29),
        (2, "1.1 What Is an Algorithm?", 31),
        (3, "Exercises 1.1", 35),
        (3, "Ecercises 1.2", 35),
        (3, "Understanding the Problem", 37),
        (3, "Ascertaining the Capabilities of the Computational Device", 37),
    ]);
    let headers = [
        header("Understanding the Problem"),
        header("Ascertaining the Capabilities of the Computational Device"),
    ];
    let path = resolve_hierarchy(&toc, 37, &headers);
    assert_eq!(
        pairs(&path),
        vec![
            (1, "1 Introduction"),
            (2, "1.1 What Is an Algorithm?"),
            (3, "Understanding the Problem"),
            (3, "Ascertaining the Capabilities of the Computational Device"),
        ]
    );
}

#[test]
fn test_empty_toc() {
    assert!(resolve_hierarchy(&[], 0, &[]).is_empty());
    assert!(resolve_hierarchy(&[], 12, &[header("Anything")]).is_empty());
}

#[test]
fn test_ligature_in_header() {
    let toc = toc(&[
        (1, "Cover", 1),
        (1, "Preface", 21),
        (1, "1 Introduction", 29),
        (2, "1.1 What Is an Algorithm?", 31),
        (3, "Exercises 1.1", 35),
        (2, "1.4 Fundamental Data Structures", 53),
        (3, "Summary", 66),
        (1, "2 Fundamentals of the Analysis of Algorithm Efficiency", 69),
        (2, "2.1 The Analysis Framework", 70),
        (3, "\t", 71),
        (3, "Units for Measuring Running Time", 72),
        (3, "Worst-Case, Best-Case, and Average-Case Efficiencies", 75),
        (3, "Exercises 2.1", 78),
        (2, "2.2 Asymptotic Notations and Basic Efficiency Classes", 80),
        (3, "Informal Introduction", 80),
    ]);
    let headers = [
        Header::new(
            Rect::new(85.30, 338.48, 108.55, 352.42),
            "2.2 Asymptotic Notations and Basic Ef\u{FB01}ciency Classes",
        ),
        Header::new(Rect::new(120.51, 506.04, 242.06, 518.00), "Informal Introduction"),
    ];

    let path = resolve_hierarchy(&toc, 79, &headers);
    assert_eq!(
        pairs(&path),
        vec![
            (1, "2 Fundamentals of the Analysis of Algorithm Efficiency"),
            (2, "2.2 Asymptotic Notations and Basic Efficiency Classes"),
            (3, "Informal Introduction"),
        ]
    );
}

#[test]
fn test_punctuation_in_header() {
    let path = resolve_hierarchy(&efficiency_toc(), 80, &[header("O-notation")]);
    assert_eq!(
        pairs(&path),
        vec![
            (1, "2 fundamentals of the analysis of algorithm efficiency"),
            (2, "2.2 Asymptotic Notations and Basic Efficiency Classes"),
            (3, "O-notation"),
        ]
    );
}

#[test]
fn test_page_without_headers_inherits_last_entry() {
    let path = resolve_hierarchy(&efficiency_toc(), 90, &[]);
    assert_eq!(
        pairs(&path),
        vec![
            (1, "2 fundamentals of the analysis of algorithm efficiency"),
            (2, "2.2 Asymptotic Notations and Basic Efficiency Classes"),
            (3, "O-notation"),
        ]
    );
}

#[test]
fn test_headers_are_not_modified() {
    let headers = vec![header("Exercises 2.1")];
    let before = headers.clone();
    let first = resolve_hierarchy(&textbook_toc(), 52, &headers);
    let second = resolve_hierarchy(&textbook_toc(), 52, &headers);
    assert_eq!(headers, before);
    assert_eq!(first, second);
}
