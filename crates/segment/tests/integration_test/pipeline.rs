use tocsplit_core::{Config, MemoryPages, TocSplitError, WarningKind};
use tocsplit_segment::Pipeline;

use crate::helpers::{manual, manual_texts, manual_without_headings, FRONT_MATTER, SECTIONS, TOTAL_PAGES};

fn spans(pipeline: &Pipeline, pages: &MemoryPages) -> Vec<(String, usize, usize)> {
    pipeline
        .resolve(pages)
        .unwrap()
        .ranges
        .iter()
        .map(|r| (r.entry.number.clone(), r.start_page, r.end_page))
        .collect()
}

// ── Extraction ──────────────────────────────────────────────────

#[test]
fn extraction_keeps_only_target_depth() {
    let pages = MemoryPages::from_texts([
        "Contents\n1 Basics 4\n1.1 Intro .... 5",
        "1.2 Setup .... 9\n1.2.1 Details .... 9",
        "2.1 Advanced .... 20",
    ]);
    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();

    let extracted: Vec<_> = resolution
        .extracted
        .iter()
        .map(|e| (e.number.as_str(), e.title.as_str(), e.declared_page))
        .collect();
    assert_eq!(
        extracted,
        vec![("1.1", "Intro", 5), ("1.2", "Setup", 9), ("2.1", "Advanced", 20)]
    );
}

#[test]
fn whitespace_aligned_toc_is_read() {
    let mut texts = manual_texts(FRONT_MATTER, SECTIONS, true);
    texts[0] = texts[0].replace(" .... ", "   ");
    let pages = MemoryPages::from_texts(texts);

    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();
    let numbers: Vec<_> = resolution.extracted.iter().map(|e| e.number.as_str()).collect();
    assert_eq!(numbers, vec!["1.1", "1.2", "1.3", "2.1"]);
    assert_eq!(resolution.extracted[1].title, "Getting Started");
    assert_eq!(resolution.ranges.len(), 4);
}

#[test]
fn document_without_toc_is_an_error() {
    let pages = MemoryPages::from_texts(vec!["Lorem ipsum"; 30]);
    let err = Pipeline::new(Config::default()).resolve(&pages).unwrap_err();
    assert!(matches!(err, TocSplitError::NoTocEntries { scanned_pages: 20 }));
}

// ── Offset ──────────────────────────────────────────────────────

#[test]
fn recovers_front_matter_offset() {
    let pages = manual(3, SECTIONS);
    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();

    assert_eq!(resolution.offset, 3);
    assert_eq!(resolution.diagnostics.count(WarningKind::LowConfidenceOffset), 0);
    let anchor = resolution.offset_anchor.unwrap();
    assert_eq!(anchor.page_number(), 4);
}

#[test]
fn adjusted_pages_include_offset() {
    let pages = manual(FRONT_MATTER, SECTIONS);
    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();

    assert_eq!(resolution.offset, FRONT_MATTER as i64);
    let adjusted: Vec<_> = resolution.adjusted.iter().map(|e| e.declared_page).collect();
    assert_eq!(adjusted, vec![7, 10, 14, 16]);
    // Extraction output is left untouched.
    assert_eq!(resolution.extracted[0].declared_page, 1);
}

#[test]
fn unmatched_anchor_falls_back_to_zero_offset() {
    // The anchor is declared on page 40, so the TOC page sits outside the
    // offset search window and no body page mentions the section.
    let mut texts = vec![String::from("Contents\n1.1 Introduction .... 40\n1.2 Setup .... 45")];
    texts.extend((1..60).map(|i| format!("Lorem ipsum dolor sit amet, page {i}.")));
    let pages = MemoryPages::from_texts(texts);

    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();
    assert_eq!(resolution.offset, 0);
    assert_eq!(resolution.diagnostics.count(WarningKind::LowConfidenceOffset), 1);
    assert_eq!(resolution.located[0].actual_page, Some(40));
    assert_eq!(resolution.located[1].actual_page, Some(45));
}

#[test]
fn missing_headings_keep_offset_but_warn_per_chapter() {
    let pages = manual_without_headings(FRONT_MATTER, SECTIONS);
    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();

    // Only the TOC page mentions the anchor, so it anchors the offset.
    assert_eq!(resolution.offset, 0);
    assert_eq!(resolution.diagnostics.count(WarningKind::LowConfidenceOffset), 0);

    // Entries whose window no longer reaches the TOC page fall back.
    let missing: Vec<_> = resolution
        .diagnostics
        .iter()
        .filter(|w| w.kind == WarningKind::ChapterNotFound)
        .filter_map(|w| w.entry.as_deref())
        .collect();
    assert_eq!(missing, vec!["1.3", "2.1"]);
    assert_eq!(resolution.located[2].actual_page, Some(8));
    assert_eq!(resolution.located[3].actual_page, Some(10));
}

// ── Location ────────────────────────────────────────────────────

#[test]
fn resolves_full_manual() {
    let pipeline = Pipeline::new(Config::default());
    let pages = manual(FRONT_MATTER, SECTIONS);

    assert_eq!(
        spans(&pipeline, &pages),
        vec![
            ("1.1".into(), 7, 9),
            ("1.2".into(), 10, 13),
            ("1.3".into(), 14, 15),
            ("2.1".into(), 16, TOTAL_PAGES),
        ]
    );
    let resolution = pipeline.resolve(&pages).unwrap();
    assert!(resolution.diagnostics.is_empty(), "{:?}", resolution.diagnostics);
    assert_eq!(resolution.total_pages, TOTAL_PAGES);
}

#[test]
fn locator_follows_heading_that_slipped() {
    let mut texts = manual_texts(FRONT_MATTER, SECTIONS, true);
    // Move the 1.3 heading one page later than the TOC claims.
    texts.swap(13, 14);
    let pages = MemoryPages::from_texts(texts);

    assert_eq!(
        spans(&Pipeline::new(Config::default()), &pages),
        vec![
            ("1.1".into(), 7, 9),
            ("1.2".into(), 10, 14),
            ("1.3".into(), 15, 15),
            ("2.1".into(), 16, TOTAL_PAGES),
        ]
    );
}

#[test]
fn unlocated_chapter_uses_adjusted_page() {
    let mut texts = manual_texts(FRONT_MATTER, SECTIONS, true);
    texts[9] = "Lorem ipsum dolor sit amet.".into();
    let pages = MemoryPages::from_texts(texts);

    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();
    assert_eq!(resolution.located[1].actual_page, Some(10));
    assert_eq!(resolution.diagnostics.count(WarningKind::ChapterNotFound), 1);
    let warning = resolution.diagnostics.iter().next().unwrap();
    assert_eq!(warning.entry.as_deref(), Some("1.2"));
    assert_eq!(resolution.ranges.len(), 4);
}

#[test]
fn located_entries_keep_toc_order() {
    let pages = manual(FRONT_MATTER, SECTIONS);
    let resolution = Pipeline::new(Config::default()).resolve(&pages).unwrap();
    let numbers: Vec<_> = resolution.located.iter().map(|e| e.number.as_str()).collect();
    assert_eq!(numbers, vec!["1.1", "1.2", "1.3", "2.1"]);
    assert!(resolution.located.iter().all(|e| e.actual_page.is_some()));
}

#[test]
fn deeper_target_depth_selects_subsections() {
    let sections = [
        ("1.1", "Introduction", 2),
        ("1.1.1", "Scope", 2),
        ("1.1.2", "Audience", 3),
        ("1.2", "Setup", 2),
    ];
    let pages = manual(FRONT_MATTER, &sections);
    let mut config = Config::default();
    config.extract.target_depth = 2;

    let resolution = Pipeline::new(config).resolve(&pages).unwrap();
    let numbers: Vec<_> = resolution.ranges.iter().map(|r| r.entry.number.as_str()).collect();
    assert_eq!(numbers, vec!["1.1.1", "1.1.2"]);
    assert_eq!(resolution.ranges[0].start_page, 9);
    assert_eq!(resolution.ranges[1].end_page, 15);
}
