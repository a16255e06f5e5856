//! Table-of-contents extraction.
//!
//! Scans the leading pages of a document for lines shaped like TOC rows and
//! keeps the ones at the configured section depth.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, info};

use tocsplit_core::config::ExtractConfig;
use tocsplit_core::{Diagnostics, PageSource, SectionEntry, Warning, WarningKind};

/// `1.2 Title ........ 14`
static DOT_LEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\s+(.+?)\s+\.{2,}\s*(\d+)").expect("valid dot-leader regex")
});

/// `1.2 Title 14`
static ALIGNED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\s+(.+?)\s+(\d+)$").expect("valid aligned regex")
});

/// TOC line patterns in priority order. The first one that matches a line wins.
static TOC_PATTERNS: [&LazyLock<Regex>; 2] = [&DOT_LEADER_RE, &ALIGNED_RE];

/// Entries found in the TOC prefix, in scan order.
#[derive(Debug, Clone, Default)]
pub struct TocExtraction {
    pub entries: Vec<SectionEntry>,
    /// Pages examined (`min(max_toc_pages, page_count)`).
    pub scanned_pages: usize,
    pub warnings: Diagnostics,
}

/// Match one line against the TOC patterns.
///
/// Returns an entry of any depth; depth filtering happens in [`extract_toc`].
pub fn parse_toc_line(line: &str) -> Option<SectionEntry> {
    let line = line.trim_end_matches('\r');
    TOC_PATTERNS
        .iter()
        .find_map(|re| re.captures(line))
        .and_then(|caps| entry_from_captures(&caps))
}

fn entry_from_captures(caps: &Captures<'_>) -> Option<SectionEntry> {
    let number = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str().trim();
    let page: usize = caps.get(3)?.as_str().parse().ok()?;
    if page == 0 {
        return None;
    }
    Some(SectionEntry::new(number, title, page))
}

/// Extract TOC entries at `config.target_depth` from the first
/// `config.max_toc_pages` pages.
///
/// An empty result means no TOC was found; callers treat that as fatal.
pub fn extract_toc(source: &dyn PageSource, config: &ExtractConfig) -> TocExtraction {
    let scanned_pages = config.max_toc_pages.min(source.page_count());
    let mut warnings = Diagnostics::new();
    let mut entries = Vec::new();
    let mut discarded = 0usize;

    for page in (0..scanned_pages).map(|index| source.page(index)) {
        let Some(text) = page.text else {
            warnings.push(Warning::new(
                WarningKind::PageUnreadable,
                format!("page {} has no extractable text, skipped TOC scan", page.index + 1),
            ));
            continue;
        };

        for entry in text.split('\n').filter_map(parse_toc_line) {
            if entry.depth == config.target_depth {
                debug!(page = page.index + 1, entry = %entry.number, declared = entry.declared_page, "TOC entry");
                entries.push(entry);
            } else {
                discarded += 1;
            }
        }
    }

    info!(
        entries = entries.len(),
        discarded,
        scanned_pages,
        "TOC extraction complete"
    );

    TocExtraction {
        entries,
        scanned_pages,
        warnings,
    }
}
