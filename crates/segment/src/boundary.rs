//! Page range derivation from located entries.

use tracing::info;

use tocsplit_core::{Diagnostics, PageRange, SectionEntry, Warning, WarningKind};

#[derive(Debug, Clone, Default)]
pub struct Boundaries {
    /// Valid ranges ordered by start page.
    pub ranges: Vec<PageRange>,
    pub warnings: Diagnostics,
}

/// Inclusive `[start, end]` for a section starting at `start` whose successor
/// starts at `next_start`, or the reason it cannot be emitted.
pub fn bounded_range(start: usize, next_start: Option<usize>, total_pages: usize) -> Result<(usize, usize), WarningKind> {
    if start == 0 || start > total_pages {
        return Err(WarningKind::OutOfRange);
    }
    let end = next_start.map_or(total_pages, |next| next.saturating_sub(1)).min(total_pages);
    if start > end {
        return Err(WarningKind::DegenerateRange);
    }
    Ok((start, end))
}

/// Order entries by physical page and turn them into inclusive ranges.
///
/// The sort is stable, so entries sharing a page keep extraction order. Each
/// range ends just before the next strictly greater start page; the last one
/// runs to the end of the document.
pub fn resolve_boundaries(entries: &[SectionEntry], total_pages: usize) -> Boundaries {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(SectionEntry::resolved_page);

    let mut warnings = Diagnostics::new();
    let ranges: Vec<PageRange> = sorted
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let start = entry.resolved_page();
            let next_start = sorted[i + 1..]
                .iter()
                .map(SectionEntry::resolved_page)
                .find(|&page| page > start);

            match bounded_range(start, next_start, total_pages) {
                Ok((start_page, end_page)) => Some(PageRange {
                    entry: entry.clone(),
                    start_page,
                    end_page,
                }),
                Err(kind) => {
                    let message = match kind {
                        WarningKind::OutOfRange => format!(
                            "skipping {}: start page {} is outside the document (1 to {})",
                            entry.number, start, total_pages
                        ),
                        _ => format!(
                            "skipping {}: invalid page range ({} to {})",
                            entry.number,
                            start,
                            next_start.map_or(total_pages, |n| n.saturating_sub(1))
                        ),
                    };
                    warnings.push(Warning::for_entry(kind, &entry.number, message));
                    None
                }
            }
        })
        .collect();

    info!(
        ranges = ranges.len(),
        skipped = warnings.skipped(),
        total_pages,
        "boundary resolution complete"
    );

    Boundaries { ranges, warnings }
}
