//! Per-entry physical start page resolution.

use tracing::{debug, info};

use tocsplit_core::config::LocateConfig;
use tocsplit_core::{Diagnostics, PageSource, SectionEntry, Warning, WarningKind};

use crate::scoring::{best_candidate, locate_page_score, search_window};

#[derive(Debug, Clone, Default)]
pub struct Located {
    /// Input entries, in input order, each with `actual_page` set.
    pub entries: Vec<SectionEntry>,
    pub found: usize,
    pub warnings: Diagnostics,
}

/// Resolve one entry's start page, falling back to its declared page.
///
/// Returns the located entry and whether its heading was found.
pub fn locate_chapter(source: &dyn PageSource, entry: &SectionEntry, config: &LocateConfig) -> (SectionEntry, bool) {
    let window = search_window(
        entry.declared_page,
        config.window_before,
        config.window_after,
        source.page_count(),
    );
    let best = best_candidate(source, window, |text| locate_page_score(text, entry, config));

    match best {
        Some(candidate) if candidate.score >= config.min_confidence => {
            debug!(
                entry = %entry.number,
                declared = entry.declared_page,
                page = candidate.page_number(),
                score = candidate.score,
                "located chapter"
            );
            (entry.located(candidate.page_number()), true)
        }
        _ => (entry.located(entry.declared_page), false),
    }
}

/// Resolve the start page of every entry independently.
pub fn locate_chapters(source: &dyn PageSource, entries: &[SectionEntry], config: &LocateConfig) -> Located {
    let mut warnings = Diagnostics::new();
    let mut found = 0;

    let located: Vec<SectionEntry> = entries
        .iter()
        .map(|entry| {
            let (located, hit) = locate_chapter(source, entry, config);
            if hit {
                found += 1;
            } else {
                warnings.push(Warning::for_entry(
                    WarningKind::ChapterNotFound,
                    &entry.number,
                    format!(
                        "could not locate chapter {} '{}', using TOC page {}",
                        entry.number, entry.title, entry.declared_page
                    ),
                ));
            }
            located
        })
        .collect();

    info!(found, total = entries.len(), "chapter page detection complete");

    Located {
        entries: located,
        found,
        warnings,
    }
}
