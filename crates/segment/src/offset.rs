//! Offset detection between printed TOC page numbers and physical pages.

use tracing::{debug, info};

use tocsplit_core::config::OffsetConfig;
use tocsplit_core::{Diagnostics, PageSource, SectionEntry, Warning, WarningKind};

use crate::scoring::{best_candidate, offset_page_score, search_window, Candidate};

#[derive(Debug, Clone, Default)]
pub struct OffsetEstimate {
    /// Physical page minus declared page; 0 when detection was not confident.
    pub offset: i64,
    /// Best-scoring page in the search window, even when below threshold.
    pub best: Option<Candidate>,
    pub warnings: Diagnostics,
}

impl OffsetEstimate {
    pub fn is_confident(&self) -> bool {
        self.warnings.count(WarningKind::LowConfidenceOffset) == 0
    }
}

/// Estimate the front-matter offset by finding `anchor`'s heading near its
/// declared page.
pub fn detect_offset(source: &dyn PageSource, anchor: &SectionEntry, config: &OffsetConfig) -> OffsetEstimate {
    let window = search_window(
        anchor.declared_page,
        config.window_before,
        config.window_after,
        source.page_count(),
    );
    debug!(
        entry = %anchor.number,
        title = %anchor.title,
        declared = anchor.declared_page,
        start = window.start,
        end = window.end,
        "searching for offset anchor"
    );

    let best = best_candidate(source, window, |text| offset_page_score(text, anchor, config));
    let mut warnings = Diagnostics::new();

    let offset = match best {
        Some(candidate) if candidate.score >= config.min_confidence => {
            let offset = candidate.page_number() as i64 - anchor.declared_page as i64;
            info!(
                entry = %anchor.number,
                page = candidate.page_number(),
                score = candidate.score,
                offset,
                "detected page offset"
            );
            offset
        }
        _ => {
            let best_score = best.map_or(0, |c| c.score);
            warnings.push(Warning::for_entry(
                WarningKind::LowConfidenceOffset,
                &anchor.number,
                format!(
                    "could not detect page offset from {} '{}' (best score {} < {}); using offset 0",
                    anchor.number, anchor.title, best_score, config.min_confidence
                ),
            ));
            0
        }
    };

    OffsetEstimate {
        offset,
        best,
        warnings,
    }
}

/// New sequence with `offset` added to every declared page.
pub fn apply_offset(entries: &[SectionEntry], offset: i64) -> Vec<SectionEntry> {
    entries.iter().map(|e| e.shifted(offset)).collect()
}
