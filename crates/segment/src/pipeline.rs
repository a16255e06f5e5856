//! Chains extraction → offset adjustment → location → boundary resolution,
//! then optionally splitting.
//!
//! Each stage returns a new sequence; [`Resolution`] keeps all of them so a
//! run can be inspected stage by stage.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use tocsplit_core::{
    Config, Diagnostics, DocumentWriter, PageRange, PageSource, Result, SectionEntry, TocSplitError,
};

use crate::boundary::resolve_boundaries;
use crate::locate::locate_chapters;
use crate::offset::{apply_offset, detect_offset};
use crate::scoring::Candidate;
use crate::split::{split_document, SplitArtifact};
use crate::toc::extract_toc;

/// Everything stages 1–4 produced for one document.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub total_pages: usize,
    /// Entries as read from the TOC.
    pub extracted: Vec<SectionEntry>,
    pub offset: i64,
    /// Page the offset was derived from (or the best below-threshold guess).
    pub offset_anchor: Option<Candidate>,
    /// `extracted` with the offset applied to declared pages.
    pub adjusted: Vec<SectionEntry>,
    /// `adjusted` with physical start pages, in TOC order.
    pub located: Vec<SectionEntry>,
    /// Valid ranges ordered by start page.
    pub ranges: Vec<PageRange>,
    pub diagnostics: Diagnostics,
}

impl Resolution {
    /// The first `limit` ranges, or all of them.
    pub fn limited(&self, limit: Option<usize>) -> &[PageRange] {
        let n = limit.unwrap_or(self.ranges.len()).min(self.ranges.len());
        &self.ranges[..n]
    }

    /// Entries dropped during boundary resolution.
    pub fn skipped(&self) -> usize {
        self.diagnostics.skipped()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub artifacts: Vec<SplitArtifact>,
    pub skipped: usize,
}

impl SplitReport {
    pub fn created(&self) -> usize {
        self.artifacts.len()
    }
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run extraction through boundary resolution.
    ///
    /// Fails only when the TOC yields no entries at the target depth.
    pub fn resolve(&self, source: &dyn PageSource) -> Result<Resolution> {
        let total_pages = source.page_count();
        let mut diagnostics = Diagnostics::new();

        let toc = extract_toc(source, &self.config.extract);
        diagnostics.extend(toc.warnings);
        let Some(anchor) = toc.entries.first() else {
            return Err(TocSplitError::NoTocEntries {
                scanned_pages: toc.scanned_pages,
            });
        };

        let estimate = detect_offset(source, anchor, &self.config.offset);
        diagnostics.extend(estimate.warnings);
        let adjusted = apply_offset(&toc.entries, estimate.offset);

        let located = locate_chapters(source, &adjusted, &self.config.locate);
        diagnostics.extend(located.warnings);

        let boundaries = resolve_boundaries(&located.entries, total_pages);
        diagnostics.extend(boundaries.warnings);

        info!(
            entries = toc.entries.len(),
            offset = estimate.offset,
            located = located.found,
            ranges = boundaries.ranges.len(),
            warnings = diagnostics.len(),
            "resolved section boundaries"
        );

        Ok(Resolution {
            total_pages,
            extracted: toc.entries,
            offset: estimate.offset,
            offset_anchor: estimate.best,
            adjusted,
            located: located.entries,
            ranges: boundaries.ranges,
            diagnostics,
        })
    }

    /// Write the first `limit` ranges of `resolution` as separate documents.
    pub fn split<W: DocumentWriter>(
        &self,
        resolution: &Resolution,
        document: &Path,
        writer: &W,
        limit: Option<usize>,
    ) -> Result<SplitReport> {
        let artifacts = split_document(writer, document, &resolution.ranges, &self.config.output, limit)?;
        Ok(SplitReport {
            artifacts,
            skipped: resolution.skipped(),
        })
    }
}
