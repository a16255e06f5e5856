//! Writes one artifact per page range through a [`DocumentWriter`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use tocsplit_core::config::OutputConfig;
use tocsplit_core::{DocumentWriter, PageRange, Result};

/// One written section file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitArtifact {
    pub number: String,
    pub title: String,
    pub path: PathBuf,
    pub start_page: usize,
    pub end_page: usize,
}

impl SplitArtifact {
    pub fn page_count(&self) -> usize {
        self.end_page + 1 - self.start_page
    }
}

/// Copy each range of `source` into its own document under `output.dir`.
///
/// Only the first `limit` ranges are written when a limit is given, so
/// `Some(0)` writes nothing. The output directory is created if missing.
pub fn split_document<W: DocumentWriter>(
    writer: &W,
    source: &Path,
    ranges: &[PageRange],
    output: &OutputConfig,
    limit: Option<usize>,
) -> Result<Vec<SplitArtifact>> {
    std::fs::create_dir_all(&output.dir)?;
    let handle = writer.open_source(source)?;

    let selected = &ranges[..limit.unwrap_or(ranges.len()).min(ranges.len())];
    if selected.len() < ranges.len() {
        info!(limit = selected.len(), available = ranges.len(), "writing only the first ranges");
    }

    let mut written = Vec::with_capacity(selected.len());
    for range in selected {
        let bytes = writer.copy_pages(&handle, &range.page_indices())?;
        let path = output.dir.join(output.file_name(&range.entry.number));
        writer.write(&bytes, &path)?;

        info!(
            entry = %range.entry.number,
            path = %path.display(),
            start = range.start_page,
            end = range.end_page,
            "saved section"
        );
        written.push(SplitArtifact {
            number: range.entry.number.clone(),
            title: range.entry.title.clone(),
            path,
            start_page: range.start_page,
            end_page: range.end_page,
        });
    }

    Ok(written)
}
