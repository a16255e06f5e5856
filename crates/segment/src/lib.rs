//! Table-of-contents driven document segmentation.
//!
//! Stages, in order:
//! - [`toc`]: extract numbered entries from the leading pages
//! - [`offset`]: estimate the shift between printed and physical page numbers
//! - [`locate`]: find each entry's heading page
//! - [`boundary`]: derive inclusive page ranges
//! - [`split`]: write one document per range
//!
//! [`pipeline::Pipeline`] chains them.

pub mod boundary;
pub mod locate;
pub mod offset;
pub mod pipeline;
pub mod scoring;
pub mod split;
pub mod toc;

// Re-export key types
pub use boundary::{resolve_boundaries, Boundaries};
pub use locate::{locate_chapters, Located};
pub use offset::{apply_offset, detect_offset, OffsetEstimate};
pub use pipeline::{Pipeline, Resolution, SplitReport};
pub use split::{split_document, SplitArtifact};
pub use toc::{extract_toc, parse_toc_line, TocExtraction};
