//! Structured warnings produced by the segmentation stages.
//!
//! Stages never print. Each returns its warnings next to its result so callers
//! (and tests) can inspect them by stage and kind.

use serde::Serialize;

/// Pipeline stage that raised a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Extraction,
    OffsetDetection,
    ChapterLocation,
    BoundaryResolution,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Extraction => write!(f, "extraction"),
            Stage::OffsetDetection => write!(f, "offset-detection"),
            Stage::ChapterLocation => write!(f, "chapter-location"),
            Stage::BoundaryResolution => write!(f, "boundary-resolution"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A TOC-prefix page had no extractable text.
    PageUnreadable,
    /// No page in the offset window reached the confidence threshold; offset 0 used.
    LowConfidenceOffset,
    /// An entry's heading was not found; the declared page was used.
    ChapterNotFound,
    /// Start page lies outside the document; entry dropped.
    OutOfRange,
    /// Range would be empty; entry dropped.
    DegenerateRange,
}

impl WarningKind {
    pub fn stage(self) -> Stage {
        match self {
            WarningKind::PageUnreadable => Stage::Extraction,
            WarningKind::LowConfidenceOffset => Stage::OffsetDetection,
            WarningKind::ChapterNotFound => Stage::ChapterLocation,
            WarningKind::OutOfRange | WarningKind::DegenerateRange => Stage::BoundaryResolution,
        }
    }

    /// Whether the warning means an entry was dropped from the output.
    pub fn is_skip(self) -> bool {
        matches!(self, WarningKind::OutOfRange | WarningKind::DegenerateRange)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub stage: Stage,
    pub kind: WarningKind,
    /// Section number the warning concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            stage: kind.stage(),
            kind,
            entry: None,
            message: message.into(),
        }
    }

    pub fn for_entry(kind: WarningKind, entry: &str, message: impl Into<String>) -> Self {
        Self {
            entry: Some(entry.to_string()),
            ..Self::new(kind, message)
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// Ordered list of warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Warning>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and mirror it to the log.
    pub fn push(&mut self, warning: Warning) {
        tracing::warn!(
            stage = %warning.stage,
            entry = warning.entry.as_deref().unwrap_or("-"),
            "{}",
            warning.message
        );
        self.0.push(warning);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.0.iter()
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.0.iter().filter(|w| w.kind == kind).count()
    }

    pub fn by_stage(&self, stage: Stage) -> impl Iterator<Item = &Warning> {
        self.0.iter().filter(move |w| w.stage == stage)
    }

    /// Number of entries dropped before splitting.
    pub fn skipped(&self) -> usize {
        self.0.iter().filter(|w| w.kind.is_skip()).count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
