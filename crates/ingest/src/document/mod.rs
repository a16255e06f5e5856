mod pdf;
mod txt;

use std::path::Path;

use tocsplit_core::{PageSource, Result, TocSplitError};

pub use pdf::{PdfPages, PdfWriter};
pub use txt::{TextPages, TextWriter};

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    /// Plain text with pages separated by form feeds.
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" | "text" => Ok(Self::Text),
            other => Err(TocSplitError::UnsupportedType(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }

    /// Extension written for artifacts split from this kind of document.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
        }
    }
}

/// Open `path` as a page source matching its extension.
pub fn open_pages(path: &Path) -> Result<Box<dyn PageSource>> {
    let pages: Box<dyn PageSource> = match DocumentKind::from_path(path)? {
        DocumentKind::Pdf => Box::new(PdfPages::open(path)?),
        DocumentKind::Text => Box::new(TextPages::open(path)?),
    };
    Ok(pages)
}
