use std::path::Path;

use tracing::debug;

use tocsplit_core::{DocumentWriter, PageSource, Result, TocSplitError};

const FORM_FEED: char = '\x0C';

/// Plain-text document with pages separated by form feeds, as written by
/// `pdftotext`.
#[derive(Debug, Clone, Default)]
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let pages = Self::from_bytes(&bytes);
        debug!(path = %path.display(), pages = pages.page_count(), "opened text document");
        Ok(pages)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        // Try UTF-8 first, fall back to lossy conversion
        let text = String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(FORM_FEED).map(str::to_string).collect();
        // A form feed after the last page does not open a new one.
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }
}

/// Writes page subsets of a [`TextPages`] document, joined by form feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter;

impl DocumentWriter for TextWriter {
    type Handle = TextPages;

    fn open_source(&self, path: &Path) -> Result<TextPages> {
        TextPages::open(path)
    }

    fn copy_pages(&self, source: &TextPages, pages: &[usize]) -> Result<Vec<u8>> {
        let mut out = String::new();
        for &index in pages {
            let text = source.page_text(index).ok_or(TocSplitError::PageOutOfBounds {
                index,
                page_count: source.page_count(),
            })?;
            out.push_str(text);
            out.push(FORM_FEED);
        }
        Ok(out.into_bytes())
    }

    fn write(&self, bytes: &[u8], output: &Path) -> Result<()> {
        std::fs::write(output, bytes)?;
        Ok(())
    }
}
