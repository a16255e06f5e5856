use std::path::Path;

use crate::error::Result;

/// One physical page as seen by the segmentation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// 0-based physical position.
    pub index: usize,
    /// Extracted plain text, `None` when the page could not be read.
    pub text: Option<&'a str>,
}

/// Per-page plain text of a single document.
///
/// Implementations must return the same text for the same index for the
/// lifetime of the source; every stage may scan a page more than once.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Text of the page at the 0-based `index`, or `None` when absent or out of range.
    fn page_text(&self, index: usize) -> Option<&str>;

    fn page(&self, index: usize) -> Page<'_> {
        Page {
            index,
            text: self.page_text(index),
        }
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, index: usize) -> Option<&str> {
        (**self).page_text(index)
    }
}

/// Pages held in memory, e.g. text extracted ahead of time or test fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryPages {
    pages: Vec<Option<String>>,
}

impl MemoryPages {
    pub fn new(pages: Vec<Option<String>>) -> Self {
        Self { pages }
    }

    /// Build from page texts where every page is readable.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: texts.into_iter().map(|t| Some(t.into())).collect(),
        }
    }
}

impl PageSource for MemoryPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Option<&str> {
        self.pages.get(index).and_then(|p| p.as_deref())
    }
}

/// Writes page subsets of a source document as new documents.
pub trait DocumentWriter {
    /// An opened source document.
    type Handle;

    fn open_source(&self, path: &Path) -> Result<Self::Handle>;

    /// Serialize a new document holding the given 0-based pages, in order.
    fn copy_pages(&self, handle: &Self::Handle, pages: &[usize]) -> Result<Vec<u8>>;

    fn write(&self, bytes: &[u8], output: &Path) -> Result<()>;
}
