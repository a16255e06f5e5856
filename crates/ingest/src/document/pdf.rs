use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, info, warn};

use tocsplit_core::{DocumentWriter, PageSource, Result, TocSplitError};

/// PDF page source.
///
/// Page text comes from pdf-extract, which keeps the line breaks of text
/// blocks that move the cursor with `Td`/`T*`. The whole document is
/// extracted once and split on form feeds; when the pieces do not line up
/// with the page tree, each page is extracted on its own from a one-page
/// copy, with lopdf's `extract_text` as the last resort. Per-page results are
/// kept for later scans.
pub struct PdfPages {
    document: Document,
    bytes: Vec<u8>,
    /// lopdf page numbers (1-based) in physical order.
    page_numbers: Vec<u32>,
    whole: OnceCell<Option<Vec<String>>>,
    texts: Vec<OnceCell<Option<String>>>,
}

impl PdfPages {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let pages = Self::from_bytes(bytes)?;
        info!(path = %path.display(), pages = pages.page_count(), "opened PDF");
        Ok(pages)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let document = load(&bytes)?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        let texts = page_numbers.iter().map(|_| OnceCell::new()).collect();
        Ok(Self {
            document,
            bytes,
            page_numbers,
            whole: OnceCell::new(),
            texts,
        })
    }

    fn whole_document(&self) -> Option<&Vec<String>> {
        self.whole
            .get_or_init(|| split_extracted_text(&self.bytes, self.page_numbers.len()))
            .as_ref()
    }

    fn extract_page(&self, index: usize) -> Option<String> {
        let number = *self.page_numbers.get(index)?;
        match single_page_text(&self.document, index) {
            Ok(text) => return Some(text),
            Err(e) => debug!(page = number, error = %e, "pdf-extract failed on page copy"),
        }
        match self.document.extract_text(&[number]) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(page = number, error = %e, "no text extracted from page");
                None
            }
        }
    }
}

impl PageSource for PdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Option<&str> {
        if let Some(pages) = self.whole_document() {
            return pages.get(index).map(String::as_str);
        }
        self.texts
            .get(index)?
            .get_or_init(|| self.extract_page(index))
            .as_deref()
    }
}

/// Whole-document pdf-extract text split into pages, or `None` when the
/// split does not line up with the page tree.
fn split_extracted_text(bytes: &[u8], page_count: usize) -> Option<Vec<String>> {
    let text = match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "pdf-extract failed on the whole document");
            return None;
        }
    };

    let mut pieces: Vec<String> = text.split('\x0C').map(str::to_string).collect();
    if pieces.len() == page_count + 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }
    if pieces.len() != page_count {
        debug!(
            pieces = pieces.len(),
            pages = page_count,
            "pdf-extract page breaks do not match the page tree, extracting per page"
        );
        return None;
    }
    debug!(pages = page_count, "using whole-document pdf-extract text");
    Some(pieces)
}

/// pdf-extract text of the page at `index`, read from a one-page copy.
fn single_page_text(document: &Document, index: usize) -> Result<String> {
    let bytes = copy_page_subset(document, &[index])?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| TocSplitError::Pdf(e.to_string()))?;
    Ok(text.trim_matches('\x0C').to_string())
}

fn load(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| TocSplitError::Pdf(e.to_string()))
}

/// Serialize a new document holding the 0-based `pages` of `source`.
fn copy_page_subset(source: &Document, pages: &[usize]) -> Result<Vec<u8>> {
    let numbers: Vec<u32> = source.get_pages().keys().copied().collect();
    let keep: BTreeSet<usize> = pages.iter().copied().collect();
    if let Some(&index) = keep.iter().find(|&&i| i >= numbers.len()) {
        return Err(TocSplitError::PageOutOfBounds {
            index,
            page_count: numbers.len(),
        });
    }

    let drop: Vec<u32> = numbers
        .iter()
        .enumerate()
        .filter(|(i, _)| !keep.contains(i))
        .map(|(_, &n)| n)
        .collect();

    let mut doc = source.clone();
    doc.delete_pages(&drop);
    doc.prune_objects();
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| TocSplitError::Writer(e.to_string()))?;
    debug!(kept = keep.len(), dropped = drop.len(), bytes = bytes.len(), "copied pages");
    Ok(bytes)
}

/// Copies page subsets of a PDF into standalone documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl DocumentWriter for PdfWriter {
    type Handle = Document;

    fn open_source(&self, path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        load(&bytes)
    }

    fn copy_pages(&self, source: &Document, pages: &[usize]) -> Result<Vec<u8>> {
        copy_page_subset(source, pages)
    }

    fn write(&self, bytes: &[u8], output: &Path) -> Result<()> {
        std::fs::write(output, bytes)?;
        Ok(())
    }
}
