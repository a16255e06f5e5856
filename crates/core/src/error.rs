use thiserror::Error;

#[derive(Error, Debug)]
pub enum TocSplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("No table of contents entries found in the first {scanned_pages} pages")]
    NoTocEntries { scanned_pages: usize },

    #[error("Page {index} out of bounds (document has {page_count} pages)")]
    PageOutOfBounds { index: usize, page_count: usize },

    #[error("Document writer error: {0}")]
    Writer(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TocSplitError>;
