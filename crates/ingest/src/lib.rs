//! Concrete page sources and writers for documents on disk.

pub mod document;

pub use document::{open_pages, DocumentKind, PdfPages, PdfWriter, TextPages, TextWriter};
