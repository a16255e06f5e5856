pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod section;

pub use config::Config;
pub use diagnostics::{Diagnostics, Stage, Warning, WarningKind};
pub use document::{DocumentWriter, MemoryPages, Page, PageSource};
pub use error::*;
pub use section::{PageRange, SectionEntry};
