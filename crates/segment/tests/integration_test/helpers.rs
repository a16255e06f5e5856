use std::cell::RefCell;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tocsplit_core::config::OutputConfig;
use tocsplit_core::{Config, DocumentWriter, MemoryPages, Result};

/// One section of a synthetic manual: number, title, body page count.
pub type Section<'a> = (&'a str, &'a str, usize);

/// Build a manual whose first page is a dot-leader TOC, followed by
/// `front_matter - 1` unnumbered pages, then the sections in order.
///
/// Printed page 1 is the first section page, so the physical page of printed
/// page `p` is `p + front_matter`.
pub fn manual(front_matter: usize, sections: &[Section<'_>]) -> MemoryPages {
    MemoryPages::from_texts(manual_texts(front_matter, sections, true))
}

/// Same layout as [`manual`] but without section headings in the body.
pub fn manual_without_headings(front_matter: usize, sections: &[Section<'_>]) -> MemoryPages {
    MemoryPages::from_texts(manual_texts(front_matter, sections, false))
}

/// Page texts of [`manual`], for tests that tamper with individual pages.
pub fn manual_texts(front_matter: usize, sections: &[Section<'_>], headings: bool) -> Vec<String> {
    assert!(front_matter >= 1, "the TOC page counts as front matter");

    let mut toc = String::from("Contents\n");
    let mut printed = 1;
    for (number, title, pages) in sections {
        toc.push_str(&format!("{number} {title} .... {printed}\n"));
        printed += pages;
    }

    let mut texts = vec![toc];
    for i in 1..front_matter {
        texts.push(format!("Preface page {i}"));
    }
    for (number, title, pages) in sections {
        for page in 0..*pages {
            if page == 0 && headings {
                texts.push(format!("{number} {title}\n{title}\nLorem ipsum dolor sit amet."));
            } else {
                texts.push(format!("Lorem ipsum dolor sit amet, page {page}."));
            }
        }
    }
    texts
}

/// Write `texts` as form-feed separated pages, the way `pdftotext` does.
pub fn write_text_manual(path: &Path, texts: &[String]) {
    std::fs::write(path, texts.join("\x0C")).unwrap();
}

/// Write `texts` as a PDF with one page per entry. Every page is a single
/// `BT` block in Courier whose lines are separated by `T*`.
pub fn write_pdf_manual(path: &Path, texts: &[String]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 11.into()]),
            Operation::new("TL", vec![13.into()]),
            Operation::new("Td", vec![56.into(), 780.into()]),
        ];
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// Sections used by most tests: physical starts 7, 10, 14, 16 of 20 pages
/// with six pages of front matter.
pub const SECTIONS: &[Section<'static>] = &[
    ("1.1", "Introduction", 3),
    ("1.2", "Getting Started", 4),
    ("1.3", "Networking", 2),
    ("2.1", "Hardware Reference", 5),
];

pub const FRONT_MATTER: usize = 6;
pub const TOTAL_PAGES: usize = 20;

/// Config writing into `dir` with a short prefix.
pub fn config_in(dir: &Path) -> Config {
    Config {
        output: OutputConfig {
            dir: dir.join("chapters"),
            prefix: "manual".into(),
            extension: "txt".into(),
        },
        ..Config::default()
    }
}

/// Writer that serializes the requested page list, so artifacts can be
/// compared byte for byte without a real PDF.
#[derive(Default)]
pub struct RecordingWriter {
    pub opened: RefCell<Vec<PathBuf>>,
    pub copies: RefCell<Vec<Vec<usize>>>,
}

impl DocumentWriter for RecordingWriter {
    type Handle = PathBuf;

    fn open_source(&self, path: &Path) -> Result<PathBuf> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(path.to_path_buf())
    }

    fn copy_pages(&self, handle: &PathBuf, pages: &[usize]) -> Result<Vec<u8>> {
        self.copies.borrow_mut().push(pages.to_vec());
        Ok(format!("{} {:?}", handle.display(), pages).into_bytes())
    }

    fn write(&self, bytes: &[u8], output: &Path) -> Result<()> {
        std::fs::write(output, bytes)?;
        Ok(())
    }
}
