use serde::{Deserialize, Serialize};

/// A table-of-contents line that survived extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Dotted section number, e.g. `"1.2"`.
    pub number: String,
    pub title: String,
    /// Page number as printed in the TOC (offset-adjusted after offset detection).
    pub declared_page: usize,
    /// Number of `.` separators in `number`.
    pub depth: usize,
    /// Resolved 1-based physical start page, set by the chapter locator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_page: Option<usize>,
}

impl SectionEntry {
    pub fn new(number: impl Into<String>, title: impl Into<String>, declared_page: usize) -> Self {
        let number = number.into();
        let depth = section_depth(&number);
        Self {
            number,
            title: title.into(),
            declared_page,
            depth,
            actual_page: None,
        }
    }

    /// Copy with the declared page shifted by `offset`, saturating at zero.
    pub fn shifted(&self, offset: i64) -> Self {
        let page = (self.declared_page as i64).saturating_add(offset).max(0) as usize;
        Self {
            declared_page: page,
            ..self.clone()
        }
    }

    /// Copy with the physical start page resolved.
    pub fn located(&self, actual_page: usize) -> Self {
        Self {
            actual_page: Some(actual_page),
            ..self.clone()
        }
    }

    /// Physical start page, or the declared page when not yet located.
    pub fn resolved_page(&self) -> usize {
        self.actual_page.unwrap_or(self.declared_page)
    }
}

/// Count of `.` separators in a dotted section number.
pub fn section_depth(number: &str) -> usize {
    number.matches('.').count()
}

/// Inclusive 1-based page span of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub entry: SectionEntry,
    pub start_page: usize,
    pub end_page: usize,
}

impl PageRange {
    pub fn page_count(&self) -> usize {
        self.end_page + 1 - self.start_page
    }

    /// 0-based physical indices covered by this range.
    pub fn page_indices(&self) -> Vec<usize> {
        (self.start_page - 1..self.end_page).collect()
    }
}
