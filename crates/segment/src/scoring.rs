//! Page scoring rules shared by offset detection and chapter location.
//!
//! Every rule is a pure function of one page's text and the entry being
//! searched for. [`best_candidate`] folds a rule over a page window.

use std::ops::Range;

use serde::Serialize;

use tocsplit_core::config::{LocateConfig, OffsetConfig};
use tocsplit_core::{PageSource, SectionEntry};

/// Highest-scoring page of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// 0-based physical index.
    pub page_index: usize,
    pub score: u32,
}

impl Candidate {
    /// 1-based physical page number.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

/// `[center - before, center + after)` clipped to `[0, page_count)`.
///
/// `center` is a 1-based page number used directly as a 0-based bound, so the
/// window leans one page late relative to the printed page.
pub fn search_window(center: usize, before: usize, after: usize, page_count: usize) -> Range<usize> {
    let start = center.saturating_sub(before);
    let end = center.saturating_add(after).min(page_count);
    start..end.max(start)
}

/// Score every readable page of `window` and keep the best.
///
/// Replacing the current best needs a strictly greater score, so the lowest
/// index wins ties. Pages scoring zero are never candidates.
pub fn best_candidate<S>(source: &dyn PageSource, window: Range<usize>, score: S) -> Option<Candidate>
where
    S: Fn(&str) -> u32,
{
    window
        .filter_map(|page_index| {
            source.page_text(page_index).map(|text| Candidate {
                page_index,
                score: score(text),
            })
        })
        .fold(None, |best, candidate| {
            let best_score = best.map_or(0, |b: Candidate| b.score);
            if candidate.score > best_score {
                Some(candidate)
            } else {
                best
            }
        })
}

/// Collapse whitespace runs to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a trimmed line opens with `number` followed by a space or tab.
pub fn starts_with_number(line: &str, number: &str) -> bool {
    line.strip_prefix(number)
        .is_some_and(|rest| rest.starts_with(' ') || rest.starts_with('\t'))
}

fn lowercase_prefix(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect::<String>().to_lowercase()
}

fn leading_words(title: &str, count: usize) -> Vec<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .take(count)
        .map(str::to_string)
        .collect()
}

/// Confidence that `text` is the page where `anchor`'s section starts, using
/// the broad offset-detection rules.
pub fn offset_page_score(text: &str, anchor: &SectionEntry, weights: &OffsetConfig) -> u32 {
    let title = normalize_whitespace(&anchor.title);
    let next_line_needle = lowercase_prefix(&title, weights.next_line_title_chars);
    let page_needle = lowercase_prefix(&title, weights.page_title_chars);
    let words = leading_words(&title, weights.title_words);
    let number = anchor.number.as_str();

    let lines: Vec<&str> = text.split('\n').collect();
    let mut score = 0;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();

        if starts_with_number(line, number) {
            score += weights.line_start_score;
            let title_follows = lines
                .get(i + 1)
                .is_some_and(|next| next.trim().to_lowercase().contains(&next_line_needle));
            if title_follows {
                score += weights.next_line_title_score;
            }
        }

        if line.contains(number) {
            let lower = line.to_lowercase();
            let hits = words.iter().filter(|w| lower.contains(w.as_str())).count() as u32;
            score += hits * weights.word_hit_score;
        }
    }

    if normalize_whitespace(text).to_lowercase().contains(&page_needle) {
        score += weights.page_title_score;
    }

    score
}

/// Confidence that `text` is the page where `entry`'s section starts, using
/// the stricter per-entry rules: the heading line must open with the number.
pub fn locate_page_score(text: &str, entry: &SectionEntry, weights: &LocateConfig) -> u32 {
    let words = leading_words(&entry.title, weights.title_words);
    let mentions_title = |line: &str| {
        let lower = line.trim().to_lowercase();
        words.iter().any(|w| lower.contains(w.as_str()))
    };

    let lines: Vec<&str> = text.split('\n').collect();
    let mut score = 0;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if !starts_with_number(line, &entry.number) {
            continue;
        }
        score += weights.line_start_score;
        if mentions_title(line) || lines.get(i + 1).is_some_and(|&next| mentions_title(next)) {
            score += weights.title_word_score;
        }
    }

    score
}
