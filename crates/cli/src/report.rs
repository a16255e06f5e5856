//! Human-readable and JSON renderings of pipeline results.

use std::path::Path;

use serde_json::{json, Value};

use tocsplit_core::config::OutputConfig;
use tocsplit_core::Config;
use tocsplit_segment::{Resolution, SplitReport};

fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// `--show` listing of the first `limit` ranges.
pub fn preview(resolution: &Resolution, output: &OutputConfig, limit: Option<usize>) -> String {
    let shown = resolution.limited(limit);
    let mut lines = vec![
        rule(70),
        format!("Found {} sections:", resolution.ranges.len()),
        rule(70),
        String::new(),
    ];

    for range in shown {
        lines.push(format!("Chapter {}: {}", range.entry.number, range.entry.title));
        lines.push(format!(
            "  Pages: {} to {} ({} pages)",
            range.start_page,
            range.end_page,
            range.page_count()
        ));
        lines.push(format!("  Output: {}", output.file_name(&range.entry.number)));
        lines.push(String::new());
    }

    lines.push(rule(70));
    lines.push(format!("Total: {} chapters", shown.len()));
    if shown.len() < resolution.ranges.len() {
        lines.push(format!("(Limited to first {} due to --max option)", shown.len()));
    }
    if resolution.skipped() > 0 {
        lines.push(format!("Skipped: {} entries outside the document", resolution.skipped()));
    }
    lines.push(rule(70));
    lines.join("\n")
}

pub fn preview_json(document: &Path, resolution: &Resolution, config: &Config, limit: Option<usize>) -> Value {
    let output = &config.output;
    let ranges: Vec<Value> = resolution
        .limited(limit)
        .iter()
        .map(|range| {
            json!({
                "number": range.entry.number,
                "title": range.entry.title,
                "start_page": range.start_page,
                "end_page": range.end_page,
                "pages": range.page_count(),
                "output": output.file_name(&range.entry.number),
            })
        })
        .collect();

    json!({
        "document": document.display().to_string(),
        "total_pages": resolution.total_pages,
        "offset": resolution.offset,
        "ranges": ranges,
        "skipped": resolution.skipped(),
        "warnings": resolution.diagnostics,
        "config": config.summary(),
    })
}

/// One block per written artifact plus the created/skipped summary.
pub fn split_summary(report: &SplitReport, output: &OutputConfig) -> String {
    let mut lines = Vec::new();
    for artifact in &report.artifacts {
        let name = artifact
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact.path.display().to_string());
        lines.push(format!("Saved: {name}"));
        lines.push(format!("  Title: {}", artifact.title));
        lines.push(format!(
            "  Pages: {} to {} ({} pages)",
            artifact.start_page,
            artifact.end_page,
            artifact.page_count()
        ));
        lines.push(String::new());
    }

    lines.push(rule(50));
    lines.push("Extraction complete!".to_string());
    lines.push(format!(
        "  Created {} chapter files in '{}/'",
        report.created(),
        output.dir.display()
    ));
    if report.skipped > 0 {
        lines.push(format!("  Skipped {} entries", report.skipped));
    }
    lines.push(rule(50));
    lines.join("\n")
}

pub fn split_json(report: &SplitReport, resolution: &Resolution, config: &Config) -> Value {
    json!({
        "created": report.created(),
        "skipped": report.skipped,
        "artifacts": report.artifacts,
        "warnings": resolution.diagnostics,
        "config": config.summary(),
    })
}
