use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TocSplitError};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    match profiled_env_opt(profile, key) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, "ignoring non-numeric env override");
            default
        }),
        None => default,
    }
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    match profiled_env_opt(profile, key) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, "ignoring non-numeric env override");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active profile name (empty = default).
    #[serde(skip)]
    pub profile: String,
    pub extract: ExtractConfig,
    pub offset: OffsetConfig,
    pub locate: LocateConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Parse a TOML document. Missing sections and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TocSplitError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| TocSplitError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment overrides on top of the current values (call
    /// `load_dotenv()` first). Profile is read from `TOCSPLIT_PROFILE`; when set
    /// (e.g. `MANUALS`), every key is first looked up as `{PROFILE}_{KEY}`,
    /// falling back to `{KEY}`.
    pub fn with_env(self) -> Self {
        let profile = profiled_env_or("", "TOCSPLIT_PROFILE", "").to_uppercase();
        self.with_profile_env(&profile)
    }

    /// Apply environment overrides for a specific named profile (empty string = default).
    pub fn with_profile_env(self, profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            extract: self.extract.with_env_profiled(p),
            offset: self.offset.with_env_profiled(p),
            locate: self.locate.with_env_profiled(p),
            output: self.output.with_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.extract.max_toc_pages == 0 {
            return Err(TocSplitError::Config("extract.max_toc_pages must be at least 1".into()));
        }
        if self.output.extension.is_empty() || self.output.extension.contains('.') {
            return Err(TocSplitError::Config(format!(
                "output.extension must be a bare extension, got {:?}",
                self.output.extension
            )));
        }
        if self.output.prefix.contains(['/', '\\']) {
            return Err(TocSplitError::Config(format!(
                "output.prefix must not contain path separators, got {:?}",
                self.output.prefix
            )));
        }
        Ok(())
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  extract:  toc_pages={}, depth={}",
            self.extract.max_toc_pages,
            self.extract.target_depth
        );
        tracing::info!(
            "  offset:   window=-{}/+{}, min_confidence={}",
            self.offset.window_before,
            self.offset.window_after,
            self.offset.min_confidence
        );
        tracing::info!(
            "  locate:   window=-{}/+{}, min_confidence={}",
            self.locate.window_before,
            self.locate.window_after,
            self.locate.min_confidence
        );
        tracing::info!(
            "  output:   dir={}, prefix={}, ext={}",
            self.output.dir.display(),
            self.output.prefix,
            self.output.extension
        );
    }

    /// JSON view of the effective settings, for `--json` reports.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "extract": self.extract,
            "offset": self.offset,
            "locate": self.locate,
            "output": self.output,
        })
    }
}

// ── TOC extraction ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Number of leading pages scanned for TOC lines.
    pub max_toc_pages: usize,
    /// Dot count of retained section numbers (1 keeps "1.2", drops "1" and "1.2.3").
    pub target_depth: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_toc_pages: 20,
            target_depth: 1,
        }
    }
}

impl ExtractConfig {
    fn with_env_profiled(self, p: &str) -> Self {
        Self {
            max_toc_pages: profiled_env_usize(p, "TOCSPLIT_MAX_TOC_PAGES", self.max_toc_pages),
            target_depth: profiled_env_usize(p, "TOCSPLIT_TARGET_DEPTH", self.target_depth),
        }
    }
}

// ── Offset detection ──────────────────────────────────────────

/// Window and weights for locating the first entry's heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetConfig {
    pub window_before: usize,
    pub window_after: usize,
    /// Line starts with the section number.
    pub line_start_score: u32,
    /// Title prefix found on the line after a number-led line.
    pub next_line_title_score: u32,
    /// Per title word found on a line containing the section number.
    pub word_hit_score: u32,
    /// Title prefix found anywhere on the page.
    pub page_title_score: u32,
    pub min_confidence: u32,
    pub next_line_title_chars: usize,
    pub page_title_chars: usize,
    pub title_words: usize,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            window_before: 20,
            window_after: 30,
            line_start_score: 50,
            next_line_title_score: 50,
            word_hit_score: 10,
            page_title_score: 20,
            min_confidence: 30,
            next_line_title_chars: 30,
            page_title_chars: 20,
            title_words: 5,
        }
    }
}

impl OffsetConfig {
    fn with_env_profiled(self, p: &str) -> Self {
        Self {
            window_before: profiled_env_usize(p, "TOCSPLIT_OFFSET_WINDOW_BEFORE", self.window_before),
            window_after: profiled_env_usize(p, "TOCSPLIT_OFFSET_WINDOW_AFTER", self.window_after),
            min_confidence: profiled_env_u32(p, "TOCSPLIT_OFFSET_MIN_CONFIDENCE", self.min_confidence),
            ..self
        }
    }
}

// ── Chapter location ──────────────────────────────────────────

/// Window and weights for locating every entry's heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    pub window_before: usize,
    pub window_after: usize,
    pub line_start_score: u32,
    pub title_word_score: u32,
    pub min_confidence: u32,
    pub title_words: usize,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            window_before: 5,
            window_after: 15,
            line_start_score: 100,
            title_word_score: 50,
            min_confidence: 100,
            title_words: 3,
        }
    }
}

impl LocateConfig {
    fn with_env_profiled(self, p: &str) -> Self {
        Self {
            window_before: profiled_env_usize(p, "TOCSPLIT_LOCATE_WINDOW_BEFORE", self.window_before),
            window_after: profiled_env_usize(p, "TOCSPLIT_LOCATE_WINDOW_AFTER", self.window_after),
            min_confidence: profiled_env_u32(p, "TOCSPLIT_LOCATE_MIN_CONFIDENCE", self.min_confidence),
            ..self
        }
    }
}

// ── Output ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Fixed document-family tag prepended to every artifact name.
    pub prefix: String,
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("chapters"),
            prefix: "micropython-docs".to_string(),
            extension: "pdf".to_string(),
        }
    }
}

impl OutputConfig {
    fn with_env_profiled(self, p: &str) -> Self {
        let dir = profiled_env_opt(p, "TOCSPLIT_OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.dir);
        Self {
            dir,
            prefix: profiled_env_or(p, "TOCSPLIT_PREFIX", &self.prefix),
            extension: profiled_env_or(p, "TOCSPLIT_EXTENSION", &self.extension),
        }
    }

    /// Artifact file name for a section number, e.g. `micropython-docs1-2.pdf` for `1.2`.
    pub fn file_name(&self, number: &str) -> String {
        format!("{}{}.{}", self.prefix, number.replace('.', "-"), self.extension)
    }
}
