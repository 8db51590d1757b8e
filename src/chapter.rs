//! Chapter-level analysis: title detection, size statistics, read-time
//! estimation, and the formatted report around a summary.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::summarizer::{SummarizeError, Summarizer, SummaryOptions, SummaryResult};

/// A first line longer than this is never treated as a chapter title.
const TITLE_MAX_CHARS: usize = 30;
/// Heading markers recognized by default (chapter/section/volume glyphs).
const DEFAULT_HEADING_PATTERN: &str = "[章节卷回]";

/// Formatting knobs for chapter analysis.
#[derive(Debug, Clone)]
pub struct ChapterOptions {
    /// Pattern a first line must match to count as a chapter heading.
    pub heading_pattern: Regex,
    /// Reading speed used for the time estimate.
    pub chars_per_minute: usize,
}

impl Default for ChapterOptions {
    fn default() -> Self {
        Self {
            heading_pattern: Regex::new(DEFAULT_HEADING_PATTERN)
                .expect("default heading pattern is valid"),
            chars_per_minute: 500,
        }
    }
}

/// Summary plus chapter metadata; the full artifact handed to display and
/// save layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterAnalysis {
    /// Detected or caller-provided title; empty when neither applies.
    pub title: String,
    pub char_count: usize,
    /// Approximate word count; CJK prose runs about two chars per word.
    pub word_count: usize,
    pub summary: SummaryResult,
    /// True when produced without segmentation capability.
    pub degraded: bool,
}

/// Detect a chapter title from the first line of `text`: short and
/// matching the heading pattern, or nothing. Only the first line is ever
/// considered.
pub fn detect_title(text: &str, heading_pattern: &Regex) -> Option<String> {
    let first_line = text.lines().next()?.trim();
    if first_line.is_empty() || first_line.chars().count() >= TITLE_MAX_CHARS {
        return None;
    }
    if heading_pattern.is_match(first_line) {
        Some(first_line.to_string())
    } else {
        None
    }
}

/// Analyze one chapter: title, size statistics and the summary itself.
/// An empty `title_hint` triggers first-line detection.
pub fn analyze(
    summarizer: &Summarizer,
    text: &str,
    title_hint: &str,
    options: &ChapterOptions,
    summary_options: &SummaryOptions,
) -> Result<ChapterAnalysis, SummarizeError> {
    let title = if title_hint.trim().is_empty() {
        detect_title(text, &options.heading_pattern).unwrap_or_default()
    } else {
        title_hint.trim().to_string()
    };

    let char_count = text.chars().count();
    let summary = summarizer.summarize_with(text, summary_options)?;

    Ok(ChapterAnalysis {
        title,
        char_count,
        word_count: char_count / 2,
        summary,
        degraded: summarizer.is_degraded(),
    })
}

/// Render an analysis as the human-readable chapter report.
pub fn format_summary(analysis: &ChapterAnalysis, options: &ChapterOptions) -> String {
    let minutes = analysis.char_count.div_ceil(options.chars_per_minute.max(1));

    let mut lines = Vec::new();
    if analysis.title.is_empty() {
        lines.push("# 章节概要".to_string());
    } else {
        lines.push(format!("# {}", analysis.title));
    }
    lines.push(String::new());
    lines.push(format!("📊 字数统计：约 {} 字", analysis.char_count));
    lines.push(format!("⏱️ 阅读时间：约 {} 分钟", minutes));
    lines.push(String::new());
    lines.push(analysis.summary.summary_text.clone());
    if analysis.degraded {
        lines.push("💡 提示：启用分词组件可获得更智能的关键词提取和摘要".to_string());
    }

    lines.join("\n")
}
