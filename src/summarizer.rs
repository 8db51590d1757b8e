//! Extractive summarization core.
//!
//! Scores candidate sentences by summed keyword weight with a positional
//! boost, keeps the top K, and restores document order so the selection
//! reads as a coherent excerpt.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyzer::Analyzer;
use crate::segment;

/// Texts shorter than this (in chars) are returned verbatim; summarizing
/// them risks producing output longer than the source.
const SHORT_TEXT_CHARS: usize = 200;
/// Keyword pool size used for sentence scoring, wider than the displayed
/// keyword count to give the scorer richer signal.
const SCORING_POOL: usize = 20;
/// One summary sentence is budgeted per this many chars of source text.
const CHARS_PER_SENTENCE: usize = 100;
/// The derived sentence budget never drops below this.
const MIN_SENTENCES: usize = 3;
/// Multiplier for sentences in the opening or closing tenth of a chapter.
const EDGE_BOOST: f64 = 1.2;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Tunable knobs for one summarization call.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Keywords to report in the result.
    pub max_keywords: usize,
    /// Requested sentence count; the effective budget also adapts to text
    /// length.
    pub max_sentences: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_keywords: 8,
            max_sentences: 5,
        }
    }
}

impl SummaryOptions {
    fn validate(&self) -> Result<(), SummarizeError> {
        if self.max_sentences == 0 {
            return Err(SummarizeError::InvalidOptions(
                "max_sentences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The summary artifact for one chapter text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Formatted, human-readable summary block.
    pub summary_text: String,
    /// Keyword terms, highest weight first.
    pub keywords: Vec<String>,
    /// Selected sentences in original document order.
    pub important_sentences: Vec<String>,
    /// Summary chars divided by source chars.
    pub compression_ratio: f64,
}

/// Rule-based extractive summarizer. Stateless per call; the analyzer is
/// injected once at construction.
pub struct Summarizer {
    analyzer: Box<dyn Analyzer>,
}

impl Summarizer {
    pub fn new(analyzer: Box<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &dyn Analyzer {
        self.analyzer.as_ref()
    }

    /// True when running without segmentation capability; output quality
    /// is reduced and formatters should say so.
    pub fn is_degraded(&self) -> bool {
        self.analyzer.is_degraded()
    }

    /// Summarize with default options.
    pub fn summarize(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        self.summarize_with(text, &SummaryOptions::default())
    }

    /// Summarize `text` into keywords plus a small ordered excerpt.
    pub fn summarize_with(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<SummaryResult, SummarizeError> {
        options.validate()?;

        let normalized = text.replace("\n\n", "\n");
        let normalized = normalized.trim();
        let char_count = normalized.chars().count();

        if char_count < SHORT_TEXT_CHARS {
            return Ok(SummaryResult {
                summary_text: normalized.to_string(),
                keywords: Vec::new(),
                important_sentences: Vec::new(),
                compression_ratio: 1.0,
            });
        }

        let keywords: Vec<String> = self
            .analyzer
            .keywords(normalized, options.max_keywords)
            .into_iter()
            .map(|k| k.term)
            .collect();

        let budget = options
            .max_sentences
            .min(char_count / CHARS_PER_SENTENCE)
            .max(MIN_SENTENCES);
        let important = self.important_sentences(normalized, budget);

        let mut summary = String::from("【内容概要】\n\n");
        summary.push_str("◆ 关键词：");
        summary.push_str(&keywords.join("、"));
        summary.push_str("\n\n◆ 重要内容：\n");
        let bullets: Vec<String> = important.iter().map(|s| format!("· {}", s)).collect();
        summary.push_str(&bullets.join("\n"));
        summary.push_str("\n\n");

        let compression_ratio = summary.chars().count() as f64 / char_count as f64;

        Ok(SummaryResult {
            summary_text: summary,
            keywords,
            important_sentences: important,
            compression_ratio,
        })
    }

    /// Select up to `top_k` of the most representative sentences, returned
    /// in document order.
    ///
    /// Ranking sums the weights of each sentence's tokens found in a wider
    /// keyword pool, boosted for chapter openings and closings. Among
    /// equal scores the kept subset is arbitrary; only the final document
    /// ordering is guaranteed.
    pub fn important_sentences(&self, text: &str, top_k: usize) -> Vec<String> {
        let sentences = segment::split_sentences(text);
        if sentences.len() <= top_k {
            return sentences;
        }

        let pool = self.analyzer.keywords(text, SCORING_POOL);
        if pool.is_empty() {
            // No keyword signal to rank by; keep the opening sentences.
            return sentences.into_iter().take(top_k).collect();
        }
        let weights: HashMap<&str, f64> =
            pool.iter().map(|k| (k.term.as_str(), k.weight)).collect();

        let total = sentences.len() as f64;
        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                let raw: f64 = self
                    .analyzer
                    .tokens(sentence)
                    .iter()
                    .filter_map(|token| weights.get(token.as_str()).copied())
                    .sum();
                let position_weight =
                    if (i as f64) < total * 0.1 || (i as f64) > total * 0.9 {
                        EDGE_BOOST
                    } else {
                        1.0
                    };
                (i, raw * position_weight)
            })
            .collect();

        // Rank by score, keep the top K, then restore document order.
        scored.sort_unstable_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);
        scored.sort_unstable_by_key(|&(index, _)| index);

        scored
            .into_iter()
            .map(|(index, _)| sentences[index].clone())
            .collect()
    }
}
