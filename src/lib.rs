//! # Shuzhai
//!
//! Extractive summarization for novel chapters: ranked keywords plus the
//! handful of sentences that best represent a chapter.
//!
//! ## Features
//!
//! - **Extractive, not generative**: summaries are sentences lifted from
//!   the chapter, ranked by keyword weight with a positional boost, then
//!   restored to document order
//! - **CJK-aware**: jieba-backed segmentation and TF-IDF keyword weights,
//!   with an optional user dictionary for genre vocabulary
//! - **Degrades, never crashes**: missing capabilities fall back to
//!   simpler analysis instead of failing the caller

pub mod analyzer;
pub mod chapter;
pub mod config;
pub mod export;
pub mod segment;
pub mod source;
pub mod summarizer;

pub use analyzer::{Analyzer, JiebaAnalyzer, Keyword, NullAnalyzer};
pub use chapter::{ChapterAnalysis, ChapterOptions};
pub use config::Config;
pub use summarizer::{Summarizer, SummaryOptions, SummaryResult};
