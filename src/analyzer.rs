//! Keyword extraction and CJK tokenization.
//!
//! The summarizer talks to an [`Analyzer`] trait with two variants chosen
//! once at startup: [`JiebaAnalyzer`] (jieba segmentation with TF-IDF
//! keyword weights) and [`NullAnalyzer`] (no segmentation capability,
//! empty results). Callers treat empty keywords as a valid low-information
//! result, never as an error.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::{Jieba, KeywordExtract, TfIdf};

use crate::config::AnalyzerConfig;

/// A weighted term extracted from chapter text.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
}

/// Word-segmentation and keyword-extraction capability.
pub trait Analyzer: Send + Sync {
    /// Up to `top_k` terms, weight-descending, unique within one result.
    /// `top_k == 0` yields an empty list.
    fn keywords(&self, text: &str, top_k: usize) -> Vec<Keyword>;

    /// Split a sentence into its constituent tokens for scoring.
    fn tokens(&self, text: &str) -> Vec<String>;

    /// True for the fallback variant without segmentation capability.
    fn is_degraded(&self) -> bool {
        false
    }
}

/// Select the analyzer variant from configuration. This is the single
/// dispatch point for segmentation availability.
pub fn build(config: &AnalyzerConfig) -> Box<dyn Analyzer> {
    if !config.enabled {
        return Box::new(NullAnalyzer);
    }
    let mut analyzer = JiebaAnalyzer::new(config.hmm);
    if let Some(path) = &config.user_dict {
        analyzer.load_user_dict(path);
    }
    Box::new(analyzer)
}

/// jieba-backed analyzer with TF-IDF keyword weighting.
pub struct JiebaAnalyzer {
    jieba: Jieba,
    tfidf: TfIdf,
    hmm: bool,
}

impl JiebaAnalyzer {
    pub fn new(hmm: bool) -> Self {
        Self {
            jieba: Jieba::new(),
            tfidf: TfIdf::default(),
            hmm,
        }
    }

    /// Merge a user dictionary of domain terms (jieba dictionary format,
    /// one entry per line) so genre compounds are not split apart.
    /// A missing or malformed dictionary is reported on stderr and
    /// otherwise ignored.
    pub fn load_user_dict(&mut self, path: &Path) {
        match File::open(path) {
            Ok(file) => {
                let mut reader = BufReader::new(file);
                if let Err(e) = self.jieba.load_dict(&mut reader) {
                    eprintln!(
                        "warning: failed to load user dictionary {}: {}",
                        path.display(),
                        e
                    );
                }
            }
            Err(e) => {
                eprintln!("warning: user dictionary {} not found: {}", path.display(), e);
            }
        }
    }
}

impl Default for JiebaAnalyzer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Analyzer for JiebaAnalyzer {
    fn keywords(&self, text: &str, top_k: usize) -> Vec<Keyword> {
        if top_k == 0 {
            return Vec::new();
        }
        self.tfidf
            .extract_keywords(&self.jieba, text, top_k, vec![])
            .into_iter()
            .map(|k| Keyword {
                term: k.keyword,
                weight: k.weight,
            })
            .collect()
    }

    fn tokens(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, self.hmm)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

/// Fallback analyzer used when segmentation is disabled. Produces no
/// keywords and no tokens; downstream consumers degrade to simpler
/// analysis instead of failing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnalyzer;

impl Analyzer for NullAnalyzer {
    fn keywords(&self, _text: &str, _top_k: usize) -> Vec<Keyword> {
        Vec::new()
    }

    fn tokens(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }

    fn is_degraded(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jieba_keywords_are_bounded_and_descending() {
        let analyzer = JiebaAnalyzer::default();
        let text = "张无忌练成了乾坤大挪移，乾坤大挪移是明教的镇教神功，\
                    张无忌凭借乾坤大挪移在光明顶力战六大门派。";
        let keywords = analyzer.keywords(text, 5);
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 5);
        for pair in keywords.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn zero_top_k_yields_empty() {
        let analyzer = JiebaAnalyzer::default();
        assert!(analyzer.keywords("随便一段文字。", 0).is_empty());
    }

    #[test]
    fn terms_are_unique() {
        let analyzer = JiebaAnalyzer::default();
        let text = "剑法，剑法，还是剑法，除了剑法没有别的。";
        let keywords = analyzer.keywords(text, 10);
        let mut terms: Vec<_> = keywords.iter().map(|k| k.term.as_str()).collect();
        terms.sort_unstable();
        terms.dedup();
        assert_eq!(terms.len(), keywords.len());
    }

    #[test]
    fn tokens_cover_cjk_sentences() {
        let analyzer = JiebaAnalyzer::default();
        let tokens = analyzer.tokens("他来到了光明顶。");
        assert!(tokens.len() > 1);
        // Cutting partitions the input; nothing is lost or invented.
        assert_eq!(tokens.concat(), "他来到了光明顶。");
    }

    #[test]
    fn null_analyzer_is_degraded_and_empty() {
        let analyzer = NullAnalyzer;
        assert!(analyzer.is_degraded());
        assert!(analyzer.keywords("任何文字。", 8).is_empty());
        assert!(analyzer.tokens("任何文字。").is_empty());
    }
}
