//! Sentence segmentation for chapter text.
//!
//! Splits raw text into an ordered list of trimmed sentences by inserting
//! breaks after terminating punctuation. Quote-aware: a terminator followed
//! by a closing quote keeps the quote attached to its sentence.

use lazy_static::lazy_static;
use regex::Regex;

/// The quote-aware break rules, applied in order.
struct SplitRules {
    /// Terminator not followed by a closing quote.
    terminator: Regex,
    /// Six-dot ASCII ellipsis.
    ascii_ellipsis: Regex,
    /// Doubled CJK ellipsis.
    cjk_ellipsis: Regex,
    /// Terminator plus closing quote, followed by sentence continuation.
    quoted_terminator: Regex,
}

fn build_rules() -> Option<SplitRules> {
    Some(SplitRules {
        terminator: Regex::new(r#"([。！？?])([^”’"'])"#).ok()?,
        ascii_ellipsis: Regex::new(r#"(\.{6})([^”’"'])"#).ok()?,
        cjk_ellipsis: Regex::new(r#"(…{2})([^”’"'])"#).ok()?,
        quoted_terminator: Regex::new(r#"([。！？?]["'”’])([^，。！？?])"#).ok()?,
    })
}

lazy_static! {
    static ref RULES: Option<SplitRules> = build_rules();
}

/// Split `text` into ordered, trimmed, non-empty sentences.
///
/// Empty or whitespace-only input yields an empty vec; text without any
/// terminating punctuation yields a single sentence equal to the trimmed
/// input. Never fails: if the rule set is unavailable the simpler
/// break-after-any-terminator rule is used instead.
pub fn split_sentences(text: &str) -> Vec<String> {
    match RULES.as_ref() {
        Some(rules) => {
            let marked = rules.terminator.replace_all(text, "${1}\n${2}");
            let marked = rules.ascii_ellipsis.replace_all(&marked, "${1}\n${2}");
            let marked = rules.cjk_ellipsis.replace_all(&marked, "${1}\n${2}");
            let marked = rules.quoted_terminator.replace_all(&marked, "${1}\n${2}");
            collect_sentences(&marked)
        }
        None => split_naive(text),
    }
}

/// Degraded rule: break after every terminator, including the ASCII full
/// stop, with no quote handling.
fn split_naive(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '。' | '！' | '？' | '?' | '.' | '\n') {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn collect_sentences(marked: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for line in marked.split('\n') {
        push_trimmed(&mut sentences, line);
    }
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
