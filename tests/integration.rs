use std::path::PathBuf;
use tempfile::tempdir;

use shuzhai::analyzer::{self, JiebaAnalyzer};
use shuzhai::chapter::{self, ChapterOptions};
use shuzhai::config::AnalyzerConfig;
use shuzhai::{Config, Summarizer, SummaryOptions};

mod test_helpers {
    /// A chapter of `n` terminated sentences, each long enough that the
    /// whole text clears the short-text threshold.
    pub fn build_chapter(n: usize) -> String {
        let mut text = String::from("第七章 雪夜下山\n");
        for i in 0..n {
            if i % 3 == 0 {
                text.push_str("少年握紧手中的长剑，长剑在雪光里微微颤动。");
            } else if i % 3 == 1 {
                text.push_str("山道上的积雪没过脚踝，他仍旧一步一步向下走。");
            } else {
                text.push_str("远处的灯火忽明忽暗，像是随时都会熄灭的样子。");
            }
        }
        text
    }
}

#[test]
fn full_pipeline_produces_ordered_excerpt() {
    // This test verifies:
    // 1. A jieba-backed summarizer runs end to end on real chapter text
    // 2. Keywords are bounded by the requested count
    // 3. Selected sentences come from the source, in document order
    // 4. The summary compresses the chapter

    let text = test_helpers::build_chapter(15);
    let summarizer = Summarizer::new(Box::new(JiebaAnalyzer::default()));

    let result = summarizer.summarize(&text).expect("summarize");

    assert!(!result.keywords.is_empty());
    assert!(result.keywords.len() <= 8);

    assert!(!result.important_sentences.is_empty());
    assert!(result.important_sentences.len() <= 5);
    let mut cursor = 0;
    for sentence in &result.important_sentences {
        let found = text[cursor..]
            .find(sentence.as_str())
            .expect("selected sentence must come from the source, in order");
        cursor += found + sentence.len();
    }

    assert!(result.compression_ratio < 1.0);
    assert!(result.summary_text.starts_with("【内容概要】"));
}

#[test]
fn summarize_twice_is_identical() {
    let text = test_helpers::build_chapter(12);
    let summarizer = Summarizer::new(Box::new(JiebaAnalyzer::default()));

    let first = summarizer.summarize(&text).expect("first run");
    let second = summarizer.summarize(&text).expect("second run");

    assert_eq!(first.keywords, second.keywords);
    assert_eq!(first.important_sentences, second.important_sentences);
    assert_eq!(first.summary_text, second.summary_text);
}

#[test]
fn chapter_analysis_detects_heading_and_counts() {
    let text = test_helpers::build_chapter(10);
    let summarizer = Summarizer::new(Box::new(JiebaAnalyzer::default()));

    let analysis = chapter::analyze(
        &summarizer,
        &text,
        "",
        &ChapterOptions::default(),
        &SummaryOptions::default(),
    )
    .expect("analyze");

    assert_eq!(analysis.title, "第七章 雪夜下山");
    assert_eq!(analysis.char_count, text.chars().count());
    assert_eq!(analysis.word_count, analysis.char_count / 2);
    assert!(!analysis.degraded);

    let report = chapter::format_summary(&analysis, &ChapterOptions::default());
    assert!(report.starts_with("# 第七章 雪夜下山"));
    assert!(report.contains("📊 字数统计"));
    assert!(report.contains("⏱️ 阅读时间"));
    assert!(report.contains("【内容概要】"));
}

#[test]
fn disabled_analyzer_degrades_without_failing() {
    let config = AnalyzerConfig {
        enabled: false,
        user_dict: None,
        hmm: true,
    };
    let summarizer = Summarizer::new(analyzer::build(&config));
    assert!(summarizer.is_degraded());

    let text = test_helpers::build_chapter(10);
    let result = summarizer.summarize(&text).expect("degraded summarize");

    assert!(result.keywords.is_empty());
    assert!(!result.important_sentences.is_empty());

    let analysis = chapter::analyze(
        &summarizer,
        &text,
        "",
        &ChapterOptions::default(),
        &SummaryOptions::default(),
    )
    .expect("degraded analyze");
    let report = chapter::format_summary(&analysis, &ChapterOptions::default());
    assert!(report.contains("💡 提示"));
}

#[test]
fn config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shuzhai.toml");
    std::fs::write(
        &path,
        r#"
[summary]
max_keywords = 10
max_sentences = 4

[chapter]
heading_pattern = "第.+[章节]"
chars_per_minute = 300
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).expect("load config");
    assert_eq!(config.summary.max_keywords, 10);
    assert_eq!(config.summary.max_sentences, 4);
    assert_eq!(config.chapter.chars_per_minute, 300);

    let options = config.chapter_options().expect("chapter options");
    assert!(options.heading_pattern.is_match("第十二章"));
    assert!(!options.heading_pattern.is_match("楔子"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shuzhai.toml");
    std::fs::write(
        &path,
        r#"
[chapter]
chars_per_minute = 0
"#,
    )
    .unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn file_to_saved_report_round_trip() {
    let dir = tempdir().unwrap();
    let chapter_path: PathBuf = dir.path().join("chapter.txt");
    let text = test_helpers::build_chapter(12);
    std::fs::write(&chapter_path, &text).unwrap();

    let loaded = String::from_utf8_lossy(&std::fs::read(&chapter_path).unwrap()).into_owned();
    let summarizer = Summarizer::new(Box::new(JiebaAnalyzer::default()));
    let analysis = chapter::analyze(
        &summarizer,
        &loaded,
        "",
        &ChapterOptions::default(),
        &SummaryOptions::default(),
    )
    .expect("analyze");
    let report = chapter::format_summary(&analysis, &ChapterOptions::default());

    let out_path = dir.path().join("summary.txt");
    shuzhai::export::save_summary(&out_path, &chapter_path.display().to_string(), &report)
        .expect("save");

    let saved = std::fs::read_to_string(&out_path).unwrap();
    assert!(saved.starts_with("来源："));
    assert!(saved.contains("# 第七章 雪夜下山"));
    assert!(saved.contains("【内容概要】"));
}

#[test]
fn analysis_serializes_to_json() {
    let text = test_helpers::build_chapter(10);
    let summarizer = Summarizer::new(Box::new(JiebaAnalyzer::default()));
    let analysis = chapter::analyze(
        &summarizer,
        &text,
        "",
        &ChapterOptions::default(),
        &SummaryOptions::default(),
    )
    .expect("analyze");

    let json = serde_json::to_string_pretty(&analysis).expect("serialize");
    assert!(json.contains("\"title\""));
    assert!(json.contains("\"char_count\""));
    assert!(json.contains("\"keywords\""));
    assert!(json.contains("\"important_sentences\""));
    assert!(json.contains("\"compression_ratio\""));
}

#[test]
fn short_chapter_passes_through() {
    let text = "第一章 开端\n很短的一段开场白。";
    let summarizer = Summarizer::new(Box::new(JiebaAnalyzer::default()));
    let result = summarizer.summarize(text).expect("summarize");

    assert_eq!(result.summary_text, text);
    assert_eq!(result.compression_ratio, 1.0);
    assert!(result.keywords.is_empty());
    assert!(result.important_sentences.is_empty());
}
