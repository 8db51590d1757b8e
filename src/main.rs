//! Shuzhai CLI - extractive novel-chapter summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use shuzhai::{analyzer, chapter, export, source, Analyzer as _, Config, Summarizer};

#[derive(Parser)]
#[command(name = "shuzhai")]
#[command(author, version, about = "CLI for extractive novel-chapter summarisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a chapter from a file, a URL, or stdin ("-")
    Summarise {
        /// File path, URL, or "-" for stdin
        input: Option<String>,
        /// Keywords to extract
        #[arg(long)]
        keywords: Option<usize>,
        /// Sentences to keep
        #[arg(long)]
        sentences: Option<usize>,
        /// Show the acquired text instead of a summary
        #[arg(long)]
        raw: bool,
        /// Write the formatted report to a file
        #[arg(long)]
        save: Option<PathBuf>,
        /// Emit the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Full chapter report: title, statistics, keywords and summary
    Analyse {
        /// File path, URL, or "-" for stdin
        input: Option<String>,
        /// Write the formatted report to a file
        #[arg(long)]
        save: Option<PathBuf>,
        /// Emit the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ranked keywords only
    Keywords {
        /// File path, URL, or "-" for stdin
        input: Option<String>,
        /// Number of keywords to report
        #[arg(long, default_value_t = 8)]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Summarise {
            input,
            keywords,
            sentences,
            raw,
            save,
            json,
        }) => {
            let input = resolve_input(input)?;
            let chapter_text = source::acquire(&input).await?;

            if raw {
                println!("{}", chapter_text.text);
                println!("\n--- 共 {} 字 ---", chapter_text.text.chars().count());
                return Ok(());
            }

            let mut options = config.summary_options();
            if let Some(k) = keywords {
                options.max_keywords = k;
            }
            if let Some(s) = sentences {
                options.max_sentences = s;
            }

            let analysis = run_analysis(&config, &chapter_text, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let heading = if analysis.title.is_empty() {
                    "章节概要"
                } else {
                    analysis.title.as_str()
                };
                println!("{}\n", format!("=== {} ===", heading).bold());
                println!("{}", analysis.summary.summary_text);
                if analysis.degraded {
                    eprintln!("{}", "提示：分词组件已停用，摘要为降级结果".yellow());
                }
            }

            if let Some(path) = save {
                let report = chapter::format_summary(&analysis, &config.chapter_options()?);
                export::save_summary(&path, &chapter_text.origin, &report)?;
                println!("已保存到 {}", path.display());
            }
        }
        Some(Commands::Analyse { input, save, json }) => {
            let input = resolve_input(input)?;
            let chapter_text = source::acquire(&input).await?;
            let analysis = run_analysis(&config, &chapter_text, &config.summary_options())?;

            let report = chapter::format_summary(&analysis, &config.chapter_options()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("{}", report);
            }

            if let Some(path) = save {
                export::save_summary(&path, &chapter_text.origin, &report)?;
                println!("已保存到 {}", path.display());
            }
        }
        Some(Commands::Keywords { input, top }) => {
            let input = resolve_input(input)?;
            let chapter_text = source::acquire(&input).await?;

            let analyzer = analyzer::build(&config.analyzer);
            let keywords = analyzer.keywords(&chapter_text.text, top);
            if keywords.is_empty() {
                println!("未提取到关键词");
                if analyzer.is_degraded() {
                    eprintln!("{}", "提示：分词组件已停用".yellow());
                }
            } else {
                for (rank, keyword) in keywords.iter().enumerate() {
                    println!("{:>2}. {} ({:.4})", rank + 1, keyword.term, keyword.weight);
                }
            }
        }
        None => {
            // Piped text with no subcommand gets the default summary;
            // an interactive invocation gets the usage text.
            if atty::is(atty::Stream::Stdin) {
                Cli::command().print_help()?;
            } else {
                let chapter_text = source::acquire("-").await?;
                let analysis =
                    run_analysis(&config, &chapter_text, &config.summary_options())?;
                println!("{}", analysis.summary.summary_text);
            }
        }
    }

    Ok(())
}

/// Build the analyzer once and run the full chapter analysis.
fn run_analysis(
    config: &Config,
    chapter_text: &source::ChapterText,
    options: &shuzhai::SummaryOptions,
) -> anyhow::Result<chapter::ChapterAnalysis> {
    let summarizer = Summarizer::new(analyzer::build(&config.analyzer));
    let title_hint = chapter_text.title.as_deref().unwrap_or("");
    let analysis = chapter::analyze(
        &summarizer,
        &chapter_text.text,
        title_hint,
        &config.chapter_options()?,
        options,
    )?;
    Ok(analysis)
}

/// Use the given input, or fall back to stdin when text is piped in.
fn resolve_input(input: Option<String>) -> anyhow::Result<String> {
    if let Some(input) = input {
        return Ok(input);
    }
    if !atty::is(atty::Stream::Stdin) {
        return Ok("-".to_string());
    }
    anyhow::bail!("no input given; pass a file path, a URL, or pipe text on stdin")
}
