//! Text acquisition: files, stdin and novel-site chapter pages.
//!
//! Every source reduces to plain chapter text; the summarization core
//! never depends on how the text was obtained.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this tool
const USER_AGENT: &str = concat!("shuzhai/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pages yielding less text than this are treated as extraction failures.
const MIN_CONTENT_CHARS: usize = 100;

/// Containers novel sites commonly put chapter prose in, most specific
/// first.
const CONTENT_SELECTORS: &[&str] = &[
    "#content",
    "#chaptercontent",
    "#booktxt",
    ".chapter-content",
    ".read-content",
    ".content",
    "article",
    "main",
];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("failed to read input: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("no chapter text found at URL")]
    NoContent,
}

/// Acquired chapter text plus where it came from.
#[derive(Debug, Clone)]
pub struct ChapterText {
    /// Source label: a path, a URL, or "stdin".
    pub origin: String,
    /// Page title, when the source carries one.
    pub title: Option<String>,
    /// Raw chapter text.
    pub text: String,
}

/// Dispatch on the input spelling: `-` reads stdin, `http(s)://` fetches a
/// chapter page, anything else is a file path.
pub async fn acquire(input: &str) -> Result<ChapterText, SourceError> {
    if input == "-" {
        read_stdin()
    } else if input.starts_with("http://") || input.starts_with("https://") {
        fetch_chapter(input).await
    } else {
        read_file(Path::new(input))
    }
}

fn read_stdin() -> Result<ChapterText, SourceError> {
    let mut buffer = Vec::new();
    std::io::stdin().read_to_end(&mut buffer)?;
    Ok(ChapterText {
        origin: "stdin".to_string(),
        title: None,
        text: String::from_utf8_lossy(&buffer).into_owned(),
    })
}

/// Read a chapter file. Novel text files often carry stray non-UTF-8
/// bytes; read lossily rather than fail on them.
fn read_file(path: &Path) -> Result<ChapterText, SourceError> {
    let bytes = std::fs::read(path)?;
    Ok(ChapterText {
        origin: path.display().to_string(),
        title: None,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Create a configured HTTP client
fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch a chapter page and extract its prose.
pub async fn fetch_chapter(url: &str) -> Result<ChapterText, SourceError> {
    let client = create_client()?;

    let response = client.get(url).send().await?;
    let html = response.text().await?;
    let document = Html::parse_document(&html);

    let title = extract_title(&document);
    let text = extract_chapter_text(&document);

    if text.chars().count() < MIN_CONTENT_CHARS {
        return Err(SourceError::NoContent);
    }

    Ok(ChapterText {
        origin: url.to_string(),
        title,
        text,
    })
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let title: String = element.text().collect();
                if !title.trim().is_empty() {
                    return Some(title.trim().to_string());
                }
            }
        }
    }
    None
}

/// Extract chapter prose: known content containers first, then the
/// densest <div>, then the whole body.
fn extract_chapter_text(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = block_text(element);
                if text.chars().count() >= MIN_CONTENT_CHARS {
                    return text;
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("div") {
        let densest = document
            .select(&selector)
            .max_by_key(|element| element.text().map(str::len).sum::<usize>());
        if let Some(element) = densest {
            let text = block_text(element);
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    if let Ok(selector) = Selector::parse("body") {
        if let Some(element) = document.select(&selector).next() {
            return block_text(element);
        }
    }

    String::new()
}

/// Collapse an element's text nodes into newline-separated lines.
fn block_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
