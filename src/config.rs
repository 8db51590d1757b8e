//! Configuration loading and management for shuzhai.
//!
//! Loads settings from `shuzhai.toml` with environment variable overrides;
//! a missing file falls back to defaults so the tool runs out of the box.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::chapter::ChapterOptions;
use crate::summarizer::SummaryOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Summarization defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Keywords reported per chapter.
    pub max_keywords: usize,
    /// Sentences kept per chapter.
    pub max_sentences: usize,
}

/// Word-segmentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// When false the degraded analyzer is used.
    pub enabled: bool,
    /// Optional domain dictionary merged into the segmenter vocabulary.
    pub user_dict: Option<PathBuf>,
    /// HMM-based recognition of words missing from the dictionary.
    pub hmm: bool,
}

/// Chapter metadata configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterConfig {
    /// Regex a first line must match to be treated as a chapter heading.
    pub heading_pattern: String,
    /// Reading speed for the time estimate.
    pub chars_per_minute: usize,
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryConfig,
    pub analyzer: AnalyzerConfig,
    pub chapter: ChapterConfig,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_keywords: 8,
            max_sentences: 5,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_dict: None,
            hmm: true,
        }
    }
}

impl Default for ChapterConfig {
    fn default() -> Self {
        Self {
            heading_pattern: "[章节卷回]".to_string(),
            chars_per_minute: 500,
        }
    }
}

impl Config {
    /// Load configuration from the default location (shuzhai.toml in cwd
    /// or under ~/.config/shuzhai), or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content)?
            }
            None => Config::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Find the config file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from("shuzhai.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("shuzhai").join("shuzhai.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dict) = std::env::var("SHUZHAI_USER_DICT") {
            self.analyzer.user_dict = Some(PathBuf::from(dict));
        }
    }

    /// Reject misconfiguration up front instead of coercing it later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summary.max_sentences == 0 {
            return Err(ConfigError::Invalid(
                "summary.max_sentences must be at least 1".to_string(),
            ));
        }
        if self.chapter.chars_per_minute == 0 {
            return Err(ConfigError::Invalid(
                "chapter.chars_per_minute must be at least 1".to_string(),
            ));
        }
        if let Err(e) = Regex::new(&self.chapter.heading_pattern) {
            return Err(ConfigError::Invalid(format!(
                "chapter.heading_pattern is not a valid regex: {}",
                e
            )));
        }
        Ok(())
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_keywords: self.summary.max_keywords,
            max_sentences: self.summary.max_sentences,
        }
    }

    pub fn chapter_options(&self) -> Result<ChapterOptions, ConfigError> {
        let heading_pattern = Regex::new(&self.chapter.heading_pattern).map_err(|e| {
            ConfigError::Invalid(format!(
                "chapter.heading_pattern is not a valid regex: {}",
                e
            ))
        })?;
        Ok(ChapterOptions {
            heading_pattern,
            chars_per_minute: self.chapter.chars_per_minute,
        })
    }
}
