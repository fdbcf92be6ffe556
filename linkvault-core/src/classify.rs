use regex::{Regex, RegexBuilder};

use crate::config::PatternConfig;
use crate::error::{Result, StoreError};

/// Structural URL classification over configured regex patterns.
///
/// Patterns are compiled once, case-insensitively, so the predicates are
/// cheap enough to sit on every write path. All predicates are pure and
/// total: any string, however malformed, yields a plain `false` rather
/// than an error.
pub struct UrlClassifier {
    valid: Regex,
    file: Regex,
    small_file: Regex,
    image: Regex,
    ssi: Regex,
}

impl UrlClassifier {
    pub fn from_config(config: &PatternConfig) -> Result<Self> {
        Ok(UrlClassifier {
            valid: compile("valid_url", &config.valid_url)?,
            file: compile("file_url", &config.file_url)?,
            small_file: compile("small_file_url", &config.small_file_url)?,
            image: compile("image_url", &config.image_url)?,
            ssi: compile("ssi_url", &config.ssi_url)?,
        })
    }

    /// The admission gate: every write path silently drops candidates this
    /// rejects.
    pub fn is_url(&self, candidate: &str) -> bool {
        self.valid.is_match(candidate)
    }

    pub fn is_file_url(&self, candidate: &str) -> bool {
        self.file.is_match(candidate)
    }

    pub fn is_small_file_url(&self, candidate: &str) -> bool {
        self.small_file.is_match(candidate)
    }

    pub fn is_image_url(&self, candidate: &str) -> bool {
        self.image.is_match(candidate)
    }

    pub fn is_ssi_url(&self, candidate: &str) -> bool {
        self.ssi.is_match(candidate)
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::from_config(&PatternConfig::default()).expect("default patterns must compile")
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| StoreError::Pattern { name, source })
}
