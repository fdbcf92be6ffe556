use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Raw classification patterns, one per structural URL class. These are
/// plain regex strings; compilation (and compile-failure reporting) happens
/// in [`crate::classify::UrlClassifier`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub valid_url: String,
    pub file_url: String,
    pub small_file_url: String,
    pub image_url: String,
    pub ssi_url: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            valid_url: DEFAULT_VALID_URL.to_string(),
            file_url: DEFAULT_FILE_URL.to_string(),
            small_file_url: DEFAULT_SMALL_FILE_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            ssi_url: DEFAULT_SSI_URL.to_string(),
        }
    }
}

impl PatternConfig {
    /// Load patterns from a TOML file. Missing keys fall back to the
    /// defaults below.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

// The admission gate searches for a scheme anywhere in the candidate, so
// surrounding whitespace is tolerated here and stripped before storage.
const DEFAULT_VALID_URL: &str = r#"(?:https?|ftp)://[^\s"<>]+"#;

const DEFAULT_FILE_URL: &str = r"\.(?:xml|txt|pdf|csv|log|inc|dat|bak|old|conf|cnf|ini|zip|7z|rar|tar|gz|bz2|exe|dll|jar|war|sql|doc|docx|xls|xlsx|ppt|pptx)(?:\?.*)?$";

const DEFAULT_SMALL_FILE_URL: &str = r"\.(?:xml|txt|inc|conf|cnf|ini|bak|old|log)(?:\?.*)?$";

const DEFAULT_IMAGE_URL: &str = r"\.(?:png|jpe?g|gif|bmp|ico|svg|webp|tiff?)(?:\?.*)?$";

const DEFAULT_SSI_URL: &str = r"\.(?:shtml?|stm)(?:\?.*)?$";
