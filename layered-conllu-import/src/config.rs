//! Import configuration loaded from TOML.

use crate::errors::{ImportError, ImportResult};
use layered_conllu::ParseOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_extension() -> String {
    "conllu".to_string()
}

/// Where to find source files and how to parse them.
///
/// ```toml
/// source_dir = "assets/texts"
/// extension = "conllu"
///
/// [parse]
/// sentence_separator = "\n"
/// on_text_mismatch = "reconstruct"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportConfig {
    pub source_dir: PathBuf,
    /// File extension of source files, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub parse: ParseOptions,
}

impl ImportConfig {
    /// Default settings for `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            extension: default_extension(),
            parse: ParseOptions::default(),
        }
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Load from a TOML file.
    ///
    /// A relative `source_dir` is resolved against the directory holding the
    /// config file.
    pub fn load(path: &Path) -> ImportResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ImportError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ImportError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if config.source_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.source_dir = parent.join(&config.source_dir);
            }
        }

        Ok(config)
    }
}
