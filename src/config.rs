use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::parser::Mode;
use crate::search::MatchMode;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Errors that can occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub text: TextConfig,
    pub search: SearchConfig,
    pub html: HtmlConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Classify lines into titles, lists and spacers. When off, every line
    /// is rendered verbatim.
    pub markdown: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { markdown: true }
    }
}

impl TextConfig {
    pub fn mode(&self) -> Mode {
        Mode::from_markdown_flag(self.markdown)
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: MatchMode,
}

/// CSS classes attached to each rendered element.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    pub container_class: String,
    pub paragraph_class: String,
    pub spacer_class: String,
    pub title_class: String,
    pub ordered_list_class: String,
    pub unordered_list_class: String,
    pub item_class: String,
    pub mark_class: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            container_class: "whitespace-pre-wrap".to_string(),
            paragraph_class: "leading-relaxed".to_string(),
            spacer_class: "h-2".to_string(),
            title_class: "font-semibold text-foreground mt-3 mb-1".to_string(),
            ordered_list_class: "list-decimal list-inside ml-4 space-y-1 my-2".to_string(),
            unordered_list_class: "list-disc list-inside ml-4 space-y-1 my-2".to_string(),
            item_class: "leading-relaxed".to_string(),
            mark_class: "bg-accent text-accent-foreground rounded px-1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

impl Config {
    /// The defaults bundled into the binary.
    pub fn compiled_default() -> Self {
        // build.rs guarantees the bundled file is valid TOML
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if it cannot be used.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|err| {
            warn!(%err, "using default config");
            Self::compiled_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn compiled_default_matches_struct_default() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config("[text]\nmarkdown = false\n\n[search]\nmode = \"pattern\"\n");
        let config = Config::try_load(file.path()).unwrap();

        assert_eq!(config.text.mode(), Mode::Plain);
        assert_eq!(config.search.mode, MatchMode::Pattern);
        assert_eq!(config.html, HtmlConfig::default());
        assert!(!config.page.numbers);
    }

    #[test]
    fn html_classes_override() {
        let file = write_config("[html]\nmark_class = \"hit\"\n");
        let config = Config::try_load(file.path()).unwrap();

        assert_eq!(config.html.mark_class, "hit");
        assert_eq!(config.html.item_class, "leading-relaxed");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            Config::try_load(&path),
            Err(ConfigError::Read { .. })
        ));
        assert_eq!(Config::load(&path), Config::compiled_default());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let file = write_config("[search]\nmode = \"fuzzy\"\n");

        assert!(matches!(
            Config::try_load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(Config::load(file.path()), Config::compiled_default());
    }
}
