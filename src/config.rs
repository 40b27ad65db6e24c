use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::filter::PathFilter;
use crate::git::{DEFAULT_BASE_REF, DEFAULT_HEAD_REF};

pub const CONFIG_FILE: &str = "files-changed.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub refs: Refs,
    #[serde(default)]
    pub filter: Filter,
}

#[derive(Debug, Deserialize)]
pub struct Refs {
    #[serde(default = "default_head")]
    pub head: String,
    #[serde(default = "default_base")]
    pub base: String,
}

impl Default for Refs {
    fn default() -> Self {
        Self {
            head: default_head(),
            base: default_base(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Filter {
    /// Glob patterns a path must match one of (empty = everything)
    #[serde(default)]
    pub include: Vec<String>,
    /// Glob patterns that drop a path
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_head() -> String {
    DEFAULT_HEAD_REF.to_string()
}

fn default_base() -> String {
    DEFAULT_BASE_REF.to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load `files-changed.toml` from `dir` if it exists, defaults otherwise
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.refs.head.trim().is_empty() {
            anyhow::bail!("refs.head must not be empty");
        }
        if self.refs.base.trim().is_empty() {
            anyhow::bail!("refs.base must not be empty");
        }

        self.path_filter()?;

        Ok(())
    }

    pub fn path_filter(&self) -> Result<PathFilter> {
        PathFilter::new(&self.filter.include, &self.filter.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[refs]
head = "feature/login"
base = "origin/main"

[filter]
include = ["services/api/**"]
exclude = ["**/*.md"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.refs.head, "feature/login");
        assert_eq!(config.refs.base, "origin/main");
        assert_eq!(config.filter.include, vec!["services/api/**"]);
        assert_eq!(config.filter.exclude, vec!["**/*.md"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[refs]\nbase = \"develop\"\n").unwrap();
        assert_eq!(config.refs.head, "HEAD");
        assert_eq!(config.refs.base, "develop");
        assert!(config.filter.include.is_empty());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.refs.head, "HEAD");
        assert_eq!(config.refs.base, "main");
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        fs::write(&path, "[refs]\nhead = \"  \"\n").unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, "[filter]\ninclude = [\"[oops\"]\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
