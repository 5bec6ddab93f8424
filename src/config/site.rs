//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site_name: String,
    pub domain: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,

    // Writing
    pub default_markup: String,
    /// Fail saves on broken inline shortcuts instead of dropping them
    pub debug: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Blog overrides (blog_name, blog_pagesize, ...)
    #[serde(flatten)]
    pub blog: BlogOverrides,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "example.com".to_string(),
            domain: "example.com".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "posts".to_string(),

            default_markup: "markdown".to_string(),
            debug: false,
            highlight: HighlightConfig::default(),

            blog: BlogOverrides::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site configuration from {:?}", path.as_ref());
        Ok(config)
    }
}

/// Per-deployment blog overrides.
///
/// Every key is optional; unset keys are resolved by
/// [`BlogSettings`](super::BlogSettings).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_pagesize: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_feedsize: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_excerpts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_feedexcerpts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_wmd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_smartypants: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_autoexcerpts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_continue: Option<String>,
}

/// Code highlighting configuration for the markdown formatter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.site_name, "example.com");
        assert_eq!(config.root, "/");
        assert_eq!(config.default_markup, "markdown");
        assert!(config.blog.blog_pagesize.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
site_name: Craig's Notes
root: /blog/
debug: true
blog_pagesize: 20
blog_smartypants: true
highlight:
  line_number: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.site_name, "Craig's Notes");
        assert_eq!(config.root, "/blog/");
        assert!(config.debug);
        assert_eq!(config.blog.blog_pagesize, Some(20));
        assert_eq!(config.blog.blog_smartypants, Some(true));
        assert!(config.blog.blog_feedsize.is_none());
        assert!(!config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_load_missing_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "url: https://blog.example.org\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.url, "https://blog.example.org");
        assert_eq!(config.source_dir, "posts");
        assert!(config.blog.blog_name.is_none());
    }
}
