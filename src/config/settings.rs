//! Blog settings resolved against the site configuration
//!
//! Every option is either set explicitly in `_config.yml` or falls back to a
//! default. Some defaults are computed from other options: the blog name
//! defaults to the site name, the feed size to the page size and feed
//! excerpts to the listing excerpt toggle.

use std::fmt;

use super::SiteConfig;

pub const DEFAULT_DESCRIPTION: &str = "A basic blog";
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const DEFAULT_CONTINUE: &str = "Continue reading";

/// Resolved blog settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSettings {
    /// The name of the blog
    pub name: String,
    /// A short description of what the blog is about
    pub description: String,
    /// How many posts appear on a single page
    pub page_size: usize,
    /// How many posts appear in the feed
    pub feed_size: usize,
    /// Show only excerpts in page listings
    pub excerpts: bool,
    /// Show only excerpts in feeds
    pub feed_excerpts: bool,
    /// Use the rich editor for post bodies
    pub wmd: bool,
    /// Run rendered content through the typographic pass
    pub smartypants: bool,
    /// Truncate bodies to this many words when a post has no tease (0 disables)
    pub auto_excerpts: usize,
    /// Text of the "continue reading" link
    pub continue_text: String,
}

impl BlogSettings {
    /// Option names accepted by [`BlogSettings::value`]
    pub const KEYS: &'static [&'static str] = &[
        "blog_name",
        "blog_description",
        "blog_pagesize",
        "blog_feedsize",
        "blog_excerpts",
        "blog_feedexcerpts",
        "blog_wmd",
        "blog_smartypants",
        "blog_autoexcerpts",
        "blog_continue",
    ];

    /// Resolve every option against the site configuration
    pub fn resolve(config: &SiteConfig) -> Self {
        let overrides = &config.blog;

        let page_size = overrides.blog_pagesize.unwrap_or(DEFAULT_PAGE_SIZE);
        let excerpts = overrides.blog_excerpts.unwrap_or(false);

        Self {
            name: overrides
                .blog_name
                .clone()
                .unwrap_or_else(|| config.site_name.clone()),
            description: overrides
                .blog_description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            page_size,
            feed_size: overrides.blog_feedsize.unwrap_or(page_size),
            excerpts,
            feed_excerpts: overrides.blog_feedexcerpts.unwrap_or(excerpts),
            wmd: overrides.blog_wmd.unwrap_or(false),
            smartypants: overrides.blog_smartypants.unwrap_or(false),
            auto_excerpts: overrides.blog_autoexcerpts.unwrap_or(0),
            continue_text: overrides
                .blog_continue
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTINUE.to_string()),
        }
    }

    /// Look up a resolved option by its configuration key
    pub fn value(&self, key: &str) -> Option<SettingValue> {
        let value = match key {
            "blog_name" => SettingValue::Text(self.name.clone()),
            "blog_description" => SettingValue::Text(self.description.clone()),
            "blog_pagesize" => SettingValue::Number(self.page_size),
            "blog_feedsize" => SettingValue::Number(self.feed_size),
            "blog_excerpts" => SettingValue::Flag(self.excerpts),
            "blog_feedexcerpts" => SettingValue::Flag(self.feed_excerpts),
            "blog_wmd" => SettingValue::Flag(self.wmd),
            "blog_smartypants" => SettingValue::Flag(self.smartypants),
            "blog_autoexcerpts" => SettingValue::Number(self.auto_excerpts),
            "blog_continue" => SettingValue::Text(self.continue_text.clone()),
            _ => return None,
        };
        Some(value)
    }

    /// All options in declaration order
    pub fn entries(&self) -> Vec<(&'static str, SettingValue)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.value(key).map(|value| (*key, value)))
            .collect()
    }
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self::resolve(&SiteConfig::default())
    }
}

/// A single resolved option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Text(String),
    Number(usize),
    Flag(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(text) => write!(f, "{}", text),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}
