//! Post and Category models

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::excerpt;
use crate::config::{BlogSettings, SiteConfig};
use crate::helpers;

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PostStatus {
    Draft = 1,
    #[default]
    Public = 2,
}

impl TryFrom<u8> for PostStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PostStatus::Draft),
            2 => Ok(PostStatus::Public),
            other => Err(format!("unknown post status {}", other)),
        }
    }
}

impl From<PostStatus> for u8 {
    fn from(status: PostStatus) -> u8 {
        status as u8
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" | "1" => Ok(PostStatus::Draft),
            "public" | "published" | "2" => Ok(PostStatus::Public),
            other => Err(format!("unknown post status '{}'", other)),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Public => write!(f, "public"),
        }
    }
}

/// A blog post
///
/// `body_rendered` and `tease_rendered` are a cache of the raw fields. They
/// are rewritten every time the post is saved through the store and should
/// never be edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Store identifier, `None` until the first save
    pub id: Option<u64>,

    pub title: String,

    /// URL-friendly name, unique per publish date
    pub slug: String,

    /// Username of the author
    pub author: Option<String>,

    /// Name of the markup formatter for body and tease
    pub markup: String,

    /// Raw body text
    pub body: String,

    pub body_rendered: Option<String>,

    /// Short author-supplied summary
    pub tease: String,

    pub tease_rendered: Option<String>,

    /// View counter
    pub visits: u64,

    pub status: PostStatus,

    pub allow_comments: bool,

    pub publish: DateTime<Local>,

    /// Set on the first save, never changed afterwards
    pub created: Option<DateTime<Local>>,

    /// Set on every save
    pub modified: Option<DateTime<Local>>,

    /// Category ids
    pub categories: Vec<u64>,

    pub tags: BTreeSet<String>,
}

impl Post {
    /// Create a new, unsaved post published now
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slug::slugify(&title);
        Self {
            id: None,
            title,
            slug,
            author: None,
            markup: "markdown".to_string(),
            body: body.into(),
            body_rendered: None,
            tease: String::new(),
            tease_rendered: None,
            visits: 0,
            status: PostStatus::Public,
            allow_comments: true,
            publish: Local::now(),
            created: None,
            modified: None,
            categories: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// The calendar day the slug has to be unique for
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Whether readers can see the post at `now`
    pub fn is_public(&self, now: &DateTime<Local>) -> bool {
        self.status == PostStatus::Public && self.publish <= *now
    }

    /// Permalink of the post
    pub fn absolute_url(&self, config: &SiteConfig) -> String {
        helpers::post_url(config, &self.publish, &self.slug)
    }

    /// The excerpt shown in listings, or `None` when the post has none.
    ///
    /// See [`excerpt::select`] for the policy.
    pub fn excerpt(&self, config: &SiteConfig, settings: &BlogSettings) -> Option<String> {
        let link = excerpt::continue_link(&self.absolute_url(config), &settings.continue_text);
        excerpt::select(
            &self.tease,
            self.tease_rendered.as_deref().unwrap_or_default(),
            self.body_rendered.as_deref().unwrap_or_default(),
            settings.auto_excerpts,
            &link,
        )
    }
}

/// A post category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub title: String,
    /// Unique across all categories
    pub slug: String,
}

impl Category {
    pub fn new(id: u64, title: &str, slug: Option<&str>) -> Self {
        let slug = slug
            .map(str::to_string)
            .unwrap_or_else(|| slug::slugify(title));
        Self {
            id,
            title: title.to_string(),
            slug,
        }
    }

    /// Permalink of the category listing
    pub fn absolute_url(&self, config: &SiteConfig) -> String {
        helpers::category_url(config, &self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post_defaults() {
        let post = Post::new("Hello, World!", "body");
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.markup, "markdown");
        assert_eq!(post.status, PostStatus::Public);
        assert!(post.allow_comments);
        assert_eq!(post.visits, 0);
        assert!(post.id.is_none());
        assert!(post.created.is_none());
    }

    #[test]
    fn test_status_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PostStatus::Draft).unwrap(), "1");
        let status: PostStatus = serde_json::from_str("2").unwrap();
        assert_eq!(status, PostStatus::Public);
        assert!(serde_json::from_str::<PostStatus>("3").is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!("public".parse::<PostStatus>().unwrap(), PostStatus::Public);
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_is_public() {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut post = Post::new("Scheduled", "");
        post.publish = Local.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
        assert!(!post.is_public(&now));

        post.publish = Local.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        assert!(post.is_public(&now));

        post.status = PostStatus::Draft;
        assert!(!post.is_public(&now));
    }

    #[test]
    fn test_absolute_url() {
        let mut post = Post::new("Spring", "");
        post.publish = Local.with_ymd_and_hms(2024, 3, 7, 8, 0, 0).unwrap();
        assert_eq!(post.absolute_url(&SiteConfig::default()), "/2024/03/7/spring/");
    }

    #[test]
    fn test_category_slug() {
        let category = Category::new(1, "Open Source", None);
        assert_eq!(category.slug, "open-source");
        assert_eq!(
            category.absolute_url(&SiteConfig::default()),
            "/categories/open-source/"
        );
        assert_eq!(Category::new(2, "Misc", Some("etc")).slug, "etc");
    }
}
