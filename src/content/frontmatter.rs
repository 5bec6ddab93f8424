//! Front-matter parsing for post source files

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Post, PostStatus};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a post source file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub tease: Option<String>,
    pub markup: Option<String>,
    /// `draft` or `public`
    pub status: Option<String>,
    pub publish: Option<String>,
    pub author: Option<String>,
    /// Category slugs
    #[serde(deserialize_with = "string_or_vec")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub allow_comments: Option<bool>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start();
        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A horizontal rule followed by prose is not front-matter
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    /// Parse the publish string into a DateTime
    pub fn parse_publish(&self) -> Result<Option<DateTime<Local>>> {
        self.publish
            .as_deref()
            .map(|s| parse_date_string(s).ok_or_else(|| anyhow!("Invalid publish date '{}'", s)))
            .transpose()
    }

    pub fn parse_status(&self) -> Result<Option<PostStatus>> {
        self.status
            .as_deref()
            .map(|s| s.parse::<PostStatus>().map_err(|e| anyhow!(e)))
            .transpose()
    }

    /// Build a post from this front-matter and the body that followed it.
    ///
    /// `fallback_title` is used when the front-matter has no title, and
    /// `default_markup` when it names no formatter. Category slugs are left
    /// to the caller, which has to resolve them to ids.
    pub fn into_post(
        self,
        body: &str,
        fallback_title: &str,
        default_markup: &str,
        now: DateTime<Local>,
    ) -> Result<Post> {
        let publish = self.parse_publish()?.unwrap_or(now);
        let status = self.parse_status()?.unwrap_or_default();

        let mut post = Post::new(
            self.title.unwrap_or_else(|| fallback_title.to_string()),
            body.trim_end(),
        );
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        post.tease = self.tease.unwrap_or_default().trim().to_string();
        post.markup = self.markup.unwrap_or_else(|| default_markup.to_string());
        post.status = status;
        post.publish = publish;
        post.author = self.author;
        post.tags = self.tags.into_iter().map(|t| t.trim().to_string()).collect();
        post.allow_comments = self.allow_comments.unwrap_or(true);
        Ok(post)
    }
}

/// A `key:` line, as opposed to prose or a URL
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    let Some((key, value)) = trimmed.split_once(':') else {
        return false;
    };
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp")
        && (value.is_empty() || value.starts_with(' '))
}

/// Parse a date string in various formats, as local time
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

    // Offsets are explicit, no local interpretation needed
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
slug: hello
publish: 2024-01-15 10:30:00
status: draft
tags:
  - rust
  - blogging
categories:
  - programming
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.slug, Some("hello".to_string()));
        assert_eq!(fm.tags, vec!["rust", "blogging"]);
        assert_eq!(fm.categories, vec!["programming"]);
        assert_eq!(fm.parse_status().unwrap(), Some(PostStatus::Draft));
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_single_string_categories() {
        let content = "---\ntitle: One\ncategories: news\ntags: notes\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.categories, vec!["news"]);
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text, see https://example.com/path

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Some random text"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_parse_date_string() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!((dt.hour(), dt.minute()), (10, 30));

        let dt = parse_date_string("2024/02/03").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (2, 3, 0));

        assert!(parse_date_string("yesterday").is_none());
    }

    #[test]
    fn test_into_post() {
        let content = "---\ntitle: Front Matter\ntease: Short.\nallow_comments: false\n---\nThe body.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let post = fm.into_post(body, "fallback", "linebreaks", now).unwrap();

        assert_eq!(post.title, "Front Matter");
        assert_eq!(post.slug, "front-matter");
        assert_eq!(post.body, "The body.");
        assert_eq!(post.tease, "Short.");
        assert_eq!(post.markup, "linebreaks");
        assert_eq!(post.status, PostStatus::Public);
        assert_eq!(post.publish, now);
        assert!(!post.allow_comments);
    }

    #[test]
    fn test_into_post_rejects_bad_status() {
        let fm = FrontMatter {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert!(fm.into_post("", "t", "markdown", Local::now()).is_err());
    }
}
