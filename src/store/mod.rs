//! File-backed store for categories, posts and blog roll entries
//!
//! Everything lives in one JSON document under `.blog/db.json`. The store is
//! read when a command starts and written back once when it finishes.

mod query;

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{
    BlogRoll, Category, ContentRenderer, ContentType, InlineObject, InlineSource, Post,
    RenderError,
};

pub use query::PostPage;

/// Store directory, relative to the blog directory
pub const STORE_DIR: &str = ".blog";

const STORE_FILE: &str = "db.json";

const MAX_CATEGORY_TITLE: usize = 100;
const MAX_POST_TITLE: usize = 200;
const MAX_SLUG: usize = 100;
const MAX_BLOGROLL_NAME: usize = 100;
const MAX_BLOGROLL_DESCRIPTION: usize = 500;
const MAX_BLOGROLL_RELATIONSHIP: usize = 200;

lazy_static! {
    static ref SLUG: Regex = Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap();
}

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} already exists: {key}")]
    Duplicate { kind: &'static str, key: String },

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Page {page} is out of range (1-{pages})")]
    PageOutOfRange { page: usize, pages: usize },

    #[error("Unsupported store version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> StoreError {
    StoreError::Validation {
        field,
        reason: reason.into(),
    }
}

/// Reject empty values and values longer than `max` characters
fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(invalid(field, format!("{} characters, at most {} allowed", len, max)));
    }
    Ok(())
}

fn check_slug(value: &str) -> Result<(), StoreError> {
    check_length("slug", value, MAX_SLUG)?;
    if !SLUG.is_match(value) {
        return Err(invalid(
            "slug",
            format!("'{}' may only contain letters, numbers, underscores and hyphens", value),
        ));
    }
    Ok(())
}

/// Only the version, so an incompatible document is rejected before the
/// rest of it is parsed
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// The blog database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    version: u32,
    categories: Vec<Category>,
    posts: Vec<Post>,
    blogroll: Vec<BlogRoll>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Current store format version
    const VERSION: u32 = 1;

    /// An empty store
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            categories: Vec::new(),
            posts: Vec::new(),
            blogroll: Vec::new(),
        }
    }

    /// Path of the store file for a blog directory
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(STORE_DIR).join(STORE_FILE)
    }

    /// Load the store from disk; a missing file is an empty store
    pub fn load(base_dir: &Path) -> Result<Self, StoreError> {
        let path = Self::path(base_dir);
        if !path.exists() {
            tracing::debug!("No store at {:?}, starting empty", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        let probe: VersionProbe = serde_json::from_str(&content)?;
        if probe.version != Self::VERSION {
            return Err(StoreError::Version {
                found: probe.version,
                expected: Self::VERSION,
            });
        }

        let store: Store = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded store: {} posts, {} categories, {} blog roll entries",
            store.posts.len(),
            store.categories.len(),
            store.blogroll.len()
        );
        Ok(store)
    }

    /// Save the store to disk
    pub fn save(&self, base_dir: &Path) -> Result<(), StoreError> {
        let store_dir = base_dir.join(STORE_DIR);
        fs::create_dir_all(&store_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(store_dir.join(STORE_FILE), content)?;
        Ok(())
    }

    /// Add a category; the slug is derived from the title when not given
    pub fn add_category(&mut self, title: &str, slug: Option<&str>) -> Result<u64, StoreError> {
        let title = title.trim();
        check_length("title", title, MAX_CATEGORY_TITLE)?;

        let id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let category = Category::new(id, title, slug.map(str::trim));
        check_slug(&category.slug)?;

        if self.category_by_slug(&category.slug).is_some() {
            return Err(StoreError::Duplicate {
                kind: "Category",
                key: category.slug,
            });
        }

        tracing::debug!("Added category '{}' ({})", category.title, category.slug);
        self.categories.push(category);
        Ok(id)
    }

    /// The id of the category named `name`, creating it when missing.
    ///
    /// `name` may be a slug or a display title; it is matched by its slug
    /// and a new category keeps `name` as its title.
    pub fn ensure_category(&mut self, name: &str) -> Result<u64, StoreError> {
        let slug = slug::slugify(name.trim());
        match self.category_by_slug(&slug) {
            Some(category) => Ok(category.id),
            None => self.add_category(name, Some(&slug)),
        }
    }

    /// Render and store a post, returning its id.
    ///
    /// The cached rendered fields are recomputed from the raw ones on every
    /// save. A post without an id is inserted; `created` is set once and
    /// kept from the stored copy afterwards, `modified` is always `now`.
    pub fn save_post(
        &mut self,
        mut post: Post,
        renderer: &ContentRenderer,
        config: &SiteConfig,
        now: DateTime<Local>,
    ) -> Result<u64, StoreError> {
        post.title = post.title.trim().to_string();
        post.slug = post.slug.trim().to_string();
        check_length("title", &post.title, MAX_POST_TITLE)?;
        check_slug(&post.slug)?;

        for id in &post.categories {
            if self.category(*id).is_none() {
                return Err(StoreError::NotFound {
                    kind: "Category",
                    key: id.to_string(),
                });
            }
        }

        let existing = match post.id {
            Some(id) => Some(self.post_index(id).ok_or_else(|| StoreError::NotFound {
                kind: "Post",
                key: id.to_string(),
            })?),
            None => None,
        };

        let date = post.publish_date();
        if self
            .posts
            .iter()
            .any(|p| p.id != post.id && p.slug == post.slug && p.publish_date() == date)
        {
            return Err(StoreError::Duplicate {
                kind: "Post",
                key: format!("{}/{}", date.format("%Y/%m/%d"), post.slug),
            });
        }

        let rendered = renderer.render_post(&post, &StoreInlines::new(self, config))?;
        post.body_rendered = Some(rendered.body);
        post.tease_rendered = Some(rendered.tease);
        post.categories.sort_unstable();
        post.categories.dedup();
        post.modified = Some(now);

        let id = match existing {
            Some(index) => {
                post.created = self.posts[index].created.or(Some(now));
                let id = self.posts[index].id;
                self.posts[index] = post;
                tracing::debug!("Updated post {:?}", id);
                id.unwrap_or_default()
            }
            None => {
                let id = self.posts.iter().filter_map(|p| p.id).max().unwrap_or(0) + 1;
                post.id = Some(id);
                post.created = Some(now);
                tracing::debug!("Inserted post {} '{}'", id, post.slug);
                self.posts.push(post);
                id
            }
        };

        Ok(id)
    }

    /// Re-render every post without touching timestamps
    pub fn render_all(
        &mut self,
        renderer: &ContentRenderer,
        config: &SiteConfig,
    ) -> Result<usize, StoreError> {
        let inlines = StoreInlines::new(self, config);
        let rendered = self
            .posts
            .iter()
            .map(|post| renderer.render_post(post, &inlines))
            .collect::<Result<Vec<_>, _>>()?;

        for (post, rendered) in self.posts.iter_mut().zip(rendered) {
            post.body_rendered = Some(rendered.body);
            post.tease_rendered = Some(rendered.tease);
        }
        Ok(self.posts.len())
    }

    /// Add a blog roll entry
    pub fn add_blogroll(&mut self, mut entry: BlogRoll) -> Result<u64, StoreError> {
        entry.name = entry.name.trim().to_string();
        entry.url = entry.url.trim().to_string();
        check_length("name", &entry.name, MAX_BLOGROLL_NAME)?;

        let url = url::Url::parse(&entry.url)
            .map_err(|e| invalid("url", format!("'{}': {}", entry.url, e)))?;
        if !url.has_host() {
            return Err(invalid("url", format!("'{}' is not an absolute URL", entry.url)));
        }

        let description_len = entry.description.chars().count();
        if description_len > MAX_BLOGROLL_DESCRIPTION {
            return Err(invalid(
                "description",
                format!("{} characters, at most {} allowed", description_len, MAX_BLOGROLL_DESCRIPTION),
            ));
        }
        let relationship_len = entry.relationship.chars().count();
        if relationship_len > MAX_BLOGROLL_RELATIONSHIP {
            return Err(invalid(
                "relationship",
                format!("{} characters, at most {} allowed", relationship_len, MAX_BLOGROLL_RELATIONSHIP),
            ));
        }

        let id = self.blogroll.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        entry.id = id;
        self.blogroll.push(entry);
        Ok(id)
    }

    /// Count a view of a post, returning the new total
    pub fn record_visit(&mut self, id: u64) -> Result<u64, StoreError> {
        let index = self.post_index(id).ok_or_else(|| StoreError::NotFound {
            kind: "Post",
            key: id.to_string(),
        })?;
        let post = &mut self.posts[index];
        post.visits += 1;
        Ok(post.visits)
    }

    fn post_index(&self, id: u64) -> Option<usize> {
        self.posts.iter().position(|p| p.id == Some(id))
    }
}

/// Resolves inline shortcuts against the store contents
pub struct StoreInlines<'a> {
    store: &'a Store,
    config: &'a SiteConfig,
}

impl<'a> StoreInlines<'a> {
    pub fn new(store: &'a Store, config: &'a SiteConfig) -> Self {
        Self { store, config }
    }
}

impl InlineSource for StoreInlines<'_> {
    fn has_content_type(&self, content_type: &ContentType) -> bool {
        content_type.app == "blog"
            && matches!(content_type.model.as_str(), "post" | "category" | "blogroll")
    }

    fn lookup(&self, content_type: &ContentType, id: u64) -> Option<InlineObject> {
        match content_type.model.as_str() {
            "post" => self.store.post(id).map(|post| InlineObject {
                id,
                title: post.title.clone(),
                url: post.absolute_url(self.config),
                summary: post.tease_rendered.clone(),
            }),
            "category" => self.store.category(id).map(|category| InlineObject {
                id,
                title: category.title.clone(),
                url: category.absolute_url(self.config),
                summary: None,
            }),
            "blogroll" => self.store.blogroll_entry(id).map(|entry| InlineObject {
                id,
                title: entry.name.clone(),
                url: entry.absolute_url().to_string(),
                summary: (!entry.description.is_empty()).then(|| entry.description.clone()),
            }),
            _ => None,
        }
    }
}
