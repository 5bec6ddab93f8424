//! basic-blog: a small blog engine with save-time rendering
//!
//! Posts, categories and blog roll entries live in a JSON store next to the
//! site configuration. Saving a post renders its body and tease once (inline
//! shortcuts, then the post's markup formatter, then optional typographic
//! substitution) and caches the HTML on the post.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod store;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use config::{BlogSettings, SiteConfig};
use content::{ContentRenderer, Post};
use store::Store;

/// Configuration file name, relative to the blog directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: SiteConfig,
    /// Settings resolved from the configuration
    pub settings: BlogSettings,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory of post source files
    pub source_dir: PathBuf,
}

impl Blog {
    /// Open the blog in a directory; a missing configuration means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)
                .with_context(|| format!("Failed to load {:?}", config_path))?
        } else {
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: SiteConfig) -> Self {
        let settings = BlogSettings::resolve(&config);
        let source_dir = base_dir.join(&config.source_dir);
        Self {
            config,
            settings,
            base_dir,
            source_dir,
        }
    }

    /// The render pipeline configured for this blog
    pub fn renderer(&self) -> ContentRenderer {
        ContentRenderer::new(&self.config, &self.settings)
    }

    pub fn load_store(&self) -> Result<Store> {
        Store::load(&self.base_dir)
            .with_context(|| format!("Failed to load {:?}", Store::path(&self.base_dir)))
    }

    pub fn save_store(&self, store: &Store) -> Result<()> {
        store.save(&self.base_dir)?;
        Ok(())
    }

    /// Render and save a post into `store`
    pub fn save_post(&self, store: &mut Store, post: Post, now: DateTime<Local>) -> Result<u64> {
        let slug = post.slug.clone();
        let id = store
            .save_post(post, &self.renderer(), &self.config, now)
            .with_context(|| format!("Failed to save post '{}'", slug))?;
        Ok(id)
    }

    /// Excerpt of a post under this blog's settings
    pub fn excerpt(&self, post: &Post) -> Option<String> {
        post.excerpt(&self.config, &self.settings)
    }
}
