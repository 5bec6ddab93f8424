//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::store::Store;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Blog Configuration

# Site
site_name: example.com
domain: example.com

# URL
url: http://example.com
root: /

# Directory
source_dir: posts

# Writing
default_markup: markdown
# Fail saves on broken <inline> shortcuts instead of dropping them
debug: false
highlight:
  line_number: true
  theme: base16-ocean.dark

# Blog settings, unset keys fall back to their defaults
# blog_name: example.com
# blog_description: A basic blog
# blog_pagesize: 12
# blog_feedsize: 12
# blog_excerpts: false
# blog_feedexcerpts: false
# blog_wmd: false
# blog_smartypants: false
# blog_autoexcerpts: 0
# blog_continue: Continue reading
"#;

/// Initialize a new blog in the given directory.
///
/// An existing configuration or store is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    if !Store::path(target_dir).exists() {
        Store::new().save(target_dir)?;
    }

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
publish: {}
tags: welcome
---

Welcome to your new blog! Write posts as Markdown files in `posts/` and
run `basic-blog import` to render them into the store.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    let sample_path = target_dir.join("posts/hello-world.md");
    if !sample_path.exists() {
        fs::write(sample_path, sample_post)?;
    }

    Ok(())
}
