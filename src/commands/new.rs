//! Create a new post source file

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::PostStatus;
use crate::Blog;

/// Options for a new post
#[derive(Debug, Default)]
pub struct NewPost<'a> {
    pub slug: Option<&'a str>,
    pub markup: Option<&'a str>,
    pub status: PostStatus,
    pub categories: &'a [String],
    pub tags: &'a [String],
}

/// Write a post scaffold into the source directory, returning its path
pub fn create_post(blog: &Blog, title: &str, options: &NewPost<'_>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = options
        .slug
        .map(str::to_string)
        .unwrap_or_else(|| slug::slugify(title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&blog.source_dir)?;
    let file_path = blog.source_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let markup = options.markup.unwrap_or(&blog.config.default_markup);
    let renderer = blog.renderer();
    if !renderer.formatters().contains(markup) {
        anyhow::bail!(
            "Unknown markup: {}. Available: {}",
            markup,
            renderer.formatters().names().join(", ")
        );
    }
    let content = format!(
        r#"---
title: {}
slug: {}
publish: {}
status: {}
markup: {}
categories: [{}]
tags: [{}]
tease:
---
"#,
        yaml_string(title),
        slug,
        now.format("%Y-%m-%d %H:%M:%S"),
        options.status,
        markup,
        options.categories.join(", "),
        options.tags.join(", ")
    );

    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Quote a title so YAML reads it back verbatim
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
