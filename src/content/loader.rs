//! Content loader - reads post source files from a directory

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};

/// A post read from disk, before its categories are resolved
#[derive(Debug, Clone)]
pub struct SourcePost {
    pub path: PathBuf,
    pub post: Post,
    /// Category slugs named in the front-matter
    pub categories: Vec<String>,
}

/// Loads post source files
pub struct ContentLoader<'a> {
    source_dir: &'a Path,
    default_markup: &'a str,
}

impl<'a> ContentLoader<'a> {
    pub fn new(source_dir: &'a Path, default_markup: &'a str) -> Self {
        Self {
            source_dir,
            default_markup,
        }
    }

    /// Load every markdown file under the source directory, oldest first.
    ///
    /// Files that can't be read or parsed are skipped with a warning.
    pub fn load_posts(&self, now: DateTime<Local>) -> Result<Vec<SourcePost>> {
        if !self.source_dir.exists() {
            anyhow::bail!("Source directory {:?} does not exist", self.source_dir);
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(self.source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path, now) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                    }
                }
            }
        }

        posts.sort_by(|a, b| a.post.publish.cmp(&b.post.publish));

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path, now: DateTime<Local>) -> Result<SourcePost> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let file_stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let categories = fm
            .categories
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        let post = fm.into_post(body, &file_stem, self.default_markup, now)?;

        Ok(SourcePost {
            path: path.to_path_buf(),
            post,
            categories,
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_load_posts() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("second.md"),
            "---\ntitle: Second\npublish: 2024-02-01\ncategories: [news, rust]\n---\nBody two\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested/first.markdown"),
            "---\ntitle: First\npublish: 2024-01-01\n---\nBody one\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();

        let now = Local.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let posts = ContentLoader::new(dir.path(), "markdown")
            .load_posts(now)
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post.title, "First");
        assert_eq!(posts[1].post.title, "Second");
        assert_eq!(posts[1].categories, vec!["news", "rust"]);
        assert_eq!(posts[1].post.body, "Body two");
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), "---\ntitle: x\npublish: someday\n---\n").unwrap();
        fs::write(dir.path().join("good.md"), "Plain body").unwrap();

        let posts = ContentLoader::new(dir.path(), "markdown")
            .load_posts(Local::now())
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post.title, "good");
        assert_eq!(posts[0].post.slug, "good");
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(ContentLoader::new(&missing, "markdown")
            .load_posts(Local::now())
            .is_err());
    }
}
