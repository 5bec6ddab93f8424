//! Show a single post by its permalink

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::Blog;

/// A permalink split into its parts
#[derive(Debug, PartialEq, Eq)]
pub struct PostPath {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

impl PostPath {
    /// Parse `YYYY/MM/DD/slug`, with or without the site root and slashes
    pub fn parse(path: &str, root: &str) -> Result<Self> {
        let trimmed = path.trim().trim_matches('/');
        let root = root.trim_matches('/');
        let trimmed = if root.is_empty() {
            trimmed
        } else {
            trimmed
                .strip_prefix(root)
                .map(|rest| rest.trim_start_matches('/'))
                .unwrap_or(trimmed)
        };

        let parts: Vec<&str> = trimmed.split('/').collect();
        let [year, month, day, slug] = parts.as_slice() else {
            return Err(anyhow!("Expected YYYY/MM/DD/slug, got {:?}", path));
        };

        let invalid = |s: &str| anyhow!("Invalid date component {:?} in {:?}", s, path);
        let number = |s: &str| s.parse::<u32>().map_err(|_| invalid(s));

        Ok(Self {
            year: year.parse::<i32>().map_err(|_| invalid(*year))?,
            month: number(*month)?,
            day: number(*day)?,
            slug: slug.to_string(),
        })
    }
}

/// Print a post and count the visit
pub fn run(blog: &Blog, path: &str) -> Result<()> {
    print!("{}", show(blog, path, Local::now())?);
    Ok(())
}

/// Render the post at `path` as text, counting a visit when it is public
pub fn show(blog: &Blog, path: &str, now: DateTime<Local>) -> Result<String> {
    let target = PostPath::parse(path, &blog.config.root)?;
    let mut store = blog.load_store()?;

    let post = store
        .find_post(target.year, target.month, target.day, &target.slug)
        .ok_or_else(|| anyhow!("No post at {}", path))?
        .clone();

    let mut out = String::new();
    writeln!(out, "{}", post.title)?;
    writeln!(
        out,
        "{}{}",
        blog.config.url.trim_end_matches('/'),
        post.absolute_url(&blog.config)
    )?;
    write!(out, "Published {}", post.publish.format("%Y-%m-%d %H:%M"))?;
    if let Some(author) = &post.author {
        write!(out, " by {}", author)?;
    }
    if !post.is_public(&now) {
        write!(out, " ({})", post.status)?;
    }
    writeln!(out)?;

    let categories: Vec<&str> = post
        .categories
        .iter()
        .filter_map(|id| store.category(*id))
        .map(|c| c.title.as_str())
        .collect();
    if !categories.is_empty() {
        writeln!(out, "Categories: {}", categories.join(", "))?;
    }
    if !post.tags.is_empty() {
        let tags: Vec<&str> = post.tags.iter().map(String::as_str).collect();
        writeln!(out, "Tags: {}", tags.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "{}", post.body_rendered.as_deref().unwrap_or_default().trim_end())?;
    writeln!(out)?;

    if let Some(previous) = store.previous_post(&post) {
        writeln!(
            out,
            "Previous: {} [{}]",
            previous.title,
            previous.absolute_url(&blog.config)
        )?;
    }
    if let Some(next) = store.next_post(&post) {
        writeln!(out, "Next: {} [{}]", next.title, next.absolute_url(&blog.config))?;
    }

    if post.is_public(&now) {
        if let Some(id) = post.id {
            let visits = store.record_visit(id)?;
            writeln!(out, "Visits: {}", visits)?;
            blog.save_store(&store)?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Post, PostStatus};
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_parse_post_path() {
        let expected = PostPath {
            year: 2024,
            month: 1,
            day: 5,
            slug: "hello".to_string(),
        };
        assert_eq!(PostPath::parse("2024/01/5/hello", "/").unwrap(), expected);
        assert_eq!(PostPath::parse("/blog/2024/01/5/hello/", "/blog/").unwrap(), expected);
        assert!(PostPath::parse("2024/01/hello", "/").is_err());
        assert!(PostPath::parse("2024/xx/5/hello", "/").is_err());
        assert!(PostPath::parse("4294967295/01/5/hello", "/").is_err());
    }

    #[test]
    fn test_show_counts_visits() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let at = |day| Local.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();

        let mut store = blog.load_store().unwrap();
        for (day, title) in [(4, "Before"), (5, "Hello"), (6, "After")] {
            let mut post = Post::new(title, format!("{} body", title));
            post.publish = at(day);
            if day == 6 {
                post.status = PostStatus::Draft;
            }
            blog.save_post(&mut store, post, at(day)).unwrap();
        }
        blog.save_store(&store).unwrap();

        let out = show(&blog, "/2024/01/5/hello/", at(20)).unwrap();
        assert!(out.starts_with(
            "Hello\nhttp://example.com/2024/01/5/hello/\nPublished 2024-01-05 09:00\n"
        ));
        assert!(out.contains("<p>Hello body</p>"));
        assert!(out.contains("Previous: Before [/2024/01/4/before/]"));
        assert!(!out.contains("Next:"));
        assert!(out.ends_with("Visits: 1\n"));

        let out = show(&blog, "2024/01/5/hello", at(20)).unwrap();
        assert!(out.ends_with("Visits: 2\n"));

        let draft = show(&blog, "2024/01/6/after", at(20)).unwrap();
        assert!(draft.contains("(draft)"));
        assert!(!draft.contains("Visits"));

        assert!(show(&blog, "2024/01/7/missing", at(20)).is_err());
    }
}
