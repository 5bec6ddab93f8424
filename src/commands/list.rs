//! List blog content

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::content::{Post, PostStatus};
use crate::helpers;
use crate::Blog;

/// What to list
#[derive(Debug, Default)]
pub struct ListOptions<'a> {
    /// Category slug or tag name, for `category` and `tag`
    pub name: Option<&'a str>,
    /// 1-based page for `post`
    pub page: Option<usize>,
    /// Include drafts and scheduled posts
    pub all: bool,
}

/// Print a listing of `content_type`
pub fn run(blog: &Blog, content_type: &str, options: &ListOptions<'_>) -> Result<()> {
    print!("{}", listing(blog, content_type, options, Local::now())?);
    Ok(())
}

/// Build a listing of `content_type` as text
pub fn listing(
    blog: &Blog,
    content_type: &str,
    options: &ListOptions<'_>,
    now: DateTime<Local>,
) -> Result<String> {
    let store = blog.load_store()?;
    let mut out = String::new();

    match content_type {
        "post" | "posts" if options.all => {
            let posts = store.all_posts();
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                write_post(&mut out, blog, post, false)?;
            }
        }
        "post" | "posts" => {
            let page = store.page(options.page.unwrap_or(1), blog.settings.page_size, now)?;
            writeln!(out, "Posts, page {} of {}:", page.number, page.pages)?;
            for post in &page.posts {
                write_post(&mut out, blog, post, blog.settings.excerpts)?;
            }
        }
        "feed" => {
            let posts = store.feed_posts(blog.settings.feed_size, now);
            writeln!(
                out,
                "{} - {} ({})",
                blog.settings.name,
                blog.settings.description,
                helpers::full_url_for(&blog.config, "/")
            )?;
            for post in posts {
                write_post(&mut out, blog, post, blog.settings.feed_excerpts)?;
            }
        }
        "category" | "categories" => match options.name {
            Some(slug) => {
                let posts = store.posts_in_category(slug, now)?;
                writeln!(out, "Posts in {} ({}):", slug, posts.len())?;
                for post in posts {
                    write_post(&mut out, blog, post, blog.settings.excerpts)?;
                }
            }
            None => {
                let categories = store.categories();
                writeln!(out, "Categories ({}):", categories.len())?;
                for category in categories {
                    writeln!(
                        out,
                        "  {} [{}]",
                        category.title,
                        category.absolute_url(&blog.config)
                    )?;
                }
            }
        },
        "tag" | "tags" => match options.name {
            Some(tag) => {
                let posts = store.posts_tagged(tag, now);
                writeln!(out, "Posts tagged {} ({}):", tag, posts.len())?;
                for post in posts {
                    write_post(&mut out, blog, post, blog.settings.excerpts)?;
                }
            }
            None => {
                let tags = store.tags(now);
                writeln!(out, "Tags ({}):", tags.len())?;
                for (tag, count) in tags {
                    writeln!(
                        out,
                        "  {} ({}) [{}]",
                        tag,
                        count,
                        helpers::tag_url(&blog.config, tag)
                    )?;
                }
            }
        },
        "blogroll" => {
            let entries = store.blogroll();
            writeln!(out, "Blog roll ({}):", entries.len())?;
            for entry in entries {
                write!(out, "  {} <{}>", entry.name, entry.absolute_url())?;
                if !entry.relationship.is_empty() {
                    write!(out, " ({})", entry.relationship)?;
                }
                writeln!(out)?;
                if !entry.description.is_empty() {
                    writeln!(out, "    {}", entry.description)?;
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, feed, category, tag, blogroll",
                content_type
            );
        }
    }

    Ok(out)
}

fn write_post(out: &mut String, blog: &Blog, post: &Post, with_excerpt: bool) -> Result<()> {
    write!(
        out,
        "  {} - {} [{}]",
        post.publish.format("%Y-%m-%d"),
        post.title,
        post.absolute_url(&blog.config)
    )?;
    if post.status != PostStatus::Public {
        write!(out, " ({})", post.status)?;
    }
    writeln!(out)?;

    if with_excerpt {
        if let Some(excerpt) = blog.excerpt(post) {
            writeln!(out, "    {}", excerpt)?;
        }
    }
    Ok(())
}
