//! Read-only queries over the store

use chrono::{DateTime, Local, NaiveDate};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::{Store, StoreError};
use crate::content::{BlogRoll, Category, Post, PostStatus};

/// One page of public posts
#[derive(Debug)]
pub struct PostPage<'a> {
    /// 1-based page number
    pub number: usize,
    pub pages: usize,
    pub posts: Vec<&'a Post>,
}

impl PostPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.pages
    }
}

/// Newest first; posts published at the same instant by id
fn newest_first(a: &&Post, b: &&Post) -> Ordering {
    b.publish.cmp(&a.publish).then(b.id.cmp(&a.id))
}

impl Store {
    pub fn post(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == Some(id))
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn blogroll_entry(&self, id: u64) -> Option<&BlogRoll> {
        self.blogroll.iter().find(|b| b.id == id)
    }

    /// Every post regardless of status, newest first
    pub fn all_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(newest_first);
        posts
    }

    /// Posts readers can see at `now`, newest first
    pub fn public_posts(&self, now: DateTime<Local>) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().filter(|p| p.is_public(&now)).collect();
        posts.sort_by(newest_first);
        posts
    }

    /// Page `number` (1-based) of the public posts.
    ///
    /// There is always at least one page, possibly empty. A page size of
    /// zero puts everything on that page.
    pub fn page(
        &self,
        number: usize,
        page_size: usize,
        now: DateTime<Local>,
    ) -> Result<PostPage<'_>, StoreError> {
        let posts = self.public_posts(now);
        let pages = if page_size == 0 {
            1
        } else {
            posts.len().div_ceil(page_size).max(1)
        };

        if number == 0 || number > pages {
            return Err(StoreError::PageOutOfRange {
                page: number,
                pages,
            });
        }

        let posts = if page_size == 0 {
            posts
        } else {
            posts
                .into_iter()
                .skip((number - 1) * page_size)
                .take(page_size)
                .collect()
        };

        Ok(PostPage {
            number,
            pages,
            posts,
        })
    }

    /// The newest `feed_size` public posts
    pub fn feed_posts(&self, feed_size: usize, now: DateTime<Local>) -> Vec<&Post> {
        let mut posts = self.public_posts(now);
        posts.truncate(feed_size);
        posts
    }

    /// Public posts filed under the category with `slug`
    pub fn posts_in_category(
        &self,
        slug: &str,
        now: DateTime<Local>,
    ) -> Result<Vec<&Post>, StoreError> {
        let category = self
            .category_by_slug(slug)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Category",
                key: slug.to_string(),
            })?;
        Ok(self
            .public_posts(now)
            .into_iter()
            .filter(|p| p.categories.contains(&category.id))
            .collect())
    }

    /// Public posts carrying `tag`
    pub fn posts_tagged(&self, tag: &str, now: DateTime<Local>) -> Vec<&Post> {
        self.public_posts(now)
            .into_iter()
            .filter(|p| p.tags.contains(tag))
            .collect()
    }

    /// The post at a permalink's date and slug, whatever its status
    pub fn find_post(&self, year: i32, month: u32, day: u32, slug: &str) -> Option<&Post> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        self.posts
            .iter()
            .find(|p| p.slug == slug && p.publish_date() == date)
    }

    /// The public post published just before `post`
    pub fn previous_post(&self, post: &Post) -> Option<&Post> {
        let key = (post.publish, post.id);
        self.published()
            .filter(|p| (p.publish, p.id) < key)
            .max_by(|a, b| (a.publish, a.id).cmp(&(b.publish, b.id)))
    }

    /// The public post published just after `post`
    pub fn next_post(&self, post: &Post) -> Option<&Post> {
        let key = (post.publish, post.id);
        self.published()
            .filter(|p| (p.publish, p.id) > key)
            .min_by(|a, b| (a.publish, a.id).cmp(&(b.publish, b.id)))
    }

    /// Posts with public status, scheduled ones included
    fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.status == PostStatus::Public)
    }

    /// Categories ordered by title
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        categories
    }

    /// Blog roll ordered by sort order, then name
    pub fn blogroll(&self) -> Vec<&BlogRoll> {
        let mut entries: Vec<&BlogRoll> = self.blogroll.iter().collect();
        entries.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }

    /// Tags of the public posts with the number of posts using each, by name
    pub fn tags(&self, now: DateTime<Local>) -> Vec<(&str, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for post in self.public_posts(now) {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
        counts.into_iter().collect()
    }
}
