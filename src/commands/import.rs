//! Import post source files into the store

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::Path;

use crate::content::loader::{ContentLoader, SourcePost};
use crate::store::Store;
use crate::Blog;

/// What an import did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// Import every post under `dir` (the blog's source directory by default)
/// and save the store
pub fn run(blog: &Blog, dir: Option<&Path>) -> Result<ImportSummary> {
    let dir = dir.unwrap_or(blog.source_dir.as_path());
    let now = Local::now();

    let sources = ContentLoader::new(dir, &blog.config.default_markup).load_posts(now)?;
    let mut store = blog.load_store()?;

    let mut summary = ImportSummary::default();
    for source in sources {
        let path = source.path.clone();
        let updated = import_post(blog, &mut store, source, now)
            .with_context(|| format!("Failed to import {:?}", path))?;
        if updated {
            summary.updated += 1;
        } else {
            summary.inserted += 1;
        }
    }

    blog.save_store(&store)?;
    tracing::info!(
        "Imported {} new and {} updated posts from {:?}",
        summary.inserted,
        summary.updated,
        dir
    );
    Ok(summary)
}

/// Save one source post, updating the stored post with the same slug and
/// publish date. Returns whether it was an update.
fn import_post(
    blog: &Blog,
    store: &mut Store,
    source: SourcePost,
    now: DateTime<Local>,
) -> Result<bool> {
    let SourcePost {
        mut post,
        categories,
        ..
    } = source;

    post.categories = categories
        .iter()
        .map(|name| store.ensure_category(name))
        .collect::<Result<Vec<_>, _>>()?;

    let existing = store
        .all_posts()
        .into_iter()
        .find(|p| p.slug == post.slug && p.publish_date() == post.publish_date())
        .map(|p| (p.id, p.visits));

    let updated = existing.is_some();
    if let Some((id, visits)) = existing {
        post.id = id;
        post.visits = visits;
    }

    blog.save_post(store, post, now)?;
    Ok(updated)
}
