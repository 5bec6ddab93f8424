//! Add a category

use anyhow::Result;

use crate::content::Category;
use crate::Blog;

/// Add a category and save the store
pub fn add(blog: &Blog, title: &str, slug: Option<&str>) -> Result<Category> {
    let mut store = blog.load_store()?;
    let id = store.add_category(title, slug)?;
    blog.save_store(&store)?;

    let category = store
        .category(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Category {} vanished after insert", id))?;
    tracing::info!("Added category '{}' ({})", category.title, category.slug);
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_category() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let category = add(&blog, "Release Notes", None).unwrap();
        assert_eq!(category.slug, "release-notes");
        assert_eq!(
            category.absolute_url(&blog.config),
            "/categories/release-notes/"
        );
        assert!(add(&blog, "Other", Some("release-notes")).is_err());
        assert_eq!(blog.load_store().unwrap().categories().len(), 1);
    }
}
