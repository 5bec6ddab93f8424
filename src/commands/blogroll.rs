//! Add a blog roll entry

use anyhow::Result;

use crate::content::BlogRoll;
use crate::Blog;

/// Add an entry and save the store
pub fn add(blog: &Blog, entry: BlogRoll) -> Result<u64> {
    let mut store = blog.load_store()?;
    let name = entry.name.clone();
    let id = store.add_blogroll(entry)?;
    blog.save_store(&store)?;
    tracing::info!("Added blog roll entry '{}'", name);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_blogroll() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let mut entry = BlogRoll::new("Friend", "https://friend.example/");
        entry.relationship = "friend".to_string();
        assert_eq!(add(&blog, entry).unwrap(), 1);
        assert!(add(&blog, BlogRoll::new("Nowhere", "not a url")).is_err());

        let store = blog.load_store().unwrap();
        let entries = store.blogroll();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relationship, "friend");
    }
}
