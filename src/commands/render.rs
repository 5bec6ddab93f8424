//! Re-render the cached HTML of every stored post

use anyhow::Result;

use crate::Blog;

/// Re-render all posts with the current configuration and save the store.
/// Returns the number of posts rendered.
pub fn run(blog: &Blog) -> Result<usize> {
    let mut store = blog.load_store()?;
    let count = store.render_all(&blog.renderer(), &blog.config)?;
    blog.save_store(&store)?;
    tracing::info!("Rendered {} posts", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_picks_up_config_changes() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let mut store = blog.load_store().unwrap();
        let id = blog
            .save_post(&mut store, Post::new("Dash", "Wait -- what"), chrono::Local::now())
            .unwrap();
        blog.save_store(&store).unwrap();

        fs::write(dir.path().join("_config.yml"), "blog_smartypants: true\n").unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(run(&blog).unwrap(), 1);

        let store = blog.load_store().unwrap();
        assert_eq!(
            store.post(id).unwrap().body_rendered.as_deref(),
            Some("<p>Wait &#8212; what</p>\n")
        );
    }
}
