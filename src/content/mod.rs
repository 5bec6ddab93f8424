//! Content module - posts, categories, blog roll and the render pipeline

mod blogroll;
pub mod excerpt;
mod frontmatter;
pub mod inlines;
pub mod loader;
mod markdown;
pub mod markup;
mod post;
mod render;
pub mod typography;

pub use blogroll::BlogRoll;
pub use frontmatter::FrontMatter;
pub use inlines::{ContentType, InlineExpander, InlineObject, InlineSource, NoInlines};
pub use markdown::MarkdownRenderer;
pub use markup::{Formatter, FormatterRegistry};
pub use post::{Category, Post, PostStatus};
pub use render::{ContentRenderer, RenderError, RenderedContent};
