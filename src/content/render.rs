//! Save-time rendering of post bodies and teases
//!
//! The pipeline runs in a fixed order on body and tease independently:
//!
//! 1. expand inline shortcuts
//! 2. apply the post's markup formatter
//! 3. apply the typographic pass, when enabled
//!
//! Inlines have to be expanded first: the formatter may rewrite whitespace
//! the shortcut syntax depends on.

use thiserror::Error;

use super::inlines::{InlineError, InlineExpander, InlineSource};
use super::markup::{FormatterRegistry, SMARTYPANTS};
use super::Post;
use crate::config::{BlogSettings, SiteConfig};

/// Errors that abort rendering, and with it the save
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown markup formatter: {0}")]
    UnknownFormatter(String),

    #[error("Inline error: {0}")]
    Inline(#[from] InlineError),
}

/// Output of the pipeline for one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub body: String,
    pub tease: String,
}

/// Renders raw post text into cached HTML
pub struct ContentRenderer {
    formatters: FormatterRegistry,
    inlines: InlineExpander,
    smartypants: bool,
}

impl ContentRenderer {
    /// Build the renderer described by the site configuration
    pub fn new(config: &SiteConfig, settings: &BlogSettings) -> Self {
        Self::with_parts(
            FormatterRegistry::with_defaults(&config.highlight),
            InlineExpander::new(config.debug),
            settings.smartypants,
        )
    }

    pub fn with_parts(
        formatters: FormatterRegistry,
        inlines: InlineExpander,
        smartypants: bool,
    ) -> Self {
        Self {
            formatters,
            inlines,
            smartypants,
        }
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Render a body and tease with the formatter called `markup`
    pub fn render(
        &self,
        body: &str,
        tease: &str,
        markup: &str,
        source: &dyn InlineSource,
    ) -> Result<RenderedContent, RenderError> {
        Ok(RenderedContent {
            body: self.render_fragment(body, markup, source)?,
            tease: self.render_fragment(tease, markup, source)?,
        })
    }

    /// Render the raw fields of a post
    pub fn render_post(
        &self,
        post: &Post,
        source: &dyn InlineSource,
    ) -> Result<RenderedContent, RenderError> {
        let rendered = self.render(&post.body, &post.tease, &post.markup, source)?;
        tracing::debug!(
            "Rendered post '{}' with {} (smartypants={}, strict inlines={})",
            post.slug,
            post.markup,
            self.smartypants,
            self.inlines.is_strict()
        );
        Ok(rendered)
    }

    fn render_fragment(
        &self,
        text: &str,
        markup: &str,
        source: &dyn InlineSource,
    ) -> Result<String, RenderError> {
        let expanded = self.inlines.expand(text, source)?;
        let formatted = self.formatters.format(&expanded, markup)?;
        if self.smartypants {
            self.formatters.format(&formatted, SMARTYPANTS)
        } else {
            Ok(formatted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;
    use crate::content::inlines::{ContentType, InlineObject, NoInlines};

    struct OnePost;

    impl InlineSource for OnePost {
        fn has_content_type(&self, content_type: &ContentType) -> bool {
            content_type.to_string() == "blog.post"
        }

        fn lookup(&self, _content_type: &ContentType, id: u64) -> Option<InlineObject> {
            (id == 7).then(|| InlineObject {
                id,
                title: "Earlier Post".to_string(),
                url: "/2023/12/1/earlier/".to_string(),
                summary: None,
            })
        }
    }

    fn renderer(smartypants: bool, strict: bool) -> ContentRenderer {
        ContentRenderer::with_parts(
            FormatterRegistry::with_defaults(&HighlightConfig::default()),
            InlineExpander::new(strict),
            smartypants,
        )
    }

    #[test]
    fn test_render_body_and_tease() {
        let rendered = renderer(false, true)
            .render("# Title\n\nBody text.", "Short *tease*.", "markdown", &NoInlines)
            .unwrap();
        assert_eq!(rendered.body, "<h1>Title</h1>\n<p>Body text.</p>\n");
        assert_eq!(rendered.tease, "<p>Short <em>tease</em>.</p>\n");
    }

    #[test]
    fn test_empty_tease_renders_empty() {
        let rendered = renderer(true, true)
            .render("Body", "", "markdown", &NoInlines)
            .unwrap();
        assert_eq!(rendered.tease, "");
    }

    #[test]
    fn test_inlines_expand_before_markup() {
        let body = "Read this first:\n\n<inline type=\"blog.post\" id=\"7\" />\n\nAfter.";
        let rendered = renderer(false, true)
            .render(body, "", "markdown", &OnePost)
            .unwrap();

        // The snippet is a block of HTML, not text wrapped in a paragraph
        assert!(rendered.body.contains(
            "<div class=\"inline blog_post\"><h3><a href=\"/2023/12/1/earlier/\">Earlier Post</a></h3></div>"
        ));
        assert!(!rendered.body.contains("<p><div"));
        assert!(!rendered.body.contains("&lt;inline"));
        assert!(rendered.body.contains("<p>After.</p>"));
    }

    #[test]
    fn test_smartypants_runs_last() {
        let rendered = renderer(true, true)
            .render("\"Quoted\" -- text", "", "markdown", &NoInlines)
            .unwrap();
        assert_eq!(
            rendered.body,
            "<p>&#8220;Quoted&#8221; &#8212; text</p>\n"
        );

        let plain = renderer(false, true)
            .render("\"Quoted\" -- text", "", "markdown", &NoInlines)
            .unwrap();
        assert_eq!(plain.body, "<p>\"Quoted\" -- text</p>\n");
    }

    #[test]
    fn test_unknown_formatter_fails() {
        let err = renderer(false, true)
            .render("Body", "", "textile", &NoInlines)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownFormatter(_)));
    }

    #[test]
    fn test_strict_inline_failure_fails() {
        let err = renderer(false, true)
            .render("<inline type=\"blog.post\" id=\"1\" />", "", "none", &OnePost)
            .unwrap_err();
        assert!(matches!(err, RenderError::Inline(InlineError::ObjectNotFound { .. })));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = renderer(true, false);
        let body = "Some 'quoted' *text* with <inline type=\"blog.post\" id=\"7\" />";
        let first = renderer.render(body, "tease", "markdown", &OnePost).unwrap();
        let second = renderer.render(body, "tease", "markdown", &OnePost).unwrap();
        assert_eq!(first, second);
    }
}
