//! Named markup formatters
//!
//! Each post picks its formatter by name (`markdown`, `linebreaks`, `none`).
//! The typographic pass is registered as a formatter too so it can be looked
//! up the same way.

use std::collections::BTreeMap;

use super::markdown::MarkdownRenderer;
use super::render::RenderError;
use super::typography;
use crate::config::HighlightConfig;

pub const NONE: &str = "none";
pub const LINEBREAKS: &str = "linebreaks";
pub const MARKDOWN: &str = "markdown";
pub const SMARTYPANTS: &str = "smartypants";

/// A named text-to-HTML transform
pub trait Formatter {
    fn name(&self) -> &str;

    fn format(&self, text: &str) -> Result<String, RenderError>;
}

/// Passes text through unchanged
struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn name(&self) -> &str {
        NONE
    }

    fn format(&self, text: &str) -> Result<String, RenderError> {
        Ok(text.to_string())
    }
}

/// Blank lines separate paragraphs, single newlines become `<br />`
struct LinebreaksFormatter;

impl Formatter for LinebreaksFormatter {
    fn name(&self) -> &str {
        LINEBREAKS
    }

    fn format(&self, text: &str) -> Result<String, RenderError> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        let paragraphs: Vec<String> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!("<p>{}</p>", p.replace('\n', "<br />")))
            .collect();
        Ok(paragraphs.join("\n\n"))
    }
}

struct MarkdownFormatter {
    renderer: MarkdownRenderer,
}

impl Formatter for MarkdownFormatter {
    fn name(&self) -> &str {
        MARKDOWN
    }

    fn format(&self, text: &str) -> Result<String, RenderError> {
        Ok(self.renderer.render(text))
    }
}

struct SmartypantsFormatter;

impl Formatter for SmartypantsFormatter {
    fn name(&self) -> &str {
        SMARTYPANTS
    }

    fn format(&self, text: &str) -> Result<String, RenderError> {
        Ok(typography::smartypants(text))
    }
}

/// Formatters by name
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in formatters
    pub fn with_defaults(highlight: &HighlightConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PlainFormatter));
        registry.register(Box::new(LinebreaksFormatter));
        registry.register(Box::new(MarkdownFormatter {
            renderer: MarkdownRenderer::with_options(highlight),
        }));
        registry.register(Box::new(SmartypantsFormatter));
        registry
    }

    /// Add or replace a formatter
    pub fn register(&mut self, formatter: Box<dyn Formatter>) {
        self.formatters
            .insert(formatter.name().to_string(), formatter);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.formatters.keys().map(String::as_str).collect()
    }

    /// Run the formatter called `name`
    pub fn format(&self, text: &str, name: &str) -> Result<String, RenderError> {
        let formatter = self
            .formatters
            .get(name)
            .ok_or_else(|| RenderError::UnknownFormatter(name.to_string()))?;
        formatter.format(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FormatterRegistry {
        FormatterRegistry::with_defaults(&HighlightConfig::default())
    }

    #[test]
    fn test_default_names() {
        assert_eq!(
            registry().names(),
            vec!["linebreaks", "markdown", "none", "smartypants"]
        );
    }

    #[test]
    fn test_none_passthrough() {
        assert_eq!(registry().format("*raw*", NONE).unwrap(), "*raw*");
    }

    #[test]
    fn test_linebreaks() {
        let html = registry()
            .format("First line\nsecond line\n\nNew paragraph", LINEBREAKS)
            .unwrap();
        assert_eq!(
            html,
            "<p>First line<br />second line</p>\n\n<p>New paragraph</p>"
        );
        assert_eq!(registry().format("  \n ", LINEBREAKS).unwrap(), "");
    }

    #[test]
    fn test_markdown() {
        let html = registry().format("*hi*", MARKDOWN).unwrap();
        assert_eq!(html, "<p><em>hi</em></p>\n");
    }

    #[test]
    fn test_unknown_formatter() {
        let err = registry().format("text", "textile").unwrap_err();
        assert!(matches!(err, RenderError::UnknownFormatter(name) if name == "textile"));
    }

    #[test]
    fn test_register_custom_formatter() {
        struct Shout;
        impl Formatter for Shout {
            fn name(&self) -> &str {
                "shout"
            }
            fn format(&self, text: &str) -> Result<String, RenderError> {
                Ok(text.to_uppercase())
            }
        }

        let mut registry = FormatterRegistry::new();
        registry.register(Box::new(Shout));
        assert!(registry.contains("shout"));
        assert_eq!(registry.format("quiet", "shout").unwrap(), "QUIET");
    }
}
