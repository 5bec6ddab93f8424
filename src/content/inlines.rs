//! Inline shortcut expansion
//!
//! Raw post text may embed references to other objects:
//!
//! ```text
//! <inline type="blog.post" id="3" />
//! <inline type="blog.blogroll" ids="1,4,2" class="sidebar" />
//! ```
//!
//! Each shortcut is replaced by an HTML snippet for the referenced object(s).
//! Expansion runs before the markup formatter so the formatter sees the final
//! whitespace of the document.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use thiserror::Error;

use crate::helpers::html_escape;

lazy_static! {
    static ref INLINE_TAG: Regex =
        Regex::new(r"(?is)<inline\b([^>]*?)/?>(?:\s*</inline>)?").unwrap();
    static ref ATTRIBUTE: Regex =
        Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#).unwrap();
}

/// Errors raised by a broken shortcut in strict mode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InlineError {
    #[error("Couldn't find the attribute 'type' in the <inline> tag")]
    MissingType,

    #[error("Inline content type not found: {0}")]
    UnknownContentType(String),

    #[error("The <inline> ids attribute is missing or invalid: {0}")]
    InvalidIds(String),

    #[error("The <inline> id attribute is missing or invalid")]
    InvalidId,

    #[error("{model} with id '{id}' does not exist")]
    ObjectNotFound { model: String, id: u64 },
}

/// An `app.model` pair naming the kind of object a shortcut refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType {
    pub app: String,
    pub model: String,
}

impl ContentType {
    pub fn new(app: &str, model: &str) -> Self {
        Self {
            app: app.to_ascii_lowercase(),
            model: model.to_ascii_lowercase(),
        }
    }

    /// Parse `app.model`
    pub fn parse(s: &str) -> Option<Self> {
        let (app, model) = s.trim().split_once('.')?;
        if app.is_empty() || model.is_empty() || model.contains('.') {
            return None;
        }
        Some(Self::new(app, model))
    }

    /// CSS class used for snippets of this type, e.g. `blog_post`
    pub fn css_class(&self) -> String {
        format!("{}_{}", self.app, self.model)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app, self.model)
    }
}

/// What a snippet needs to know about a referenced object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineObject {
    pub id: u64,
    pub title: String,
    pub url: String,
    /// Short HTML summary, e.g. a post's rendered tease
    pub summary: Option<String>,
}

/// Lookup of objects referenced by shortcuts
pub trait InlineSource {
    /// Whether objects of this type can be referenced at all
    fn has_content_type(&self, content_type: &ContentType) -> bool;

    /// Fetch one object by id
    fn lookup(&self, content_type: &ContentType, id: u64) -> Option<InlineObject>;
}

/// A source that knows no content types; every shortcut is broken
pub struct NoInlines;

impl InlineSource for NoInlines {
    fn has_content_type(&self, _content_type: &ContentType) -> bool {
        false
    }

    fn lookup(&self, _content_type: &ContentType, _id: u64) -> Option<InlineObject> {
        None
    }
}

/// Replaces `<inline>` shortcuts with HTML snippets
#[derive(Debug, Clone, Default)]
pub struct InlineExpander {
    strict: bool,
}

impl InlineExpander {
    /// In strict mode a broken shortcut is an error; otherwise it is dropped
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Expand every shortcut in `text`
    pub fn expand(&self, text: &str, source: &dyn InlineSource) -> Result<String, InlineError> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for caps in INLINE_TAG.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            output.push_str(&text[last..whole.start()]);
            last = whole.end();

            match render_inline(&caps, source) {
                Ok(html) => output.push_str(&html),
                Err(e) if self.strict => return Err(e),
                Err(e) => {
                    tracing::warn!("Dropping inline {:?}: {}", whole.as_str(), e);
                }
            }
        }

        output.push_str(&text[last..]);
        Ok(output)
    }
}

/// Render one shortcut to its snippet
fn render_inline(caps: &Captures<'_>, source: &dyn InlineSource) -> Result<String, InlineError> {
    let attrs = parse_attributes(caps.get(1).map(|m| m.as_str()).unwrap_or_default());

    let type_attr = attrs.get("type").ok_or(InlineError::MissingType)?;
    let content_type = ContentType::parse(type_attr).ok_or(InlineError::MissingType)?;

    if !source.has_content_type(&content_type) {
        return Err(InlineError::UnknownContentType(content_type.to_string()));
    }

    let class = attrs.get("class").map(|c| c.trim()).unwrap_or_default();

    if let Some(ids) = attrs.get("ids") {
        let ids = parse_ids(ids)?;
        let objects = ids
            .into_iter()
            .map(|id| fetch(source, &content_type, id))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(render_list(&content_type, &objects, class));
    }

    let id = attrs
        .get("id")
        .and_then(|id| id.trim().parse::<u64>().ok())
        .ok_or(InlineError::InvalidId)?;
    let object = fetch(source, &content_type, id)?;

    Ok(render_object(&content_type, &object, class))
}

fn fetch(
    source: &dyn InlineSource,
    content_type: &ContentType,
    id: u64,
) -> Result<InlineObject, InlineError> {
    source
        .lookup(content_type, id)
        .ok_or_else(|| InlineError::ObjectNotFound {
            model: content_type.model.clone(),
            id,
        })
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn parse_ids(raw: &str) -> Result<Vec<u64>, InlineError> {
    let ids = raw
        .split(',')
        .map(|id| id.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InlineError::InvalidIds(raw.to_string()))?;
    if ids.is_empty() {
        return Err(InlineError::InvalidIds(raw.to_string()));
    }
    Ok(ids)
}

fn class_list(content_type: &ContentType, suffix: &str, extra: &str) -> String {
    let mut classes = format!("inline {}{}", content_type.css_class(), suffix);
    if !extra.is_empty() {
        classes.push(' ');
        classes.push_str(&html_escape(extra));
    }
    classes
}

fn link(object: &InlineObject) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        html_escape(&object.url),
        html_escape(&object.title)
    )
}

/// Snippet for a single object, chosen by content type
fn render_object(content_type: &ContentType, object: &InlineObject, class: &str) -> String {
    let classes = class_list(content_type, "", class);

    match (content_type.app.as_str(), content_type.model.as_str()) {
        ("blog", "post") => match object.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(summary) => format!(
                r#"<div class="{}"><h3>{}</h3>{}</div>"#,
                classes,
                link(object),
                summary.trim()
            ),
            None => format!(r#"<div class="{}"><h3>{}</h3></div>"#, classes, link(object)),
        },
        ("blog", "blogroll") => {
            let title = object
                .summary
                .as_deref()
                .map(|s| format!(r#" title="{}""#, html_escape(s)))
                .unwrap_or_default();
            format!(
                r#"<div class="{}"><a href="{}" rel="external"{}>{}</a></div>"#,
                classes,
                html_escape(&object.url),
                title,
                html_escape(&object.title)
            )
        }
        _ => format!(r#"<div class="{}">{}</div>"#, classes, link(object)),
    }
}

/// Snippet for an `ids` list, in the order the ids were given
fn render_list(content_type: &ContentType, objects: &[InlineObject], class: &str) -> String {
    let items: String = objects
        .iter()
        .map(|object| format!("<li>{}</li>", link(object)))
        .collect();
    format!(
        r#"<ul class="{}">{}</ul>"#,
        class_list(content_type, "_list", class),
        items
    )
}
