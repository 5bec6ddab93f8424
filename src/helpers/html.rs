//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Entities, tags and words, in the order they are tried
    static ref WORD_OR_MARKUP: Regex = Regex::new(r"&#?\w+;|(?s:<.*?>)|(\w[\w-]*)").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)^<(/)?([^ />]+)(?: *(/)|\s.*?)?>").unwrap();
}

/// Elements that never get a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "wbr",
];

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate HTML to `length` words, keeping the markup well formed.
///
/// When anything was cut, ` ...` is appended after the last kept word and every
/// element still open at that point is closed. Input that already fits is
/// returned unchanged, so callers can compare the result with the input to
/// tell whether truncation happened.
pub fn truncate_words_html(html: &str, length: usize) -> String {
    if length == 0 {
        return String::new();
    }

    let mut words = 0;
    let mut cut_at = None;
    let mut open_tags: Vec<String> = Vec::new();

    for caps in WORD_OR_MARKUP.captures_iter(html) {
        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();

        if let Some(word) = caps.get(1) {
            words += 1;
            if words == length {
                cut_at = Some(word.end());
            }
            if words > length {
                break;
            }
            continue;
        }

        // Only markup before the cut matters for closing tags
        if cut_at.is_some() {
            continue;
        }
        let Some(tag) = TAG.captures(whole) else {
            continue;
        };

        let name = tag[2].to_ascii_lowercase();
        let closing = tag.get(1).is_some();
        let self_closing = tag.get(3).is_some();

        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            continue;
        }
        if closing {
            if let Some(pos) = open_tags.iter().rposition(|t| *t == name) {
                open_tags.truncate(pos);
            }
        } else {
            open_tags.push(name);
        }
    }

    let cut_at = match cut_at {
        Some(pos) if words > length => pos,
        _ => return html.to_string(),
    };

    let mut out = String::with_capacity(cut_at + 16);
    out.push_str(&html[..cut_at]);
    out.push_str(" ...");
    for tag in open_tags.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_truncate_words_html_closes_tags() {
        let html = "<p>The quick <strong>brown fox jumps</strong> over the dog</p>";
        assert_eq!(
            truncate_words_html(html, 3),
            "<p>The quick <strong>brown ...</strong></p>"
        );
    }

    #[test]
    fn test_truncate_words_html_short_input_unchanged() {
        let html = "<p>Only five words right here</p>";
        assert_eq!(truncate_words_html(html, 5), html);
        assert_eq!(truncate_words_html(html, 10), html);
    }

    #[test]
    fn test_truncate_words_html_skips_void_elements() {
        let html = "<p>First line<br>second line<img src=\"a.png\" /> and more</p>";
        assert_eq!(
            truncate_words_html(html, 3),
            "<p>First line<br>second ...</p>"
        );
    }

    #[test]
    fn test_truncate_words_html_zero() {
        assert_eq!(truncate_words_html("<p>anything</p>", 0), "");
    }
}
