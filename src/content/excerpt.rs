//! Excerpt selection for listings and feeds

use crate::helpers::{html_escape, truncate_words_html};

/// The "continue reading" paragraph appended to excerpts
pub fn continue_link(url: &str, text: &str) -> String {
    format!(
        r#"<p class="continue"><a href="{}" title="Continue reading this post">{}</a></p>"#,
        html_escape(url),
        html_escape(text)
    )
}

/// Pick the excerpt for a post.
///
/// A tease written by the author always wins. Otherwise, when `auto_words`
/// is non-zero, the rendered body is cut to that many words; a body short
/// enough to survive the cut intact is returned as is, without the link.
/// Returns `None` when the post has no excerpt or the chosen excerpt renders
/// to nothing.
pub fn select(
    tease: &str,
    tease_rendered: &str,
    body_rendered: &str,
    auto_words: usize,
    link: &str,
) -> Option<String> {
    if !tease.trim().is_empty() {
        if tease_rendered.trim().is_empty() {
            return None;
        }
        return Some(format!("{} {}", tease_rendered, link));
    }

    if auto_words == 0 {
        return None;
    }

    let truncated = truncate_words_html(body_rendered, auto_words);
    if truncated.trim().is_empty() {
        None
    } else if truncated == body_rendered {
        Some(truncated)
    } else {
        Some(format!("{} {}", truncated, link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = r#"<p class="continue"><a href="/2024/01/5/hi/" title="Continue reading this post">Continue reading</a></p>"#;

    #[test]
    fn test_continue_link() {
        assert_eq!(continue_link("/2024/01/5/hi/", "Continue reading"), LINK);
        assert!(continue_link("/a/", "More & more").contains(">More &amp; more</a>"));
    }

    #[test]
    fn test_no_tease_and_no_auto_excerpt() {
        assert_eq!(select("", "", "<p>Body</p>", 0, LINK), None);
        assert_eq!(select("   ", "", "<p>Body</p>", 0, LINK), None);
    }

    #[test]
    fn test_tease_wins_over_auto_excerpt() {
        let expected = format!("<p>Tease</p> {}", LINK);
        assert_eq!(select("Tease", "<p>Tease</p>", "<p>Body</p>", 0, LINK), Some(expected.clone()));
        assert_eq!(select("Tease", "<p>Tease</p>", "<p>Body</p>", 3, LINK), Some(expected));
    }

    #[test]
    fn test_tease_rendering_to_nothing_has_no_excerpt() {
        let body = "<p>One two three four five six</p>";
        assert_eq!(select("x", "", body, 0, LINK), None);
        assert_eq!(select("x", "", body, 5, LINK), None);
        assert_eq!(select("x", " \n", body, 5, LINK), None);
    }

    #[test]
    fn test_short_body_is_whole_excerpt() {
        let body = "<p>One two three four five</p>";
        assert_eq!(select("", "", body, 5, LINK), Some(body.to_string()));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "<p>One two <em>three four</em> five six</p>";
        assert_eq!(
            select("", "", body, 3, LINK),
            Some(format!("<p>One two <em>three ...</em></p> {}", LINK))
        );
    }

    #[test]
    fn test_empty_body_has_no_excerpt() {
        assert_eq!(select("", "", "", 5, LINK), None);
    }
}
