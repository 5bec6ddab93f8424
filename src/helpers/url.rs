//! URL helper functions

use chrono::{DateTime, Datelike, TimeZone};

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/2024/01/15/hello/") // -> "/blog/2024/01/15/hello/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Permalink of a post: `<root>/<year>/<month>/<day>/<slug>/`
///
/// The month is zero-padded, the day is not.
pub fn post_url<Tz: TimeZone>(config: &SiteConfig, publish: &DateTime<Tz>, slug: &str) -> String {
    url_for(
        config,
        &format!(
            "{}/{:02}/{}/{}/",
            publish.year(),
            publish.month(),
            publish.day(),
            encode_url(slug)
        ),
    )
}

/// Permalink of a category listing
pub fn category_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("categories/{}/", encode_url(slug)))
}

/// Permalink of a tag listing
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    url_for(config, &format!("tags/{}/", encode_url(tag)))
}

/// Encode a URL path segment
pub fn encode_url(segment: &str) -> String {
    const SEGMENT: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'~');
    percent_encoding::utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/categories/"), "/blog/categories/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/2024/01/5/hello/"),
            "https://example.com/blog/2024/01/5/hello/"
        );
    }

    #[test]
    fn test_post_url_pads_month_not_day() {
        let config = SiteConfig::default();
        let publish = Local.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap();
        assert_eq!(post_url(&config, &publish, "spring"), "/2024/03/7/spring/");
    }

    #[test]
    fn test_tag_url_is_encoded() {
        let config = SiteConfig::default();
        assert_eq!(tag_url(&config, "rust lang"), "/tags/rust%20lang/");
        assert_eq!(category_url(&config, "how-to"), "/categories/how-to/");
    }
}
