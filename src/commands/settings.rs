//! Show resolved blog settings

use anyhow::{anyhow, Result};

use crate::config::BlogSettings;
use crate::Blog;

/// Print one setting, or all of them as `key: value` lines
pub fn run(blog: &Blog, key: Option<&str>) -> Result<()> {
    print!("{}", describe(&blog.settings, key)?);
    Ok(())
}

pub fn describe(settings: &BlogSettings, key: Option<&str>) -> Result<String> {
    match key {
        Some(key) => settings
            .value(key)
            .map(|value| format!("{}\n", value))
            .ok_or_else(|| {
                anyhow!(
                    "Unknown setting: {}. Available: {}",
                    key,
                    BlogSettings::KEYS.join(", ")
                )
            }),
        None => Ok(settings
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{}: {}\n", key, value))
            .collect()),
    }
}
