//! Configuration module

mod settings;
mod site;

pub use settings::{BlogSettings, SettingValue};
pub use site::{BlogOverrides, HighlightConfig, SiteConfig};
