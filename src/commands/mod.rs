//! Command implementations behind the CLI

pub mod blogroll;
pub mod category;
pub mod import;
pub mod init;
pub mod list;
pub mod new;
pub mod render;
pub mod settings;
pub mod show;
