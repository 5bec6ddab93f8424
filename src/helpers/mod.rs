//! Helper functions shared by rendering and the command-line front end
//!
//! URL generation for permalinks and small HTML utilities (escaping and
//! word-aware truncation).

mod html;
mod url;

pub use html::*;
pub use url::*;
