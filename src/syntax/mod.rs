//! Language selection module
//!
//! This module provides the pieces used to decide which language a
//! document gets:
//! - Wildcard matching of file names
//! - The ordered language table from configuration
//! - The per-document language cache

mod cache;
mod table;
mod wildcard;

pub use cache::{BufferLanguageCache, CachedLanguage, NO_LEXER};
pub use table::{LanguageEntry, LanguageTable};
pub use wildcard::{matches, WildcardPattern};
