//! Per-document language cache
//!
//! Remembers which language each document was given, keyed by its full
//! path. Entries are never evicted; a document that is closed and opened
//! again picks up where it left off.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Host lexer name meaning "no lexer assigned"
pub const NO_LEXER: &str = "null";

/// What is known about a document's language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedLanguage {
    /// A language name, either chosen by the user or reported by the host
    Named(String),
    /// The host reported that the document has no lexer
    NoLanguage,
}

impl CachedLanguage {
    /// Interpret the lexer name the host reports for a session
    pub fn from_host(name: &str) -> Self {
        if name == NO_LEXER {
            CachedLanguage::NoLanguage
        } else {
            CachedLanguage::Named(name.to_string())
        }
    }

    /// Get the language name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            CachedLanguage::Named(name) => Some(name),
            CachedLanguage::NoLanguage => None,
        }
    }
}

/// Document path to language mapping
#[derive(Debug, Default)]
pub struct BufferLanguageCache {
    entries: HashMap<PathBuf, CachedLanguage>,
}

impl BufferLanguageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached language for a document
    pub fn get(&self, path: &Path) -> Option<&CachedLanguage> {
        self.entries.get(path)
    }

    /// Set the language for a document, replacing any previous value
    pub fn set(&mut self, path: impl Into<PathBuf>, language: CachedLanguage) {
        self.entries.insert(path.into(), language);
    }

    /// Move a document's entry to a new path after a rename
    ///
    /// Does nothing if the old path has no entry.
    pub fn rekey(&mut self, old: &Path, new: impl Into<PathBuf>) {
        if let Some(language) = self.entries.remove(old) {
            self.entries.insert(new.into(), language);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
