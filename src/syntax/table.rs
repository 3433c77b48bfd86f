//! Ordered language table
//!
//! Maps language names to the wildcard patterns that select them. The order
//! languages and patterns were added in is the match priority: when two
//! languages could claim a file, the one added first wins.

use tracing::warn;

use super::wildcard::WildcardPattern;

/// One language and its patterns
#[derive(Debug, Clone)]
pub struct LanguageEntry {
    /// Language name as passed to the external lexer (e.g., "lua")
    pub name: String,
    /// Patterns in priority order
    pub patterns: Vec<WildcardPattern>,
}

/// Language table loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    entries: Vec<LanguageEntry>,
}

impl LanguageTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add patterns for a language
    ///
    /// A new language goes to the end of the table. Patterns for a language
    /// that is already present are appended to it without moving it.
    pub fn insert<I, S>(&mut self, name: &str, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled: Vec<WildcardPattern> = patterns
            .into_iter()
            .map(|p| WildcardPattern::new(p.as_ref().trim()))
            .filter(|p| !p.as_str().is_empty())
            .collect();

        for pattern in compiled.iter().filter(|p| !p.is_valid()) {
            warn!(language = name, pattern = pattern.as_str(), "unusable file pattern");
        }

        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.patterns.extend(compiled),
            None => self.entries.push(LanguageEntry {
                name: name.to_string(),
                patterns: compiled,
            }),
        }
    }

    /// Find the language for a file name
    pub fn resolve(&self, file_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.patterns.iter().any(|p| p.is_match(file_name)))
            .map(|entry| entry.name.as_str())
    }

    /// Language names in table order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Get the entry for a language
    pub fn get(&self, name: &str) -> Option<&LanguageEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether the table has a language
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
