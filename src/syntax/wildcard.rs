//! Wildcard file name patterns
//!
//! Patterns use `*` for any run of characters and `?` for exactly one
//! character. Matching is case-insensitive and always covers the whole
//! file name, so `*.lua` matches `init.lua` but not `init.lua.bak`.

use regex::{Regex, RegexBuilder};

/// A compiled wildcard pattern
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    /// Pattern text as written in the configuration
    source: String,
    /// Anchored regex equivalent (None if the pattern could not be compiled)
    regex: Option<Regex>,
}

impl WildcardPattern {
    /// Compile a wildcard pattern
    pub fn new(pattern: &str) -> Self {
        let regex = if pattern.is_empty() {
            None
        } else {
            RegexBuilder::new(&to_regex(pattern))
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
                .ok()
        };

        Self {
            source: pattern.to_string(),
            regex,
        }
    }

    /// Get the pattern text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern compiled to something that can match
    pub fn is_valid(&self) -> bool {
        self.source.is_empty() || self.regex.is_some()
    }

    /// Check a file name against this pattern
    pub fn is_match(&self, file_name: &str) -> bool {
        match &self.regex {
            Some(regex) => !file_name.is_empty() && regex.is_match(file_name),
            // Empty pattern only matches an empty name
            None => self.source.is_empty() && file_name.is_empty(),
        }
    }
}

/// Match a file name against a wildcard pattern without keeping the compiled form
pub fn matches(pattern: &str, file_name: &str) -> bool {
    WildcardPattern::new(pattern).is_match(file_name)
}

/// Translate a wildcard pattern into an anchored regex
fn to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut literal = String::new();

    out.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');

    out
}
