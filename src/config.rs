//! Configuration file support
//!
//! Settings live in `lexbind.toml` inside the host's plugin configuration
//! directory. Languages are listed under `[extensions]` in priority order:
//! the first language with a matching pattern wins.
//!
//! Example:
//! ```text
//! # lexbind configuration
//! override = false
//! theme = "light"
//!
//! [extensions]
//! lua = ["*.lua", "*.rockspec"]
//! python = "*.py;*.pyw"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};
use crate::syntax::LanguageTable;

/// Name of the settings file
pub const CONFIG_FILE_NAME: &str = "lexbind.toml";

/// Settings written when the user first opens the settings file
pub const DEFAULT_CONFIG: &str = r#"# lexbind configuration
#
# override    - use the languages below even when the editor already
#               picked a lexer for the file
# theme       - LPeg color theme name
# diagnostics - show the style under the caret in the status bar

override = false
theme = "light"
diagnostics = false

# Language name = file patterns. The first match wins, top to bottom.
[extensions]
lua = ["*.lua", "*.rockspec"]
python = ["*.py", "*.pyw"]
rust = ["*.rs"]
toml = ["*.toml"]
markdown = ["*.md", "*.markdown"]
makefile = ["Makefile", "GNUmakefile", "*.mak"]
"#;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Replace the editor's own lexer choice with ours
    pub override_lexer: bool,
    /// Color theme passed to the LPeg lexer
    pub theme: String,
    /// Show the style under the caret in the status bar
    pub diagnostics: bool,
    /// File patterns per language
    pub languages: LanguageTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            override_lexer: false,
            theme: "light".to_string(),
            diagnostics: false,
            languages: LanguageTable::new(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Table = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(&settings)?;
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, settings: &Table) -> Result<()> {
        for (key, value) in settings {
            match key.as_str() {
                "override" => self.override_lexer = expect_bool(key, value)?,
                "diagnostics" => self.diagnostics = expect_bool(key, value)?,
                "theme" => match value.as_str() {
                    Some(theme) => self.theme = theme.trim().to_string(),
                    None => return Err(invalid(key, "expected a string")),
                },
                "extensions" => {
                    let extensions = value
                        .as_table()
                        .ok_or_else(|| invalid(key, "expected a table"))?;
                    self.languages = parse_extensions(extensions)?;
                }
                _ => warn!(key = key.as_str(), "unknown setting ignored"),
            }
        }
        Ok(())
    }
}

/// Build the language table from the `[extensions]` table
fn parse_extensions(extensions: &Table) -> Result<LanguageTable> {
    let mut languages = LanguageTable::new();

    for (language, patterns) in extensions {
        let key = format!("extensions.{}", language);
        match patterns {
            // "*.py;*.pyw"
            Value::String(list) => languages.insert(language, split_patterns(list)),
            Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(pattern) => list.push(pattern),
                        None => return Err(invalid(&key, "patterns must be strings")),
                    }
                }
                languages.insert(language, list);
            }
            _ => return Err(invalid(&key, "expected a string or an array of strings")),
        }
    }

    Ok(languages)
}

/// Split a `;` or `,` separated pattern list
fn split_patterns(list: &str) -> impl Iterator<Item = &str> {
    list.split([';', ',']).map(str::trim).filter(|p| !p.is_empty())
}

fn expect_bool(key: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| invalid(key, "expected true or false"))
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Location of the settings file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for the settings file inside a plugin configuration directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CONFIG_FILE_NAME))
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load configuration, reporting any problem
    pub fn try_load(&self) -> Result<Config> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        Config::from_toml(&contents)
    }

    /// Load configuration, falling back to defaults
    pub fn load(&self) -> Config {
        match self.try_load() {
            Ok(config) => {
                info!(
                    path = %self.path.display(),
                    languages = config.languages.len(),
                    override_lexer = config.override_lexer,
                    "configuration loaded"
                );
                config
            }
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no configuration file, using defaults");
                Config::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "configuration not loaded, using defaults");
                Config::default()
            }
        }
    }

    /// Write the default settings file if there is none yet
    ///
    /// Returns true if a file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        let io_err = |source: io::Error| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, DEFAULT_CONFIG).map_err(io_err)?;
        info!(path = %self.path.display(), "default configuration written");
        Ok(true)
    }
}
