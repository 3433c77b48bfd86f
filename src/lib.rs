//! lexbind - LPeg lexer selection for editor documents
//!
//! Picks a language for each document from configurable file name
//! patterns and binds the document's editing view to the external LPeg
//! lexer with that grammar. The host editor is reached only through the
//! traits in [`host`].

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod lexer;
pub mod logging;
pub mod plugin;
pub mod syntax;

#[cfg(test)]
mod mock;

pub use config::{Config, ConfigStore};
pub use error::{BindError, ConfigError};
pub use host::{EditorSession, Host, Notification, NotificationKind};
pub use lexer::Binding;
pub use plugin::{Phase, Plugin, PluginCell};
