//! Plugin state and notification handling
//!
//! `Plugin` owns everything that lives as long as the plugin is loaded:
//! the configuration, the per-document language cache, whether the host
//! has finished starting, and the paths captured at the start of a save or
//! rename. The host adapter forwards every notification to
//! [`Plugin::notify`] (or through [`PluginCell`] when notifications can
//! arrive while one is still being handled).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::config::{Config, ConfigStore};
use crate::error::BindError;
use crate::host::{
    self, BufferId, EditorSession, Host, Notification, NotificationKind, View, SCLEX_NULL,
};
use crate::lexer::{self, Binding, LexerSettings, LEXER_NAME};
use crate::syntax::{BufferLanguageCache, CachedLanguage};

/// Startup state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Host still starting; the lexer library is not registered yet
    NotReady,
    /// Lexer library registered, documents are resolved as they activate
    Ready,
}

/// Path captured at the start of a save or rename
#[derive(Debug, Default)]
struct PathMarker(Option<PathBuf>);

impl PathMarker {
    fn set(&mut self, path: PathBuf) {
        self.0 = Some(path);
    }

    fn take(&mut self) -> Option<PathBuf> {
        self.0.take()
    }

    #[cfg(test)]
    fn get(&self) -> Option<&Path> {
        self.0.as_deref()
    }
}

/// Plugin context
pub struct Plugin {
    plugins_dir: PathBuf,
    store: ConfigStore,
    config: Config,
    cache: BufferLanguageCache,
    phase: Phase,
    pending_save: PathMarker,
    pending_rename: PathMarker,
}

impl Plugin {
    /// Create the plugin for a host plugin configuration directory
    pub fn new(plugins_config_dir: &Path) -> Self {
        let store = ConfigStore::in_dir(plugins_config_dir);
        let config = store.load();
        Self {
            plugins_dir: plugins_config_dir.to_path_buf(),
            store,
            config,
            cache: BufferLanguageCache::new(),
            phase: Phase::NotReady,
            pending_save: PathMarker::default(),
            pending_rename: PathMarker::default(),
        }
    }

    /// Create the plugin for the host's plugin configuration directory
    pub fn from_host<H: Host>(host: &H) -> Self {
        Self::new(&host.plugins_config_dir())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn cache(&self) -> &BufferLanguageCache {
        &self.cache
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Directory holding the lexer library, grammars and the template
    pub fn module_dir(&self) -> PathBuf {
        lexer::module_dir(&self.plugins_dir)
    }

    pub fn lexer_settings(&self) -> LexerSettings {
        LexerSettings {
            home: self.module_dir(),
            theme: self.config.theme.clone(),
        }
    }

    /// Re-read the configuration file, replacing the whole configuration
    pub fn reload_config(&mut self) {
        self.config = self.store.load();
    }

    /// Handle a host notification
    pub fn notify<H: Host>(&mut self, host: &mut H, notification: Notification) {
        if !host.windows().contains(notification.source) {
            trace!(source = ?notification.source, "notification from unknown window ignored");
            return;
        }

        debug!(kind = ?notification.kind, phase = ?self.phase, "notification");
        match notification.kind {
            NotificationKind::Ready => self.on_ready(host),
            NotificationKind::BufferActivated => {
                if self.is_ready() {
                    self.resolve_current(host);
                }
            }
            NotificationKind::BeforeRename(buffer) => {
                self.pending_rename.set(host.buffer_path(buffer));
            }
            NotificationKind::FileRenamed(buffer) => self.on_renamed(host, buffer),
            NotificationKind::BeforeSave(buffer) => {
                self.pending_save.set(host.buffer_path(buffer));
            }
            NotificationKind::FileSaved(buffer) => self.on_saved(host, buffer),
            NotificationKind::SelectionChanged => self.show_caret_style(host),
        }
    }

    fn on_ready<H: Host>(&mut self, host: &mut H) {
        self.reload_config();

        let library = lexer::library_path(&self.plugins_dir);
        for view in View::ALL {
            host.session(view).load_lexer_library(&library);
        }
        info!(library = %library.display(), "lexer library registered");

        self.phase = Phase::Ready;

        // The active document may have been announced before we were ready
        self.resolve_current(host);
    }

    fn on_renamed<H: Host>(&mut self, host: &mut H, buffer: BufferId) {
        let old = self.pending_rename.take();
        if !self.is_ready() {
            return;
        }

        let new = host.buffer_path(buffer);
        if let Some(old) = old.filter(|old| *old != new) {
            debug!(old = %old.display(), new = %new.display(), "document renamed");
            self.cache.rekey(&old, new);
        }
        self.resolve_current(host);
    }

    fn on_saved<H: Host>(&mut self, host: &mut H, buffer: BufferId) {
        let saved = host.buffer_path(buffer);
        let before = self.pending_save.take();

        if before.as_deref() != Some(saved.as_path()) {
            // Saved under a different name
            if let Some(old) = before {
                debug!(old = %old.display(), new = %saved.display(), "document saved as");
                self.cache.rekey(&old, saved);
            }
            if self.is_ready() {
                self.resolve_current(host);
            }
        } else if saved == self.store.path() {
            info!("configuration file saved, reloading");
            self.reload_config();
        }
    }

    /// Decide the language for the active document and bind it
    ///
    /// Returns None when the host's own lexer is kept.
    pub fn resolve_current<H: Host>(&mut self, host: &mut H) -> Option<Result<Binding, BindError>> {
        let view = host.current_view();
        let path = host.current_path();

        let cached = match self.cache.get(&path) {
            Some(cached) => cached.clone(),
            None => {
                let seeded = CachedLanguage::from_host(&host.session(view).lexer_language());
                self.cache.set(path.clone(), seeded.clone());
                seeded
            }
        };

        let has_lexer = host.session(view).lexer() != SCLEX_NULL;
        if has_lexer && !self.config.override_lexer {
            debug!(path = %path.display(), "keeping the editor's lexer");
            return None;
        }

        let file_name = host::file_name(&path);
        let language = self
            .config
            .languages
            .resolve(&file_name)
            .or_else(|| cached.name());
        debug!(file = file_name.as_str(), ?language, "resolved");

        let settings = self.lexer_settings();
        Some(lexer::apply(host, view, &settings, language))
    }

    /// Give the active document an explicit language and bind it
    pub fn assign_language<H: Host>(&mut self, host: &mut H, language: &str) -> Result<Binding, BindError> {
        let view = host.current_view();
        self.cache
            .set(host.current_path(), CachedLanguage::Named(language.to_string()));
        let settings = self.lexer_settings();
        lexer::apply(host, view, &settings, Some(language))
    }

    /// Show the style under the caret in the status bar
    fn show_caret_style<H: Host>(&mut self, host: &mut H) {
        if !self.is_ready() || !self.config.diagnostics {
            return;
        }

        let view = host.current_view();
        let session = host.session(view);
        if session.lexer_language() != LEXER_NAME || !lexer::lexer_status(session).is_empty() {
            return;
        }

        let grammar = lexer::lexer_grammar(session);
        let style = session.style_at(session.current_pos());
        let name = lexer::style_name(session, style);
        host.set_status(&format!("{} ({}): {} {}", grammar, LEXER_NAME, name, style));
    }
}

/// Plugin wrapper for hosts that can deliver notifications re-entrantly
///
/// A notification that arrives while another is being handled is queued
/// and handled, in arrival order, as soon as the running one finishes.
pub struct PluginCell {
    plugin: RefCell<Plugin>,
    queued: RefCell<VecDeque<Notification>>,
}

impl PluginCell {
    pub fn new(plugin: Plugin) -> Self {
        Self {
            plugin: RefCell::new(plugin),
            queued: RefCell::new(VecDeque::new()),
        }
    }

    /// Handle a notification now, or queue it if the plugin is busy
    pub fn notify<H: Host>(&self, host: &mut H, notification: Notification) {
        let mut plugin = match self.plugin.try_borrow_mut() {
            Ok(plugin) => plugin,
            Err(_) => {
                debug!(kind = ?notification.kind, "plugin busy, notification queued");
                self.queued.borrow_mut().push_back(notification);
                return;
            }
        };

        plugin.notify(host, notification);
        loop {
            let next = self.queued.borrow_mut().pop_front();
            match next {
                Some(notification) => plugin.notify(host, notification),
                None => break,
            }
        }
    }

    /// Run something against the plugin; None if it is busy
    pub fn with<R>(&self, f: impl FnOnce(&mut Plugin) -> R) -> Option<R> {
        self.plugin.try_borrow_mut().ok().map(|mut plugin| f(&mut plugin))
    }

    /// Number of notifications waiting
    pub fn queued(&self) -> usize {
        self.queued.borrow().len()
    }
}
