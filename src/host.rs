//! Host editor interface
//!
//! The plugin never talks to the editor directly. Everything it needs from
//! the host application and its two editing views goes through the traits
//! in this module, which a host adapter implements on top of the editor's
//! message API.

use std::path::{Path, PathBuf};

/// Lexer id a session reports when it has no lexer
pub const SCLEX_NULL: i32 = 1;

/// Opaque window handle identifying where a notification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub usize);

/// Opaque document id carried by save and rename notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// The two editing views the host shows side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    Second,
}

impl View {
    pub const ALL: [View; 2] = [View::Main, View::Second];
}

/// Windows the plugin accepts notifications from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostWindows {
    /// Host application window
    pub app: WindowId,
    /// Main editing view
    pub main: WindowId,
    /// Second editing view
    pub second: WindowId,
}

impl HostWindows {
    /// Whether a window is one of ours
    pub fn contains(&self, window: WindowId) -> bool {
        window == self.app || window == self.main || window == self.second
    }
}

/// Lifecycle notifications delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Host finished starting up
    Ready,
    /// A different document became active
    BufferActivated,
    /// A document is about to be renamed through the host's Rename command
    BeforeRename(BufferId),
    /// A document was renamed through the host's Rename command
    FileRenamed(BufferId),
    /// A document is about to be written
    BeforeSave(BufferId),
    /// A document was written, possibly under a new name
    FileSaved(BufferId),
    /// Caret or selection moved
    SelectionChanged,
}

/// A notification together with the window that sent it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub source: WindowId,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(source: WindowId, kind: NotificationKind) -> Self {
        Self { source, kind }
    }
}

/// Calls forwarded to the external lexer through the session
///
/// Text results are written into the caller's buffer as NUL-terminated
/// UTF-8, truncated to fit.
#[derive(Debug)]
pub enum LexerCall<'a> {
    /// Hand the lexer the session's direct function pointer
    DirectFunction(isize),
    /// Hand the lexer the session's document pointer
    DocPointer(isize),
    /// Select the grammar to lex with
    SetLanguage(&'a str),
    /// Read the last error message (empty when there is none)
    Status(&'a mut [u8]),
    /// Read the name of the active grammar
    Language(&'a mut [u8]),
    /// Read the name of a style number
    StyleName(i32, &'a mut [u8]),
}

/// One editing view of the host
pub trait EditorSession {
    /// Switch the session to a lexer by name
    fn set_lexer_language(&mut self, name: &str);

    /// Id of the current lexer (`SCLEX_NULL` when none)
    fn lexer(&self) -> i32;

    /// Name of the current lexer ("null" when none)
    fn lexer_language(&self) -> String;

    /// Set a lexer property
    fn set_property(&mut self, key: &str, value: &str);

    fn direct_function(&self) -> isize;

    fn direct_pointer(&self) -> isize;

    /// Forward a call to the current external lexer
    fn private_lexer_call(&mut self, call: LexerCall<'_>) -> isize;

    fn set_margin_width(&mut self, margin: usize, pixels: i32);

    /// Restyle a range; an `end` of -1 means the end of the document
    fn colourise(&mut self, start: isize, end: isize);

    /// Register an external lexer library with the session
    fn load_lexer_library(&mut self, path: &Path);

    fn current_pos(&self) -> isize;

    fn style_at(&self, pos: isize) -> i32;

    /// Replace the document text
    fn set_text(&mut self, text: &str);
}

/// The host application
pub trait Host {
    type Session: EditorSession;

    /// Windows notifications may legitimately come from
    fn windows(&self) -> HostWindows;

    /// View holding the active document
    fn current_view(&self) -> View;

    fn session(&mut self, view: View) -> &mut Self::Session;

    /// Full path of the active document
    fn current_path(&self) -> PathBuf;

    /// Full path of a document by id
    fn buffer_path(&self, buffer: BufferId) -> PathBuf;

    /// Directory where plugins keep their configuration
    fn plugins_config_dir(&self) -> PathBuf;

    /// Show text in the document type field of the status bar
    fn set_status(&mut self, text: &str);

    /// Show a blocking error message
    fn show_error(&mut self, message: &str);

    fn show_about(&mut self, text: &str);

    /// Open a file in the editor
    fn open_file(&mut self, path: &Path);

    /// Create a new empty document and make it active
    fn new_file(&mut self);

    /// Set one of the host's built-in languages on the active document
    fn set_native_language(&mut self, language: &str);

    /// Ask the user to pick a language
    fn choose_language(&mut self, languages: &[&str]) -> Option<String>;
}

/// File name part of a path, or the whole path if it has none
///
/// Unsaved documents have bare names such as "new 1".
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
