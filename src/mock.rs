//! Recording fake host and sessions for tests

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::host::{
    BufferId, EditorSession, Host, HostWindows, LexerCall, Notification, NotificationKind, View,
    WindowId, SCLEX_NULL,
};

/// Lexer id the fake session reports once the LPeg lexer is active
pub const LPEG_LEXER_ID: i32 = 107;

/// Lexer id the fake session reports for any host-native lexer
pub const NATIVE_LEXER_ID: i32 = 3;

pub const APP_WINDOW: WindowId = WindowId(10);
pub const MAIN_WINDOW: WindowId = WindowId(11);
pub const SECOND_WINDOW: WindowId = WindowId(12);

/// Everything a session was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    SetLexerLanguage(String),
    SetProperty(String, String),
    DirectFunction(isize),
    DocPointer(isize),
    SetLanguage(String),
    Status,
    Language,
    StyleName(i32),
    MarginWidth(usize, i32),
    Colourise(isize, isize),
    LoadLibrary(PathBuf),
    SetText(String),
}

pub struct MockSession {
    pub calls: Vec<SessionCall>,
    /// Whether switching to the LPeg lexer succeeds
    pub library_loads: bool,
    pub lexer_id: i32,
    pub lexer_name: String,
    /// Grammar selected through the lexer
    pub grammar: Option<String>,
    /// Error text reported through the status channel
    pub status: String,
    pub style: i32,
    pub style_name: String,
    pub pos: isize,
    pub text: String,
    /// Runs after every lexer switch, as a host delivering notifications
    /// from inside a session call would
    pub on_set_lexer: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for MockSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSession")
            .field("calls", &self.calls)
            .field("lexer_id", &self.lexer_id)
            .field("lexer_name", &self.lexer_name)
            .field("grammar", &self.grammar)
            .finish_non_exhaustive()
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            library_loads: true,
            lexer_id: SCLEX_NULL,
            lexer_name: "null".to_string(),
            grammar: None,
            status: String::new(),
            style: 0,
            style_name: String::new(),
            pos: 0,
            text: String::new(),
            on_set_lexer: None,
        }
    }
}

impl MockSession {
    pub const DIRECT_FUNCTION: isize = 0x1000;
    pub const DIRECT_POINTER: isize = 0x2000;

    /// Session already using one of the host's own lexers
    pub fn with_native_lexer(name: &str) -> Self {
        Self {
            lexer_id: NATIVE_LEXER_ID,
            lexer_name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn count(&self, pred: impl Fn(&SessionCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Grammars selected, in order
    pub fn bound_languages(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SessionCall::SetLanguage(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }
}

fn write_text(buf: &mut [u8], text: &str) -> isize {
    let len = text.len().min(buf.len().saturating_sub(1));
    buf[..len].copy_from_slice(&text.as_bytes()[..len]);
    if len < buf.len() {
        buf[len] = 0;
    }
    len as isize
}

impl EditorSession for MockSession {
    fn set_lexer_language(&mut self, name: &str) {
        self.calls.push(SessionCall::SetLexerLanguage(name.to_string()));
        if name == "lpeg" {
            if self.library_loads {
                self.lexer_id = LPEG_LEXER_ID;
                self.lexer_name = name.to_string();
            } else {
                self.lexer_id = SCLEX_NULL;
                self.lexer_name = "null".to_string();
            }
        } else {
            self.lexer_id = NATIVE_LEXER_ID;
            self.lexer_name = name.to_string();
        }
        if let Some(hook) = self.on_set_lexer.as_mut() {
            hook();
        }
    }

    fn lexer(&self) -> i32 {
        self.lexer_id
    }

    fn lexer_language(&self) -> String {
        self.lexer_name.clone()
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.calls
            .push(SessionCall::SetProperty(key.to_string(), value.to_string()));
    }

    fn direct_function(&self) -> isize {
        Self::DIRECT_FUNCTION
    }

    fn direct_pointer(&self) -> isize {
        Self::DIRECT_POINTER
    }

    fn private_lexer_call(&mut self, call: LexerCall<'_>) -> isize {
        match call {
            LexerCall::DirectFunction(f) => {
                self.calls.push(SessionCall::DirectFunction(f));
                0
            }
            LexerCall::DocPointer(p) => {
                self.calls.push(SessionCall::DocPointer(p));
                0
            }
            LexerCall::SetLanguage(language) => {
                self.calls.push(SessionCall::SetLanguage(language.to_string()));
                self.grammar = Some(language.to_string());
                0
            }
            LexerCall::Status(buf) => {
                self.calls.push(SessionCall::Status);
                write_text(buf, &self.status)
            }
            LexerCall::Language(buf) => {
                self.calls.push(SessionCall::Language);
                let grammar = self.grammar.clone().unwrap_or_default();
                write_text(buf, &grammar)
            }
            LexerCall::StyleName(style, buf) => {
                self.calls.push(SessionCall::StyleName(style));
                write_text(buf, &self.style_name)
            }
        }
    }

    fn set_margin_width(&mut self, margin: usize, pixels: i32) {
        self.calls.push(SessionCall::MarginWidth(margin, pixels));
    }

    fn colourise(&mut self, start: isize, end: isize) {
        self.calls.push(SessionCall::Colourise(start, end));
    }

    fn load_lexer_library(&mut self, path: &Path) {
        self.calls.push(SessionCall::LoadLibrary(path.to_path_buf()));
    }

    fn current_pos(&self) -> isize {
        self.pos
    }

    fn style_at(&self, _pos: isize) -> i32 {
        self.style
    }

    fn set_text(&mut self, text: &str) {
        self.calls.push(SessionCall::SetText(text.to_string()));
        self.text = text.to_string();
    }
}

#[derive(Debug)]
pub struct MockHost {
    pub view: View,
    pub main: MockSession,
    pub second: MockSession,
    pub current_path: PathBuf,
    pub buffers: HashMap<BufferId, PathBuf>,
    pub config_dir: PathBuf,
    pub status: Option<String>,
    pub errors: Vec<String>,
    pub about: Option<String>,
    pub opened: Vec<PathBuf>,
    pub new_files: usize,
    pub native_language: Option<String>,
    /// Answer given to the language dialog
    pub choice: Option<String>,
    /// Languages the dialog was last shown
    pub offered: Vec<String>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::with_config_dir("/plugins/config")
    }

    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            view: View::Main,
            main: MockSession::default(),
            second: MockSession::default(),
            current_path: PathBuf::from("new 1"),
            buffers: HashMap::new(),
            config_dir: dir.into(),
            status: None,
            errors: Vec::new(),
            about: None,
            opened: Vec::new(),
            new_files: 0,
            native_language: None,
            choice: None,
            offered: Vec::new(),
        }
    }

    /// Make a document active in the current view
    pub fn activate(&mut self, path: impl Into<PathBuf>) {
        self.current_path = path.into();
    }
}

/// Notification helpers
pub fn from_app(kind: NotificationKind) -> Notification {
    Notification::new(APP_WINDOW, kind)
}

impl Host for MockHost {
    type Session = MockSession;

    fn windows(&self) -> HostWindows {
        HostWindows {
            app: APP_WINDOW,
            main: MAIN_WINDOW,
            second: SECOND_WINDOW,
        }
    }

    fn current_view(&self) -> View {
        self.view
    }

    fn session(&mut self, view: View) -> &mut MockSession {
        match view {
            View::Main => &mut self.main,
            View::Second => &mut self.second,
        }
    }

    fn current_path(&self) -> PathBuf {
        self.current_path.clone()
    }

    fn buffer_path(&self, buffer: BufferId) -> PathBuf {
        self.buffers
            .get(&buffer)
            .cloned()
            .unwrap_or_else(|| self.current_path.clone())
    }

    fn plugins_config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    fn set_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn show_about(&mut self, text: &str) {
        self.about = Some(text.to_string());
    }

    fn open_file(&mut self, path: &Path) {
        self.opened.push(path.to_path_buf());
    }

    fn new_file(&mut self) {
        self.new_files += 1;
        self.current_path = PathBuf::from(format!("new {}", self.new_files));
    }

    fn set_native_language(&mut self, language: &str) {
        self.native_language = Some(language.to_string());
    }

    fn choose_language(&mut self, languages: &[&str]) -> Option<String> {
        self.offered = languages.iter().map(|l| l.to_string()).collect();
        self.choice.clone()
    }
}
