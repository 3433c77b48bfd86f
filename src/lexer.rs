//! Binding documents to the external LPeg lexer
//!
//! Binding runs as a fixed sequence on an editing session: switch the
//! session to the external lexer, configure it, hand it the session
//! context, select the grammar, restyle the document and finally read the
//! lexer's status channel for errors. Every step depends on the one before.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::BindError;
use crate::host::{EditorSession, Host, LexerCall, View, SCLEX_NULL};

/// Name the external lexer registers under
pub const LEXER_NAME: &str = "lpeg";

/// Directory (under the plugin configuration directory) holding the lexer
/// library, grammars and themes
pub const MODULE_DIR_NAME: &str = "lexbind";

pub const PROP_HOME: &str = "lexer.lpeg.home";
pub const PROP_THEME: &str = "lexer.lpeg.color.theme";
pub const PROP_FOLD: &str = "fold";

/// Fold margin index and the width it is forced to
pub const FOLD_MARGIN: usize = 2;
pub const FOLD_MARGIN_WIDTH: i32 = 14;

/// Size of buffers passed to the lexer for text results
pub const TEXT_BUFFER_LEN: usize = 512;

/// Lexer library file name for this build's pointer width
pub fn library_file_name() -> &'static str {
    if cfg!(target_pointer_width = "64") {
        "LexLPeg_64.dll"
    } else {
        "LexLPeg.dll"
    }
}

/// Directory holding the lexer module
pub fn module_dir(plugins_config_dir: &Path) -> PathBuf {
    plugins_config_dir.join(MODULE_DIR_NAME)
}

/// Full path of the lexer library
pub fn library_path(plugins_config_dir: &Path) -> PathBuf {
    module_dir(plugins_config_dir).join(library_file_name())
}

/// Settings pushed into the lexer on every bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerSettings {
    /// Lexer module directory
    pub home: PathBuf,
    /// Color theme name
    pub theme: String,
}

/// Successful outcome of a bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The grammar was selected and the document restyled
    Applied { language: String },
    /// No language was given, nothing was done
    Skipped,
}

/// Bind a session to the external lexer with the given grammar
///
/// Always runs the whole sequence, even if the session already uses the
/// same grammar, so that property changes and reloaded grammars take
/// effect.
pub fn bind<S>(session: &mut S, settings: &LexerSettings, language: &str) -> Result<Binding, BindError>
where
    S: EditorSession + ?Sized,
{
    if language.is_empty() {
        return Ok(Binding::Skipped);
    }

    session.set_lexer_language(LEXER_NAME);
    if session.lexer() == SCLEX_NULL {
        return Err(BindError::BackendUnavailable);
    }

    session.set_property(PROP_HOME, &settings.home.to_string_lossy());
    session.set_property(PROP_THEME, &settings.theme);
    session.set_property(PROP_FOLD, "1");

    // Context first: selecting a grammar can call back into the session
    let direct_function = session.direct_function();
    session.private_lexer_call(LexerCall::DirectFunction(direct_function));
    let doc_pointer = session.direct_pointer();
    session.private_lexer_call(LexerCall::DocPointer(doc_pointer));
    session.private_lexer_call(LexerCall::SetLanguage(language));

    // The host only shows the fold margin for lexers it knows about
    session.set_margin_width(FOLD_MARGIN, FOLD_MARGIN_WIDTH);

    session.colourise(0, -1);

    let status = lexer_status(session);
    if !status.is_empty() {
        return Err(BindError::Lexer(status));
    }

    Ok(Binding::Applied {
        language: language.to_string(),
    })
}

/// Bind a view and report the outcome to the user
///
/// Errors are shown in a message box; success is shown in the status bar.
pub fn apply<H: Host>(
    host: &mut H,
    view: View,
    settings: &LexerSettings,
    language: Option<&str>,
) -> Result<Binding, BindError> {
    let language = language.unwrap_or_default();
    let result = bind(host.session(view), settings, language);

    match &result {
        Ok(Binding::Applied { language }) => {
            info!(language = language.as_str(), ?view, "lexer bound");
            host.set_status(&status_text(language));
        }
        Ok(Binding::Skipped) => debug!(?view, "no language to bind"),
        Err(e) => {
            warn!(language, ?view, error = %e, "lexer bind failed");
            host.show_error(&e.to_string());
        }
    }

    result
}

/// Status bar text for a bound language
pub fn status_text(language: &str) -> String {
    format!("{} ({})", language, LEXER_NAME)
}

/// Read the lexer's last error message
pub fn lexer_status<S: EditorSession + ?Sized>(session: &mut S) -> String {
    let mut buf = [0u8; TEXT_BUFFER_LEN];
    session.private_lexer_call(LexerCall::Status(&mut buf[..]));
    text_from_buffer(&buf)
}

/// Read the name of the grammar the lexer is using
pub fn lexer_grammar<S: EditorSession + ?Sized>(session: &mut S) -> String {
    let mut buf = [0u8; TEXT_BUFFER_LEN];
    session.private_lexer_call(LexerCall::Language(&mut buf[..]));
    text_from_buffer(&buf)
}

/// Read the name of a style number
pub fn style_name<S: EditorSession + ?Sized>(session: &mut S, style: i32) -> String {
    let mut buf = [0u8; TEXT_BUFFER_LEN];
    session.private_lexer_call(LexerCall::StyleName(style, &mut buf[..]));
    text_from_buffer(&buf)
}

/// Text up to the first NUL
fn text_from_buffer(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
