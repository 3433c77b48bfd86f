//! Plugin menu commands

use std::fs;

use tracing::{debug, warn};

use crate::host::{EditorSession, Host};
use crate::lexer;
use crate::plugin::Plugin;

/// Grammar used for lexer definition files
const DEFINITION_LANGUAGE: &str = "lua";

/// File a new language definition starts from
const TEMPLATE_FILE: &str = "template.txt";

/// Commands offered in the plugin menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetLanguage,
    CreateLanguageDefinition,
    EditLanguageDefinition,
    EditSettings,
    About,
}

/// A menu entry; entries without a command are separators
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: Option<Command>,
}

const fn item(label: &'static str, command: Command) -> MenuItem {
    MenuItem {
        label,
        command: Some(command),
    }
}

const SEPARATOR: MenuItem = MenuItem {
    label: "",
    command: None,
};

/// The plugin menu, in display order
pub const MENU: &[MenuItem] = &[
    item("Set Language...", Command::SetLanguage),
    SEPARATOR,
    item("Create New Language Definition...", Command::CreateLanguageDefinition),
    item("Edit Language Definition...", Command::EditLanguageDefinition),
    item("Edit Settings...", Command::EditSettings),
    SEPARATOR,
    item("About...", Command::About),
];

/// Run a menu command
pub fn run<H: Host>(plugin: &mut Plugin, host: &mut H, command: Command) {
    debug!(?command, "menu command");
    match command {
        Command::SetLanguage => set_language(plugin, host),
        Command::CreateLanguageDefinition => create_language_definition(plugin, host),
        Command::EditLanguageDefinition => edit_language_definition(plugin, host),
        Command::EditSettings => edit_settings(plugin, host),
        Command::About => host.show_about(&about_text()),
    }
}

/// Ask for a language and use it for the active document
fn set_language<H: Host>(plugin: &mut Plugin, host: &mut H) {
    if let Some(language) = choose_language(plugin, host) {
        // Failures are already shown to the user
        if let Err(e) = plugin.assign_language(host, &language) {
            debug!(error = %e, "language not set");
        }
    }
}

/// Open a new document holding the language definition template
fn create_language_definition<H: Host>(plugin: &mut Plugin, host: &mut H) {
    let template_path = plugin.module_dir().join(TEMPLATE_FILE);
    let template = match fs::read_to_string(&template_path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %template_path.display(), error = %e, "language template not read");
            String::new()
        }
    };

    host.new_file();
    let view = host.current_view();
    host.session(view).set_text(&template);

    // The new document is untitled; its language is not cached
    if plugin.config().override_lexer {
        let settings = plugin.lexer_settings();
        if let Err(e) = lexer::apply(host, view, &settings, Some(DEFINITION_LANGUAGE)) {
            debug!(error = %e, "definition lexer not bound");
        }
    } else {
        host.set_native_language(DEFINITION_LANGUAGE);
    }
}

/// Ask for a language and open its definition file
fn edit_language_definition<H: Host>(plugin: &mut Plugin, host: &mut H) {
    if let Some(language) = choose_language(plugin, host) {
        let path = plugin.module_dir().join(format!("{}.lua", language));
        host.open_file(&path);
    }
}

/// Open the settings file, creating it first if needed
fn edit_settings<H: Host>(plugin: &mut Plugin, host: &mut H) {
    if let Err(e) = plugin.store().ensure_exists() {
        warn!(error = %e, "default settings not written");
        host.show_error(&e.to_string());
        return;
    }
    host.open_file(plugin.store().path());
}

fn choose_language<H: Host>(plugin: &Plugin, host: &mut H) -> Option<String> {
    let languages: Vec<&str> = plugin.config().languages.languages().collect();
    host.choose_language(&languages).filter(|l| !l.is_empty())
}

/// Text for the About box
pub fn about_text() -> String {
    format!(
        "{} {}\n\n{}\n\nLexer library: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
        lexer::library_file_name()
    )
}
