//! lexbind - show which language files resolve to
//!
//! Loads a lexbind configuration file and prints the language each given
//! file name would be bound to.

use std::env;
use std::path::PathBuf;
use std::process;

use lexbind::config::{ConfigStore, CONFIG_FILE_NAME};
use lexbind::error::Result;
use lexbind::host::file_name;
use lexbind::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut config_path = PathBuf::from(CONFIG_FILE_NAME);
    let mut log_dir: Option<PathBuf> = None;
    let mut files = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("lexbind {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = PathBuf::from(path),
                None => usage_error("--config needs a file"),
            },
            "--log-dir" => match args.next() {
                Some(dir) => log_dir = Some(PathBuf::from(dir)),
                None => usage_error("--log-dir needs a directory"),
            },
            _ => files.push(PathBuf::from(arg)),
        }
    }

    logging::init(log_dir.as_deref());

    let config = ConfigStore::new(config_path).try_load()?;
    if files.is_empty() {
        for language in config.languages.languages() {
            let patterns: Vec<&str> = config
                .languages
                .get(language)
                .map(|entry| entry.patterns.iter().map(|p| p.as_str()).collect())
                .unwrap_or_default();
            println!("{}\t{}", language, patterns.join(";"));
        }
        return Ok(());
    }

    for file in &files {
        let name = file_name(file);
        let language = config.languages.resolve(&name).unwrap_or("-");
        println!("{}\t{}", file.display(), language);
    }

    Ok(())
}

fn usage_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("Try 'lexbind --help' for more information.");
    process::exit(2);
}

fn print_usage() {
    println!("lexbind {} - show which LPeg language files resolve to", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: lexbind [OPTIONS] [FILE]...");
    println!();
    println!("Options:");
    println!("  -c, --config FILE  Configuration file (default: ./{})", CONFIG_FILE_NAME);
    println!("      --log-dir DIR  Also write debug logs to DIR");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("With no FILE, lists the configured languages and their patterns");
    println!("in match order.");
}
