// wordseg-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wordseg::WordModel;
use wordseg::loader::{self, LoadError};

/// Frequency table file name looked up inside dictionary directories.
const DICT_FILE: &str = "dictionary.txt";

/// Environment variable naming a frequency table or its directory.
const DICT_PATH_ENV: &str = "WORDSEG_DICT_PATH";

/// Search for a frequency table and build a finished model from it.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `WORDSEG_DICT_PATH` environment variable
/// 3. `~/.wordseg/dictionary.txt`
/// 4. `/usr/share/wordseg/dictionary.txt`
/// 5. Current working directory (looks for `dictionary.txt` directly)
///
/// Each entry may name the table itself or a directory containing
/// `dictionary.txt`.
pub fn load_model(dict_path: Option<&str>) -> Result<WordModel, String> {
    let search_paths = build_search_paths(dict_path);

    for candidate in &search_paths {
        if let Some(path) = resolve_dictionary(candidate) {
            info!(path = %path.display(), "loading frequency table");
            return loader::load_model_from_path(&path)
                .map_err(|e: LoadError| format!("failed to load {}: {e}", path.display()));
        }
    }

    Err(format!(
        "could not find {} in any of the search paths:\n{}",
        DICT_FILE,
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Return the frequency table a search path refers to, if it exists.
fn resolve_dictionary(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    let inner = candidate.join(DICT_FILE);
    inner.is_file().then_some(inner)
}

/// Build the list of paths to search for the frequency table.
fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(DICT_PATH_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".wordseg"));
    }

    paths.push(PathBuf::from("/usr/share/wordseg"));

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "--dict-path", Some("-d"))
}

/// Parse a `--NAME=VALUE` or `--NAME VALUE` option (or its short form).
///
/// Returns `(value, remaining_args)`. Exits if the option has no value.
pub fn parse_option(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> (Option<String>, Vec<String>) {
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;
    let prefix = format!("{long}=");

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || Some(arg.as_str()) == short {
            if i + 1 < args.len() {
                value = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Install a stderr log subscriber.
///
/// `RUST_LOG` controls the filter (default `warn`); `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
