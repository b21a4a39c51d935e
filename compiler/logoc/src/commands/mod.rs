//! Command handlers for the `logo` CLI.
//!
//! Each submodule implements one command. Shared utilities live here in the
//! module root.

mod debug;
mod fmt;
mod run;

pub use debug::{describe, lex_file, parse_file};
pub use fmt::format_file;
pub use run::{run_file, step_file};

use logo_diagnostic::StderrLogger;
use logo_eval::stdout_handler;

use crate::{Logo, RunOptions};

/// Read a source file, exiting with a message if it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Read `path` and import it into a fresh context printing to stdout.
/// Parse errors are reported and end the process.
pub(crate) fn import_file(path: &str, options: &RunOptions) -> Logo {
    let source = read_file(path);
    let mut logo = Logo::new(options.clone(), stdout_handler());
    if let Err(err) = logo.import(&source) {
        err.log_to(&source, &mut StderrLogger);
        std::process::exit(1);
    }
    logo
}
