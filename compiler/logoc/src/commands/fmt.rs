//! The `fmt` command: print a file as the exporter writes it.

use super::import_file;
use crate::RunOptions;

pub fn format_file(path: &str, options: &RunOptions) {
    let logo = import_file(path, options);
    print!("{}", logo.export(logo.program()));
}
