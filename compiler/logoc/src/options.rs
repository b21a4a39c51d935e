//! Run configuration shared by the facade and the CLI.

use logo_ir::Keywords;

/// How programs are tokenized and run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Accepted spellings of `to` / `end`.
    pub keywords: Keywords,
    /// Reduction budget for running to completion. `None` runs unbounded.
    pub max_steps: Option<u64>,
    /// Print every visible reduction when stepping from the CLI.
    pub trace_steps: bool,
}

/// Parse `--to=`, `--end=`, `--max-steps=` and `--trace` flags.
///
/// Arguments that do not start with `-` are ignored so the file path can
/// appear anywhere on the command line.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut to = None;
    let mut end = None;
    let mut options = RunOptions::default();

    for arg in args {
        if let Some(word) = arg.strip_prefix("--to=") {
            to = Some(non_empty("--to", word)?);
        } else if let Some(word) = arg.strip_prefix("--end=") {
            end = Some(non_empty("--end", word)?);
        } else if let Some(n) = arg.strip_prefix("--max-steps=") {
            let n = n
                .parse::<u64>()
                .map_err(|_| format!("invalid --max-steps value '{n}'"))?;
            options.max_steps = Some(n);
        } else if arg == "--trace" {
            options.trace_steps = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    options.keywords = Keywords::localized(to, end);
    Ok(options)
}

fn non_empty<'a>(flag: &str, word: &'a str) -> Result<&'a str, String> {
    if word.is_empty() {
        Err(format!("{flag} needs a word"))
    } else {
        Ok(word)
    }
}
