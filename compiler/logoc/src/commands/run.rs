//! The `run` and `step` commands.

use logo_diagnostic::StderrLogger;
use logo_ir::export_expr;

use super::import_file;
use crate::RunOptions;

/// Run a Logo file to completion, exiting non-zero on error.
pub fn run_file(path: &str, options: &RunOptions) {
    let mut logo = import_file(path, options);
    if logo.run_program(&mut StderrLogger).is_none() {
        std::process::exit(1);
    }
}

/// Run a Logo file one reduction at a time.
///
/// With `trace_steps`, every reduction is printed to stderr before it is
/// performed, as the source text of the call it applies.
pub fn step_file(path: &str, options: &RunOptions) {
    let mut logo = import_file(path, options);
    let mut logger = StderrLogger;

    let mut pending = logo.start_program(&mut logger);
    let mut steps = 0_u64;
    while pending {
        if options.max_steps.is_some_and(|max| steps >= max) {
            eprintln!("stopped after {steps} steps");
            std::process::exit(1);
        }
        if options.trace_steps {
            if let Some(expr) = logo.current_expression() {
                let line = expr.line().map_or(0, |line| line + 1);
                let text = export_expr(expr, &options.keywords);
                eprintln!("[{}] line {line}: {text}", steps + 1);
            }
        }
        pending = logo.step(&mut logger);
        steps += 1;
    }

    if logo.machine().error().is_some() {
        std::process::exit(1);
    }
    eprintln!("{steps} steps");
}
