//! Logo CLI
//!
//! Tokenize, parse, format and run Logo programs.

use std::sync::Once;

use logoc::commands::{format_file, lex_file, parse_file, run_file, step_file};
use logoc::parse_run_options;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=logo_eval=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let handler: fn(&str, &logoc::RunOptions) = match command {
        "run" => run_file,
        "step" => step_file,
        "lex" => lex_file,
        "parse" => parse_file,
        "fmt" => format_file,
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("Logo {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let rest = &args[2..];
    let Some(path) = rest.iter().find(|arg| !arg.starts_with('-')) else {
        eprintln!("error: missing file path");
        eprintln!("Usage: logo {command} <file.logo> [options]");
        std::process::exit(1);
    };

    let options = match parse_run_options(rest) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    handler(path, &options);
}

fn print_usage() {
    println!("Logo");
    println!();
    println!("Usage: logo <command> <file.logo> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a program to completion");
    println!("  step <file>      Run a program one reduction at a time");
    println!("  lex <file>       Tokenize and display tokens");
    println!("  parse <file>     Parse and display the expression tree");
    println!("  fmt <file>       Print the program as the exporter writes it");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --to=<word>        Extra spelling accepted for 'to'");
    println!("  --end=<word>       Extra spelling accepted for 'end'");
    println!("  --max-steps=<n>    Stop with an error after n reductions");
    println!("  --trace            Print each reduction (step command)");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=logo_eval=debug) for internal tracing.");
}
