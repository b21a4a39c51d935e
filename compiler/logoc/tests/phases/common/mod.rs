//! Shared test utilities for phase tests.

use logo_eval::{buffer_handler, Value};
use logoc::{Logo, RunOptions};

/// A context whose `print` output is captured.
pub fn logo() -> Logo {
    logo_with(RunOptions::default())
}

pub fn logo_with(options: RunOptions) -> Logo {
    Logo::new(options, buffer_handler())
}

/// Everything a run produced.
pub struct Outcome {
    pub value: Option<Value>,
    pub output: String,
    pub errors: Vec<String>,
}

/// Run `source` to completion on a fresh context.
pub fn run(source: &str) -> Outcome {
    let mut logo = logo();
    run_on(&mut logo, source)
}

pub fn run_on(logo: &mut Logo, source: &str) -> Outcome {
    let mut errors = Vec::new();
    let value = logo.run(source, &mut errors);
    let output = logo.machine().printer().output();
    logo.machine().printer().clear();
    Outcome {
        value,
        output,
        errors,
    }
}

/// Import `source` and drive it with `step()` only.
pub fn step_through(source: &str) -> (Logo, Outcome, u64) {
    let mut logo = logo();
    let mut errors = Vec::new();
    logo.import(source).unwrap();
    let mut pending = logo.start_program(&mut errors);
    let mut steps = 0;
    while pending {
        assert!(logo.current_expression().is_some());
        pending = logo.step(&mut errors);
        steps += 1;
    }
    let outcome = Outcome {
        value: logo.machine().result().cloned(),
        output: logo.machine().printer().output(),
        errors,
    };
    (logo, outcome, steps)
}
