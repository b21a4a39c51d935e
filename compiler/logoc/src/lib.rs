//! Logo - front end and stepping evaluator behind one context object.
//!
//! [`Logo`] is what an editor or the `logo` binary talks to. It owns the
//! evaluation [`Machine`] (word registry, globals, session) together with
//! the program most recently loaded, and exposes the whole boundary:
//!
//! - `tokenize`, `parse`, `export`, `import`
//! - `run` / `run_expr` (drive a session to completion)
//! - `start` / `step` / `current_expression` (drive it one reduction at a
//!   time, for highlighting)
//! - `words` (the live registry), `program` / `program_mut` (the loaded
//!   tree, for editing)
//!
//! Errors raised while parsing or running are rendered against the source
//! they came from and sent to the caller's [`Logger`].

pub mod commands;
mod options;

pub use options::{parse_run_options, RunOptions};

use logo_diagnostic::{LogoResult, Logger};
use logo_eval::{stdout_handler, Machine, SessionState, SharedPrintHandler, Value, WordRegistry};
use logo_ir::{export, Expr, TokenList};
use logo_lexer::tokenize_with;
use logo_parse::WordTable;
use tracing::{debug, trace};

pub struct Logo {
    machine: Machine,
    options: RunOptions,
    /// Text the loaded program was parsed from; error reports quote it.
    source: String,
    program: Vec<Expr>,
}

impl Logo {
    pub fn new(options: RunOptions, printer: SharedPrintHandler) -> Self {
        Logo {
            machine: Machine::new(printer),
            options,
            source: String::new(),
            program: Vec::new(),
        }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn tokenize(&self, source: &str) -> TokenList {
        tokenize_with(source, &self.options.keywords)
    }

    /// Parse `tokens` against the words currently registered.
    pub fn parse(&self, tokens: &TokenList) -> LogoResult<Vec<Expr>> {
        logo_parse::parse(tokens, WordTable::new(self.machine.words().signatures()))
    }

    /// Serialize `program` back to source, one top-level expression per line.
    pub fn export(&self, program: &[Expr]) -> String {
        export(program, &self.options.keywords)
    }

    /// Load `source` as a new program on a fresh machine.
    ///
    /// On a parse error the machine is still reset and no program is loaded.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn import(&mut self, source: &str) -> LogoResult<()> {
        self.reset();
        self.load(source)
    }

    /// Parse `source` against the current registry and make it the loaded
    /// program.
    fn load(&mut self, source: &str) -> LogoResult<()> {
        self.source = source.to_string();
        self.program.clear();
        let tokens = self.tokenize(source);
        self.program = self.parse(&tokens)?;
        debug!(exprs = self.program.len(), "program loaded");
        Ok(())
    }

    /// Load `source` and run it to completion. Definitions and globals from
    /// earlier runs stay visible.
    ///
    /// Returns the value of the last expression, or `None` after reporting
    /// an error to `logger`.
    pub fn run(&mut self, source: &str, logger: &mut dyn Logger) -> Option<Value> {
        if let Err(err) = self.load(source) {
            err.log_to(source, logger);
            return None;
        }
        let program = self.program.clone();
        self.run_expr(&program, logger)
    }

    /// Run the loaded program to completion.
    pub fn run_program(&mut self, logger: &mut dyn Logger) -> Option<Value> {
        let program = self.program.clone();
        self.run_expr(&program, logger)
    }

    /// Run `program` to completion within the configured step budget.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_expr(&mut self, program: &[Expr], logger: &mut dyn Logger) -> Option<Value> {
        self.machine.start(program);
        match self.machine.run_to_completion(self.options.max_steps) {
            SessionState::Completed => self.machine.result().cloned(),
            _ => {
                self.report(logger);
                None
            }
        }
    }

    /// Begin a stepped session over `program`. Returns whether a reduction
    /// is waiting; an error raised before the first one is reported.
    pub fn start(&mut self, program: &[Expr], logger: &mut dyn Logger) -> bool {
        self.machine.start(program);
        self.report(logger);
        self.machine.is_pending()
    }

    /// Begin a stepped session over the loaded program.
    pub fn start_program(&mut self, logger: &mut dyn Logger) -> bool {
        let program = self.program.clone();
        self.start(&program, logger)
    }

    /// Advance one reduction. Returns whether more remain.
    pub fn step(&mut self, logger: &mut dyn Logger) -> bool {
        if !self.machine.is_pending() {
            return false;
        }
        if let Some(expr) = self.machine.current_expression() {
            trace!(step = self.machine.steps() + 1, expr = expr.kind_name(), "step");
        }
        let pending = self.machine.step();
        self.report(logger);
        pending
    }

    /// Expression whose word the next `step` applies.
    pub fn current_expression(&self) -> Option<&Expr> {
        self.machine.current_expression()
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn words(&self) -> &WordRegistry {
        self.machine.words()
    }

    pub fn words_mut(&mut self) -> &mut WordRegistry {
        self.machine.words_mut()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn program(&self) -> &[Expr] {
        &self.program
    }

    /// The loaded tree, for in-place editing between runs.
    pub fn program_mut(&mut self) -> &mut Vec<Expr> {
        &mut self.program
    }

    /// Forget the loaded program, every definition and every global.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.source.clear();
        self.program.clear();
    }

    fn report(&self, logger: &mut dyn Logger) {
        if let Some(err) = self.machine.error() {
            err.log_to(&self.source, logger);
        }
    }
}

impl Default for Logo {
    fn default() -> Self {
        Logo::new(RunOptions::default(), stdout_handler())
    }
}
