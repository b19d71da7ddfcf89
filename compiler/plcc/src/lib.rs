//! PLC pipeline.
//!
//! ```text
//! source ──► lex() ──► Vec<Token>
//!               │
//!               ▼
//!           parse() ──► Source
//!               │
//!               ▼
//!           check() ──► Source (types and symbols filled in)
//!               │
//!               ▼
//!            run() ──► Value
//! ```
//!
//! Each stage reports its own error type; [`Error`] unifies them so the
//! whole pipeline composes with `?`.

use std::sync::Once;

use plc_analyze::{Analyzer, SemanticError};
use plc_eval::{buffer_handler, stdout_handler, EvalError, Interpreter, SharedPrintHandler, Value};
use plc_ir::ast::Source;
use plc_ir::Token;
use plc_lexer::LexError;
use plc_parse::ParseError;

/// A failure in any stage of the pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),
}

pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    Ok(plc_lexer::lex(source)?)
}

pub fn parse(source: &str) -> Result<Source, Error> {
    let tokens = lex(source)?;
    Ok(plc_parse::parse(&tokens)?)
}

/// Parse and analyze `source`, returning the annotated tree.
pub fn check(source: &str) -> Result<Source, Error> {
    let mut program = parse(source)?;
    Analyzer::new().analyze(&mut program)?;
    Ok(program)
}

/// Check and run `source`, printing to stdout. Returns `main`'s result.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(source: &str) -> Result<Value, Error> {
    let program = check(source)?;
    execute(&program, stdout_handler())
}

/// Run `source` without the analyzer. Runtime checks still apply.
pub fn run_unchecked(source: &str) -> Result<Value, Error> {
    let program = parse(source)?;
    execute(&program, stdout_handler())
}

/// Check and run `source`, capturing everything it prints.
pub fn run_with_output(source: &str) -> Result<(Value, String), Error> {
    let program = check(source)?;
    let handler = buffer_handler();
    let value = execute(&program, handler.clone())?;
    Ok((value, handler.get_output()))
}

fn execute(program: &Source, handler: SharedPrintHandler) -> Result<Value, Error> {
    let mut interpreter = Interpreter::builder().print_handler(handler).build();
    let value = interpreter.run(program)?;
    Ok(value)
}

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=plc_eval=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
