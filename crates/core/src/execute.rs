//! Pipeline: tokenize, parse, extract.
//!
//! Each stage runs only if the previous one reported no errors. The
//! string-returning entry points never panic outward: an unexpected fault is
//! caught here and reported as a single internal error. The process panic
//! hook is left alone, so the default hook still prints the fault to stderr.

use std::any::Any;
use std::panic::{self, UnwindSafe};

use crate::error::ObjaxError;
use crate::extract;
use crate::lexer;
use crate::model::{ExecutionResult, Program};
use crate::parser::{self, ParseOptions};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Cap on diagnostics collected per stage. `None` collects all; zero is
    /// treated as one.
    pub max_errors: Option<usize>,
}

impl ExecuteOptions {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_errors: self.max_errors,
        }
    }
}

/// Run the pipeline and return the extracted program, or every diagnostic
/// of the first stage that failed.
pub fn analyze(source: &str, options: &ExecuteOptions) -> Result<Program, Vec<ObjaxError>> {
    let lexed = lexer::tokenize(source);
    if lexed.has_errors() {
        let mut errors = lexed.errors;
        if let Some(max) = options.parse_options().error_cap() {
            errors.truncate(max);
        }
        return Err(errors.into_iter().map(ObjaxError::from).collect());
    }

    let parsed = parser::parse_with(&lexed.tokens, &options.parse_options());
    if parsed.has_errors() {
        return Err(parsed.errors.into_iter().map(ObjaxError::from).collect());
    }

    Ok(extract::extract(&parsed.program))
}

pub fn execute(source: &str) -> ExecutionResult {
    execute_with(source, &ExecuteOptions::default())
}

pub fn execute_with(source: &str, options: &ExecuteOptions) -> ExecutionResult {
    guarded(|| analyze(source, options))
}

fn guarded<F>(run: F) -> ExecutionResult
where
    F: FnOnce() -> Result<Program, Vec<ObjaxError>> + UnwindSafe,
{
    match panic::catch_unwind(run) {
        Ok(Ok(program)) => program,
        Ok(Err(errors)) => Program::failed(errors.iter().map(ToString::to_string).collect()),
        Err(payload) => {
            let fault = ObjaxError::Internal(panic_message(payload.as_ref()));
            Program::failed(vec![fault.to_string()])
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_owned()
    }
}
