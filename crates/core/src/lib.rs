//! objax-core: front-end for the Objax class-declaration language.
//!
//! Three stages run in order, each on fresh per-call state:
//!
//! 1. [`lexer::tokenize`] -- source text to typed tokens
//! 2. [`parser::parse`] -- tokens to a concrete syntax tree
//! 3. [`extract::extract`] -- syntax tree to a [`Program`] of classes and fields
//!
//! [`execute()`] runs the whole pipeline and always returns an
//! [`ExecutionResult`]; failures are reported as strings in its `errors`
//! list. [`analyze()`] returns the same diagnostics as [`ObjaxError`] values.

pub mod ast;
pub mod error;
pub mod execute;
pub mod extract;
pub mod lexer;
pub mod model;
pub mod parser;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{ProgramNode, Rule};
pub use error::{LexError, ObjaxError, SyntaxError};
pub use lexer::{Position, Token, TokenKind};
pub use model::{ClassDefinition, ExecutionResult, FieldDefinition, Instance, Program, Value};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use execute::{analyze, execute, execute_with, ExecuteOptions};
pub use extract::extract;
pub use lexer::tokenize;
pub use parser::{parse, parse_with, ParseOptions};
