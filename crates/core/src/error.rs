use serde::{Deserialize, Serialize};

use crate::ast::Rule;
use crate::lexer::{Position, Token, TokenKind};

/// A span of input that matches no token pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("unrecognized input '{text}' at {position}")]
pub struct LexError {
    pub position: Position,
    pub text: String,
}

/// A token sequence that does not fit the grammar at some rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error(
    "syntax error in {rule} at {position}: expected {expected}, found {}",
    describe_found(.found)
)]
pub struct SyntaxError {
    /// Rule that was being matched when the mismatch occurred.
    pub rule: Rule,
    pub expected: TokenKind,
    /// `None` when the input ended early.
    pub found: Option<Token>,
    /// Where the mismatch was detected; the end of input when `found` is `None`.
    pub position: Position,
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(tok) if tok.is_keyword() => tok.kind.to_string(),
        Some(tok) => format!("{} '{}'", tok.kind, tok.image),
        None => "end of input".to_owned(),
    }
}

/// Any failure surfaced by the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// An unexpected fault caught at the pipeline boundary.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ObjaxError {
    /// Pipeline stage that reported the error.
    pub fn stage(&self) -> &'static str {
        match self {
            ObjaxError::Lex(_) => "lex",
            ObjaxError::Syntax(_) => "parse",
            ObjaxError::Internal(_) => "internal",
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            ObjaxError::Lex(e) => Some(e.position),
            ObjaxError::Syntax(e) => Some(e.position),
            ObjaxError::Internal(_) => None,
        }
    }

    /// Serialize as a flat diagnostic object. All keys are always present
    /// (null when not applicable).
    pub fn to_json_value(&self) -> serde_json::Value {
        let position = self.position();
        serde_json::json!({
            "stage":   self.stage(),
            "line":    position.map(|p| p.line),
            "column":  position.map(|p| p.column),
            "offset":  position.map(|p| p.offset),
            "message": self.to_string(),
        })
    }
}
