//! Concrete syntax tree produced by the grammar engine.
//!
//! One node type per grammar rule. Every node owns its children and keeps
//! every token it matched, keywords included. Nothing is resolved here;
//! turning the tree into classes and fields is the extractor's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexer::Token;

/// Grammar rule names, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Program,
    Statement,
    ClassDefinition,
    ClassBody,
    FieldDeclaration,
    DefaultValue,
    Literal,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::Statement => "statement",
            Rule::ClassDefinition => "classDefinition",
            Rule::ClassBody => "classBody",
            Rule::FieldDeclaration => "fieldDeclaration",
            Rule::DefaultValue => "defaultValue",
            Rule::Literal => "literal",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Nodes
// ──────────────────────────────────────────────

/// `program := statement*`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramNode {
    pub statements: Vec<StatementNode>,
}

/// `statement := classDefinition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementNode {
    ClassDefinition(ClassDefinitionNode),
}

/// `classDefinition := 'define' Identifier classBody*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinitionNode {
    pub define: Token,
    pub name: Token,
    pub body: Vec<ClassBodyNode>,
}

/// `classBody := fieldDeclaration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassBodyNode {
    FieldDeclaration(FieldDeclarationNode),
}

/// `fieldDeclaration := Identifier 'has' 'field' StringLiteral defaultValue?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclarationNode {
    /// Class name as written before `has`. Not checked against the enclosing class.
    pub owner: Token,
    pub has: Token,
    pub field: Token,
    /// String literal token, quotes included.
    pub name: Token,
    pub default: Option<DefaultValueNode>,
}

/// `defaultValue := 'has' 'default' literal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValueNode {
    pub has: Token,
    pub default: Token,
    pub literal: LiteralNode,
}

/// `literal := StringLiteral`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralNode {
    String(Token),
}

impl ProgramNode {
    /// Class definitions in source order.
    pub fn class_definitions(&self) -> impl Iterator<Item = &ClassDefinitionNode> {
        self.statements.iter().map(|s| match s {
            StatementNode::ClassDefinition(c) => c,
        })
    }
}

impl ClassDefinitionNode {
    /// Field declarations in source order.
    pub fn field_declarations(&self) -> impl Iterator<Item = &FieldDeclarationNode> {
        self.body.iter().map(|b| match b {
            ClassBodyNode::FieldDeclaration(f) => f,
        })
    }
}

impl LiteralNode {
    pub fn token(&self) -> &Token {
        match self {
            LiteralNode::String(tok) => tok,
        }
    }
}
