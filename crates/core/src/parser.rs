//! Grammar engine: tokens to a concrete syntax tree.
//!
//! ```text
//! program          := statement*
//! statement        := classDefinition
//! classDefinition  := 'define' Identifier classBody*
//! classBody        := fieldDeclaration
//! fieldDeclaration := Identifier 'has' 'field' StringLiteral defaultValue?
//! defaultValue     := 'has' 'default' literal
//! literal          := StringLiteral
//! ```
//!
//! Recursive descent over a per-call cursor. A failed statement records a
//! [`SyntaxError`] and the parser resumes at the next `define`, so later
//! statements are still diagnosed. Statements that parsed cleanly are kept in
//! the (possibly partial) tree.

use crate::ast::{
    ClassBodyNode, ClassDefinitionNode, DefaultValueNode, FieldDeclarationNode, LiteralNode,
    ProgramNode, Rule, StatementNode,
};
use crate::error::SyntaxError;
use crate::lexer::{Position, Token, TokenKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Stop collecting after this many syntax errors. `None` collects all.
    /// A cap of zero is treated as one: failing input always reports an error.
    pub max_errors: Option<usize>,
}

impl ParseOptions {
    pub(crate) fn error_cap(&self) -> Option<usize> {
        self.max_errors.map(|max| max.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    pub program: ProgramNode,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn parse(tokens: &[Token]) -> ParseOutput {
    parse_with(tokens, &ParseOptions::default())
}

pub fn parse_with(tokens: &[Token], options: &ParseOptions) -> ParseOutput {
    Parser::new(tokens).parse_program(options)
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Just past the last token; reported for errors at end of input.
    end: Position,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let end = tokens
            .last()
            .map_or(Position::START, |t| t.position.advanced_by(&t.image));
        Parser {
            tokens,
            pos: 0,
            end,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.is(kind))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, kind: TokenKind, rule: Rule) -> Result<Token, SyntaxError> {
        match self.peek() {
            Some(tok) if tok.is(kind) => {
                self.pos += 1;
                Ok(tok.clone())
            }
            _ => Err(self.err(rule, kind)),
        }
    }

    fn err(&self, rule: Rule, expected: TokenKind) -> SyntaxError {
        let found = self.peek().cloned();
        let position = found.as_ref().map_or(self.end, |t| t.position);
        SyntaxError {
            rule,
            expected,
            found,
            position,
        }
    }

    // -- Rules --------------------------------------------------

    fn parse_program(&mut self, options: &ParseOptions) -> ParseOutput {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.at_end() {
            let start = self.pos;
            match self.parse_statement() {
                Ok(s) => statements.push(s),
                Err(e) => {
                    errors.push(e);
                    if options.error_cap().is_some_and(|max| errors.len() >= max) {
                        break;
                    }
                    self.recover_to_next_statement(start);
                }
            }
        }

        ParseOutput {
            program: ProgramNode { statements },
            errors,
        }
    }

    /// Skip to the next `define`. If the failed statement consumed nothing,
    /// drop its first token so the loop always advances.
    fn recover_to_next_statement(&mut self, start: usize) {
        if self.pos == start {
            self.pos += 1;
        }
        while let Some(tok) = self.peek() {
            if tok.is(TokenKind::Define) {
                break;
            }
            self.pos += 1;
        }
    }

    fn parse_statement(&mut self) -> Result<StatementNode, SyntaxError> {
        // First alternative whose lookahead matches wins.
        if self.at(TokenKind::Define) {
            return Ok(StatementNode::ClassDefinition(
                self.parse_class_definition()?,
            ));
        }
        Err(self.err(Rule::Statement, TokenKind::Define))
    }

    fn parse_class_definition(&mut self) -> Result<ClassDefinitionNode, SyntaxError> {
        let define = self.expect(TokenKind::Define, Rule::ClassDefinition)?;
        let name = self.expect(TokenKind::Identifier, Rule::ClassDefinition)?;
        let mut body = Vec::new();
        while self.at(TokenKind::Identifier) {
            body.push(self.parse_class_body()?);
        }
        Ok(ClassDefinitionNode { define, name, body })
    }

    fn parse_class_body(&mut self) -> Result<ClassBodyNode, SyntaxError> {
        if self.at(TokenKind::Identifier) {
            return Ok(ClassBodyNode::FieldDeclaration(
                self.parse_field_declaration()?,
            ));
        }
        Err(self.err(Rule::ClassBody, TokenKind::Identifier))
    }

    fn parse_field_declaration(&mut self) -> Result<FieldDeclarationNode, SyntaxError> {
        let rule = Rule::FieldDeclaration;
        let owner = self.expect(TokenKind::Identifier, rule)?;
        let has = self.expect(TokenKind::Has, rule)?;
        let field = self.expect(TokenKind::Field, rule)?;
        let name = self.expect(TokenKind::StringLiteral, rule)?;
        let default = if self.at(TokenKind::Has) {
            Some(self.parse_default_value()?)
        } else {
            None
        };
        Ok(FieldDeclarationNode {
            owner,
            has,
            field,
            name,
            default,
        })
    }

    fn parse_default_value(&mut self) -> Result<DefaultValueNode, SyntaxError> {
        let has = self.expect(TokenKind::Has, Rule::DefaultValue)?;
        let default = self.expect(TokenKind::Default, Rule::DefaultValue)?;
        let literal = self.parse_literal()?;
        Ok(DefaultValueNode {
            has,
            default,
            literal,
        })
    }

    fn parse_literal(&mut self) -> Result<LiteralNode, SyntaxError> {
        Ok(LiteralNode::String(
            self.expect(TokenKind::StringLiteral, Rule::Literal)?,
        ))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
