//! Tokenizer: source text to an ordered sequence of typed tokens.
//!
//! Patterns are tried in registration order at every scan position and the
//! first one that matches wins. Whitespace and line comments are matched and
//! dropped. Unrecognized input is reported as a [`LexError`] and skipped, so
//! tokenizing always runs to the end of the source.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LexError;

// ──────────────────────────────────────────────
// Positions and tokens
// ──────────────────────────────────────────────

/// Location of a lexeme in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
}

impl Position {
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Position after consuming `text` starting from `self`.
    pub(crate) fn advanced_by(self, text: &str) -> Position {
        let mut next = self;
        next.offset += text.len();
        for c in text.chars() {
            if c == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    WhiteSpace,
    Comment,
    // Keywords
    Define,
    Has,
    Field,
    Method,
    Default,
    With,
    Do,
    Is,
    A,
    New,
    Set,
    Of,
    To,
    Myself,
    True,
    False,
    // Literals
    StringLiteral,
    NumberLiteral,
    Identifier,
}

const KEYWORDS: &[(TokenKind, &str)] = &[
    (TokenKind::Define, "define"),
    (TokenKind::Has, "has"),
    (TokenKind::Field, "field"),
    (TokenKind::Method, "method"),
    (TokenKind::Default, "default"),
    (TokenKind::With, "with"),
    (TokenKind::Do, "do"),
    (TokenKind::Is, "is"),
    (TokenKind::A, "a"),
    (TokenKind::New, "new"),
    (TokenKind::Set, "set"),
    (TokenKind::Of, "of"),
    (TokenKind::To, "to"),
    (TokenKind::Myself, "myself"),
    (TokenKind::True, "true"),
    (TokenKind::False, "false"),
];

impl TokenKind {
    /// The keyword spelled exactly `word`, if any. Keywords are case-sensitive.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(_, spelling)| *spelling == word)
            .map(|(kind, _)| *kind)
    }

    /// Source spelling of a keyword kind.
    pub fn spelling(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, spelling)| *spelling)
    }

    pub fn is_keyword(self) -> bool {
        self.spelling().is_some()
    }

    /// Kinds that are matched but never emitted.
    pub fn is_skipped(self) -> bool {
        matches!(self, TokenKind::WhiteSpace | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spelling() {
            Some(word) => write!(f, "'{}'", word),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw matched text.
    pub image: String,
    pub position: Position,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

// ──────────────────────────────────────────────
// Pattern table
// ──────────────────────────────────────────────

struct Pattern {
    kind: TokenKind,
    regex: Regex,
}

fn pattern(kind: TokenKind, body: &str) -> Pattern {
    // Patterns are compile-time constants; a bad one is a programming error.
    let regex = Regex::new(&format!(r"\A(?:{})", body))
        .unwrap_or_else(|e| panic!("invalid token pattern for {:?}: {}", kind, e));
    Pattern { kind, regex }
}

/// Registration order is priority order.
static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    let mut patterns = vec![
        pattern(TokenKind::WhiteSpace, r"\s+"),
        pattern(TokenKind::Comment, r"//[^\n]*"),
    ];
    // Keywords must end at a word boundary so that `default123` stays one
    // identifier and `a` never matches the head of `abc`.
    patterns.extend(
        KEYWORDS
            .iter()
            .map(|(kind, word)| pattern(*kind, &format!(r"{}\b", regex::escape(word)))),
    );
    patterns.push(pattern(TokenKind::StringLiteral, r#""[^"]*""#));
    patterns.push(pattern(TokenKind::NumberLiteral, r"[0-9]+(?:\.[0-9]+)?"));
    patterns.push(pattern(TokenKind::Identifier, r"[a-zA-Z_][a-zA-Z0-9_]*"));
    patterns
});

/// First pattern matching at the start of `rest`, with the matched length.
fn match_at(rest: &str) -> Option<(TokenKind, usize)> {
    PATTERNS.iter().find_map(|p| {
        p.regex
            .find(rest)
            .filter(|m| !m.is_empty())
            .map(|m| (p.kind, m.end()))
    })
}

// ──────────────────────────────────────────────
// Scanner
// ──────────────────────────────────────────────

/// Result of tokenizing one source string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn tokenize(src: &str) -> LexOutput {
    let mut out = LexOutput::default();
    let mut pos = Position::START;
    // Start of a run of unrecognized characters, flushed as one error.
    let mut bad_start: Option<Position> = None;

    while pos.offset < src.len() {
        let rest = &src[pos.offset..];
        match match_at(rest) {
            Some((kind, len)) => {
                if let Some(start) = bad_start.take() {
                    out.errors.push(unrecognized(src, start, pos));
                }
                let image = &rest[..len];
                if !kind.is_skipped() {
                    out.tokens.push(Token {
                        kind,
                        image: image.to_owned(),
                        position: pos,
                    });
                }
                pos = pos.advanced_by(image);
            }
            None => {
                bad_start.get_or_insert(pos);
                // Always make progress: skip one whole character.
                let width = rest.chars().next().map_or(1, char::len_utf8);
                pos = pos.advanced_by(&rest[..width]);
            }
        }
    }
    if let Some(start) = bad_start {
        out.errors.push(unrecognized(src, start, pos));
    }

    out
}

fn unrecognized(src: &str, start: Position, end: Position) -> LexError {
    LexError {
        position: start,
        text: src[start.offset..end.offset].to_owned(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let out = tokenize(src);
        assert!(out.errors.is_empty(), "unexpected lex errors: {:?}", out.errors);
        out.tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_input_has_no_tokens() {
        let out = tokenize("");
        assert!(out.tokens.is_empty());
        assert!(out.errors.is_empty());
    }

    #[test]
    fn class_declaration_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("define Book\nBook has field \"title\" has default \"X\""),
            vec![
                Define,
                Identifier,
                Identifier,
                Has,
                Field,
                StringLiteral,
                Has,
                Default,
                StringLiteral
            ]
        );
    }

    #[test]
    fn keyword_prefix_stays_identifier() {
        let out = tokenize("default123 defaults a abc has_x");
        let pairs: Vec<_> = out
            .tokens
            .iter()
            .map(|t| (t.kind, t.image.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (TokenKind::Identifier, "default123"),
                (TokenKind::Identifier, "defaults"),
                (TokenKind::A, "a"),
                (TokenKind::Identifier, "abc"),
                (TokenKind::Identifier, "has_x"),
            ]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            kinds("Define DEFINE define"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Define]
        );
    }

    #[test]
    fn all_keywords_recognized() {
        for (kind, word) in KEYWORDS {
            assert_eq!(kinds(word), vec![*kind], "keyword {}", word);
        }
    }

    #[test]
    fn numbers_with_optional_fraction() {
        let out = tokenize("42 3.14 7.");
        let images: Vec<_> = out.tokens.iter().map(|t| t.image.as_str()).collect();
        assert_eq!(images, vec!["42", "3.14", "7"]);
        // The trailing '.' matches nothing.
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].text, ".");
    }

    #[test]
    fn string_literal_keeps_quotes_in_image() {
        let out = tokenize(r#""hello world""#);
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(out.tokens[0].image, "\"hello world\"");
    }

    #[test]
    fn comments_and_whitespace_are_dropped() {
        assert_eq!(
            kinds("// leading comment\n  define   Foo // trailing\n\t"),
            vec![TokenKind::Define, TokenKind::Identifier]
        );
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let out = tokenize("define Foo\n  Foo has");
        let positions: Vec<_> = out
            .tokens
            .iter()
            .map(|t| (t.position.line, t.position.column, t.position.offset))
            .collect();
        assert_eq!(positions, vec![(1, 1, 0), (1, 8, 7), (2, 3, 13), (2, 7, 17)]);
    }

    #[test]
    fn unrecognized_run_is_one_error_and_scanning_continues() {
        let out = tokenize("define @@@ Foo");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].text, "@@@");
        assert_eq!(out.errors[0].position.column, 8);
        let kinds: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Define, TokenKind::Identifier]);
    }

    #[test]
    fn separate_bad_runs_are_separate_errors() {
        let out = tokenize("# Foo $");
        let texts: Vec<_> = out.errors.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["#", "$"]);
    }

    #[test]
    fn unterminated_string_is_a_lex_error() {
        let out = tokenize("Foo has field \"title");
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].text.starts_with('"'));
    }

    #[test]
    fn multibyte_input_advances_by_whole_characters() {
        let out = tokenize("é Foo");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].text, "é");
        assert_eq!(out.tokens[0].position.column, 3);
        assert_eq!(out.tokens[0].position.offset, 3);
    }

    #[test]
    fn kind_display_quotes_keywords() {
        assert_eq!(TokenKind::Define.to_string(), "'define'");
        assert_eq!(TokenKind::Identifier.to_string(), "Identifier");
        assert_eq!(TokenKind::keyword("myself"), Some(TokenKind::Myself));
        assert_eq!(TokenKind::keyword("Myself"), None);
    }
}
