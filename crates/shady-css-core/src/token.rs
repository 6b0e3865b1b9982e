//! Token kinds and the token record produced by the tokenizer
//!
//! Tokens live in an append-only arena owned by the [`Tokenizer`]. Links to
//! neighbouring tokens are stored as [`TokenId`] indices into that arena
//! instead of references, so the stream never forms an ownership cycle.
//!
//! [`Tokenizer`]: crate::Tokenizer

use serde::Serialize;

use crate::ast::Range;

/// Index of a token in the tokenizer's arena
pub type TokenId = usize;

/// Lexical classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// A run of whitespace characters
    Whitespace,
    /// A quoted string, delimiters included
    String,
    /// A `/* ... */` comment, delimiters included
    Comment,
    /// Any run of characters up to the next boundary or whitespace
    Word,
    /// `@`
    At,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParenthesis,
    /// `)`
    CloseParenthesis,
}

impl TokenKind {
    /// Map a single structural character to its token kind
    pub fn from_boundary_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(TokenKind::OpenParenthesis),
            ')' => Some(TokenKind::CloseParenthesis),
            ':' => Some(TokenKind::Colon),
            '@' => Some(TokenKind::At),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            ';' => Some(TokenKind::Semicolon),
            _ => None,
        }
    }

    /// Structural single-character symbols: `( ) { } @ ; :`
    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            TokenKind::At
                | TokenKind::Colon
                | TokenKind::Semicolon
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace
                | TokenKind::OpenParenthesis
                | TokenKind::CloseParenthesis
        )
    }

    /// Symbols that terminate a declaration or ruleset scan: `{ } ;`
    pub fn is_property_boundary(self) -> bool {
        matches!(
            self,
            TokenKind::OpenBrace | TokenKind::CloseBrace | TokenKind::Semicolon
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Word => "word",
            TokenKind::At => "at",
            TokenKind::Colon => "colon",
            TokenKind::Semicolon => "semicolon",
            TokenKind::OpenBrace => "openBrace",
            TokenKind::CloseBrace => "closeBrace",
            TokenKind::OpenParenthesis => "openParenthesis",
            TokenKind::CloseParenthesis => "closeParenthesis",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexeme in the token stream
///
/// `next` is filled in once the following token has been scanned, so a copy
/// taken before that point still reports `None`. Query the tokenizer with
/// [`Tokenizer::next`](crate::Tokenizer::next) for the current link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
    pub range: Range,
    pub previous: Option<TokenId>,
    pub next: Option<TokenId>,
}

impl Token {
    pub fn new(id: TokenId, kind: TokenKind, range: Range, previous: Option<TokenId>) -> Self {
        Self {
            id,
            kind,
            range,
            previous,
            next: None,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_boundary(&self) -> bool {
        self.kind.is_boundary()
    }

    pub fn is_property_boundary(&self) -> bool {
        self.kind.is_property_boundary()
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }
}
