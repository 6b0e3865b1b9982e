//! Pull-based scanner for shady CSS
//!
//! The tokenizer walks the source once, left to right, and only scans a token
//! when the parser asks for it. Every scanned token is appended to an arena so
//! the parser can step back through `previous`/`next` links when it needs to
//! trim a delimiter off a captured span.
//!
//! Scanning rules:
//! - whitespace runs become one `Whitespace` token
//! - `'...'` / `"..."` become one `String` token (backslash escapes the next char)
//! - `/* ... */` becomes one `Comment` token, running to end of input if unterminated
//! - each of `( ) { } @ ; :` is a single-character token
//! - everything else is a `Word` running up to the next boundary or whitespace
//!
//! Parenthesis balancing is left to the parser.

use crate::ast::Range;
use crate::token::{Token, TokenId, TokenKind};

/// Characters that end a word token
fn is_word_terminator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '(' | ')' | '{' | '}' | '\'' | '"' | '@' | ';' | ':'
        )
}

pub struct Tokenizer<'a> {
    source: &'a str,
    offset: usize,
    tokens: Vec<Token>,
    /// Scanned but not yet consumed
    current: Option<TokenId>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            tokens: Vec::new(),
            current: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Token at the read cursor, without consuming it
    pub fn current_token(&mut self) -> Option<Token> {
        if self.current.is_none() {
            self.current = self.scan_next();
        }
        self.current.map(|id| self.tokens[id])
    }

    /// Kind of the token at the read cursor
    pub fn current_kind(&mut self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// True when the token at the read cursor has the given kind
    pub fn at(&mut self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume and return the token at the read cursor
    pub fn advance(&mut self) -> Option<Token> {
        let id = match self.current.take() {
            Some(id) => Some(id),
            None => self.scan_next(),
        };
        id.map(|id| self.tokens[id])
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id]
    }

    pub fn previous_token(&self, id: TokenId) -> Option<Token> {
        self.tokens[id].previous.map(|prev| self.tokens[prev])
    }

    /// Following token, if it has been scanned already
    pub fn next_token(&self, id: TokenId) -> Option<Token> {
        self.tokens[id].next.map(|next| self.tokens[next])
    }

    /// Text of a single token
    pub fn text(&self, id: TokenId) -> &'a str {
        self.tokens[id].range.slice(self.source)
    }

    /// Range from the start of `from` through the end of `to` (or `from` alone)
    ///
    /// A `to` that ends before `from` starts yields an empty range at
    /// `from.start`, which happens when the span between two delimiters is
    /// empty.
    pub fn range(&self, from: TokenId, to: Option<TokenId>) -> Range {
        let start = self.tokens[from].range.start;
        let end = match to {
            Some(to) => self.tokens[to].range.end,
            None => self.tokens[from].range.end,
        };
        Range::new(start, end.max(start))
    }

    /// Source text from the start of `from` through the end of `to` (or `from` alone)
    pub fn slice(&self, from: TokenId, to: Option<TokenId>) -> &'a str {
        self.range(from, to).slice(self.source)
    }

    /// Shrink a range so it neither starts nor ends with whitespace
    pub fn trim_range(&self, range: Range) -> Range {
        let text = range.slice(self.source);
        let leading = text.len() - text.trim_start().len();
        let trimmed = text.trim();
        let start = range.start + leading;
        Range::new(start, start + trimmed.len())
    }

    /// Offset of the first byte not yet scanned
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Last consumed token that is not whitespace
    pub fn last_significant(&self) -> Option<Token> {
        let consumed = self.current.unwrap_or(self.tokens.len());
        let mut token = self.tokens[..consumed].last().copied();
        while let Some(t) = token.filter(Token::is_whitespace) {
            token = self.previous_token(t.id);
        }
        token
    }

    /// Tokens scanned so far, in source order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn scan_next(&mut self) -> Option<TokenId> {
        let rest = &self.source[self.offset..];
        let first = rest.chars().next()?;
        let start = self.offset;

        let (kind, end) = if first.is_whitespace() {
            (TokenKind::Whitespace, self.scan_whitespace(start))
        } else if first == '"' || first == '\'' {
            (TokenKind::String, self.scan_string(start, first))
        } else if rest.starts_with("/*") {
            (TokenKind::Comment, self.scan_comment(start))
        } else if let Some(kind) = TokenKind::from_boundary_char(first) {
            (kind, start + first.len_utf8())
        } else {
            (TokenKind::Word, self.scan_word(start))
        };

        self.offset = end;
        Some(self.push(kind, Range::new(start, end)))
    }

    fn push(&mut self, kind: TokenKind, range: Range) -> TokenId {
        let id = self.tokens.len();
        let previous = id.checked_sub(1);
        if let Some(prev) = previous {
            self.tokens[prev].next = Some(id);
        }
        self.tokens.push(Token::new(id, kind, range, previous));
        id
    }

    fn scan_whitespace(&self, start: usize) -> usize {
        let rest = &self.source[start..];
        let run = rest
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        start + run
    }

    fn scan_string(&self, start: usize, quote: char) -> usize {
        let body_start = start + quote.len_utf8();
        let mut escaped = false;
        for (i, c) in self.source[body_start..].char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return body_start + i + c.len_utf8();
            }
        }
        self.source.len()
    }

    fn scan_comment(&self, start: usize) -> usize {
        let body_start = start + 2;
        match self.source[body_start..].find("*/") {
            Some(i) => body_start + i + 2,
            None => self.source.len(),
        }
    }

    fn scan_word(&self, start: usize) -> usize {
        let rest = &self.source[start..];
        let run = rest
            .char_indices()
            .find(|(_, c)| is_word_terminator(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        start + run
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.advance()
    }
}

/// Scan the whole input eagerly, returning the linked token arena
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(source);
    while tokenizer.advance().is_some() {}
    tokenizer.into_tokens()
}
