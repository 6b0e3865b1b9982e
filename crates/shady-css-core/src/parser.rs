//! Recursive-descent parser for shady CSS
//!
//! The parser pulls tokens from a [`Tokenizer`] and dispatches on the kind of
//! the current token:
//!
//! - whitespace is skipped
//! - comments become [`Comment`] nodes
//! - `@` starts an [`AtRule`]
//! - a word starts a declaration-or-ruleset scan
//! - anything else is swallowed, together with the boundary tokens that
//!   follow it, into a [`Discarded`] node
//!
//! The scan after a word is the interesting part: the parser cannot know
//! whether `a:hover` starts a selector or a declaration until it reaches
//! `{`, `}` or `;`. It remembers the first colon it sees (ignoring colons
//! inside parenthesis groups such as `url(http://...)`) and classifies the
//! rule once a terminator shows up.
//!
//! Malformed input never aborts the parse. The worst outcome is a
//! `Discarded` node holding the original text.
//!
//! [`Comment`]: crate::ast::Comment
//! [`AtRule`]: crate::ast::AtRule
//! [`Discarded`]: crate::ast::Discarded

use tracing::{debug, trace, warn};

use crate::ast::{DeclarationValue, Range, Rule, Rulelist, Stylesheet};
use crate::config::ParserConfig;
use crate::node_factory::{DefaultNodeFactory, NodeFactory};
use crate::token::{Token, TokenId, TokenKind};
use crate::tokenizer::Tokenizer;

/// Parse with the default node factory and configuration
pub fn parse(css_text: &str) -> Stylesheet {
    Parser::new().parse(css_text)
}

/// Shady CSS parser
///
/// Holds only its configuration and node factory, so one instance can parse
/// any number of inputs, and separate instances can run on separate threads.
#[derive(Debug, Clone, Default)]
pub struct Parser<F = DefaultNodeFactory> {
    factory: F,
    config: ParserConfig,
}

impl Parser<DefaultNodeFactory> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            factory: DefaultNodeFactory,
            config,
        }
    }
}

impl<F: NodeFactory> Parser<F> {
    /// Parser that builds nodes through a custom factory
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            config: ParserConfig::default(),
        }
    }

    pub fn with_factory_and_config(factory: F, config: ParserConfig) -> Self {
        Self { factory, config }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete stylesheet. Never fails.
    pub fn parse(&self, css_text: &str) -> Stylesheet {
        debug!(bytes = css_text.len(), "parsing stylesheet");
        let mut tokenizer = Tokenizer::new(css_text);
        let stylesheet = self.parse_stylesheet(&mut tokenizer);
        debug!(
            rules = stylesheet.rules.len(),
            tokens = tokenizer.tokens().len(),
            "parsed stylesheet"
        );
        stylesheet
    }

    /// Consume every remaining token into a stylesheet
    pub fn parse_stylesheet(&self, tokenizer: &mut Tokenizer<'_>) -> Stylesheet {
        let rules = self.parse_rules(tokenizer);
        let range = Range::new(0, tokenizer.source().len());
        self.factory.stylesheet(rules, range)
    }

    /// Consume every remaining token as a sequence of top-level rules
    pub fn parse_rules(&self, tokenizer: &mut Tokenizer<'_>) -> Vec<Rule> {
        let mut rules = Vec::new();
        while tokenizer.current_token().is_some() {
            if let Some(rule) = self.parse_rule_at(tokenizer, 0) {
                rules.push(rule);
            }
        }
        rules
    }

    /// Parse one top-level rule
    ///
    /// Returns `None` when the current token was whitespace (it is consumed),
    /// at end of input, or when a trailing fragment is dropped.
    pub fn parse_rule(&self, tokenizer: &mut Tokenizer<'_>) -> Option<Rule> {
        self.parse_rule_at(tokenizer, 0)
    }

    /// `depth` counts the blocks enclosing the rule
    fn parse_rule_at(&self, tokenizer: &mut Tokenizer<'_>, depth: usize) -> Option<Rule> {
        let token = tokenizer.current_token()?;
        trace!(kind = %token.kind, offset = token.start(), depth, "parse_rule");

        match token.kind {
            TokenKind::Whitespace => {
                tokenizer.advance();
                None
            }
            TokenKind::Comment => self.parse_comment(tokenizer).map(Rule::Comment),
            TokenKind::At => self.parse_at_rule(tokenizer, depth),
            TokenKind::Word => self.parse_declaration_or_ruleset(tokenizer, depth),
            _ => self.parse_unknown(tokenizer).map(Rule::Discarded),
        }
    }

    fn parse_comment(&self, tokenizer: &mut Tokenizer<'_>) -> Option<crate::ast::Comment> {
        let token = tokenizer.advance()?;
        let value = tokenizer.slice(token.id, None).to_string();
        Some(self.factory.comment(value, token.range))
    }

    /// Swallow the current token plus any boundary tokens right after it
    fn parse_unknown(&self, tokenizer: &mut Tokenizer<'_>) -> Option<crate::ast::Discarded> {
        let start = tokenizer.advance()?;
        let mut end = None;

        while tokenizer.current_token().is_some_and(|t| t.is_boundary()) {
            end = tokenizer.advance().map(|t| t.id);
        }

        let range = tokenizer.range(start.id, end);
        debug!(%range, "discarding unrecognized fragment");
        let text = range.slice(tokenizer.source()).to_string();
        Some(self.factory.discarded(text, range))
    }

    fn parse_at_rule(&self, tokenizer: &mut Tokenizer<'_>, depth: usize) -> Option<Rule> {
        let at = tokenizer.current_token()?;
        let mut name: Option<(String, Range)> = None;
        let mut rulelist = None;
        let mut parameters_start: Option<TokenId> = None;
        let mut parameters_end: Option<TokenId> = None;

        while let Some(token) = tokenizer.current_token() {
            match token.kind {
                TokenKind::Whitespace => {
                    tokenizer.advance();
                }
                TokenKind::At if name.is_none() => {
                    tokenizer.advance();
                    let mut first: Option<TokenId> = None;
                    let mut last: Option<TokenId> = None;
                    while tokenizer.at(TokenKind::Word) {
                        let word = tokenizer.advance().map(|t| t.id);
                        first = first.or(word);
                        last = word;
                    }
                    let name_range = match first {
                        Some(first) => tokenizer.range(first, last),
                        None => Range::empty(token.end()),
                    };
                    let text = name_range.slice(tokenizer.source()).to_string();
                    name = Some((text, name_range));
                }
                TokenKind::OpenBrace => {
                    if depth >= self.config.max_nesting_depth {
                        return Some(self.discard_block(tokenizer, at.id, depth));
                    }
                    rulelist = Some(self.parse_rulelist(tokenizer, depth + 1));
                    break;
                }
                TokenKind::Semicolon => {
                    tokenizer.advance();
                    break;
                }
                // Closes the enclosing block; leave it for the rulelist
                TokenKind::CloseBrace => break,
                _ => {
                    let id = tokenizer.advance().map(|t| t.id);
                    if parameters_start.is_none() {
                        parameters_start = id;
                    } else {
                        parameters_end = id;
                    }
                }
            }
        }

        let (name, name_range) = name.unwrap_or_else(|| (String::new(), Range::empty(at.end())));
        let (parameters, parameters_range) = match parameters_start {
            Some(first) => {
                let range = tokenizer.range(first, parameters_end);
                (range.slice(tokenizer.source()).to_string(), Some(range))
            }
            None => (String::new(), None),
        };
        let range = self.span_from(tokenizer, at.id);

        Some(Rule::AtRule(self.factory.at_rule(
            name,
            parameters,
            rulelist,
            name_range,
            parameters_range,
            range,
        )))
    }

    /// Parse `{ ... }`; `depth` is the nesting depth of the rules inside
    ///
    /// A missing `}` extends the rulelist through the last non-whitespace token.
    fn parse_rulelist(&self, tokenizer: &mut Tokenizer<'_>, depth: usize) -> Rulelist {
        let mut rules = Vec::new();
        let start = tokenizer
            .advance()
            .map(|t| t.start())
            .unwrap_or_else(|| tokenizer.offset());
        let mut close = None;

        while let Some(token) = tokenizer.current_token() {
            if token.is(TokenKind::CloseBrace) {
                tokenizer.advance();
                close = Some(token);
                break;
            }
            if let Some(rule) = self.parse_rule_at(tokenizer, depth) {
                rules.push(rule);
            }
        }

        let range = match close {
            Some(close) => Range::new(start, close.end()),
            None => {
                let end = tokenizer.last_significant().map_or(start, |t| t.end());
                Range::new(start, end.max(start))
            }
        };
        self.factory.rulelist(rules, range)
    }

    fn parse_declaration_or_ruleset(
        &self,
        tokenizer: &mut Tokenizer<'_>,
        depth: usize,
    ) -> Option<Rule> {
        let mut rule_start: Option<TokenId> = None;
        let mut rule_end: Option<TokenId> = None;
        let mut colon: Option<TokenId> = None;
        // Last significant token before the colon
        let mut name_end: Option<TokenId> = None;

        let stop: Option<Token> = loop {
            let Some(token) = tokenizer.current_token() else {
                break None;
            };
            match token.kind {
                TokenKind::Whitespace => {
                    tokenizer.advance();
                }
                TokenKind::OpenParenthesis => {
                    let close = self.skip_parenthesis_group(tokenizer, token);
                    rule_start = rule_start.or(Some(token.id));
                    rule_end = Some(close);
                }
                kind if kind.is_property_boundary() => break Some(token),
                kind => {
                    if kind == TokenKind::Colon && colon.is_none() {
                        colon = Some(token.id);
                        name_end = rule_end;
                    }
                    tokenizer.advance();
                    rule_start = rule_start.or(Some(token.id));
                    rule_end = Some(token.id);
                }
            }
        };

        let start = rule_start?;
        let end = rule_end.unwrap_or(start);

        let Some(stop) = stop else {
            return self.recover_trailing_fragment(tokenizer, start);
        };

        if stop.is(TokenKind::OpenBrace) {
            if depth >= self.config.max_nesting_depth {
                return Some(self.discard_block(tokenizer, start, depth));
            }

            if colon == Some(end) {
                // Mixin-like declaration: `--name: { ... };`
                let name_range = self.name_range(tokenizer, start, name_end);
                let rulelist = self.parse_rulelist(tokenizer, depth + 1);
                if tokenizer.at(TokenKind::Semicolon) {
                    tokenizer.advance();
                }
                let name = name_range.slice(tokenizer.source()).to_string();
                let range = self.span_from(tokenizer, start);
                return Some(Rule::Declaration(self.factory.declaration(
                    name,
                    Some(DeclarationValue::Rulelist(rulelist)),
                    name_range,
                    range,
                )));
            }

            let selector_range = tokenizer.range(start, Some(end));
            let selector = selector_range.slice(tokenizer.source()).to_string();
            let rulelist = self.parse_rulelist(tokenizer, depth + 1);
            let range = self.span_from(tokenizer, start);
            return Some(Rule::Ruleset(self.factory.ruleset(
                selector,
                rulelist,
                selector_range,
                range,
            )));
        }

        // Stopped on `}` or `;`: a declaration
        let name_range = match colon {
            Some(_) => self.name_range(tokenizer, start, name_end),
            None => tokenizer.range(start, Some(end)),
        };
        let value = match colon {
            Some(colon) if colon != end => tokenizer.next_token(colon).and_then(|after| {
                let first = if after.is_whitespace() {
                    tokenizer.next_token(after.id)?
                } else {
                    after
                };
                let range = tokenizer.range(first.id, Some(end));
                if range.is_empty() {
                    return None;
                }
                let text = range.slice(tokenizer.source()).to_string();
                Some(DeclarationValue::Expression(
                    self.factory.expression(text, range),
                ))
            }),
            _ => None,
        };

        if stop.is(TokenKind::Semicolon) {
            tokenizer.advance();
        }

        let name = name_range.slice(tokenizer.source()).to_string();
        let range = self.span_from(tokenizer, start);
        Some(Rule::Declaration(
            self.factory.declaration(name, value, name_range, range),
        ))
    }

    /// Consume `( ... )` through the matching close parenthesis
    ///
    /// Returns the last consumed token, which is the `)` unless input ran out.
    fn skip_parenthesis_group(
        &self,
        tokenizer: &mut Tokenizer<'_>,
        open_paren: Token,
    ) -> TokenId {
        let mut open = 0usize;
        let mut last = open_paren.id;
        while let Some(token) = tokenizer.advance() {
            last = token.id;
            match token.kind {
                TokenKind::OpenParenthesis => open += 1,
                TokenKind::CloseParenthesis => {
                    open = open.saturating_sub(1);
                    if open == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        last
    }

    /// Name span ending at the last significant token before the colon
    fn name_range(
        &self,
        tokenizer: &Tokenizer<'_>,
        start: TokenId,
        name_end: Option<TokenId>,
    ) -> Range {
        match name_end {
            Some(end) => tokenizer.range(start, Some(end)),
            None => Range::empty(tokenizer.token(start).start()),
        }
    }

    /// Span from `start` through the last consumed non-whitespace token
    ///
    /// Token ends are used as-is: an unterminated comment or string keeps its
    /// trailing whitespace, and the enclosing node has to cover it.
    fn span_from(&self, tokenizer: &Tokenizer<'_>, start: TokenId) -> Range {
        let start = tokenizer.token(start).start();
        let end = tokenizer.last_significant().map_or(start, |t| t.end());
        Range::new(start, end.max(start))
    }

    /// Input ended in the middle of a declaration or selector
    fn recover_trailing_fragment(
        &self,
        tokenizer: &mut Tokenizer<'_>,
        start: TokenId,
    ) -> Option<Rule> {
        let range = self.span_from(tokenizer, start);
        if !self.config.recover_trailing_fragment {
            debug!(%range, "dropping unterminated trailing fragment");
            return None;
        }

        debug!(%range, "keeping unterminated trailing fragment as discarded");
        let text = range.slice(tokenizer.source()).to_string();
        Some(Rule::Discarded(self.factory.discarded(text, range)))
    }

    /// Swallow a rule whose block would exceed the nesting limit
    ///
    /// The current token is the rule's `{`. Braces are counted iteratively
    /// through the matching `}` (or end of input).
    fn discard_block(&self, tokenizer: &mut Tokenizer<'_>, start: TokenId, depth: usize) -> Rule {
        let mut open = 0usize;
        while let Some(token) = tokenizer.advance() {
            match token.kind {
                TokenKind::OpenBrace => open += 1,
                TokenKind::CloseBrace => {
                    open = open.saturating_sub(1);
                    if open == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        let range = self.span_from(tokenizer, start);
        warn!(
            %range,
            depth,
            max_nesting_depth = self.config.max_nesting_depth,
            "nesting limit reached, discarding block"
        );
        let text = range.slice(tokenizer.source()).to_string();
        Rule::Discarded(self.factory.discarded(text, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Declaration, Ruleset};

    fn ruleset(rule: &Rule) -> &Ruleset {
        rule.as_ruleset().expect("expected a ruleset")
    }

    fn declaration(rule: &Rule) -> &Declaration {
        rule.as_declaration().expect("expected a declaration")
    }

    #[test]
    fn test_parse_empty() {
        let sheet = parse("");
        assert!(sheet.rules.is_empty());
        assert_eq!(sheet.range, Range::new(0, 0));
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert!(parse("  \n\t ").rules.is_empty());
    }

    #[test]
    fn test_parse_comment() {
        let sheet = parse("/* hi */");
        assert_eq!(sheet.rules.len(), 1);
        let comment = sheet.rules[0].as_comment().unwrap();
        assert_eq!(comment.value, "/* hi */");
        assert_eq!(comment.range, Range::new(0, 8));
    }

    #[test]
    fn test_parse_ruleset_with_pseudo_class() {
        let sheet = parse("a:hover { color: red; }");
        assert_eq!(sheet.rules.len(), 1);

        let rs = ruleset(&sheet.rules[0]);
        assert_eq!(rs.selector, "a:hover");
        assert_eq!(rs.selector_range, Range::new(0, 7));
        assert_eq!(rs.range, Range::new(0, 23));
        assert_eq!(rs.rulelist.range, Range::new(8, 23));
        assert_eq!(rs.rulelist.rules.len(), 1);

        let decl = declaration(&rs.rulelist.rules[0]);
        assert_eq!(decl.name, "color");
        assert_eq!(decl.name_range, Range::new(10, 15));
        assert_eq!(decl.expression().unwrap().text, "red");
        assert_eq!(decl.expression().unwrap().range, Range::new(17, 20));
        assert_eq!(decl.range, Range::new(10, 21));
    }

    #[test]
    fn test_parse_media_at_rule() {
        let sheet = parse("@media (min-width: 1px) { a { color: red; } } ");
        assert_eq!(sheet.rules.len(), 1);

        let at_rule = sheet.rules[0].as_at_rule().unwrap();
        assert_eq!(at_rule.name, "media");
        assert_eq!(at_rule.name_range, Range::new(1, 6));
        assert_eq!(at_rule.parameters, "(min-width: 1px)");
        assert_eq!(at_rule.parameters_range, Some(Range::new(7, 23)));
        assert_eq!(at_rule.range, Range::new(0, 45));

        let body = at_rule.rulelist.as_ref().unwrap();
        assert_eq!(body.rules.len(), 1);
        assert_eq!(ruleset(&body.rules[0]).selector, "a");
    }

    #[test]
    fn test_parse_statement_at_rule() {
        let sheet = parse("@import url('a.css') screen;");
        let at_rule = sheet.rules[0].as_at_rule().unwrap();
        assert_eq!(at_rule.name, "import");
        assert_eq!(at_rule.parameters, "url('a.css') screen");
        assert!(at_rule.rulelist.is_none());
        assert_eq!(at_rule.range, Range::new(0, 28));
    }

    #[test]
    fn test_parse_at_rule_without_parameters() {
        let sheet = parse("@font-face { font-family: x; }");
        let at_rule = sheet.rules[0].as_at_rule().unwrap();
        assert_eq!(at_rule.name, "font-face");
        assert_eq!(at_rule.parameters, "");
        assert_eq!(at_rule.parameters_range, None);
        assert_eq!(at_rule.rulelist.as_ref().unwrap().rules.len(), 1);
    }

    #[test]
    fn test_parse_mixin_declaration() {
        let sheet = parse("--foo: { color: red; };");
        assert_eq!(sheet.rules.len(), 1);

        let decl = declaration(&sheet.rules[0]);
        assert_eq!(decl.name, "--foo");
        assert_eq!(decl.name_range, Range::new(0, 5));
        assert!(decl.is_mixin());
        assert_eq!(decl.rulelist().unwrap().rules.len(), 1);
        assert_eq!(decl.range, Range::new(0, 23));
    }

    #[test]
    fn test_colon_in_parentheses_is_not_a_separator() {
        let sheet = parse("url(http://x:80/a) { color: red; }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(ruleset(&sheet.rules[0]).selector, "url(http://x:80/a)");
    }

    #[test]
    fn test_nested_parentheses_are_skipped_as_one_group() {
        let sheet = parse("a { background: rgba(0, calc(1 + 2), 3); }");
        let rs = ruleset(&sheet.rules[0]);
        let decl = declaration(&rs.rulelist.rules[0]);
        assert_eq!(decl.name, "background");
        assert_eq!(
            decl.expression().unwrap().text,
            "rgba(0, calc(1 + 2), 3)"
        );
    }

    #[test]
    fn test_resynchronizes_after_garbage() {
        let sheet = parse("}}} a { color: red; }");
        assert_eq!(sheet.rules.len(), 2);
        let discarded = sheet.rules[0].as_discarded().unwrap();
        assert_eq!(discarded.text, "}}}");
        assert_eq!(discarded.range, Range::new(0, 3));
        assert_eq!(ruleset(&sheet.rules[1]).selector, "a");
    }

    #[test]
    fn test_declaration_without_colon() {
        let sheet = parse("a { red; }");
        let decl = declaration(&ruleset(&sheet.rules[0]).rulelist.rules[0]);
        assert_eq!(decl.name, "red");
        assert!(decl.value.is_none());
    }

    #[test]
    fn test_declaration_with_empty_value() {
        let sheet = parse("a { color: ; }");
        let decl = declaration(&ruleset(&sheet.rules[0]).rulelist.rules[0]);
        assert_eq!(decl.name, "color");
        assert!(decl.value.is_none());
        assert_eq!(decl.range, Range::new(4, 12));
    }

    #[test]
    fn test_declaration_name_excludes_space_before_colon() {
        let sheet = parse("a { color : red }");
        let decl = declaration(&ruleset(&sheet.rules[0]).rulelist.rules[0]);
        assert_eq!(decl.name, "color");
        assert_eq!(decl.expression().unwrap().text, "red");
        assert_eq!(decl.range, Range::new(4, 15));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let sheet = parse("a { filter: progid:DXImageTransform; }");
        let decl = declaration(&ruleset(&sheet.rules[0]).rulelist.rules[0]);
        assert_eq!(decl.name, "filter");
        assert_eq!(decl.expression().unwrap().text, "progid:DXImageTransform");
    }

    #[test]
    fn test_last_declaration_without_semicolon() {
        let sheet = parse("a { color: red; background: blue }");
        let rs = ruleset(&sheet.rules[0]);
        assert_eq!(rs.rulelist.rules.len(), 2);
        let decl = declaration(&rs.rulelist.rules[1]);
        assert_eq!(decl.name, "background");
        assert_eq!(decl.expression().unwrap().text, "blue");
    }

    #[test]
    fn test_statement_at_rule_does_not_eat_closing_brace() {
        let sheet = parse("a { @apply --mixin } b { }");
        assert_eq!(sheet.rules.len(), 2);
        let at_rule = ruleset(&sheet.rules[0]).rulelist.rules[0].as_at_rule().unwrap();
        assert_eq!(at_rule.name, "apply");
        assert_eq!(at_rule.parameters, "--mixin");
        assert_eq!(at_rule.range, Range::new(4, 18));
        assert_eq!(ruleset(&sheet.rules[1]).selector, "b");
    }

    #[test]
    fn test_trailing_fragment_is_discarded_by_default() {
        let sheet = parse("a { } color: red");
        assert_eq!(sheet.rules.len(), 2);
        let discarded = sheet.rules[1].as_discarded().unwrap();
        assert_eq!(discarded.text, "color: red");
        assert_eq!(discarded.range, Range::new(6, 16));
    }

    #[test]
    fn test_trailing_fragment_can_be_dropped() {
        let parser =
            Parser::with_config(ParserConfig::default().with_recover_trailing_fragment(false));
        let sheet = parser.parse("a { } color: red");
        assert_eq!(sheet.rules.len(), 1);
    }

    #[test]
    fn test_unterminated_rulelist_extends_to_end() {
        let source = "a { color: red;";
        let sheet = parse(source);
        let rs = ruleset(&sheet.rules[0]);
        assert_eq!(rs.rulelist.range, Range::new(2, source.len()));
        assert_eq!(rs.range, Range::new(0, source.len()));
        assert_eq!(rs.rulelist.rules.len(), 1);
    }

    #[test]
    fn test_unterminated_comment_stays_inside_block() {
        let source = "a{/* ";
        let sheet = parse(source);
        let rs = ruleset(&sheet.rules[0]);
        let comment = rs.rulelist.rules[0].as_comment().unwrap();
        assert_eq!(comment.range, Range::new(2, 5));
        assert_eq!(rs.rulelist.range, Range::new(1, 5));
        assert_eq!(rs.range, Range::new(0, 5));
        assert!(rs.rulelist.range.contains(&comment.range));
    }

    #[test]
    fn test_unterminated_string_stays_inside_block() {
        let source = "a { 'x ";
        let sheet = parse(source);
        let rs = ruleset(&sheet.rules[0]);
        let discarded = rs.rulelist.rules[0].as_discarded().unwrap();
        assert_eq!(discarded.text, "'x ");
        assert_eq!(discarded.range, Range::new(4, 7));
        assert_eq!(rs.rulelist.range, Range::new(2, 7));
        assert_eq!(rs.range, Range::new(0, 7));
    }

    #[test]
    fn test_unterminated_string_parameter_keeps_trailing_space() {
        let source = "@import 'x ";
        let sheet = parse(source);
        let at_rule = sheet.rules[0].as_at_rule().unwrap();
        assert_eq!(at_rule.parameters, "'x ");
        assert_eq!(at_rule.range, Range::new(0, source.len()));
    }

    #[test]
    fn test_nesting_limit_discards_deep_blocks() {
        let parser = Parser::with_config(ParserConfig::default().with_max_nesting_depth(1));
        let sheet = parser.parse("a { b { c { } } color: red; }");
        let rs = ruleset(&sheet.rules[0]);
        assert_eq!(rs.rulelist.rules.len(), 2);
        let discarded = rs.rulelist.rules[0].as_discarded().unwrap();
        assert_eq!(discarded.text, "b { c { } }");
        assert_eq!(declaration(&rs.rulelist.rules[1]).name, "color");
    }

    #[test]
    fn test_string_at_rule_start_is_discarded() {
        let sheet = parse("'x' a { }");
        assert_eq!(sheet.rules[0].as_discarded().unwrap().text, "'x'");
        assert_eq!(ruleset(&sheet.rules[1]).selector, "a");
    }
}
