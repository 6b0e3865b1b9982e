//! Syntax tree produced by the parser
//!
//! Every node records the [`Range`] of source text it was built from, so
//! downstream rewriters can splice edits into the original stylesheet without
//! re-serializing the tree. Nodes are plain data; they are created through a
//! [`NodeFactory`](crate::NodeFactory) and never mutated by the parser
//! afterwards.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into the parsed source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "range end {end} precedes start {start}");
        Self { start, end }
    }

    /// Zero-width range at `offset`
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely inside this range
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Text covered by this range
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(range: std::ops::Range<usize>) -> Self {
        Range::new(range.start, range.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(range: Range) -> Self {
        range.start..range.end
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Root node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    pub range: Range,
}

impl Stylesheet {
    /// Every discarded fragment in the tree, in source order
    pub fn discarded(&self) -> Vec<&Discarded> {
        let mut found = Vec::new();
        collect_discarded(&self.rules, &mut found);
        found
    }
}

fn collect_discarded<'a>(rules: &'a [Rule], found: &mut Vec<&'a Discarded>) {
    for rule in rules {
        match rule {
            Rule::Discarded(discarded) => found.push(discarded),
            Rule::AtRule(at_rule) => {
                if let Some(rulelist) = &at_rule.rulelist {
                    collect_discarded(&rulelist.rules, found);
                }
            }
            Rule::Ruleset(ruleset) => collect_discarded(&ruleset.rulelist.rules, found),
            Rule::Declaration(declaration) => {
                if let Some(rulelist) = declaration.rulelist() {
                    collect_discarded(&rulelist.rules, found);
                }
            }
            Rule::Comment(_) => {}
        }
    }
}

/// Any node that may appear in a rule sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rule {
    Comment(Comment),
    AtRule(AtRule),
    Ruleset(Ruleset),
    Declaration(Declaration),
    Discarded(Discarded),
}

impl Rule {
    pub fn range(&self) -> Range {
        match self {
            Rule::Comment(node) => node.range,
            Rule::AtRule(node) => node.range,
            Rule::Ruleset(node) => node.range,
            Rule::Declaration(node) => node.range,
            Rule::Discarded(node) => node.range,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Rule::Comment(_) => "comment",
            Rule::AtRule(_) => "atRule",
            Rule::Ruleset(_) => "ruleset",
            Rule::Declaration(_) => "declaration",
            Rule::Discarded(_) => "discarded",
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Rule::Comment(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Rule::AtRule(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_ruleset(&self) -> Option<&Ruleset> {
        match self {
            Rule::Ruleset(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Rule::Declaration(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_discarded(&self) -> Option<&Discarded> {
        match self {
            Rule::Discarded(node) => Some(node),
            _ => None,
        }
    }
}

/// `/* ... */`, delimiters included in `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub value: String,
    pub range: Range,
}

/// `@name parameters;` or `@name parameters { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRule {
    pub name: String,
    pub parameters: String,
    /// Absent for the statement form
    pub rulelist: Option<Rulelist>,
    pub name_range: Range,
    pub parameters_range: Option<Range>,
    pub range: Range,
}

/// The `{ ... }` body of a ruleset, at-rule or mixin declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rulelist {
    pub rules: Vec<Rule>,
    pub range: Range,
}

/// `selector { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ruleset {
    pub selector: String,
    pub rulelist: Rulelist,
    pub selector_range: Range,
    pub range: Range,
}

/// `name: value;`, or the mixin form `name: { ... };`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub name: String,
    /// Absent when nothing but whitespace follows the colon, or there is no colon
    pub value: Option<DeclarationValue>,
    pub name_range: Range,
    pub range: Range,
}

impl Declaration {
    pub fn expression(&self) -> Option<&Expression> {
        match &self.value {
            Some(DeclarationValue::Expression(expression)) => Some(expression),
            _ => None,
        }
    }

    pub fn rulelist(&self) -> Option<&Rulelist> {
        match &self.value {
            Some(DeclarationValue::Rulelist(rulelist)) => Some(rulelist),
            _ => None,
        }
    }

    /// True for the `--name: { ... }` form
    pub fn is_mixin(&self) -> bool {
        self.rulelist().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DeclarationValue {
    Expression(Expression),
    Rulelist(Rulelist),
}

impl DeclarationValue {
    pub fn range(&self) -> Range {
        match self {
            DeclarationValue::Expression(expression) => expression.range,
            DeclarationValue::Rulelist(rulelist) => rulelist.range,
        }
    }
}

/// Opaque declaration value, whitespace-trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub text: String,
    pub range: Range,
}

/// Source text that could not be classified, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discarded {
    pub text: String,
    pub range: Range,
}
