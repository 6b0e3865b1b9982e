//! Node construction hooks
//!
//! The parser builds every node through a [`NodeFactory`]. Each method has a
//! default body that returns the plain node, so an implementor only overrides
//! the node kinds it cares about. Typical uses are streaming analysis (observe
//! nodes as the parser completes them) and in-place rewriting (return a
//! modified node, e.g. a scoped selector).
//!
//! Factories take `&self`. Keep them stateless, or use interior mutability
//! that is safe for the way the parser is shared.

use crate::ast::{
    AtRule, Comment, Declaration, DeclarationValue, Discarded, Expression, Range, Rule, Rulelist,
    Ruleset, Stylesheet,
};

pub trait NodeFactory {
    /// Root node holding the top-level rules
    fn stylesheet(&self, rules: Vec<Rule>, range: Range) -> Stylesheet {
        Stylesheet { rules, range }
    }

    /// `@name parameters` with an optional block body
    fn at_rule(
        &self,
        name: String,
        parameters: String,
        rulelist: Option<Rulelist>,
        name_range: Range,
        parameters_range: Option<Range>,
        range: Range,
    ) -> AtRule {
        AtRule {
            name,
            parameters,
            rulelist,
            name_range,
            parameters_range,
            range,
        }
    }

    /// `value` is the full comment text including `/*` and `*/`
    fn comment(&self, value: String, range: Range) -> Comment {
        Comment { value, range }
    }

    fn rulelist(&self, rules: Vec<Rule>, range: Range) -> Rulelist {
        Rulelist { rules, range }
    }

    fn ruleset(
        &self,
        selector: String,
        rulelist: Rulelist,
        selector_range: Range,
        range: Range,
    ) -> Ruleset {
        Ruleset {
            selector,
            rulelist,
            selector_range,
            range,
        }
    }

    fn declaration(
        &self,
        name: String,
        value: Option<DeclarationValue>,
        name_range: Range,
        range: Range,
    ) -> Declaration {
        Declaration {
            name,
            value,
            name_range,
            range,
        }
    }

    /// `text` is the declaration value, e.g. `url(img.jpg)`
    fn expression(&self, text: String, range: Range) -> Expression {
        Expression { text, range }
    }

    /// Unparseable content, usually a typo or unrecognized syntax
    fn discarded(&self, text: String, range: Range) -> Discarded {
        Discarded { text, range }
    }
}

/// Builds plain nodes with no extra behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultNodeFactory;

impl NodeFactory for DefaultNodeFactory {}

impl<F: NodeFactory + ?Sized> NodeFactory for &F {
    fn stylesheet(&self, rules: Vec<Rule>, range: Range) -> Stylesheet {
        (**self).stylesheet(rules, range)
    }

    fn at_rule(
        &self,
        name: String,
        parameters: String,
        rulelist: Option<Rulelist>,
        name_range: Range,
        parameters_range: Option<Range>,
        range: Range,
    ) -> AtRule {
        (**self).at_rule(name, parameters, rulelist, name_range, parameters_range, range)
    }

    fn comment(&self, value: String, range: Range) -> Comment {
        (**self).comment(value, range)
    }

    fn rulelist(&self, rules: Vec<Rule>, range: Range) -> Rulelist {
        (**self).rulelist(rules, range)
    }

    fn ruleset(
        &self,
        selector: String,
        rulelist: Rulelist,
        selector_range: Range,
        range: Range,
    ) -> Ruleset {
        (**self).ruleset(selector, rulelist, selector_range, range)
    }

    fn declaration(
        &self,
        name: String,
        value: Option<DeclarationValue>,
        name_range: Range,
        range: Range,
    ) -> Declaration {
        (**self).declaration(name, value, name_range, range)
    }

    fn expression(&self, text: String, range: Range) -> Expression {
        (**self).expression(text, range)
    }

    fn discarded(&self, text: String, range: Range) -> Discarded {
        (**self).discarded(text, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factory_builds_plain_nodes() {
        let factory = DefaultNodeFactory;
        let comment = factory.comment("/* x */".to_string(), Range::new(0, 7));
        assert_eq!(comment.value, "/* x */");
        assert_eq!(comment.range, Range::new(0, 7));

        let rulelist = factory.rulelist(Vec::new(), Range::new(3, 5));
        let ruleset = factory.ruleset("a".to_string(), rulelist, Range::new(0, 1), Range::new(0, 5));
        assert_eq!(ruleset.selector, "a");
        assert!(ruleset.rulelist.rules.is_empty());
    }

    #[test]
    fn overriding_one_method_keeps_the_rest() {
        struct Upper;
        impl NodeFactory for Upper {
            fn expression(&self, text: String, range: Range) -> Expression {
                Expression {
                    text: text.to_uppercase(),
                    range,
                }
            }
        }

        let factory = Upper;
        assert_eq!(factory.expression("red".into(), Range::new(0, 3)).text, "RED");
        assert_eq!(factory.discarded("}".into(), Range::new(0, 1)).text, "}");
        assert_eq!((&factory).expression("a".into(), Range::new(0, 1)).text, "A");
    }
}
