//! Property-based tests for the tokenizer and parser
//!
//! Inputs are stitched together from CSS-like fragments so that braces,
//! colons and strings collide in every arrangement, plus fully arbitrary
//! text for the no-panic checks.

use proptest::prelude::*;
use shady_css_core::{DeclarationValue, Range, Rule, Stylesheet, TokenKind, parse, tokenize};

fn fragment_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a", "--m", "b.c", "-x", ":", ";", "{", "}", "(", ")", "@media", "@", " ", "\n  ",
        "/*", "*/", "'", "\"", "\\", "red", "url(x:y)", "é", "0", ",",
    ])
    .prop_map(str::to_string)
}

fn css_like_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..48).prop_map(|parts| parts.concat())
}

/// Ranges of the fields a rule owns directly, excluding child rules
fn field_ranges(rule: &Rule) -> Vec<Range> {
    match rule {
        Rule::Comment(_) | Rule::Discarded(_) => Vec::new(),
        Rule::AtRule(at_rule) => {
            let mut ranges = vec![at_rule.name_range];
            ranges.extend(at_rule.parameters_range);
            ranges.extend(at_rule.rulelist.as_ref().map(|r| r.range));
            ranges
        }
        Rule::Ruleset(ruleset) => vec![ruleset.selector_range, ruleset.rulelist.range],
        Rule::Declaration(decl) => {
            let mut ranges = vec![decl.name_range];
            ranges.extend(decl.value.as_ref().map(DeclarationValue::range));
            ranges
        }
    }
}

fn child_rules(rule: &Rule) -> &[Rule] {
    match rule {
        Rule::AtRule(at_rule) => at_rule
            .rulelist
            .as_ref()
            .map(|r| r.rules.as_slice())
            .unwrap_or(&[]),
        Rule::Ruleset(ruleset) => &ruleset.rulelist.rules,
        Rule::Declaration(decl) => decl.rulelist().map(|r| r.rules.as_slice()).unwrap_or(&[]),
        Rule::Comment(_) | Rule::Discarded(_) => &[],
    }
}

/// Check nesting, ordering and verbatim text for a list of sibling rules
fn check_rules(source: &str, parent: Range, rules: &[Rule]) -> Result<(), TestCaseError> {
    let mut cursor = parent.start;
    for rule in rules {
        let range = rule.range();
        prop_assert!(
            parent.contains(&range),
            "{range} escapes parent {parent} in {source:?}"
        );
        prop_assert!(cursor <= range.start, "{range} overlaps a sibling in {source:?}");
        cursor = range.end;

        for field in field_ranges(rule) {
            prop_assert!(range.contains(&field), "{field} escapes {range} in {source:?}");
        }

        match rule {
            Rule::Discarded(discarded) => {
                prop_assert!(!discarded.text.is_empty());
                prop_assert_eq!(discarded.text.as_str(), range.slice(source));
            }
            Rule::Comment(comment) => {
                prop_assert!(comment.value.starts_with("/*"));
                prop_assert_eq!(comment.value.as_str(), range.slice(source));
            }
            _ => {}
        }

        let inner = match rule {
            Rule::AtRule(at_rule) => at_rule.rulelist.as_ref().map(|r| r.range),
            Rule::Ruleset(ruleset) => Some(ruleset.rulelist.range),
            Rule::Declaration(decl) => decl.rulelist().map(|r| r.range),
            _ => None,
        };
        if let Some(inner) = inner {
            check_rules(source, inner, child_rules(rule))?;
        }
    }
    Ok(())
}

/// Everything between top-level rules must be whitespace
fn check_coverage(source: &str, sheet: &Stylesheet) -> Result<(), TestCaseError> {
    let mut cursor = 0;
    for rule in &sheet.rules {
        let range = rule.range();
        let gap = &source[cursor..range.start];
        prop_assert!(
            gap.trim().is_empty(),
            "unaccounted text {gap:?} before {range} in {source:?}"
        );
        cursor = range.end;
    }
    let tail = &source[cursor..];
    prop_assert!(tail.trim().is_empty(), "unaccounted tail {tail:?} in {source:?}");
    Ok(())
}

/// Rebuild the input from top-level nodes and the gaps between them
///
/// Discarded fragments and comments contribute their stored text rather than
/// a slice, so the result only matches when that text is verbatim and every
/// byte of the input is accounted for.
fn rebuild(source: &str, sheet: &Stylesheet) -> String {
    let mut rebuilt = String::with_capacity(source.len());
    let mut cursor = 0;
    for rule in &sheet.rules {
        let range = rule.range();
        rebuilt.push_str(&source[cursor..range.start]);
        match rule {
            Rule::Discarded(discarded) => rebuilt.push_str(&discarded.text),
            Rule::Comment(comment) => rebuilt.push_str(&comment.value),
            _ => rebuilt.push_str(range.slice(source)),
        }
        cursor = range.end;
    }
    rebuilt.push_str(&source[cursor..]);
    rebuilt
}

proptest! {
    #[test]
    fn test_tokenize_never_panics(input in "\\PC*") {
        let _tokens = tokenize(&input);
    }

    #[test]
    fn test_parse_never_panics(input in "\\PC*") {
        let _sheet = parse(&input);
    }

    #[test]
    fn test_tokens_tile_the_source(input in css_like_strategy()) {
        let tokens = tokenize(&input);
        let mut cursor = 0;
        for (index, token) in tokens.iter().enumerate() {
            prop_assert_eq!(token.id, index);
            prop_assert_eq!(token.start(), cursor);
            prop_assert!(token.end() > token.start());
            cursor = token.end();
        }
        prop_assert_eq!(cursor, input.len());
    }

    #[test]
    fn test_whitespace_tokens_are_maximal(input in css_like_strategy()) {
        let tokens = tokenize(&input);
        for pair in tokens.windows(2) {
            prop_assert!(
                !(pair[0].is(TokenKind::Whitespace) && pair[1].is(TokenKind::Whitespace))
            );
        }
    }

    #[test]
    fn test_ranges_nest_and_never_overlap(input in css_like_strategy()) {
        let sheet = parse(&input);
        prop_assert_eq!(sheet.range, Range::new(0, input.len()));
        check_rules(&input, sheet.range, &sheet.rules)?;
    }

    #[test]
    fn test_top_level_rules_cover_all_text(input in css_like_strategy()) {
        let sheet = parse(&input);
        check_coverage(&input, &sheet)?;
    }

    #[test]
    fn test_top_level_nodes_rebuild_the_input(input in css_like_strategy()) {
        let sheet = parse(&input);
        prop_assert_eq!(rebuild(&input, &sheet), input);
    }

    #[test]
    fn test_parse_is_deterministic(input in css_like_strategy()) {
        prop_assert_eq!(parse(&input), parse(&input));
    }
}
