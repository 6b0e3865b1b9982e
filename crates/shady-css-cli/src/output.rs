//! Output formatting
//!
//! Renders parse trees, token streams and discard reports for the terminal.

use colored::*;
use serde::Serialize;
use shady_css_core::{
    DeclarationValue, Discarded, Range, Result, Rule, ShadyCssError, Stylesheet, Token,
};
use std::path::Path;

use crate::{ConfigFormat, OutputFormat};

const INDENT: &str = "  ";

/// One parsed file, as emitted when several files are serialized together
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTree<'a> {
    pub path: &'a Path,
    pub stylesheet: &'a Stylesheet,
}

/// Serialize a value in one of the structured output formats
pub fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Tree => Err(ShadyCssError::internal_error(
            "tree output is rendered, not serialized",
        )),
    }
}

/// Serialize configuration for `config show`
pub fn serialize_config<T: Serialize>(value: &T, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        ConfigFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        ConfigFormat::Toml => toml::to_string_pretty(value)
            .map_err(|e| ShadyCssError::serialization_error(e.to_string())),
    }
}

/// Render a stylesheet as an indented tree, one node per line
pub fn render_tree(stylesheet: &Stylesheet) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        0,
        &format!("{} {}", "stylesheet".cyan().bold(), range(stylesheet.range)),
    );
    for rule in &stylesheet.rules {
        render_rule(&mut out, rule, 1);
    }
    out
}

fn render_rule(out: &mut String, rule: &Rule, depth: usize) {
    let kind = rule.kind_name();
    let head = match rule {
        Rule::Comment(comment) => format!("{} {:?}", kind.dimmed(), comment.value),
        Rule::AtRule(at_rule) => {
            let mut head = format!("{} @{}", kind.magenta(), at_rule.name);
            if !at_rule.parameters.is_empty() {
                head.push_str(&format!(" {:?}", at_rule.parameters));
            }
            head
        }
        Rule::Ruleset(ruleset) => format!("{} {:?}", kind.cyan(), ruleset.selector),
        Rule::Declaration(decl) => format!("{} {:?}", kind.green(), decl.name),
        Rule::Discarded(discarded) => format!("{} {:?}", kind.yellow().bold(), discarded.text),
    };
    push_line(out, depth, &format!("{head} {}", range(rule.range())));

    match rule {
        Rule::AtRule(at_rule) => {
            if let Some(rulelist) = &at_rule.rulelist {
                for child in &rulelist.rules {
                    render_rule(out, child, depth + 1);
                }
            }
        }
        Rule::Ruleset(ruleset) => {
            for child in &ruleset.rulelist.rules {
                render_rule(out, child, depth + 1);
            }
        }
        Rule::Declaration(decl) => match &decl.value {
            Some(DeclarationValue::Expression(expression)) => push_line(
                out,
                depth + 1,
                &format!(
                    "{} {:?} {}",
                    "expression".blue(),
                    expression.text,
                    range(expression.range)
                ),
            ),
            Some(DeclarationValue::Rulelist(rulelist)) => {
                push_line(
                    out,
                    depth + 1,
                    &format!("{} {}", "rulelist".blue(), range(rulelist.range)),
                );
                for child in &rulelist.rules {
                    render_rule(out, child, depth + 2);
                }
            }
            None => {}
        },
        Rule::Comment(_) | Rule::Discarded(_) => {}
    }
}

/// One token per line: `kind start..end "text"`
pub fn render_tokens(source: &str, tokens: impl IntoIterator<Item = Token>) -> String {
    let mut out = String::new();
    for token in tokens {
        push_line(
            &mut out,
            0,
            &format!(
                "{} {} {:?}",
                token.kind,
                range(token.range),
                token.range.slice(source)
            ),
        );
    }
    out
}

/// `path:line:col: discarded `text`` report line
pub fn format_discarded(path: &Path, source: &str, discarded: &Discarded) -> String {
    let (line, column) = line_col(source, discarded.range.start);
    format!(
        "{}:{}:{}: {} `{}`",
        path.display().to_string().bold(),
        line,
        column,
        "discarded".yellow(),
        discarded.text.escape_debug()
    )
}

/// One-based line and column (in characters) of a byte offset
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Summary line for `check`
pub fn format_check_summary(files: usize, discarded: usize, failed: usize) -> String {
    let files_label = if files == 1 { "file" } else { "files" };
    let mut summary = format!("Checked {files} {files_label}: ");
    if discarded == 0 {
        summary.push_str(&"no discarded fragments".green().to_string());
    } else {
        summary.push_str(&format!("{} discarded", discarded.to_string().yellow()));
    }
    if failed > 0 {
        summary.push_str(&format!(", {} unreadable", failed.to_string().red()));
    }
    summary
}

fn range(range: Range) -> ColoredString {
    range.to_string().dimmed()
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use shady_css_core::{parse, tokenize};

    fn plain<T>(f: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        f()
    }

    #[test]
    fn test_line_col() {
        let source = "a {\n  é: b;\n}";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 2), (1, 3));
        assert_eq!(line_col(source, 6), (2, 3));
        // Columns count characters, not bytes
        let colon = source.find(':').unwrap();
        assert_eq!(line_col(source, colon), (2, 4));
        assert_eq!(line_col(source, source.len()), (3, 2));
    }

    #[test]
    fn test_render_tree() {
        let tree = plain(|| render_tree(&parse("a { --m: { x: y }; }")));
        let expected = "\
stylesheet 0..20
  ruleset \"a\" 0..20
    declaration \"--m\" 4..18
      rulelist 9..17
        declaration \"x\" 11..15
          expression \"y\" 14..15
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_render_tokens() {
        let source = "a{}";
        let out = plain(|| render_tokens(source, tokenize(source)));
        assert_eq!(
            out,
            "word 0..1 \"a\"\nopenBrace 1..2 \"{\"\ncloseBrace 2..3 \"}\"\n"
        );
    }

    #[test]
    fn test_format_discarded() {
        let source = "a { }\n}}}";
        let sheet = parse(source);
        let discarded = sheet.discarded()[0];
        let line = plain(|| format_discarded(Path::new("x.css"), source, discarded));
        assert_eq!(line, "x.css:2:1: discarded `}}}`");
    }

    #[test]
    fn test_tree_is_not_serializable() {
        let sheet = parse("");
        assert!(serialize(&sheet, OutputFormat::Tree).is_err());
        assert!(serialize(&sheet, OutputFormat::Json).is_ok());
    }
}
