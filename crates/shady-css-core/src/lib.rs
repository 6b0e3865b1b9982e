//! Shady CSS Core
//!
//! A permissive parser for CSS extended with mixin-like nested declarations
//! (`--name: { ... };`). It produces a syntax tree whose nodes carry source
//! ranges, meant for tools that rewrite selectors or inline declarations
//! without disturbing the rest of the stylesheet.
//!
//! The parser never rejects input. Anything it cannot classify is kept
//! verbatim in a [`Discarded`] node and parsing resumes at the next
//! structural boundary.
//!
//! ```rust
//! use shady_css_core::{Rule, parse};
//!
//! let sheet = parse("a:hover { color: red; }");
//! let Rule::Ruleset(ruleset) = &sheet.rules[0] else { panic!() };
//! assert_eq!(ruleset.selector, "a:hover");
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod node_factory;
pub mod parser;
pub mod result;
pub mod token;
pub mod tokenizer;

pub use ast::{
    AtRule, Comment, Declaration, DeclarationValue, Discarded, Expression, Range, Rule, Rulelist,
    Ruleset, Stylesheet,
};
pub use config::{ConfigLoader, ParserConfig, ShadyCssConfig};
pub use error::{ErrorKind, ShadyCssError};
pub use node_factory::{DefaultNodeFactory, NodeFactory};
pub use parser::{Parser, parse};
pub use result::{Result, ResultExt};
pub use token::{Token, TokenId, TokenKind};
pub use tokenizer::{Tokenizer, tokenize};

/// Initialize the tracing subscriber for logging
///
/// `default_filter` applies when `RUST_LOG` is not set.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed (tests, embedding applications)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
