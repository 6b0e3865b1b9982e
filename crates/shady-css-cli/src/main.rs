//! Shady CSS CLI
//!
//! Command-line interface for inspecting shady CSS parse trees

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use shady_css_core::{Result, init_tracing};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "shady-css")]
#[command(about = "Shady CSS: permissive CSS parser with mixin-like custom property blocks")]
#[command(version = shady_css_core::VERSION)]
#[command(
    long_about = "Shady CSS parses CSS extended with `--name: { ... };` blocks.\n\
Malformed input never fails; unrecognized text is kept as discarded fragments.\n\
\n\
Examples:\n  \
shady-css parse theme.css              # Print the syntax tree\n  \
shady-css parse --format json a.css    # Print the tree as JSON\n  \
shady-css tokens theme.css             # Print the token stream\n  \
shady-css check --strict src/*.css     # Fail when fragments were discarded\n  \
shady-css config schema                # Print the config file JSON schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.shadycssrc.json/.shadycssrc.toml/shady-css.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse stylesheets and print their syntax trees
    Parse {
        /// Files to parse
        #[arg(required = true, help = "Stylesheets to parse")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "tree", help = "Output format for the tree")]
        format: OutputFormat,
    },

    /// Print the token stream of a stylesheet
    Tokens {
        /// File to tokenize
        path: PathBuf,
    },

    /// Report fragments the parser had to discard
    Check {
        /// Files to check
        #[arg(required = true, help = "Stylesheets to check")]
        paths: Vec<PathBuf>,

        /// Exit with non-zero code when anything was discarded
        #[arg(long, help = "Exit with non-zero code when fragments were discarded")]
        strict: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output format
        #[arg(short, long, default_value = "json")]
        format: ConfigFormat,
    },

    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented, human-readable tree
    Tree,
    /// JSON with tagged nodes
    Json,
    /// YAML with tagged nodes
    Yaml,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&log_filter(cli.verbose));

    match run_command(cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("shady-css failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Filter directive for the requested verbosity
fn log_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("shady_css={level},shady_css_core={level}")
}

fn run_command(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Parse { paths, format }) => {
            commands::parse_command(&paths, format, config_path)
        }
        Some(Commands::Tokens { path }) => commands::tokens_command(&path),
        Some(Commands::Check { paths, strict }) => {
            commands::check_command(&paths, strict, config_path)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show { format } => commands::config_show_command(format, config_path),
            ConfigAction::Schema => commands::config_schema_command(),
        },
        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
