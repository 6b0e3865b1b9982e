//! Command implementations

use rayon::prelude::*;
use shady_css_core::{
    ConfigLoader, Parser, Result, ResultExt, ShadyCssConfig, ShadyCssError, Stylesheet, Tokenizer,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::output::{self, FileTree};
use crate::{ConfigFormat, OutputFormat};

/// A file read from disk together with its parse tree
struct ParsedFile {
    path: PathBuf,
    source: String,
    stylesheet: Stylesheet,
}

fn load_config(config_path: Option<&Path>) -> Result<ShadyCssConfig> {
    let config = ConfigLoader::load(config_path, None)?;
    debug!(
        max_nesting_depth = config.parser.max_nesting_depth,
        recover_trailing_fragment = config.parser.recover_trailing_fragment,
        "Loaded configuration"
    );
    Ok(config)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ShadyCssError::io_error(path, e))
}

/// Read and parse every file in parallel, keeping input order
fn parse_files(paths: &[PathBuf], parser: &Parser) -> Vec<Result<ParsedFile>> {
    info!("Parsing {} files", paths.len());
    paths
        .par_iter()
        .map(|path| -> Result<ParsedFile> {
            let source = read_source(path)?;
            let stylesheet = parser.parse(&source);
            debug!(
                "Parsed {}: {} top-level rules",
                path.display(),
                stylesheet.rules.len()
            );
            Ok(ParsedFile {
                path: path.clone(),
                source,
                stylesheet,
            })
        })
        .collect()
}

/// Parse command implementation
pub fn parse_command(
    paths: &[PathBuf],
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let parser = Parser::with_config(config.parser);
    let files = parse_files(paths, &parser)
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Tree => {
            for file in &files {
                if files.len() > 1 {
                    println!("{}", file.path.display());
                }
                print!("{}", output::render_tree(&file.stylesheet));
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let rendered = match files.as_slice() {
                [single] => output::serialize(&single.stylesheet, format)?,
                _ => {
                    let trees: Vec<FileTree<'_>> = files
                        .iter()
                        .map(|file| FileTree {
                            path: &file.path,
                            stylesheet: &file.stylesheet,
                        })
                        .collect();
                    output::serialize(&trees, format)?
                }
            };
            println!("{}", rendered.trim_end());
        }
    }

    Ok(())
}

/// Tokens command implementation
pub fn tokens_command(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let tokenizer = Tokenizer::new(&source);
    print!("{}", output::render_tokens(&source, tokenizer));
    Ok(())
}

/// Check command implementation
///
/// Prints one line per discarded fragment. Exits with status 1 when a file
/// cannot be read, or when `strict` is set and anything was discarded.
pub fn check_command(paths: &[PathBuf], strict: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let parser = Parser::with_config(config.parser);

    let mut discarded_count = 0;
    let mut failed = 0;

    for result in parse_files(paths, &parser) {
        // Unreadable files are reported and skipped
        let Some(file) = result.recoverable()? else {
            failed += 1;
            continue;
        };
        for discarded in file.stylesheet.discarded() {
            println!(
                "{}",
                output::format_discarded(&file.path, &file.source, discarded)
            );
            discarded_count += 1;
        }
    }

    println!(
        "{}",
        output::format_check_summary(paths.len(), discarded_count, failed)
    );

    if failed > 0 || (strict && discarded_count > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Config show command implementation
pub fn config_show_command(format: ConfigFormat, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let rendered = output::serialize_config(&config, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Config schema command implementation
pub fn config_schema_command() -> Result<()> {
    println!("{}", ShadyCssConfig::json_schema()?);
    Ok(())
}
