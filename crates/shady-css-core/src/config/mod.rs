//! Configuration for the parser and tooling
//!
//! Configuration is read from the first of these files found while walking up
//! from the working directory:
//! - `.shadycssrc.json`
//! - `.shadycssrc.toml`
//! - `shady-css.yaml` / `shady-css.yml`
//!
//! ## Example Configuration
//!
//! ```json
//! {
//!   "parser": {
//!     "maxNestingDepth": 64,
//!     "recoverTrailingFragment": true
//!   }
//! }
//! ```

mod loader;
mod parser_config;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use parser_config::{DEFAULT_MAX_NESTING_DEPTH, ParserConfig, ShadyCssConfig};
