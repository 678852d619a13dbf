//! Command-line parsing and the resolved [`Config`] it produces.

use std::path::PathBuf;

use clap::Parser as ClapParser;

/// The input file defaults to this name when no path is given on the
/// command line (section 6: "the harness supplies `codigo_fonte.txt`").
const DEFAULT_SOURCE_PATH: &str = "codigo_fonte.txt";

#[derive(Debug, ClapParser)]
#[command(name = "lingc")]
#[command(author = "Fax Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexical, syntactic, and semantic front end for the lingc language")]
struct Cli {
    /// Source file to analyze.
    #[arg(default_value = DEFAULT_SOURCE_PATH)]
    path: PathBuf,

    /// Run only the lexical-display pass; skip parsing and semantic analysis.
    #[arg(long)]
    tokens_only: bool,

    /// Suppress the memory-footprint placeholder and pass banners.
    #[arg(long)]
    quiet: bool,
}

/// Resolved run configuration, independent of how it was obtained.
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub tokens_only: bool,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_SOURCE_PATH), tokens_only: false, quiet: false }
    }
}

impl Config {
    /// Parses `std::env::args()` into a [`Config`].
    pub fn from_args() -> Self {
        let cli = Cli::parse();
        Self { path: cli.path, tokens_only: cli.tokens_only, quiet: cli.quiet }
    }
}
