use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory in which to begin scanning
    #[arg(value_name = "DIR", required = false)]
    pub dir: Option<PathBuf>,

    /// Path to a configuration file (defaults to codecomb.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write the combined output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub recursive: bool,

    /// Skip files smaller than this many bytes
    #[arg(long = "min-size", value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Only consider files with this extension (e.g. "go" or ".go")
    #[arg(long = "ext", value_name = "EXT")]
    pub ext: Option<String>,

    /// Skip files last modified before this RFC 3339 timestamp
    #[arg(long = "modified-since", value_name = "TIMESTAMP")]
    pub modified_since: Option<String>,

    /// Do not extract import declarations
    #[arg(long = "no-imports", action = ArgAction::SetTrue)]
    pub no_imports: bool,

    /// Do not extract global variable declarations
    #[arg(long = "no-globals", action = ArgAction::SetTrue)]
    pub no_globals: bool,

    /// Do not extract function signatures
    #[arg(long = "no-functions", action = ArgAction::SetTrue)]
    pub no_functions: bool,

    /// Generate a descriptive comment for each extracted function
    #[arg(long = "comments", action = ArgAction::SetTrue)]
    pub comments: bool,

    /// API key for the summary service (falls back to OPENAI_API_KEY)
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Do not respect .gitignore entries
    #[arg(long = "no-gitignore", action = ArgAction::SetTrue)]
    pub no_gitignore: bool,

    /// Additional ignore file(s) to apply
    #[arg(long = "ignore-file", value_name = "FILE")]
    pub ignore_file: Vec<PathBuf>,

    /// Exclude glob pattern(s)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,
}
