//! CLI interface using clap
//!
//! Provides the command-line interface for DocFresh

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};

/// DocFresh - Git-history based documentation freshness checker
#[derive(Parser, Debug)]
#[command(name = "docfresh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether a document (or every document under a directory) is stale
    Check(CheckArgs),

    /// Search docs for a topic and show their freshness
    Search(SearchArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Document to check (or a directory with --dir)
    pub target: String,

    /// Check every documentation file under the target directory
    #[arg(short, long)]
    pub dir: bool,
}

/// Arguments for search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Topic to search documentation for
    pub topic: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
