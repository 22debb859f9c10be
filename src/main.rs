//! DocFresh - Git-history based documentation freshness checker
//!
//! Compares a document's last commit time against the last commit times of
//! the source files it depends on, and reports how far behind it is.

use anyhow::Result;
use clap::Parser;
use docfresh::cli::{check_dir, check_file, search, Cli, Commands};
use docfresh::Repository;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging (stderr, so JSON output on stdout stays clean)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    // Project root is discovered once and threaded into every check
    let repo = Repository::discover()?;

    match &cli.command {
        Commands::Check(args) => {
            let target = Path::new(&args.target);
            if args.dir {
                check_dir(&repo, target, cli.format)
            } else {
                check_file(&repo, target, cli.format)
            }
        }
        Commands::Search(args) => search(&repo, &args.topic),
    }
}
