//! Command implementations

use crate::extract::Dialect;
use crate::repo::Repository;
use crate::staleness::{StalenessChecker, StalenessResult};
use anyhow::Result;
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::OutputFormat;

/// Exit code when no errors and no stale documents were found
pub const EXIT_FRESH: u8 = 0;
/// Exit code when at least one stale document was found
pub const EXIT_STALE: u8 = 1;
/// Exit code when an error prevented a meaningful verdict
pub const EXIT_ERROR: u8 = 2;

/// One document's check outcome, for JSON output
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Document path as given or discovered
    pub path: String,
    #[serde(flatten)]
    pub result: StalenessResult,
}

/// Check a single document's freshness
pub fn check_file(repo: &Repository, path: &Path, format: OutputFormat) -> Result<u8> {
    if !path.is_file() {
        anyhow::bail!("{} is not a file", path.display());
    }

    let checker = StalenessChecker::new(repo.root());
    let result = checker.evaluate(path);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_single(path, &result),
    }

    Ok(exit_code_for(&result))
}

/// Check every documentation file under a directory
pub fn check_dir(repo: &Repository, dir: &Path, format: OutputFormat) -> Result<u8> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let docs = discover_docs(repo, dir);
    if docs.is_empty() {
        println!("No documentation files found.");
        return Ok(EXIT_FRESH);
    }

    let checker = StalenessChecker::new(repo.root());
    let mut reports = Vec::with_capacity(docs.len());
    for doc in docs {
        let result = checker.evaluate(&doc);
        reports.push(CheckReport {
            path: doc.display().to_string(),
            result,
        });
    }

    let stale_count = reports.iter().filter(|r| r.result.stale).count();
    let error_count = reports.iter().filter(|r| r.result.error.is_some()).count();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_batch(dir, &reports, stale_count, error_count),
    }

    if stale_count == 0 && error_count == 0 {
        Ok(EXIT_FRESH)
    } else if stale_count > 0 {
        Ok(EXIT_STALE)
    } else {
        Ok(EXIT_ERROR)
    }
}

/// Search docs mentioning a topic and show their freshness.
///
/// Discovery is a direct shell-out to grep; the staleness core has no role
/// in it.
pub fn search(repo: &Repository, topic: &str) -> Result<u8> {
    println!("Searching docs for: {}\n", topic);

    // -e prevents the topic from being interpreted as a flag
    let output = Command::new("grep")
        .args(["-ri", "--include=*.md", "-l", "-e", topic, "."])
        .output();

    let output = match output {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("Error: 'grep' command not found. Please install grep.");
            return Ok(EXIT_ERROR);
        }
        Err(e) => {
            eprintln!("Error running grep: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // grep exit code 2 is a real failure; 1 just means "no matches"
    if output.status.code() == Some(2) {
        eprintln!(
            "Error: grep failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(EXIT_ERROR);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let config = repo.config();
    let files: Vec<&str> = stdout
        .lines()
        .filter(|line| !line.is_empty())
        .filter(|line| !config.exclude_dirs.iter().any(|d| line.contains(d.as_str())))
        .collect();

    if files.is_empty() {
        println!("No docs found.");
        return Ok(EXIT_FRESH);
    }

    println!("Found {} doc(s):\n", files.len());
    println!("{:<14} {:<10} {:<12} {}", "Status", "Source", "Updated", "Path");
    println!("{}", "-".repeat(75));

    let checker = StalenessChecker::new(repo.root());
    let limit = config.max_search_results;

    for file in files.iter().take(limit) {
        let result = checker.evaluate(Path::new(file));

        let (status, source, date) = if result.error.is_some() {
            ("? Error".to_string(), "-".to_string(), "N/A".to_string())
        } else {
            let date = result.doc_time.map_or("N/A".to_string(), format_time);
            let source = result.detection_source.to_string();
            if result.stale {
                let behind = format_time_behind(result.days_behind, result.hours_behind);
                (format!("⚠ STALE({})", behind), source, date)
            } else {
                ("✓ Fresh".to_string(), source, date)
            }
        };

        println!("{:<14} {:<10} {:<12} {}", status, source, date, file);
    }

    if files.len() > limit {
        println!("\n... and {} more docs", files.len() - limit);
    }

    println!("\nSource: 'explicit' = parsed from doc, 'directory' = checked same dir");
    println!("⚠ STALE = dependencies changed after doc was updated");

    Ok(EXIT_FRESH)
}

/// Map a result onto the 0/1/2 exit-code contract
fn exit_code_for(result: &StalenessResult) -> u8 {
    if result.error.is_some() {
        EXIT_ERROR
    } else if result.stale {
        EXIT_STALE
    } else {
        EXIT_FRESH
    }
}

/// Recursively discover prose documents under `dir`, skipping hidden and
/// excluded directories
fn discover_docs(repo: &Repository, dir: &Path) -> Vec<PathBuf> {
    let config = repo.config();

    let mut docs: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            !name.starts_with('.') && !config.is_excluded_dir(name)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| Dialect::for_path(path) == Dialect::Prose)
        .collect();

    docs.sort();
    docs
}

fn print_single(path: &Path, result: &StalenessResult) {
    if let Some(ref error) = result.error {
        eprintln!("Error: {}", error);
    } else if result.stale {
        println!("⚠ STALE: {}", path.display());
        if let Some(time) = result.doc_time {
            println!("   Doc updated:  {}", format_time(time));
        }
        if let Some(time) = result.newest_dependency_time {
            println!("   Code updated: {}", format_time(time));
        }
        if let Some(ref dep) = result.newest_dependency_path {
            println!("   Changed file: {}", dep);
        }
        println!(
            "   Detection:    {} ({} deps checked)",
            result.detection_source, result.dependency_count
        );
        println!(
            "   Time behind:  {}",
            format_time_behind(result.days_behind, result.hours_behind)
        );
        println!("\n→ Consider updating this doc to reflect recent code changes");
    } else {
        println!("✓ Fresh: {}", path.display());
        if let Some(time) = result.doc_time {
            println!("   Last updated: {}", format_time(time));
        }
        println!("   Detection: {}", result.detection_source);
        if let Some(ref reason) = result.reason {
            println!("   Note: {}", reason);
        }
    }
}

fn print_batch(dir: &Path, reports: &[CheckReport], stale_count: usize, error_count: usize) {
    println!("Checking {} doc(s) in {}:\n", reports.len(), dir.display());

    for report in reports {
        let result = &report.result;
        if let Some(ref error) = result.error {
            println!("? ERROR: {}", report.path);
            println!("   {}\n", error);
        } else if result.stale {
            println!("⚠ STALE: {}", report.path);
            if let Some(time) = result.doc_time {
                println!("   Doc updated:  {}", format_time(time));
            }
            if let (Some(time), Some(dep)) = (
                result.newest_dependency_time,
                result.newest_dependency_path.as_deref(),
            ) {
                let name = Path::new(dep)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| dep.to_string());
                println!("   Code updated: {} ({})", format_time(time), name);
            }
            println!(
                "   Detection:    {} ({} deps checked)",
                result.detection_source, result.dependency_count
            );
            println!(
                "   Time behind:  {}\n",
                format_time_behind(result.days_behind, result.hours_behind)
            );
        }
    }

    if error_count > 0 {
        println!("Errors: {} doc(s) could not be checked", error_count);
    }

    if stale_count == 0 && error_count == 0 {
        println!("✓ All docs are fresh!");
    } else if stale_count > 0 {
        println!(
            "\nSummary: {}/{} doc(s) potentially stale",
            stale_count,
            reports.len()
        );
    }
}

/// Format a unix timestamp as a human-readable date
fn format_time(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => format!("Invalid({})", timestamp),
    }
}

/// Format a days/hours lag as a compact human-readable string
fn format_time_behind(days: i64, hours: i64) -> String {
    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        "<1h".to_string()
    }
}
