//! DocFresh - Git-history based documentation freshness checker
//!
//! This library provides the core functionality for detecting when a
//! document no longer reflects the source files it describes, using git
//! commit timestamps as the freshness oracle.

pub mod cli;
pub mod extract;
pub mod repo;
pub mod staleness;

/// Re-export commonly used types
pub use extract::Dialect;
pub use repo::{GitHistory, RepoConfig, Repository};
pub use staleness::{Detection, StalenessChecker, StalenessResult};

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "docfresh";
