//! Per-project configuration for DocFresh

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a project being checked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Directory names excluded from discovery and search results
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Maximum number of documents listed by the search command
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "target".to_string(),
        ".git".to_string(),
    ]
}

fn default_max_search_results() -> usize {
    20
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: default_exclude_dirs(),
            max_search_results: default_max_search_results(),
        }
    }
}

impl RepoConfig {
    /// Load configuration from `.docfresh.toml` at the project root, or
    /// return defaults when the file does not exist.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(".docfresh.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: RepoConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Check whether a directory name is excluded
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RepoConfig::default();
        assert!(config.is_excluded_dir("node_modules"));
        assert!(!config.is_excluded_dir("docs"));
        assert_eq!(config.max_search_results, 20);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".docfresh.toml"),
            "exclude_dirs = [\"vendor\"]\nmax_search_results = 5\n",
        )
        .unwrap();

        let config = RepoConfig::load_or_default(dir.path()).unwrap();
        assert!(config.is_excluded_dir("vendor"));
        assert!(!config.is_excluded_dir("node_modules"));
        assert_eq!(config.max_search_results, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.exclude_dirs, default_exclude_dirs());
    }
}
