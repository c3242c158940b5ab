//! Configuration management for goimportfmt.
//!
//! This module provides the [`Config`] struct which controls a formatting run.
//! Configuration can be loaded from:
//! - TOML files (`goimportfmt.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered in the user's home directory and in every
//! directory from the filesystem root down to the directory being formatted.
//! An explicit `--config` file replaces discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::format::OrganizeOptions;
use crate::process::{ExclusionSet, DEFAULT_EXCLUDE};

/// Config file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["goimportfmt.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_exclude_dir() -> Vec<String> {
    vec![DEFAULT_EXCLUDE.to_string()]
}
fn default_tab_width() -> usize {
    8
}
fn default_true() -> bool {
    true
}

/// A list written either as a TOML array or as one comma-separated string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum FragmentList {
    One(String),
    Many(Vec<String>),
}

impl FragmentList {
    fn into_vec(self) -> Vec<String> {
        match self {
            FragmentList::One(list) => vec![list],
            FragmentList::Many(lists) => lists,
        }
    }
}

/// Main configuration struct for goimportfmt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path fragments excluding files (default: `["vendor"]`)
    #[serde(default = "default_exclude_dir")]
    pub exclude_dir: Vec<String>,

    /// Import path prefixes grouped after third-party imports
    #[serde(default)]
    pub local_prefix: Option<String>,

    /// Tab stop width (default: 8)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Indent import specs with tabs (default: true)
    #[serde(default = "default_true")]
    pub tab_indent: bool,

    /// Keep comments in import declarations (default: true)
    #[serde(default = "default_true")]
    pub comments: bool,

    /// Accept files without a `package` clause (default: true)
    #[serde(default = "default_true")]
    pub fragment: bool,
}

/// Partial config for merging (all fields optional)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    exclude_dir: Option<FragmentList>,
    local_prefix: Option<String>,
    tab_width: Option<usize>,
    tab_indent: Option<bool>,
    comments: Option<bool>,
    fragment: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        let options = OrganizeOptions::default();
        Config {
            exclude_dir: default_exclude_dir(),
            local_prefix: options.local_prefix,
            tab_width: options.tab_width,
            tab_indent: options.tab_indent,
            comments: options.comments,
            fragment: options.fragment,
        }
    }
}

impl Config {
    /// Maximum reasonable tab width
    const MAX_TAB_WIDTH: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.tab_width == 0 {
            return Some("tab_width must be at least 1".to_string());
        }
        if self.tab_width > Self::MAX_TAB_WIDTH {
            return Some(format!(
                "tab_width {} exceeds maximum of {}",
                self.tab_width,
                Self::MAX_TAB_WIDTH
            ));
        }
        if let Some(fragment) = self
            .local_prefix
            .iter()
            .flat_map(|prefixes| prefixes.split(','))
            .map(str::trim)
            .find(|prefix| prefix.contains(char::is_whitespace))
        {
            return Some(format!("local_prefix '{fragment}' must not contain whitespace"));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.exclude_dir {
            self.exclude_dir = v.into_vec();
        }
        if let Some(v) = partial.local_prefix {
            self.local_prefix = Some(v);
        }
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.tab_indent {
            self.tab_indent = v;
        }
        if let Some(v) = partial.comments {
            self.comments = v;
        }
        if let Some(v) = partial.fragment {
            self.fragment = v;
        }
    }

    /// Discover config files for a directory being formatted
    ///
    /// Returns the home directory config first, then configs from the
    /// filesystem root down to `start_path` (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            None
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Files that cannot be read or parsed are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_path) {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        config.apply_partial(partial);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read config file");
                }
            }
        }
        config
    }

    /// Organizer settings for this run
    #[must_use]
    pub fn organize_options(&self) -> OrganizeOptions {
        OrganizeOptions {
            tab_width: self.tab_width,
            tab_indent: self.tab_indent,
            comments: self.comments,
            fragment: self.fragment,
            local_prefix: self.local_prefix.clone().filter(|p| !p.trim().is_empty()),
        }
    }

    /// Exclusion fragments for this run
    #[must_use]
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::from_lists(&self.exclude_dir)
    }
}
