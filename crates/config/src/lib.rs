//! # Config - Merger Settings
//!
//! All settings come from environment variables:
//!
//! ```text
//! BUSTUP_MODS_DIR       directory whose subdirectories are sources  (default: "mods")
//! BUSTUP_MOD_ORDER      comma-separated source load order          (default: "")
//! BUSTUP_PROBING_PATHS  comma-separated sub-paths per source       (default: ".")
//! BUSTUP_ORIGINAL_DIR   directory with the *_Original.DAT baselines (default: "Original")
//! BUSTUP_OUTPUT_DIR     directory receiving the merged files        (default: "Output")
//! BUSTUP_DEBUG          extra diagnostic messages                   (default: "false")
//! ```
//!
//! Unparsable values fall back to their defaults.

use std::path::PathBuf;

pub const ENV_MODS_DIR: &str = "BUSTUP_MODS_DIR";
pub const ENV_MOD_ORDER: &str = "BUSTUP_MOD_ORDER";
pub const ENV_PROBING_PATHS: &str = "BUSTUP_PROBING_PATHS";
pub const ENV_ORIGINAL_DIR: &str = "BUSTUP_ORIGINAL_DIR";
pub const ENV_OUTPUT_DIR: &str = "BUSTUP_OUTPUT_DIR";
pub const ENV_DEBUG: &str = "BUSTUP_DEBUG";

/// Resolved merger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Each subdirectory is one contributing source.
    pub mods_dir: PathBuf,
    /// Source names folded first, in this order. Remaining sources follow
    /// sorted by name.
    pub mod_order: Vec<String>,
    /// Sub-paths of each source searched for override files, in order.
    pub probing_paths: Vec<PathBuf>,
    pub original_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Log fold summaries and written outputs.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mods_dir: PathBuf::from("mods"),
            mod_order: Vec::new(),
            probing_paths: vec![PathBuf::from(".")],
            original_dir: PathBuf::from("Original"),
            output_dir: PathBuf::from("Output"),
            debug: false,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env_or = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let probing_paths: Vec<PathBuf> = env_or(ENV_PROBING_PATHS)
            .map(|v| split_list(&v).into_iter().map(PathBuf::from).collect())
            .unwrap_or(defaults.probing_paths.clone());

        Self {
            mods_dir: env_or(ENV_MODS_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.mods_dir),
            mod_order: env_or(ENV_MOD_ORDER)
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            probing_paths: if probing_paths.is_empty() {
                defaults.probing_paths
            } else {
                probing_paths
            },
            original_dir: env_or(ENV_ORIGINAL_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.original_dir),
            output_dir: env_or(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            debug: env_or(ENV_DEBUG)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.debug),
        }
    }
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
