use std::path::PathBuf;

use crate::extract::ExtractRules;

pub const DEFAULT_SOURCE_ROOT: &str = "blog";
pub const DEFAULT_OUTPUT_DIR: &str = "public";
pub const DEFAULT_NAMESPACE: &str = "desktop";
pub const DEFAULT_MAP_FILE: &str = "map.json";
pub const DEFAULT_PROTECTED: [&str; 2] = ["favicon.ico", "index.html"];

/// Everything a single build run needs.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the markdown sources.
    pub source_root: PathBuf,
    /// Directory receiving payloads and the map.
    pub output_dir: PathBuf,
    /// File names in `output_dir` that survive the cleanup pass.
    pub protected_names: Vec<String>,
    /// Prefix of every payload file name.
    pub root_namespace: String,
    pub map_file: String,
    pub rules: ExtractRules,
}

impl BuildConfig {
    pub fn is_protected(&self, name: &str) -> bool {
        self.protected_names.iter().any(|p| p == name)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            protected_names: DEFAULT_PROTECTED.iter().map(|s| s.to_string()).collect(),
            root_namespace: DEFAULT_NAMESPACE.to_string(),
            map_file: DEFAULT_MAP_FILE.to_string(),
            rules: ExtractRules::default(),
        }
    }
}
