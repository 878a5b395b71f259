//! Ordering configuration loaded from `.method-profiles.toml`.
//!
//! ```toml
//! [ordering]
//! profile_files = ["agg_method_stats.csv"]
//! whitelisted_substrings = ["Startup", "Application.onCreate"]
//! legacy_order = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".method-profiles.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodProfilesConfig {
    #[serde(default)]
    pub ordering: OrderingConfig,
}

/// Inputs of the profiled ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Aggregated method stats files, parsed in order
    pub profile_files: Vec<PathBuf>,
    /// Deobfuscated name substrings pulled into cold start without profile data
    pub whitelisted_substrings: Vec<String>,
    /// Cold start only, with the stricter legacy threshold
    pub legacy_order: bool,
}

impl OrderingConfig {
    /// Apply command line overrides.
    ///
    /// Explicit profile files replace the configured ones; whitelist entries
    /// are appended; `legacy_order` can only be switched on.
    pub fn with_overrides(
        mut self,
        profile_files: Vec<PathBuf>,
        whitelisted_substrings: Vec<String>,
        legacy_order: bool,
    ) -> Self {
        if !profile_files.is_empty() {
            self.profile_files = profile_files;
        }
        for substr in whitelisted_substrings {
            if !self.whitelisted_substrings.contains(&substr) {
                self.whitelisted_substrings.push(substr);
            }
        }
        self.legacy_order |= legacy_order;
        self
    }
}

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<MethodProfilesConfig, String> {
    toml::from_str::<MethodProfilesConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Load a config file, or `None` if it is missing or invalid.
///
/// Only real failures are reported; a missing file is expected.
pub fn load_config(path: &Path) -> Option<MethodProfilesConfig> {
    let contents = match read_config_file(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Load `path` if given, else [`CONFIG_FILE_NAME`] from the working directory.
pub fn load_config_or_default(path: Option<&Path>) -> MethodProfilesConfig {
    let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
    load_config(path).unwrap_or_default()
}
