//! Listing configuration.
//!
//! Handles loading, validating, and layering configuration. Values come from
//! three layers, each overriding the one before:
//!
//! ```text
//! stock defaults  →  tree-index.toml (or --config FILE)  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! baseurl = "."                 # Prefix for links to files hosted elsewhere
//! # basepath = "mirror"         # Site sub-path; pages then live under /mirror
//! ignored_extensions = []       # Suffixes always linked from the page tree
//! output = "site"               # Output directory
//! # share_dir = "/usr/share/tree-index"  # Templates, icons.xml and img/
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tree-index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resolved configuration for one run.
///
/// All fields have defaults. Config files need only specify the values they
/// want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Prefix for links to files that are not ignored. Directories extend
    /// it with their own name as the site is walked.
    pub baseurl: String,
    /// Sub-path the site is published under. The root page's path is
    /// `/basepath`, or `.` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basepath: Option<String>,
    /// Files ending with one of these are linked relative to the pages
    /// instead of under `baseurl`.
    pub ignored_extensions: Vec<String>,
    /// Root of the generated page tree.
    pub output: String,
    /// Directory with templates, `icons.xml` and `img/`.
    /// Defaults to the location baked in at build time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_dir: Option<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            baseurl: ".".to_string(),
            basepath: None,
            ignored_extensions: Vec::new(),
            output: "site".to_string(),
            share_dir: None,
        }
    }
}

impl ListingConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ignored_extensions.iter().any(|ext| ext.is_empty()) {
            return Err(ConfigError::Validation(
                "ignored_extensions must not contain empty entries".into(),
            ));
        }
        if self.output.is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if self.basepath.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "basepath must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

/// Share directory baked in by the build script.
pub const BUILTIN_SHARE_DIR: &str = env!("TREE_INDEX_SHARE_DIR");

/// Resolve the share directory: configured value, else the built-in one.
pub fn effective_share_dir(config: &ListingConfig) -> PathBuf {
    config
        .share_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(BUILTIN_SHARE_DIR))
}

/// Path of the root page within the site.
///
/// - `None` → `.`
/// - `Some("mirror")` → `/mirror`
pub fn initial_curpath(config: &ListingConfig) -> String {
    match &config.basepath {
        Some(basepath) => format!("/{basepath}"),
        None => ".".to_string(),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ListingConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ListingConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ListingConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Resolve the full configuration for a run.
///
/// `file` is an explicitly requested config file and must exist. Without
/// one, `tree-index.toml` in `dir` is used when present. `overrides` (usually
/// built from command-line flags) is applied last.
pub fn load_config(
    file: Option<&Path>,
    dir: &Path,
    overrides: toml::Value,
) -> Result<ListingConfig, ConfigError> {
    let file_layer = match file {
        Some(path) => {
            let layer = load_raw_config(path)?;
            Some(layer.ok_or_else(|| ConfigError::Missing(path.into()))?)
        }
        None => load_raw_config(&dir.join(DEFAULT_CONFIG_FILE))?,
    };
    let base = match file_layer {
        Some(layer) => merge_toml(stock_defaults_value(), layer),
        None => stock_defaults_value(),
    };
    resolve_config(base, Some(overrides))
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# tree-index Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Save as tree-index.toml in the directory you run tree-index from, or pass
# --config FILE. Command-line flags override values set here.
# Unknown keys will cause an error.

# Prefix for links to files. Use a URL when files are served from another
# host than the listing pages, e.g. "https://files.example.org".
baseurl = "."

# Sub-path the pages are published under. When set, page paths start with
# "/<basepath>"; when unset they start with ".".
# basepath = "mirror"

# File-name suffixes that are always linked next to the pages instead of
# under baseurl. Useful for images or text files shipped with the site.
ignored_extensions = []

# Output directory for the generated index.html tree.
output = "site"

# Directory holding index/file/footer templates, icons.xml and img/.
# Defaults to the location chosen when tree-index was built.
# share_dir = "/usr/share/tree-index"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_table() -> toml::Value {
        toml::Value::Table(toml::Table::new())
    }

    #[test]
    fn default_config_values() {
        let config = ListingConfig::default();
        assert_eq!(config.baseurl, ".");
        assert_eq!(config.basepath, None);
        assert!(config.ignored_extensions.is_empty());
        assert_eq!(config.output, "site");
        assert_eq!(config.share_dir, None);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
baseurl = "https://files.example"
"#;
        let config: ListingConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.baseurl, "https://files.example");
        // Default values preserved
        assert_eq!(config.output, "site");
    }

    #[test]
    fn initial_curpath_from_basepath() {
        let mut config = ListingConfig::default();
        assert_eq!(initial_curpath(&config), ".");
        config.basepath = Some("mirror".to_string());
        assert_eq!(initial_curpath(&config), "/mirror");
    }

    #[test]
    fn effective_share_dir_prefers_config() {
        let mut config = ListingConfig::default();
        assert_eq!(effective_share_dir(&config), PathBuf::from(BUILTIN_SHARE_DIR));
        config.share_dir = Some("/opt/share".to_string());
        assert_eq!(effective_share_dir(&config), PathBuf::from("/opt/share"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path(), empty_table()).unwrap();
        assert_eq!(config, ListingConfig::default());
    }

    #[test]
    fn load_config_reads_default_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            r#"
output = "public"
ignored_extensions = [".html", ".txt"]
"#,
        )
        .unwrap();

        let config = load_config(None, tmp.path(), empty_table()).unwrap();
        assert_eq!(config.output, "public");
        assert_eq!(config.ignored_extensions, [".html", ".txt"]);
        // Unspecified values should be defaults
        assert_eq!(config.baseurl, ".");
    }

    #[test]
    fn load_config_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, r#"basepath = "pub""#).unwrap();

        let config = load_config(Some(&path), tmp.path(), empty_table()).unwrap();
        assert_eq!(config.basepath.as_deref(), Some("pub"));
    }

    #[test]
    fn load_config_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(&path), tmp.path(), empty_table()),
            Err(ConfigError::Missing(p)) if p == path
        ));
    }

    #[test]
    fn overrides_beat_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            r#"
baseurl = "https://from-file"
output = "public"
"#,
        )
        .unwrap();
        let overrides: toml::Value = toml::from_str(r#"baseurl = "https://from-flag""#).unwrap();

        let config = load_config(None, tmp.path(), overrides).unwrap();
        assert_eq!(config.baseurl, "https://from-flag");
        assert_eq!(config.output, "public");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(None, tmp.path(), empty_table());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"output = "site""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"output = "public""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("output").unwrap().as_str(), Some("public"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"ignored_extensions = [".a", ".b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"ignored_extensions = [".c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let list = merged.get("ignored_extensions").unwrap().as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].as_str(), Some(".c"));
    }

    #[test]
    fn merge_toml_three_layers() {
        let stock = stock_defaults_value();
        let file: toml::Value = toml::from_str(
            r#"
output = "public"
baseurl = "https://a"
"#,
        )
        .unwrap();
        let flags: toml::Value = toml::from_str(r#"baseurl = "https://b""#).unwrap();

        let config = resolve_config(merge_toml(stock, file), Some(flags)).unwrap();
        assert_eq!(config.baseurl, "https://b");
        assert_eq!(config.output, "public");
        // preserved from stock
        assert!(config.ignored_extensions.is_empty());
    }

    // =========================================================================
    // Unknown key rejection and validation tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<ListingConfig, _> = toml::from_str(r#"base_url = ".""#);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), r#"outptu = "x""#).unwrap();
        assert!(matches!(
            load_config(None, tmp.path(), empty_table()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(ListingConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_ignored_extension() {
        let config = ListingConfig {
            ignored_extensions: vec![".txt".to_string(), String::new()],
            ..ListingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_output() {
        let config = ListingConfig {
            output: String::new(),
            ..ListingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_basepath() {
        let config = ListingConfig {
            basepath: Some(String::new()),
            ..ListingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str(r#"output = """#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: ListingConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, ListingConfig::default());
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value();
        assert!(value.is_table());
        assert!(value.get("basepath").is_none());
        assert_eq!(value.get("output").unwrap().as_str(), Some("site"));
    }
}
