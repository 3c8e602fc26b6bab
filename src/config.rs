use crate::error::{AddVersionError, Result};
use crate::policies::ConstantStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete configuration for add-version.
///
/// Describes where the release artifacts live in the checkout and how
/// versions are spelled in them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// File that must exist at the checkout root
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// Product name used in generated doc comments
    #[serde(default = "default_product")]
    pub product: String,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub constants: ConstantsConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub compat: CompatConfig,

    #[serde(default)]
    pub verify: VerifyConfig,

    #[serde(default)]
    pub followups: FollowupsConfig,
}

fn default_marker_file() -> String {
    "build-options.properties".to_string()
}

fn default_product() -> String {
    "Lucene".to_string()
}

fn default_changes_path() -> String {
    "lucene/CHANGES.txt".to_string()
}

fn default_init_changes() -> String {
    "\n".to_string()
}

/// Returns the changelog sections opened for a feature release.
fn default_feature_sections() -> Vec<String> {
    vec![
        "API Changes".to_string(),
        "New Features".to_string(),
        "Improvements".to_string(),
        "Optimizations".to_string(),
        "Bug Fixes".to_string(),
        "Other".to_string(),
    ]
}

/// Returns the changelog sections opened for a bugfix release.
fn default_bugfix_sections() -> Vec<String> {
    vec!["Bug Fixes".to_string()]
}

/// Changelog location and section layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changes_path")]
    pub path: String,

    /// Text written right after a new release header
    #[serde(default = "default_init_changes")]
    pub init_changes: String,

    #[serde(default = "default_feature_sections")]
    pub feature_sections: Vec<String>,

    #[serde(default = "default_bugfix_sections")]
    pub bugfix_sections: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changes_path(),
            init_changes: default_init_changes(),
            feature_sections: default_feature_sections(),
            bugfix_sections: default_bugfix_sections(),
        }
    }
}

fn default_constants_path() -> String {
    "lucene/core/src/java/org/apache/lucene/util/Version.java".to_string()
}

fn default_declaration() -> String {
    "public static final Version ".to_string()
}

fn default_constant_prefix() -> String {
    "LUCENE".to_string()
}

fn default_initializer() -> String {
    "new Version({major}, {minor}, {bugfix})".to_string()
}

fn default_latest_alias() -> String {
    "LATEST".to_string()
}

/// Version-constant source file and its naming scheme.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConstantsConfig {
    #[serde(default = "default_constants_path")]
    pub path: String,

    #[serde(default = "default_declaration")]
    pub declaration: String,

    #[serde(default = "default_constant_prefix")]
    pub constant_prefix: String,

    #[serde(default = "default_initializer")]
    pub initializer: String,

    #[serde(default = "default_latest_alias")]
    pub latest_alias: String,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        ConstantsConfig {
            path: default_constants_path(),
            declaration: default_declaration(),
            constant_prefix: default_constant_prefix(),
            initializer: default_initializer(),
            latest_alias: default_latest_alias(),
        }
    }
}

fn default_properties_path() -> String {
    "build-options.properties".to_string()
}

fn default_version_key() -> String {
    "version.base".to_string()
}

/// Build properties file holding the base version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_properties_path")]
    pub path: String,

    #[serde(default = "default_version_key")]
    pub version_key: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            path: default_properties_path(),
            version_key: default_version_key(),
        }
    }
}

fn default_supported_majors() -> u32 {
    1
}

/// Back-compat window.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CompatConfig {
    /// How many major lines behind the current one still get constants
    #[serde(default = "default_supported_majors")]
    pub supported_majors: u32,
}

impl Default for CompatConfig {
    fn default() -> Self {
        CompatConfig {
            supported_majors: default_supported_majors(),
        }
    }
}

fn default_verify_command() -> String {
    "./gradlew -p lucene/core test --tests TestVersion".to_string()
}

/// Verification step run after the constants change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VerifyConfig {
    #[serde(default = "default_verify_command")]
    pub command: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        VerifyConfig {
            command: default_verify_command(),
        }
    }
}

fn default_major_followups() -> Vec<String> {
    vec![
        "Move backcompat oldIndexes to unsupportedIndexes in TestBackwardsCompatibility".to_string(),
        "Update IndexFormatTooOldException throw cases".to_string(),
    ]
}

/// Manual steps printed instead of verifying a major release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FollowupsConfig {
    #[serde(default = "default_major_followups")]
    pub major_release: Vec<String>,
}

impl Default for FollowupsConfig {
    fn default() -> Self {
        FollowupsConfig {
            major_release: default_major_followups(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            marker_file: default_marker_file(),
            product: default_product(),
            changelog: ChangelogConfig::default(),
            constants: ConstantsConfig::default(),
            build: BuildConfig::default(),
            compat: CompatConfig::default(),
            verify: VerifyConfig::default(),
            followups: FollowupsConfig::default(),
        }
    }
}

impl Config {
    /// Constant naming derived from the `[constants]` section
    pub fn constant_style(&self) -> ConstantStyle {
        ConstantStyle {
            declaration: self.constants.declaration.clone(),
            constant_prefix: self.constants.constant_prefix.clone(),
            product: self.product.clone(),
            initializer: self.constants.initializer.clone(),
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| AddVersionError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `addversion.toml` in current directory
/// 3. `.addversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| AddVersionError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new("./addversion.toml").exists() {
        fs::read_to_string("./addversion.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".addversion.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_checkout_layout() {
        let config = Config::default();
        assert_eq!(config.marker_file, "build-options.properties");
        assert_eq!(config.changelog.feature_sections.len(), 6);
        assert_eq!(config.changelog.bugfix_sections, vec!["Bug Fixes"]);
        assert_eq!(config.build.version_key, "version.base");
        assert_eq!(config.compat.supported_majors, 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
product = "Solr"

[constants]
constant_prefix = "solr"
"#,
        )
        .unwrap();
        assert_eq!(config.product, "Solr");
        assert_eq!(config.constants.constant_prefix, "solr");
        assert_eq!(config.constants.latest_alias, "LATEST");
        assert_eq!(config.changelog, ChangelogConfig::default());
    }

    #[test]
    fn test_constant_style() {
        let style = Config::default().constant_style();
        assert_eq!(style.declaration_prefix(), "public static final Version LUCENE_");
        assert_eq!(style.product, "Lucene");
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[compat]\nsupported_majors = \"many\"\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
