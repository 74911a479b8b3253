//! Configuration management for lw.
//!
//! Parses `lw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [check]
//! site_dir = "public"
//! html_pattern = '^.+\.html$'
//! parallel = true
//!
//! [entities]
//! copy = "©"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site directory.
    pub site_dir: Option<PathBuf>,
    /// Override HTML document pattern.
    pub html_pattern: Option<String>,
    /// Override parallel checking flag.
    pub parallel: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lw.toml";

/// Site directory used when none is configured.
const DEFAULT_SITE_DIR: &str = "public";

/// Pattern selecting HTML documents when none is configured.
const DEFAULT_HTML_PATTERN: &str = r"^.+\.html$";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Check configuration (paths are relative strings from TOML).
    check: CheckConfigRaw,
    /// Extra named character references, `name = "replacement"`.
    pub entities: BTreeMap<String, String>,

    /// Resolved check configuration (set after loading).
    #[serde(skip)]
    pub check_resolved: CheckConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw check configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CheckConfigRaw {
    site_dir: Option<String>,
    html_pattern: Option<String>,
    parallel: Option<bool>,
}

/// Resolved check configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Root directory of the generated site.
    pub site_dir: PathBuf,
    /// Regex selecting HTML documents by root-relative path.
    pub html_pattern: String,
    /// Whether documents are checked in parallel.
    pub parallel: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            html_pattern: DEFAULT_HTML_PATTERN.to_owned(),
            parallel: true,
        }
    }
}

impl CheckConfig {
    /// Compile the HTML document pattern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the pattern is not a valid regex.
    pub fn html_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.html_pattern).map_err(|e| {
            ConfigError::Validation(format!("check.html_pattern is not a valid regex: {e}"))
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site_dir) = &settings.site_dir {
            self.check_resolved.site_dir.clone_from(site_dir);
        }
        if let Some(html_pattern) = &settings.html_pattern {
            self.check_resolved.html_pattern.clone_from(html_pattern);
        }
        if let Some(parallel) = settings.parallel {
            self.check_resolved.parallel = parallel;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            check: CheckConfigRaw::default(),
            entities: BTreeMap::new(),
            check_resolved: CheckConfig {
                site_dir: base.join(DEFAULT_SITE_DIR),
                ..CheckConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_check()?;
        self.validate_entities()?;
        Ok(())
    }

    /// Validate check configuration.
    fn validate_check(&self) -> Result<(), ConfigError> {
        if self.check_resolved.html_pattern.is_empty() {
            return Err(ConfigError::Validation(
                "check.html_pattern cannot be empty".to_owned(),
            ));
        }
        self.check_resolved.html_regex()?;
        Ok(())
    }

    /// Validate entity names.
    ///
    /// Only ASCII alphanumeric names can appear in a `&name;` reference.
    fn validate_entities(&self) -> Result<(), ConfigError> {
        for name in self.entities.keys() {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "entities.{name:?} must be a non-empty ASCII alphanumeric name"
                )));
            }
        }
        Ok(())
    }

    /// Resolve raw values against the config file directory.
    fn resolve(&mut self, config_dir: &Path) {
        self.check_resolved = CheckConfig {
            site_dir: config_dir.join(self.check.site_dir.as_deref().unwrap_or(DEFAULT_SITE_DIR)),
            html_pattern: self
                .check
                .html_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_HTML_PATTERN.to_owned()),
            parallel: self.check.parallel.unwrap_or(true),
        };
    }
}
