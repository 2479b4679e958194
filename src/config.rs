use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::VersionBump;
use crate::error::{NextVersionError, Result};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nextversion.toml";

/// Upper bound GitHub accepts for `per_page`
pub const MAX_PER_PAGE: u32 = 100;

/// Represents the complete configuration for next-version.
///
/// Contains the commit type lists per bump severity, breaking change options,
/// tag selection and host settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub breaking: BreakingConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub host: HostConfig,
}

fn default_major_types() -> Vec<String> {
    Vec::new()
}

fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string(), "feature".to_string()]
}

fn default_patch_types() -> Vec<String> {
    vec![
        "fix".to_string(),
        "bugfix".to_string(),
        "perf".to_string(),
        "refactor".to_string(),
        "test".to_string(),
        "tests".to_string(),
    ]
}

/// Commit types that trigger each bump severity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpConfig {
    #[serde(default = "default_major_types")]
    pub major: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch: Vec<String>,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            major: default_major_types(),
            minor: default_minor_types(),
            patch: default_patch_types(),
        }
    }
}

impl BumpConfig {
    /// Flatten the three lists into a lowercase `type -> severity` map.
    ///
    /// A type listed under two severities is rejected.
    pub fn type_map(&self) -> Result<HashMap<String, VersionBump>> {
        let mut map = HashMap::new();
        let lists = [
            (VersionBump::Major, &self.major),
            (VersionBump::Minor, &self.minor),
            (VersionBump::Patch, &self.patch),
        ];

        for (bump, types) in lists {
            for r#type in types {
                let key = r#type.trim().to_ascii_lowercase();
                if key.is_empty() {
                    return Err(NextVersionError::config(format!(
                        "empty commit type in [bump] {}",
                        bump
                    )));
                }
                if let Some(existing) = map.insert(key.clone(), bump) {
                    if existing != bump {
                        return Err(NextVersionError::config(format!(
                            "commit type '{}' is listed under both {} and {}",
                            key, existing, bump
                        )));
                    }
                }
            }
        }

        Ok(map)
    }
}

/// Options for what counts as a breaking change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BreakingConfig {
    /// Treat `type!:` headers as an implied `BREAKING CHANGE` note
    #[serde(default = "default_exclamation_mark")]
    pub exclamation_mark: bool,
}

fn default_exclamation_mark() -> bool {
    true
}

impl Default for BreakingConfig {
    fn default() -> Self {
        BreakingConfig {
            exclamation_mark: default_exclamation_mark(),
        }
    }
}

/// Which tags are considered release tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TagsConfig {
    #[serde(default)]
    pub prefix: Option<String>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

/// Settings for talking to the source-control host.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HostConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            api_url: default_api_url(),
            per_page: default_per_page(),
        }
    }
}

impl Config {
    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.bump.type_map()?;

        if self.host.per_page == 0 || self.host.per_page > MAX_PER_PAGE {
            return Err(NextVersionError::config(format!(
                "host.per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, self.host.per_page
            )));
        }

        if let Some(prefix) = &self.tags.prefix {
            if prefix.chars().any(|c| c.is_ascii_digit()) {
                return Err(NextVersionError::config(format!(
                    "tags.prefix '{}' must not contain digits",
                    prefix
                )));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nextversion.toml` in current directory
/// 3. `.nextversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
