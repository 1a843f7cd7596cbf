use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

pub const DEFAULT_DATE_FORMAT: &str = "%Y_%m";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// strftime-style template for the per-date folder name.
    pub date_format: String,
    /// Skip files whose target already exists instead of overwriting them.
    pub ignore_duplicates: bool,
    /// Glob patterns pruned from the source walk.
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            ignore_duplicates: false,
            ignore_patterns: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Apply command line values on top of the file configuration.
    ///
    /// An explicit date format replaces the configured one; the duplicate flag can only
    /// be switched on from the command line.
    pub fn with_overrides(mut self, date_format: Option<String>, ignore_duplicates: bool) -> Self {
        if let Some(date_format) = date_format {
            self.date_format = date_format;
        }
        self.ignore_duplicates |= ignore_duplicates;
        self
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_configuration_from("Config")
}

/// Load `name` (any extension `config` understands). A missing file yields the defaults.
pub fn load_configuration_from(name: &str) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(name).required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
