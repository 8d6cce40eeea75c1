use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use ionofilter_parser::timestamp::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use ionofilter_parser::{
    MalformedLinePolicy, ParserError, StationTableParser, TimestampFormat, DEFAULT_PREAMBLE_LINES,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::channels::{default_channels, ChannelSpec};
use crate::median::{FilterError, WindowWidth};

pub const CONFIG_ENV_VAR: &str = "IONOFILTER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid window: {0}")]
    Window(#[from] FilterError),

    #[error("invalid timestamp format: {0}")]
    Timestamp(#[from] ParserError),

    #[error("no channels selected for filtering")]
    NoChannels,
}

/// Settings for one batch run. Every field has a default, so an empty TOML
/// document describes the reference run: W=3 over foF2 and hmF2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub window_width: WindowWidth,
    pub preamble_lines: usize,
    pub on_malformed_line: MalformedLinePolicy,
    pub date_format: String,
    pub time_format: String,
    pub channels: Vec<ChannelSpec>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window_width: WindowWidth::DEFAULT,
            preamble_lines: DEFAULT_PREAMBLE_LINES,
            on_malformed_line: MalformedLinePolicy::Abort,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            channels: default_channels(),
        }
    }
}

impl FilterConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FilterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn set_window_width(&mut self, width: usize) -> Result<(), ConfigError> {
        self.window_width = WindowWidth::new(width)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        self.timestamp_format()?;
        Ok(())
    }

    pub fn timestamp_format(&self) -> Result<TimestampFormat, ParserError> {
        TimestampFormat::new(self.date_format.clone(), self.time_format.clone())
    }

    pub fn parser(&self) -> Result<StationTableParser, ConfigError> {
        Ok(StationTableParser::new(self.timestamp_format()?)
            .with_policy(self.on_malformed_line)
            .with_preamble_lines(self.preamble_lines))
    }
}

/// Command-line values layered over the file configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub window_width: Option<usize>,
    pub channels: Vec<ChannelSpec>,
    pub skip_malformed: bool,
}

impl ConfigOverrides {
    /// Explicit path first, then the value of [`CONFIG_ENV_VAR`].
    pub fn config_path(&self, env_path: Option<OsString>) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(|| env_path.filter(|path| !path.is_empty()).map(PathBuf::from))
    }

    /// Loads the file (or defaults), applies the overrides and validates the
    /// result. `env_path` is the raw value of [`CONFIG_ENV_VAR`].
    pub fn resolve(&self, env_path: Option<OsString>) -> Result<FilterConfig, ConfigError> {
        let mut config = match self.config_path(env_path) {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                FilterConfig::load(&path)?
            }
            None => FilterConfig::default(),
        };

        if let Some(width) = self.window_width {
            config.set_window_width(width)?;
        }
        if !self.channels.is_empty() {
            config.channels = self.channels.clone();
        }
        if self.skip_malformed {
            config.on_malformed_line = MalformedLinePolicy::Skip;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn resolve_from_env(&self) -> Result<FilterConfig, ConfigError> {
        self.resolve(std::env::var_os(CONFIG_ENV_VAR))
    }
}
