/// Runtime configuration: the scan root from the command line plus a few
/// environment overrides.
use crate::error::ConfigError;
use spacemap_core::layout::{GlyphSet, LabelStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Refresh interval override, in milliseconds.
pub const ENV_REFRESH_MS: &str = "SPACEMAP_REFRESH_MS";
/// Set to `1`/`true` to draw borders with plain ASCII.
pub const ENV_ASCII: &str = "SPACEMAP_ASCII";

/// Time between two frames when the default is not overridden.
pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Minimum time between two ticks of the render loop.
    pub refresh_rate: Duration,
    pub glyphs: GlyphSet,
    pub label_style: LabelStyle,
}

impl AppConfig {
    /// Defaults for everything but the root.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            refresh_rate: DEFAULT_REFRESH_RATE,
            glyphs: GlyphSet::default(),
            label_style: LabelStyle::default(),
        }
    }

    /// Build from the process environment.
    pub fn from_env(root: PathBuf) -> Result<Self, ConfigError> {
        Self::from_lookup(root, |name| std::env::var(name).ok())
    }

    /// Build using `lookup` to read variables, so tests need not touch the
    /// real environment.
    pub fn from_lookup(
        root: PathBuf,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(root);

        if let Some(value) = lookup(ENV_REFRESH_MS) {
            config.refresh_rate = match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidRefresh {
                        name: ENV_REFRESH_MS,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_ASCII) {
            if parse_flag(ENV_ASCII, &value)? {
                config.glyphs = GlyphSet::ASCII;
            }
        }

        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
