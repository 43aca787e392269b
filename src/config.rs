//! Environment configuration.

use std::env;

use crate::core::ScreenGeometry;
use crate::runtime::{TileMode, UnknownTileMode};

pub const SCREEN_WIDTH_ENV: &str = "WEBTOP_SCREEN_WIDTH";
pub const SCREEN_HEIGHT_ENV: &str = "WEBTOP_SCREEN_HEIGHT";
pub const TASKBAR_HEIGHT_ENV: &str = "WEBTOP_TASKBAR_HEIGHT";
pub const TILE_MODE_ENV: &str = "WEBTOP_TILE_MODE";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("WEBTOP_TILE_MODE: {0}")]
    InvalidTileMode(#[from] UnknownTileMode),
}

/// Screen geometry supplied by the host, with desktop defaults for anything
/// left unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub geometry: ScreenGeometry,
    /// Layout applied after the startup apps are opened.
    pub tile_mode: TileMode,
}

impl ScreenConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ScreenGeometry::default();
        let tile_mode = match env_string_opt(TILE_MODE_ENV) {
            Some(value) => value.parse()?,
            None => TileMode::Grid,
        };
        Ok(Self {
            geometry: ScreenGeometry::new(
                env_number(SCREEN_WIDTH_ENV)?.unwrap_or(defaults.width),
                env_number(SCREEN_HEIGHT_ENV)?.unwrap_or(defaults.height),
                env_number(TASKBAR_HEIGHT_ENV)?.unwrap_or(defaults.taskbar_height),
            ),
            tile_mode,
        })
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

fn env_number(key: &'static str) -> Result<Option<f64>, ConfigError> {
    let Some(value) = env_string_opt(key) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(Some(number)),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}
