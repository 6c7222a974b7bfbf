use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::SoundCue;
use crate::selector::{MarkerStyle, RankLimits};

pub const CONFIG_ENV_VAR: &str = "TARGETING_CONFIG";

const INLINE_ORIGIN: &str = "<inline>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetingConfig {
    pub max_targets: usize,
    pub retain_all_below: usize,
    pub refresh_interval_ms: u64,
    pub show_marker: bool,
    pub marker: MarkerStyle,
    pub mount_marker_offset: f32,
    pub cycle_sound: SoundCue,
    pub pickup_move_speed: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        let limits = RankLimits::default();
        Self {
            max_targets: limits.max_targets,
            retain_all_below: limits.retain_all_below,
            refresh_interval_ms: 5000,
            show_marker: true,
            marker: MarkerStyle::default(),
            mount_marker_offset: 2.0,
            cycle_sound: SoundCue::default(),
            pickup_move_speed: 2.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read targeting config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse targeting config {origin} at {location}: {message}")]
    Parse {
        origin: String,
        location: String,
        message: String,
    },
    #[error("invalid targeting config field {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl TargetingConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn rank_limits(&self) -> RankLimits {
        RankLimits {
            max_targets: self.max_targets,
            retain_all_below: self.retain_all_below,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        parse_json(raw, INLINE_ORIGIN)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_json(&raw, &path.display().to_string())
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(env::var(CONFIG_ENV_VAR))
    }

    fn from_env_value(value: Result<String, env::VarError>) -> Result<Self, ConfigError> {
        match value {
            Ok(path) => Self::load(Path::new(&path)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source) => Err(ConfigError::EnvVar {
                var: CONFIG_ENV_VAR,
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_targets == 0 {
            return Err(invalid("max_targets", "must be at least 1"));
        }
        if self.refresh_interval_ms == 0 {
            return Err(invalid("refresh_interval_ms", "must be at least 1"));
        }
        let size = self.marker.size;
        if [size.x, size.y, size.z]
            .iter()
            .any(|axis| !axis.is_finite() || *axis < 0.0)
        {
            return Err(invalid(
                "marker.size",
                format!("expected finite non-negative axes, got {size:?}"),
            ));
        }
        if !self.mount_marker_offset.is_finite() || self.mount_marker_offset < 0.0 {
            return Err(invalid(
                "mount_marker_offset",
                format!(
                    "expected finite non-negative number, got {}",
                    self.mount_marker_offset
                ),
            ));
        }
        if !self.pickup_move_speed.is_finite() || self.pickup_move_speed <= 0.0 {
            return Err(invalid(
                "pickup_move_speed",
                format!("expected positive number, got {}", self.pickup_move_speed),
            ));
        }
        Ok(())
    }
}

fn parse_json(raw: &str, origin: &str) -> Result<TargetingConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let config = serde_path_to_error::deserialize::<_, TargetingConfig>(&mut deserializer)
        .map_err(|error| {
            let path = error.path().to_string();
            let location = if path.is_empty() || path == "." {
                "root".to_string()
            } else {
                path
            };
            ConfigError::Parse {
                origin: origin.to_string(),
                location,
                message: error.into_inner().to_string(),
            }
        })?;
    config.validate()?;
    Ok(config)
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}
