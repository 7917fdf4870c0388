//! Chart configuration loaded from an optional JSON file.

use crate::animation::{AnimationTiming, WrapPolicy};
use crate::charts::{animated_layout, Layout, Margin, DEFAULT_LIST_CAP};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Animation timings in milliseconds. Unset fields follow the policy's
/// defaults, so `{"policy": "fade-reset"}` alone gives the 1s cadence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub policy: WrapPolicy,
    pub interval_ms: Option<u64>,
    pub transition_ms: Option<u64>,
    pub fade_ms: Option<u64>,
    pub pause_ms: Option<u64>,
}

impl AnimationConfig {
    pub fn timing(&self) -> AnimationTiming {
        let base = AnimationTiming::for_policy(self.policy);
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };
        AnimationTiming {
            interval: ms(self.interval_ms, base.interval),
            transition: ms(self.transition_ms, base.transition),
            fade: ms(self.fade_ms, base.fade),
            pause: ms(self.pause_ms, base.pause),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub data_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Athletes listed before "show more".
    pub list_cap: usize,
    pub animation: AnimationConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/dataset_limpo.csv"),
            width: 950,
            height: 600,
            list_cap: DEFAULT_LIST_CAP,
            animation: AnimationConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Bar chart canvas; the tall bottom margin leaves room for team names.
    pub fn bar_layout(&self) -> Layout {
        Layout::new(
            self.width,
            self.height,
            Margin {
                top: 20.0,
                right: 30.0,
                bottom: 100.0,
                left: 50.0,
            },
        )
    }

    pub fn scatter_layout(&self) -> Layout {
        Layout {
            width: self.width,
            height: self.height,
            ..Layout::default()
        }
    }

    pub fn animated_layout(&self) -> Layout {
        animated_layout(self.width, self.height)
    }
}
