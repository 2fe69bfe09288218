//! Demo tuning knobs, read from `playground.toml`.
//!
//! Every field has a default, so the file is optional. The path can be
//! overridden with the `PLAYGROUND_CONFIG` environment variable.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

pub const CONFIG_ENV: &str = "PLAYGROUND_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "playground.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub auth: AuthConfig,
    pub network: NetworkConfig,
    pub youtube: YoutubeConfig,
    pub decorator: DecoratorConfig,
    pub composite: CompositeConfig,
    pub flyweight: FlyweightConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub requests_per_window: u32,
    pub window_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 2,
            window_secs: 60,
        }
    }
}

impl AuthConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Simulated latency of the social networks: `ticks` dots, `tick_ms` apart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub ticks: u32,
    pub tick_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ticks: 10,
            tick_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    pub min_ticks: u32,
    pub max_ticks: u32,
    pub tick_ms: u64,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            min_ticks: 5,
            max_ticks: 10,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    pub output: PathBuf,
    pub compression_level: u32,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("out/OutputDemo.txt"),
            compression_level: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    pub output: PathBuf,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("out/composite.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlyweightConfig {
    pub trees: u32,
    pub canvas_size: u32,
    pub render: bool,
    pub output: PathBuf,
}

impl Default for FlyweightConfig {
    fn default() -> Self {
        Self {
            trees: 1_000_000,
            canvas_size: 500,
            render: true,
            output: PathBuf::from("out/forest.png"),
        }
    }
}

impl PlaygroundConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads `path`; a missing file means "use the defaults".
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaygroundError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = PlaygroundConfig::from_toml(
            r#"
            [auth]
            requests_per_window = 5

            [flyweight]
            trees = 10
            render = false
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.requests_per_window, 5);
        assert_eq!(config.auth.window_secs, 60);
        assert_eq!(config.flyweight.trees, 10);
        assert!(!config.flyweight.render);
        assert_eq!(config.flyweight.canvas_size, 500);
        assert_eq!(config.youtube, YoutubeConfig::default());
    }

    #[test]
    fn test_load_follows_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[youtube]\nmin_ticks = 1\nmax_ticks = 2\ntick_ms = 0").unwrap();

        env::set_var(CONFIG_ENV, file.path());
        let loaded = PlaygroundConfig::load();
        env::remove_var(CONFIG_ENV);

        let config = loaded.unwrap();
        assert_eq!((config.youtube.min_ticks, config.youtube.max_ticks), (1, 2));
        assert_eq!(config.youtube.tick_ms, 0);
        assert_eq!(config.auth, AuthConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlaygroundConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PlaygroundConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[auth]\nrequests_per_window = \"many\"").unwrap();

        let result = PlaygroundConfig::load_from(file.path());
        assert!(matches!(result, Err(PlaygroundError::Config(_))));
    }
}
