//! Settings loaded from TOML files and the environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Searches download and read full papers, so they can take minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub const ENV_BACKEND_URL: &str = "ARXIV_AGENT_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "ARXIV_AGENT_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved settings used by the app
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub backend: BackendSettings,
    pub window: WindowSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    pub url: String,
    pub timeout: Duration,
    /// Launch command for a local backend, if any
    pub command: Option<String>,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            command: None,
            args: Vec::new(),
            working_dir: None,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 820.0,
        }
    }
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<BackendConfig>,
    pub window: Option<WindowConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// Platform config path: `<config_dir>/arxiv-agent/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("arxiv-agent").join("config.toml"))
}

/// Load settings: defaults, then platform file, then `./.arxiv-agent.toml`,
/// then environment variables.
pub fn load_settings() -> Settings {
    let mut files = Vec::new();
    if let Some(path) = config_path() {
        files.push(path);
    }
    files.push(PathBuf::from(".arxiv-agent.toml"));

    let mut settings = Settings::default();
    for path in files {
        match load_from_path(&path) {
            Ok(Some(file)) => {
                tracing::debug!("Loaded config from {:?}", path);
                settings = apply_file(settings, file);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring config: {}", e),
        }
    }

    apply_env(settings, |key| std::env::var(key).ok())
}

/// Read a config file. A missing file is not an error.
pub fn load_from_path(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Overlay file values on top of `base`.
pub fn apply_file(mut base: Settings, file: ConfigFile) -> Settings {
    if let Some(backend) = file.backend {
        if let Some(url) = backend.url {
            base.backend.url = url;
        }
        if let Some(secs) = backend.timeout_secs {
            base.backend.timeout = Duration::from_secs(secs);
        }
        if backend.command.is_some() {
            base.backend.command = backend.command;
        }
        if let Some(args) = backend.args {
            base.backend.args = args;
        }
        if backend.working_dir.is_some() {
            base.backend.working_dir = backend.working_dir;
        }
    }
    if let Some(window) = file.window {
        if let Some(width) = window.width {
            base.window.width = width;
        }
        if let Some(height) = window.height {
            base.window.height = height;
        }
    }
    base
}

/// Overlay environment variables on top of `base`.
pub fn apply_env(mut base: Settings, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    if let Some(url) = lookup(ENV_BACKEND_URL).filter(|u| !u.trim().is_empty()) {
        base.backend.url = url.trim().to_string();
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => base.backend.timeout = Duration::from_secs(secs),
            Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_TIMEOUT_SECS, raw),
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[backend]
url = "http://research.local:9000"
command = "uvicorn"
args = ["server.app:app", "--port", "9000"]
"#,
        )
        .unwrap();

        let file = load_from_path(&path).unwrap().unwrap();
        let settings = apply_file(Settings::default(), file);

        assert_eq!(settings.backend.url, "http://research.local:9000");
        assert_eq!(settings.backend.command.as_deref(), Some("uvicorn"));
        assert_eq!(settings.backend.args.len(), 3);
        assert_eq!(settings.backend.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.window, WindowSettings::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend\nurl = 3").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            backend: Some(BackendConfig {
                url: Some("http://from-file:8000".into()),
                timeout_secs: Some(10),
                ..BackendConfig::default()
            }),
            window: None,
        };
        let env: HashMap<&str, &str> = [
            (ENV_BACKEND_URL, "http://from-env:8000"),
            (ENV_TIMEOUT_SECS, "oops"),
        ]
        .into_iter()
        .collect();

        let settings = apply_env(apply_file(Settings::default(), file), |k| {
            env.get(k).map(|v| v.to_string())
        });

        assert_eq!(settings.backend.url, "http://from-env:8000");
        // unparsable timeout keeps the file value
        assert_eq!(settings.backend.timeout, Duration::from_secs(10));
    }
}
