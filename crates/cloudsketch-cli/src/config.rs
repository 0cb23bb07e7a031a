//! Locating and reading the TOML configuration.
//!
//! A configuration is looked up, first hit wins, in:
//!
//! - the `--config` path
//! - `cloudsketch/config.toml` below the working directory
//! - `config.toml` in the platform config directory
//!
//! When none exists the built-in defaults apply.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use cloudsketch::{CloudsketchError, config::AppConfig};

const LOCAL_CONFIG: &str = "cloudsketch/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for CloudsketchError {
    fn from(err: ConfigError) -> Self {
        CloudsketchError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Platform(PathBuf),
}

impl ConfigSource {
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::Platform(path) => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Explicit(_) => "explicit",
            Self::Local(_) => "local",
            Self::Platform(_) => "platform",
        };
        write!(f, "{kind} {}", self.path().display())
    }
}

/// Picks the configuration file to read, if any.
///
/// An explicit path is returned even when it does not exist, so that reading
/// it reports the missing file.
fn locate(explicit_path: Option<&Path>) -> Option<ConfigSource> {
    if let Some(path) = explicit_path {
        return Some(ConfigSource::Explicit(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(ConfigSource::Local(local));
    }

    let Some(dirs) = ProjectDirs::from("com", "cloudsketch", "cloudsketch") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let platform = dirs.config_dir().join("config.toml");
    if platform.exists() {
        Some(ConfigSource::Platform(platform))
    } else {
        debug!(path = platform.display().to_string(); "Platform configuration file not found");
        None
    }
}

/// Loads the configuration, falling back to [`AppConfig::default`].
///
/// # Errors
///
/// Returns [`CloudsketchError::Config`] when the explicit path does not exist
/// or the chosen file is not valid configuration TOML, and
/// [`CloudsketchError::Io`] when it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CloudsketchError> {
    let explicit_path = explicit_path
        .as_ref()
        .map(|path| AsRef::<Path>::as_ref(path));
    let Some(source) = locate(explicit_path) else {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    info!(source:%; "Loading configuration");
    let config = read_config(source.path())?;
    debug!(services = config.services().len(); "Configuration loaded");
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, CloudsketchError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        CloudsketchError::from(ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_missing_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CloudsketchError::Config(ref msg) if msg.contains("Missing")));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[diagram]\ntitle = \"From File\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.diagram().title(), "From File");
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[diagram\ntitle = 1").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CloudsketchError::Config(ref msg) if msg.contains("Failed to parse")));
    }

    #[test]
    fn test_explicit_path_wins() {
        let source = locate(Some(Path::new("elsewhere.toml"))).unwrap();
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("elsewhere.toml")));
        assert_eq!(source.to_string(), "explicit elsewhere.toml");
    }
}
