//! Settings file and command-line merging.
//!
//! The file lives at `<config dir>/stalag/config.toml` unless `--config` says
//! otherwise. A missing file is the same as an empty one. Command-line flags
//! override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stalag_core::menu::DEFAULT_TEMPO;
use tracing::{debug, info};

pub const DEFAULT_SCALE: u32 = 3;
pub const DEFAULT_VOLUME: u8 = 50;

/// Errors reading or writing one of the TOML files.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    /// A value is present but unusable.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Serialize(e) => write!(f, "write error: {e}"),
            Self::Invalid(msg) => write!(f, "invalid value: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub scale: Option<u32>,
    pub tempo: Option<u8>,
    pub volume: Option<u8>,
    /// Where to keep the chosen key layout.
    pub keys_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path`, treating a missing file as empty.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                info!(path = %path.display(), "loaded settings");
                Self::parse(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Values given on the command line, all optional.
#[derive(Debug, Default)]
pub struct Overrides {
    pub scale: Option<u32>,
    pub tempo: Option<u8>,
    pub volume: Option<u8>,
}

/// Final settings after merging file and command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scale: u32,
    pub tempo: u8,
    pub volume: u8,
    pub keys_path: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: FileConfig, cli: &Overrides) -> Result<Self, ConfigError> {
        let settings = Self {
            scale: cli.scale.or(file.scale).unwrap_or(DEFAULT_SCALE),
            tempo: cli.tempo.or(file.tempo).unwrap_or(DEFAULT_TEMPO),
            volume: cli.volume.or(file.volume).unwrap_or(DEFAULT_VOLUME),
            keys_path: file.keys_path.or_else(default_keys_path),
        };

        if settings.scale == 0 || settings.scale > 8 {
            return Err(ConfigError::Invalid(format!(
                "scale {} (expected 1-8)",
                settings.scale
            )));
        }
        if settings.tempo == 0 {
            return Err(ConfigError::Invalid("tempo 0 (expected 1-255)".into()));
        }
        if settings.volume > 100 {
            return Err(ConfigError::Invalid(format!(
                "volume {} (expected 0-100)",
                settings.volume
            )));
        }
        Ok(settings)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stalag").join("config.toml"))
}

pub fn default_keys_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("stalag").join("keys.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let file = FileConfig::parse("").unwrap();
        let settings = Settings::resolve(file, &Overrides::default()).unwrap();
        assert_eq!(settings.scale, DEFAULT_SCALE);
        assert_eq!(settings.tempo, DEFAULT_TEMPO);
        assert_eq!(settings.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn command_line_beats_file() {
        let file = FileConfig::parse("scale = 2\ntempo = 12\nvolume = 80\n").unwrap();
        let cli = Overrides {
            scale: Some(4),
            ..Overrides::default()
        };
        let settings = Settings::resolve(file, &cli).unwrap();
        assert_eq!(settings.scale, 4);
        assert_eq!(settings.tempo, 12);
        assert_eq!(settings.volume, 80);
    }

    #[test]
    fn keys_path_from_file() {
        let file = FileConfig::parse("keys_path = \"/tmp/keys.toml\"").unwrap();
        let settings = Settings::resolve(file, &Overrides::default()).unwrap();
        assert_eq!(settings.keys_path, Some(PathBuf::from("/tmp/keys.toml")));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            FileConfig::parse("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_tempo_is_rejected() {
        let cli = Overrides {
            tempo: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(FileConfig::default(), &cli),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn loud_volume_is_rejected() {
        let file = FileConfig::parse("volume = 101").unwrap();
        assert!(Settings::resolve(file, &Overrides::default()).is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let path = std::env::temp_dir().join("stalag-no-such-dir/config.toml");
        assert_eq!(FileConfig::load(&path).unwrap(), FileConfig::default());
    }
}
