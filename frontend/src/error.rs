use std::path::PathBuf;

use crate::config::ConfigError;

/// Everything that can stop the frontend before or after the menu runs.
#[derive(Debug)]
pub enum FrontendError {
    /// SDL failed to set up a subsystem, window or device.
    Sdl(String),

    /// The settings file could not be read or parsed.
    Config(ConfigError),

    /// The saved key layout could not be read or written.
    KeyStore { path: PathBuf, source: ConfigError },
}

impl std::fmt::Display for FrontendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sdl(msg) => write!(f, "SDL error: {msg}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::KeyStore { path, source } => {
                write!(f, "key layout {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sdl(_) => None,
            Self::Config(e) => Some(e),
            Self::KeyStore { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for FrontendError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// SDL reports errors as plain strings.
pub(crate) fn sdl<E: std::fmt::Display>(e: E) -> FrontendError {
    FrontendError::Sdl(e.to_string())
}
