//! The chosen key layout, kept between runs as a small TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stalag_core::menu::{Action, KeyBinding, KeyDefs};
use tracing::{debug, info, warn};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
struct StoredKey {
    port: u8,
    mask: u8,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct StoredLayout {
    left: StoredKey,
    right: StoredKey,
    up: StoredKey,
    down: StoredKey,
    fire: StoredKey,
}

impl StoredLayout {
    fn slot(&self, action: Action) -> StoredKey {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Fire => self.fire,
        }
    }
}

impl From<&KeyDefs> for StoredLayout {
    fn from(keydefs: &KeyDefs) -> Self {
        let key = |action| {
            let KeyBinding { port, mask } = keydefs.get(action);
            StoredKey { port, mask }
        };
        Self {
            left: key(Action::Left),
            right: key(Action::Right),
            up: key(Action::Up),
            down: key(Action::Down),
            fire: key(Action::Fire),
        }
    }
}

impl TryFrom<StoredLayout> for KeyDefs {
    type Error = ConfigError;

    fn try_from(layout: StoredLayout) -> Result<Self, ConfigError> {
        let mut keydefs = KeyDefs::default();
        for action in Action::ALL {
            let StoredKey { port, mask } = layout.slot(action);
            let binding = KeyBinding { port, mask };
            if binding.label().is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{} is not a key (port {port:#04x}, mask {mask:#04x})",
                    action.name()
                )));
            }
            if keydefs.iter().any(|(_, bound)| bound == binding) {
                return Err(ConfigError::Invalid(format!(
                    "{} reuses an earlier key",
                    action.name()
                )));
            }
            keydefs.set(action, binding);
        }
        Ok(keydefs)
    }
}

pub fn to_toml(keydefs: &KeyDefs) -> Result<String, ConfigError> {
    Ok(toml::to_string(&StoredLayout::from(keydefs))?)
}

pub fn from_toml(text: &str) -> Result<KeyDefs, ConfigError> {
    let layout: StoredLayout = toml::from_str(text)?;
    KeyDefs::try_from(layout)
}

/// Load a saved layout. `Ok(None)` if nothing has been saved yet.
pub fn load(path: &Path) -> Result<Option<KeyDefs>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let keydefs = from_toml(&text)?;
            info!(path = %path.display(), "loaded key layout");
            Ok(Some(keydefs))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved key layout");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Save a complete layout, creating the parent directory if needed.
/// Incomplete layouts are skipped.
pub fn save(path: &Path, keydefs: &KeyDefs) -> Result<(), ConfigError> {
    if !keydefs.is_complete() {
        warn!("not saving an incomplete key layout");
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_toml(keydefs)?)?;
    info!(path = %path.display(), "saved key layout");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qaop_space() -> KeyDefs {
        let mut keydefs = KeyDefs::default();
        keydefs.set(Action::Left, KeyBinding { port: 0xDF, mask: 0x02 });
        keydefs.set(Action::Right, KeyBinding { port: 0xDF, mask: 0x01 });
        keydefs.set(Action::Up, KeyBinding { port: 0xFB, mask: 0x01 });
        keydefs.set(Action::Down, KeyBinding { port: 0xFD, mask: 0x01 });
        keydefs.set(Action::Fire, KeyBinding { port: 0x7F, mask: 0x01 });
        keydefs
    }

    #[test]
    fn written_layout_reads_back() {
        let text = to_toml(&qaop_space()).unwrap();
        assert_eq!(from_toml(&text).unwrap(), qaop_space());
    }

    #[test]
    fn hex_values_are_accepted() {
        let text = "
            left = { port = 0xDF, mask = 0x02 }
            right = { port = 0xDF, mask = 0x01 }
            up = { port = 0xFB, mask = 0x01 }
            down = { port = 0xFD, mask = 0x01 }
            fire = { port = 0x7F, mask = 0x01 }
        ";
        assert_eq!(from_toml(text).unwrap(), qaop_space());
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let text = "
            left = { port = 0xDF, mask = 0x02 }
            right = { port = 0xDF, mask = 0x02 }
            up = { port = 0xFB, mask = 0x01 }
            down = { port = 0xFD, mask = 0x01 }
            fire = { port = 0x7F, mask = 0x01 }
        ";
        assert!(matches!(from_toml(text), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bogus_port_is_rejected() {
        let text = "
            left = { port = 0x00, mask = 0x00 }
            right = { port = 0xDF, mask = 0x01 }
            up = { port = 0xFB, mask = 0x01 }
            down = { port = 0xFD, mask = 0x01 }
            fire = { port = 0x7F, mask = 0x01 }
        ";
        assert!(matches!(from_toml(text), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("stalag-keys-{}", std::process::id()));
        let path = dir.join("keys.toml");

        save(&path, &qaop_space()).unwrap();
        assert_eq!(load(&path).unwrap(), Some(qaop_space()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn incomplete_layout_is_not_saved() {
        let path = std::env::temp_dir().join("stalag-incomplete/keys.toml");
        save(&path, &KeyDefs::default()).unwrap();
        assert_eq!(load(&path).unwrap(), None);
    }
}
