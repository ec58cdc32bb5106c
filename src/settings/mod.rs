use std::{fs, path::PathBuf};

use log::warn;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

/// Tool defaults, read once at startup from the user's settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maze height used when `generate` is not given one.
    pub default_height: usize,
    /// Maze width used when `generate` is not given one.
    pub default_width: usize,
    /// Extra tunnels punched after the spanning tree. `None` means half the
    /// maze height.
    pub extra_tunnels: Option<usize>,
    /// Wait for enter between step-by-step solver frames.
    pub step_pause: bool,
    /// Style the start, finish and marker characters.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_height: 10,
            default_width: 10,
            extra_tunnels: None,
            step_pause: true,
            color: true,
        }
    }
}

impl Settings {
    pub fn load(path: PathBuf) -> Self {
        match fs::read_to_string(&path) {
            Ok(text) => match Self::parse(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("ignoring bad settings file {:?}: {}", path, err);
                    Settings::default()
                }
            },
            Err(_) => {
                // first run: seed the file so there is something to edit
                let default_settings = include_str!("./default_settings.ron");
                if let Some(parent) = path.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                let _ = fs::write(&path, default_settings);
                Settings::default()
            }
        }
    }

    fn parse(text: &str) -> Result<Settings, ron::error::SpannedError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)
    }

    pub fn default_path() -> PathBuf {
        dirs::preference_dir()
            .unwrap_or_default()
            .join("rmaze")
            .join("settings.ron")
    }
}
