use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::get_data_dir;

pub const DEFAULT_OUTPUT_PREFIX: &str = "sym_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prepended to the input file name when no output is given.
    pub output_prefix: String,
    /// Rotation used when the prompt is left empty.
    pub default_rotation: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            default_rotation: 0,
        }
    }
}

impl Settings {
    pub fn disk_path() -> Option<std::path::PathBuf> {
        let mut path = get_data_dir()?;
        path.push("settings.ron");
        tracing::trace!(target: "settings", "path: {:?}", path);
        Some(path)
    }

    pub fn from_disk() -> Option<Self> {
        Self::from_path(&Self::disk_path()?)
    }

    /// Missing or unreadable files give None, nothing is written.
    pub fn from_path(path: &Path) -> Option<Self> {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return None;
        };
        Self::from_string(&raw)
    }

    pub fn from_string(raw: &str) -> Option<Self> {
        ron::from_str(raw)
            .map_err(|err| tracing::warn!(target: "settings", "ignoring settings: {}", err))
            .ok()
    }
}
