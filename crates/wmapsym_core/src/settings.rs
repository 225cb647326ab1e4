use ron::error::SpannedError;

use crate::rotation::{RotationError, Turns};

/// One conversion, can be read from a ron file:
///
/// ```ron
/// (
///     path: "maps/2p_Caves.map",
///     rotation: 90,
///     output: Some("maps/4p_Caves.map"),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    pub path: String,
    /// Degrees clockwise, a multiple of 90.
    pub rotation: i32,
    /// Defaults to the input file name with a prefix.
    pub output: Option<String>,
}

impl ConvertSettings {
    pub fn with_path(self, path: String) -> Self {
        Self { path, ..self }
    }

    pub fn with_rotation(self, rotation: i32) -> Self {
        Self { rotation, ..self }
    }

    pub fn from_string(config_str: &str) -> Result<Self, SpannedError> {
        ron::from_str(config_str)
    }

    pub fn turns(&self) -> Result<Turns, RotationError> {
        Turns::from_degrees(self.rotation)
    }
}
