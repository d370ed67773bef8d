use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering projection mode requested at game construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Mode2D,
    Mode3D,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Mode2D => f.write_str("2d"),
            RenderMode::Mode3D => f.write_str("3d"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2d" => Ok(RenderMode::Mode2D),
            "3d" => Ok(RenderMode::Mode3D),
            other => Err(ParseIdError::UnknownRenderMode(other.to_string())),
        }
    }
}

/// Errors from parsing textual identifier forms (keybind files, CLI args).
#[derive(Debug, thiserror::Error)]
pub enum ParseIdError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
    #[error("unknown modifier bits: {0:#b}")]
    UnknownModifier(u8),
    #[error("unknown trigger: {0:?}")]
    UnknownTrigger(String),
    #[error("unknown render mode: {0:?}")]
    UnknownRenderMode(String),
}
