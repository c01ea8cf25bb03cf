//! Core state types and constants shared across the orrery.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;

use crate::error::OrreryError;

/// System sets fixing the per-frame order.
///
/// Pointer input is classified first, UI commands applied next, then the
/// frame is advanced (rotation, then camera) and finally core state is
/// copied into Bevy transforms and visibility before rendering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Pointer and keyboard handling.
    Input,
    /// Host UI commands.
    Commands,
    /// `rotate_all` followed by the camera update.
    Advance,
    /// Core state to `Transform`/`Visibility`.
    Sync,
}

/// Centre of the planetary system in world space.
pub const SYSTEM_CENTER: Vec3 = Vec3::ZERO;

/// Angular speed of the asteroid field, in radians per frame at multiplier 1.
pub const ASTEROID_FIELD_SPEED: f32 = 0.0005;

/// Camera presentation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Top-down overview; pointer orbit disabled.
    #[default]
    TwoD,
    /// Free perspective; pointer orbit enabled.
    ThreeD,
}

impl ViewMode {
    /// Key used by the host UI ("2d" or "3d").
    pub fn key(self) -> &'static str {
        match self {
            ViewMode::TwoD => "2d",
            ViewMode::ThreeD => "3d",
        }
    }

    /// Whether pointer-orbit manipulation is allowed in this mode.
    pub fn allows_pointer_orbit(self) -> bool {
        matches!(self, ViewMode::ThreeD)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ViewMode {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2d" => Ok(ViewMode::TwoD),
            "3d" => Ok(ViewMode::ThreeD),
            _ => Err(OrreryError::UnknownViewMode(s.to_string())),
        }
    }
}

/// Which body, if any, the scene is isolated on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
    /// Everything is shown.
    #[default]
    None,
    /// Only the named body (and the primary) is shown.
    FocusedOn(String),
}

impl FocusState {
    /// Name of the focused body.
    pub fn name(&self) -> Option<&str> {
        match self {
            FocusState::None => None,
            FocusState::FocusedOn(name) => Some(name),
        }
    }

    /// Whether a body is focused.
    pub fn is_active(&self) -> bool {
        matches!(self, FocusState::FocusedOn(_))
    }
}
