//! The closed set of effect modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the eleven particle-behavior presets.
///
/// Exactly one mode is active per engine. Every spawn, update, and render
/// rule is an exhaustive `match` over this enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectMode {
    /// Expanding rings.
    Ripple,
    /// Jittered glitter bursts and swipe trails.
    Sparkle,
    /// Fractal bolts along the pointer path.
    #[default]
    Lightning,
    /// Cone-shaped bursts with a trailing tail.
    Comet,
    /// Radial bursts with gravity.
    Firework,
    /// Concentric rotating rings with an occasional escapee.
    SpinningCircle,
    /// Ambient field pulled toward and pushed away from the pointer.
    ScatterConverge,
    /// Orbiting rings around the pointer.
    Vortex,
    /// Perpendicular wavefronts following the swipe.
    Wave,
    /// A spring grid rippling color outward from the pointer.
    GridWave,
    /// Flames rising from the bottom edge.
    Fire,
}

impl EffectMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Ripple,
        Self::Sparkle,
        Self::Lightning,
        Self::Comet,
        Self::Firework,
        Self::SpinningCircle,
        Self::ScatterConverge,
        Self::Vortex,
        Self::Wave,
        Self::GridWave,
        Self::Fire,
    ];

    /// Mode used when a persisted preference is missing or unrecognized.
    pub const DEFAULT: Self = Self::Lightning;

    /// Persisted name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ripple => "RIPPLE",
            Self::Sparkle => "SPARKLE",
            Self::Lightning => "LIGHTNING",
            Self::Comet => "COMET",
            Self::Firework => "FIREWORK",
            Self::SpinningCircle => "SPINNING_CIRCLE",
            Self::ScatterConverge => "SCATTER_CONVERGE",
            Self::Vortex => "VORTEX",
            Self::Wave => "WAVE",
            Self::GridWave => "GRID_WAVE",
            Self::Fire => "FIRE",
        }
    }

    /// Resolves a persisted preference, falling back to [`Self::DEFAULT`].
    #[must_use]
    pub fn from_preference(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or(Self::DEFAULT)
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mode name that matches none of the eleven variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown effect mode: {0:?}")]
pub struct ParseModeError(pub String);

impl FromStr for EffectMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseModeError(s.to_owned()))
    }
}
