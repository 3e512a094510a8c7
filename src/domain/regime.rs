use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional state of a traded pair.
///
/// `Long` means long the spread (long leg 1, short leg 2); `Short` is the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionRegime {
    #[default]
    Flat,
    Long,
    Short,
}

impl PositionRegime {
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat)
    }

    pub fn is_invested(&self) -> bool {
        !self.is_flat()
    }

    /// Sign applied to leg 1's weight while in this regime
    pub fn direction(&self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

impl fmt::Display for PositionRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "Flat"),
            Self::Long => write!(f, "Long"),
            Self::Short => write!(f, "Short"),
        }
    }
}
