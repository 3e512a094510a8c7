//! Strategy outputs: target weights and liquidation instructions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired signed portfolio weight for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTarget {
    pub instrument: String,
    /// Sign encodes direction, magnitude the normalized exposure
    pub weight: f64,
}

impl PortfolioTarget {
    pub fn new(instrument: impl Into<String>, weight: f64) -> Self {
        Self {
            instrument: instrument.into(),
            weight,
        }
    }
}

/// Ordered targets for both legs of a pair (leg 1 first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAllocation {
    pub targets: Vec<PortfolioTarget>,
}

impl TargetAllocation {
    pub fn new(targets: Vec<PortfolioTarget>) -> Self {
        Self { targets }
    }

    /// Sum of absolute weights
    pub fn gross_exposure(&self) -> f64 {
        self.targets.iter().map(|t| t.weight.abs()).sum()
    }

    /// Sum of signed weights
    pub fn net_exposure(&self) -> f64 {
        self.targets.iter().map(|t| t.weight).sum()
    }

    pub fn weight_of(&self, instrument: &str) -> Option<f64> {
        self.targets
            .iter()
            .find(|t| t.instrument == instrument)
            .map(|t| t.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortfolioTarget> {
        self.targets.iter()
    }
}

/// Instruction emitted by a pair on a tick where its regime changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PairAction {
    /// Enter a position with the given leg weights
    Allocate {
        pair: String,
        allocation: TargetAllocation,
    },
    /// Close both legs of the pair
    Liquidate {
        pair: String,
        instruments: Vec<String>,
    },
}

impl PairAction {
    pub fn pair(&self) -> &str {
        match self {
            Self::Allocate { pair, .. } | Self::Liquidate { pair, .. } => pair,
        }
    }

    pub fn is_liquidation(&self) -> bool {
        matches!(self, Self::Liquidate { .. })
    }
}

impl fmt::Display for PairAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocate { pair, allocation } => {
                write!(f, "{} allocate", pair)?;
                for t in allocation.iter() {
                    write!(f, " {}={:+.4}", t.instrument, t.weight)?;
                }
                Ok(())
            }
            Self::Liquidate { pair, .. } => write!(f, "{} liquidate", pair),
        }
    }
}
