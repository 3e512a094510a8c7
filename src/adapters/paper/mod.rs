//! Paper Execution
//!
//! Records the strategy's target weights without routing any orders.
//! Holdings are tracked as signed portfolio weights; the notional each weight
//! implies for the configured capital is logged for inspection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::domain::PairAction;
use crate::ports::{ExecutionError, ExecutionPort};

/// Paper execution statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperStats {
    /// Allocation instructions accepted
    pub allocations: u32,
    /// Liquidation instructions accepted
    pub liquidations: u32,
}

/// Execution adapter that keeps target weights in memory
#[derive(Debug, Clone)]
pub struct PaperExecution {
    capital: f64,
    /// Signed weight per instrument
    holdings: BTreeMap<String, f64>,
    journal: Vec<PairAction>,
    stats: PaperStats,
}

impl PaperExecution {
    pub fn new(capital: f64) -> Self {
        Self {
            capital,
            holdings: BTreeMap::new(),
            journal: Vec::new(),
            stats: PaperStats::default(),
        }
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    /// Current signed weight of `instrument` (0 when not held)
    pub fn weight(&self, instrument: &str) -> f64 {
        self.holdings.get(instrument).copied().unwrap_or(0.0)
    }

    /// Notional exposure implied by the current weight
    pub fn notional(&self, instrument: &str) -> f64 {
        self.weight(instrument) * self.capital
    }

    pub fn holdings(&self) -> &BTreeMap<String, f64> {
        &self.holdings
    }

    /// Sum of absolute weights across all held instruments
    pub fn gross_exposure(&self) -> f64 {
        self.holdings.values().map(|w| w.abs()).sum()
    }

    /// Every accepted action, in submission order
    pub fn journal(&self) -> &[PairAction] {
        &self.journal
    }

    pub fn stats(&self) -> PaperStats {
        self.stats
    }
}

impl ExecutionPort for PaperExecution {
    fn submit(&mut self, action: &PairAction) -> Result<(), ExecutionError> {
        match action {
            PairAction::Allocate { pair, allocation } => {
                if let Some(bad) = allocation.iter().find(|t| !t.weight.is_finite()) {
                    return Err(ExecutionError::Rejected {
                        pair: pair.clone(),
                        reason: format!("non-finite weight for {}", bad.instrument),
                    });
                }
                for target in allocation.iter() {
                    self.holdings.insert(target.instrument.clone(), target.weight);
                    info!(
                        "PAPER {} | {} target {:+.4} (${:.2})",
                        pair,
                        target.instrument,
                        target.weight,
                        target.weight * self.capital
                    );
                }
                info!(
                    "PAPER {} | gross {:.4} net {:+.4}",
                    pair,
                    allocation.gross_exposure(),
                    allocation.net_exposure()
                );
                self.stats.allocations += 1;
            }
            PairAction::Liquidate { pair, instruments } => {
                for instrument in instruments {
                    if self.holdings.remove(instrument).is_some() {
                        info!("PAPER {} | {} closed", pair, instrument);
                    }
                }
                self.stats.liquidations += 1;
            }
        }

        self.journal.push(action.clone());
        Ok(())
    }
}
