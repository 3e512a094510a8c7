use thiserror::Error;

use crate::domain::PairAction;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Rejected action for {pair}: {reason}")]
    Rejected { pair: String, reason: String },
}

/// Receives the allocation and liquidation instructions the strategy emits
#[cfg_attr(test, mockall::automock)]
pub trait ExecutionPort {
    fn submit(&mut self, action: &PairAction) -> Result<(), ExecutionError>;
}
