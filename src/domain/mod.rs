//! Domain Layer - Core value types for the pairs engine
//!
//! Pure data with no I/O. Bars flow in, actions and snapshots flow out;
//! all external interactions happen through the ports layer.

pub mod allocation;
pub mod bar;
pub mod regime;
pub mod snapshot;

pub use allocation::{PairAction, PortfolioTarget, TargetAllocation};
pub use bar::{Bar, MarketSnapshot};
pub use regime::PositionRegime;
pub use snapshot::IndicatorSnapshot;
