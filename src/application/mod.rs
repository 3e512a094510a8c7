pub mod orchestrator;

pub use orchestrator::{OrchestratorError, ReplayOrchestrator, ReplaySummary};
