//! Domain types shared across the veritas crates.
//!
//! ## Crate Position
//!
//! Standalone (no veritas crate dependencies).
//! Depended on by: veritas-llm, veritas-engine, veritas-server.

pub mod challenge;
pub mod errors;
pub mod provider;
pub mod security;
pub mod types;

pub use challenge::{Challenge, ChallengeKind};
pub use errors::{AnalyzeError, ServiceError};
pub use provider::{CompletionRequest, GenerationService, TranscriptionService};
pub use security::ApiKey;
pub use types::{AnalysisMode, AnalysisVerdict, CriteriaScores, TranscriptionResult, Verdict};
