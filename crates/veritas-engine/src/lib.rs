//! Analysis pipeline: prompt construction, result parsing, and the
//! orchestrator that sequences the two external calls.
//!
//! ## Crate Position
//!
//! Depends on: veritas-core.
//! Depended on by: veritas-server.

pub mod analyzer;
pub mod parser;
pub mod persona;
pub mod prompt;

pub use analyzer::{Analysis, Analyzer};
pub use parser::parse_verdict;
pub use prompt::build_prompt;
