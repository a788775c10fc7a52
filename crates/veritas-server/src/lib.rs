//! HTTP surface: router, handlers, and upload-artifact lifecycle.
//!
//! ## Crate Position
//!
//! Depends on: veritas-core, veritas-engine.
//! Depended on by: the root binary.

pub mod handlers;
pub mod server;
pub mod uploads;

pub use server::{build_router, start, AppState, ServerConfig, ServerHandle};
pub use uploads::TempArtifact;
