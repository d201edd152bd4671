//! Batch orchestration of per-entry pricing pipelines.
//!
//! Every entry walks the same stages, concurrently with the others:
//! locate listing -> fetch -> parse price table -> estimate value. A failed
//! stage terminates that entry alone with a typed status.

mod config;
mod runner;
mod types;

pub use config::BatchConfig;
pub use runner::BatchRunner;
pub use types::{ItemStatus, ResolvedItem};
