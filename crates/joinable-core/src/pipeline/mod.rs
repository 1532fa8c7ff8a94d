//! Module: pipeline
//! Responsibility: compile descriptor tables into ordered aggregation pipelines.
//! Does not own: descriptor normalization or pipeline execution.
//!
//! Invariants:
//! - `$match` precedes every join.
//! - Each `$lookup` is followed immediately by its `$unwind`, if any.
//! - Join order is descriptor table order.
//! - Compilation never mutates the cached descriptor table.

mod cast;
mod compile;
mod fingerprint;
mod handle;
mod stage;


pub use cast::{CastError, CriteriaCaster, SchemaCriteriaCaster};
pub use compile::{CompileContext, LookupOptions, compile_pipeline};
pub use fingerprint::PipelineFingerprint;
pub use handle::{Pipeline, PipelineExecutor};
pub use stage::{LookupStage, Stage};
