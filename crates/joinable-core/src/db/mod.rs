//! Module: db
//! Responsibility: attach schemas once and compile lookups against them.
//! Does not own: normalization rules, stage assembly, or execution.
//! Boundary: the caller-owned registry is the single writer of attached
//! models; everything after `attach` is read-only.

mod attached;
mod registry;


pub use attached::AttachedModel;
pub use registry::{ModelRegistry, ModelRegistryError};
