//! Module: relation
//! Responsibility: join descriptor normalization and schema scanning.
//! Does not own: pipeline assembly, criteria casting, or execution.
//!
//! Invariants:
//! - Descriptors are complete: every field has a value after normalization.
//! - Author overrides win per field over computed defaults.
//! - Table order is schema declaration order.

mod collect;
mod descriptor;
mod naming;
mod normalize;
mod registry;
mod table;


pub use collect::collect_descriptors;
pub use descriptor::{
    DescriptorOverrides, JoinDescriptor, UnwindOverride, UnwindSpec, UnwindSpecOverride,
};
pub use naming::{InflectionNaming, NamingPolicy};
pub use normalize::{NormalizeInput, normalize_descriptor};
pub use registry::{NamingRegistry, TargetRegistry};
pub use table::DescriptorTable;
