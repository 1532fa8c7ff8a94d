//! Joinable: schema-driven join pipelines for document stores
//!
//! This is the public meta-crate. Downstream users depend on **joinable** only.
//!
//! It re-exports the stable public API from:
//!   - `joinable-core`  (schema model, join descriptors, pipeline compiler)
//!
//! Execution stays with the host store: implement `PipelineExecutor` over
//! your driver and hand it compiled pipelines.

pub use joinable_core as core;

//
// Document vocabulary
//

pub use joinable_core::{Criteria, Document, error::InternalError as Error};

//
// Prelude
//

pub mod prelude {
    pub use joinable_core::prelude::*;
}

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// JSON types criteria and documents are built from.
#[doc(hidden)]
pub mod __reexports {
    pub use serde_json;
}
