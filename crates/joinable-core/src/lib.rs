//! Core runtime for Joinable: schema reflection model, join descriptor
//! normalization, descriptor scanning, pipeline compilation, and the
//! ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod pipeline;
pub mod relation;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Identity field every stored document carries.
pub const IDENTITY_FIELD: &str = "_id";

/// Prefix marking a field name as a pipeline variable (`$father`).
pub const FIELD_VARIABLE_PREFIX: &str = "$";

///
/// Document
///
/// One stored or joined document in the host store's JSON form.
///

pub type Document = serde_json::Map<String, serde_json::Value>;

///
/// Criteria
///
/// Match criteria in the host store's native predicate form.
///

pub type Criteria = serde_json::Map<String, serde_json::Value>;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::AttachConfig,
        db::{AttachedModel, ModelRegistry},
        model::{FieldKind, FieldModel, FieldOptions, ItemModel, JoinAnnotation, SchemaModel},
        pipeline::{LookupOptions, Pipeline, PipelineExecutor, Stage},
        relation::{DescriptorOverrides, DescriptorTable, JoinDescriptor, UnwindOverride, UnwindSpec},
    };
}
