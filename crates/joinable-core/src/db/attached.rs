use crate::{
    Criteria,
    config::AttachConfig,
    error::InternalError,
    model::SchemaModel,
    obs::trace::{CompileTraceEvent, CompileTraceSink},
    pipeline::{
        CompileContext, CriteriaCaster, LookupOptions, Pipeline, SchemaCriteriaCaster,
        compile_pipeline,
    },
    relation::{DescriptorTable, TargetRegistry, collect_descriptors},
};
use std::sync::Arc;

///
/// AttachedModel
///
/// One schema after the scan phase: its descriptor table, physical
/// collection, and attach config. Immutable once built.
///

#[derive(Clone)]
pub struct AttachedModel {
    schema: SchemaModel,
    collection: String,
    descriptors: Arc<DescriptorTable>,
    config: AttachConfig,
    trace: Option<&'static dyn CompileTraceSink>,
}

impl AttachedModel {
    /// Run the scan phase for `schema`.
    #[must_use]
    pub fn attach(
        schema: SchemaModel,
        targets: &dyn TargetRegistry,
        config: AttachConfig,
        trace: Option<&'static dyn CompileTraceSink>,
    ) -> Self {
        let collection = schema
            .collection
            .clone()
            .unwrap_or_else(|| targets.naming().collection_name(&schema.entity_name));
        let descriptors = collect_descriptors(&schema, targets, trace);

        if let Some(sink) = trace {
            sink.on_event(CompileTraceEvent::Attached {
                entity: schema.entity_name.clone(),
                descriptors: descriptors.len(),
            });
        }

        Self {
            schema,
            collection,
            descriptors: Arc::new(descriptors),
            config,
            trace,
        }
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.schema.entity_name
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    #[must_use]
    pub const fn schema(&self) -> &SchemaModel {
        &self.schema
    }

    #[must_use]
    pub const fn config(&self) -> AttachConfig {
        self.config
    }

    /// Read-only descriptor table, keyed by field name.
    #[must_use]
    pub fn descriptors(&self) -> &DescriptorTable {
        &self.descriptors
    }

    /// Shared handle to the descriptor table for callers that outlive
    /// the registry borrow.
    #[must_use]
    pub fn shared_descriptors(&self) -> Arc<DescriptorTable> {
        Arc::clone(&self.descriptors)
    }

    /// Compile a lookup pipeline using the default schema caster.
    pub fn lookup(
        &self,
        targets: &dyn TargetRegistry,
        criteria: Option<&Criteria>,
        options: &LookupOptions,
    ) -> Result<Pipeline, InternalError> {
        self.lookup_with_caster(targets, &SchemaCriteriaCaster, criteria, options)
    }

    /// Compile a lookup pipeline with a host-provided criteria caster.
    pub fn lookup_with_caster(
        &self,
        targets: &dyn TargetRegistry,
        caster: &dyn CriteriaCaster,
        criteria: Option<&Criteria>,
        options: &LookupOptions,
    ) -> Result<Pipeline, InternalError> {
        let ctx = CompileContext {
            schema: &self.schema,
            collection: &self.collection,
            table: &self.descriptors,
            targets,
            caster,
            allow_disk_use: self.config.allow_disk_use,
            trace: self.trace,
        };

        Ok(compile_pipeline(&ctx, criteria, options)?)
    }
}

impl std::fmt::Debug for AttachedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachedModel")
            .field("entity_name", &self.schema.entity_name)
            .field("collection", &self.collection)
            .field("descriptors", &self.descriptors.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
