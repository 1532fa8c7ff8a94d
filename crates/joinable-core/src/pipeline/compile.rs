use crate::{
    Criteria,
    model::SchemaModel,
    obs::trace::{CompileTraceEvent, CompileTraceSink, DropReason},
    pipeline::{CastError, CriteriaCaster, LookupStage, Pipeline, Stage},
    relation::{DescriptorTable, JoinDescriptor, TargetRegistry},
};

///
/// LookupOptions
/// Per-call compile options.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LookupOptions {
    /// Output or local field names whose joins are skipped.
    pub exclude: Vec<String>,
    /// Per-call override of the attached `allow_disk_use` setting.
    pub allow_disk_use: Option<bool>,
}

impl LookupOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.exclude.push(field.into());
        self
    }

    #[must_use]
    pub const fn allow_disk_use(mut self, allow: bool) -> Self {
        self.allow_disk_use = Some(allow);
        self
    }

    fn excludes(&self, descriptor: &JoinDescriptor) -> bool {
        self.exclude
            .iter()
            .any(|name| descriptor.is_addressed_by(name))
    }
}

///
/// CompileContext
///
/// Everything compilation reads besides the per-call criteria and options.
/// All of it is borrowed; compilation never mutates shared state.
///

#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub schema: &'a SchemaModel,
    pub collection: &'a str,
    pub table: &'a DescriptorTable,
    pub targets: &'a dyn TargetRegistry,
    pub caster: &'a dyn CriteriaCaster,
    /// Attached default for `allow_disk_use`.
    pub allow_disk_use: bool,
    pub trace: Option<&'a dyn CompileTraceSink>,
}

/// Compile a descriptor table, criteria, and options into a pipeline.
///
/// Stage order is fixed: `$match` first, then one `$lookup` (plus an
/// `$unwind` when the descriptor carries one) per surviving descriptor in
/// table order. Criteria that cannot be cast fail the whole compile before
/// any stage is assembled.
pub fn compile_pipeline(
    ctx: &CompileContext<'_>,
    criteria: Option<&Criteria>,
    options: &LookupOptions,
) -> Result<Pipeline, CastError> {
    let entity = ctx.schema.entity_name.as_str();

    // Phase 1: cast criteria up front so a failure leaves nothing half-built.
    let criteria = criteria
        .map(|criteria| ctx.caster.cast(criteria, ctx.schema))
        .transpose()?;

    // Phase 2: snapshot, filter, and late-bind target collections.
    let descriptors: Vec<JoinDescriptor> = ctx
        .table
        .snapshot()
        .into_iter()
        .filter(|descriptor| {
            let reason = if options.excludes(descriptor) {
                DropReason::Excluded
            } else if descriptor.is_resolvable() {
                return true;
            } else {
                DropReason::Unresolvable
            };
            trace_drop(ctx.trace, entity, descriptor, reason);

            false
        })
        .map(|descriptor| late_bind(descriptor, ctx.targets))
        .collect();

    // Phase 3: assemble stages.
    let mut pipeline = Pipeline::new(ctx.collection.to_string());
    if let Some(criteria) = criteria {
        pipeline.stages.push(Stage::Match(criteria));
    }
    for descriptor in &descriptors {
        pipeline
            .stages
            .push(Stage::Lookup(LookupStage::from(descriptor)));
        if let Some(unwind) = &descriptor.unwind {
            pipeline.stages.push(Stage::Unwind(unwind.clone()));
        }
    }
    pipeline.allow_disk_use = options.allow_disk_use.unwrap_or(ctx.allow_disk_use);

    if let Some(sink) = ctx.trace {
        sink.on_event(CompileTraceEvent::Compiled {
            entity: entity.to_string(),
            fingerprint: pipeline.fingerprint(),
            stages: pipeline.len(),
            allow_disk_use: pipeline.allow_disk_use,
        });
    }

    Ok(pipeline)
}

// Re-resolve `from` for targets registered after the scan phase.
fn late_bind(mut descriptor: JoinDescriptor, targets: &dyn TargetRegistry) -> JoinDescriptor {
    if !descriptor.has_explicit_from()
        && let Some(reference) = descriptor.reference.as_deref()
    {
        descriptor.from = targets.resolve_collection_name(reference);
    }

    descriptor
}

fn trace_drop(
    trace: Option<&dyn CompileTraceSink>,
    entity: &str,
    descriptor: &JoinDescriptor,
    reason: DropReason,
) {
    if let Some(sink) = trace {
        sink.on_event(CompileTraceEvent::DescriptorDropped {
            entity: entity.to_string(),
            field: descriptor.path_name.clone(),
            reason,
        });
    }
}
