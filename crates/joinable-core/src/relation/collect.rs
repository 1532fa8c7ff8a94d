use crate::{
    model::{FieldMeta, FieldSource},
    obs::trace::{CompileTraceEvent, CompileTraceSink, SkipReason},
    relation::{DescriptorTable, NormalizeInput, TargetRegistry, normalize_descriptor},
};

/// Scan a schema and build its descriptor table.
///
/// A field qualifies when its merged options carry an enabled join
/// annotation and name a target, through a non-empty `ref` or an explicit
/// `from` override. Annotated fields without a target are skipped; joins
/// are opt-in and partial schemas are common.
pub fn collect_descriptors(
    source: &dyn FieldSource,
    targets: &dyn TargetRegistry,
    trace: Option<&dyn CompileTraceSink>,
) -> DescriptorTable {
    let mut table = DescriptorTable::new();

    source.for_each_field(&mut |path_name: &str, meta: FieldMeta<'_>| {
        let options = meta.options();
        let Some(annotation) = options.enabled_annotation() else {
            return;
        };

        let reference = options.reference_name();
        if reference.is_none() && annotation.overrides.from.is_none() {
            if let Some(sink) = trace {
                sink.on_event(CompileTraceEvent::FieldSkipped {
                    entity: source.entity_name().to_string(),
                    field: path_name.to_string(),
                    reason: SkipReason::MissingTarget,
                });
            }
            return;
        }

        table.insert(normalize_descriptor(
            NormalizeInput {
                path_name,
                reference,
                is_array: meta.is_multi_value(),
                overrides: &annotation.overrides,
            },
            targets,
        ));
    });

    table
}
