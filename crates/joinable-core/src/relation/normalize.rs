use crate::{
    FIELD_VARIABLE_PREFIX, IDENTITY_FIELD,
    relation::{DescriptorOverrides, JoinDescriptor, TargetRegistry, UnwindOverride, UnwindSpec},
};

///
/// NormalizeInput
/// One raw field annotation, as collected from a schema field.
///

#[derive(Clone, Copy, Debug)]
pub struct NormalizeInput<'a> {
    pub path_name: &'a str,
    pub reference: Option<&'a str>,
    pub is_array: bool,
    pub overrides: &'a DescriptorOverrides,
}

/// Normalize one raw field annotation into a complete [`JoinDescriptor`].
///
/// Computed defaults:
/// - `as` is the singular of `path_name` for unwound arrays, else `path_name`
/// - singular relationships unwind unless the author suppresses it
/// - unwinding preserves documents with a missing or empty reference
/// - `from` resolves from `ref` through `targets`
/// - `localField` is `path_name`, `foreignField` is the identity field
///
/// Every override the author supplies replaces the matching default.
#[must_use]
pub fn normalize_descriptor(
    input: NormalizeInput<'_>,
    targets: &dyn TargetRegistry,
) -> JoinDescriptor {
    let NormalizeInput {
        path_name,
        reference,
        is_array,
        overrides,
    } = input;
    debug_assert!(!path_name.is_empty(), "join descriptor requires a path name");

    // Phase 1: decide unwinding; suppression is honored for singular fields too.
    let should_unwind = overrides
        .unwind
        .as_ref()
        .map_or(!is_array, UnwindOverride::requests_unwind);

    // Phase 2: output name.
    let as_name = overrides.as_name.clone().unwrap_or_else(|| {
        if is_array && should_unwind {
            targets.naming().singularize(path_name)
        } else {
            path_name.to_string()
        }
    });

    // Phase 3: unwind spec, author fields winning one by one.
    let unwind = should_unwind.then(|| {
        let spec = overrides.unwind.as_ref().and_then(UnwindOverride::spec);

        UnwindSpec {
            path: spec
                .and_then(|spec| spec.path.clone())
                .unwrap_or_else(|| format!("{FIELD_VARIABLE_PREFIX}{as_name}")),
            preserve_null_and_empty_arrays: spec
                .and_then(|spec| spec.preserve_null_and_empty_arrays)
                .unwrap_or(true),
        }
    });

    // Phase 4: target collection.
    let reference = reference.filter(|name| !name.is_empty());
    let (from, from_explicit) = match (&overrides.from, reference) {
        (Some(from), _) => (from.clone(), true),
        (None, Some(reference)) => (targets.resolve_collection_name(reference), false),
        (None, None) => (String::new(), false),
    };

    JoinDescriptor {
        path_name: path_name.to_string(),
        reference: reference.map(ToString::to_string),
        from,
        local_field: overrides
            .local_field
            .clone()
            .unwrap_or_else(|| path_name.to_string()),
        foreign_field: overrides
            .foreign_field
            .clone()
            .unwrap_or_else(|| IDENTITY_FIELD.to_string()),
        as_name,
        is_array,
        unwind,
        from_explicit,
    }
}
