use super::*;
use crate::{relation::DescriptorOverrides, test_support::person_schema};

fn visited(schema: &SchemaModel) -> Vec<(String, bool, bool)> {
    let mut out = Vec::new();
    schema.for_each_field(&mut |path: &str, meta: FieldMeta<'_>| {
        out.push((
            path.to_string(),
            meta.is_multi_value(),
            meta.options().enabled_annotation().is_some(),
        ));
    });

    out
}

#[test]
fn for_each_field_walks_nested_paths_in_declaration_order() {
    let paths: Vec<String> = visited(&person_schema())
        .into_iter()
        .map(|(path, _, _)| path)
        .collect();

    assert_eq!(
        paths,
        [
            "name",
            "father",
            "mother",
            "sister",
            "brother",
            "relatives",
            "referees",
            "friends",
            "friends.type",
            "friends.person",
        ]
    );
}

#[test]
fn fields_inside_lists_are_multi_value() {
    let fields = visited(&person_schema());
    let multi = |name: &str| {
        fields
            .iter()
            .find(|(path, _, _)| path == name)
            .map(|(_, multi_value, _)| *multi_value)
    };

    assert_eq!(multi("father"), Some(false));
    assert_eq!(multi("relatives"), Some(true));
    assert_eq!(multi("friends"), Some(true));
    assert_eq!(multi("friends.person"), Some(true));
}

#[test]
fn list_fields_inherit_element_options() {
    let schema = person_schema();
    let referees = schema.get_field("referees").expect("referees field");
    let merged = referees.merged_options();

    assert!(referees.options.reference_name().is_none());
    assert_eq!(merged.reference_name(), Some("Person"));
    assert!(merged.enabled_annotation().is_some());
}

#[test]
fn field_options_win_over_element_options() {
    let field = FieldModel::new(
        "owners",
        FieldKind::list(ItemModel::new(FieldKind::Reference).with_ref("Account")),
    )
    .with_ref("User");

    assert_eq!(field.merged_options().reference_name(), Some("User"));
}

#[test]
fn empty_reference_name_is_absent() {
    let field = FieldModel::reference("owner", "");

    assert_eq!(field.options.reference_name(), None);
}

#[test]
fn disabled_annotation_is_ignored() {
    let field = FieldModel::reference("owner", "User").with_annotation(JoinAnnotation::default());

    assert!(field.options.enabled_annotation().is_none());
}

#[test]
fn field_kind_at_resolves_dotted_paths() {
    let schema = person_schema();

    assert_eq!(schema.field_kind_at("father"), Some(&FieldKind::Reference));
    assert_eq!(schema.field_kind_at("friends.type"), Some(&FieldKind::Text));
    assert_eq!(
        schema.field_kind_at("friends.person"),
        Some(&FieldKind::Reference)
    );
    assert_eq!(schema.field_kind_at("_id"), Some(&FieldKind::Id));
    assert_eq!(schema.field_kind_at("friends._id"), Some(&FieldKind::Id));
    assert_eq!(schema.field_kind_at("name.first"), None);
    assert_eq!(schema.field_kind_at("unknown"), None);
}

#[test]
fn annotation_deserializes_from_flag() {
    let enabled: JoinAnnotation = serde_json::from_str("true").expect("flag parses");
    let disabled: JoinAnnotation = serde_json::from_str("false").expect("flag parses");

    assert_eq!(enabled, JoinAnnotation::enabled());
    assert!(!disabled.enabled);
}

#[test]
fn annotation_object_enables_with_overrides() {
    let annotation: JoinAnnotation =
        serde_json::from_str(r#"{ "from": "people", "localField": "brother_id" }"#)
            .expect("override object parses");

    assert_eq!(
        annotation,
        JoinAnnotation::with_overrides(
            DescriptorOverrides::default()
                .from_collection("people")
                .local_field("brother_id")
        )
    );
}

#[test]
fn annotation_rejects_other_shapes() {
    let err = serde_json::from_str::<JoinAnnotation>("\"yes\"")
        .expect_err("string annotation must be rejected");

    assert!(err.is_data(), "unexpected error: {err:?}");
}
