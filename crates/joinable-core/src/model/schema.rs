use crate::{
    IDENTITY_FIELD,
    model::{FieldKind, FieldModel, FieldOptions},
};

// Kind of the implicit identity field.
static IDENTITY_KIND: FieldKind = FieldKind::Id;

///
/// SchemaModel
/// Minimal runtime model for one document schema.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaModel {
    /// Logical entity name other schemas use as `ref`.
    pub entity_name: String,
    /// Physical collection name, when it differs from the naming convention.
    pub collection: Option<String>,
    /// Ordered field list (declaration order is authoritative).
    pub fields: Vec<FieldModel>,
}

impl SchemaModel {
    #[must_use]
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            collection: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a top-level field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolve the storage kind at a dotted path.
    ///
    /// Paths descend through embedded schemas and through the element type
    /// of lists, so `friends.person` resolves inside a list of embedded
    /// documents. The implicit identity field resolves at every level.
    #[must_use]
    pub fn field_kind_at(&self, path: &str) -> Option<&FieldKind> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        if head == IDENTITY_FIELD && rest.is_none() {
            return Some(&IDENTITY_KIND);
        }

        let kind = &self.get_field(head)?.kind;
        match rest {
            None => Some(kind),
            Some(rest) => kind.embedded_schema()?.field_kind_at(rest),
        }
    }

    // Visit fields depth-first, prefixing nested paths with their parents.
    fn visit_fields(
        &self,
        prefix: Option<&str>,
        inside_list: bool,
        visitor: &mut dyn FnMut(&str, FieldMeta<'_>),
    ) {
        for field in &self.fields {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{}", field.name),
                None => field.name.clone(),
            };
            let options = field.merged_options();
            let multi_value = inside_list || field.is_multi_value();

            visitor(
                &path,
                FieldMeta {
                    kind: &field.kind,
                    options: &options,
                    multi_value,
                },
            );

            if let Some(embedded) = field.kind.embedded_schema() {
                embedded.visit_fields(Some(&path), multi_value, visitor);
            }
        }
    }
}

///
/// FieldMeta
///
/// Per-field view handed to [`FieldSource`] visitors.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldMeta<'a> {
    kind: &'a FieldKind,
    options: &'a FieldOptions,
    multi_value: bool,
}

impl<'a> FieldMeta<'a> {
    #[must_use]
    pub const fn new(kind: &'a FieldKind, options: &'a FieldOptions, multi_value: bool) -> Self {
        Self {
            kind,
            options,
            multi_value,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'a FieldKind {
        self.kind
    }

    /// Declared options, including options inherited from an array element.
    #[must_use]
    pub const fn options(&self) -> &'a FieldOptions {
        self.options
    }

    /// True when the path resolves to zero-or-more values per document.
    #[must_use]
    pub const fn is_multi_value(&self) -> bool {
        self.multi_value
    }
}

///
/// FieldSource
///
/// Capability: any source of `(path, field metadata)` pairs.
/// Host store adapters implement this instead of exposing their schema
/// object model.
///

pub trait FieldSource {
    /// Stable entity name used in diagnostics and trace events.
    fn entity_name(&self) -> &str;

    /// Visit every field, nested subfields included, in declaration order.
    fn for_each_field(&self, visitor: &mut dyn FnMut(&str, FieldMeta<'_>));
}

impl FieldSource for SchemaModel {
    fn entity_name(&self) -> &str {
        &self.entity_name
    }

    fn for_each_field(&self, visitor: &mut dyn FnMut(&str, FieldMeta<'_>)) {
        self.visit_fields(None, false, visitor);
    }
}
