use crate::{
    model::{JoinAnnotation, SchemaModel},
    relation::DescriptorOverrides,
};

///
/// FieldModel
/// Runtime field metadata used by relation scanning and criteria casting.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field name as stored in documents.
    pub name: String,
    /// Storage kind of the field.
    pub kind: FieldKind,
    /// Options declared directly on the field.
    pub options: FieldOptions,
}

impl FieldModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: FieldOptions::default(),
        }
    }

    /// Single reference field pointing at `reference`.
    #[must_use]
    pub fn reference(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Reference).with_ref(reference)
    }

    /// Multi-value reference field; `ref` is declared on the field itself.
    #[must_use]
    pub fn reference_list(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::new(name, FieldKind::list(ItemModel::new(FieldKind::Reference))).with_ref(reference)
    }

    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    #[must_use]
    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.options.reference = Some(reference.into());
        self
    }

    #[must_use]
    pub fn joinable(self) -> Self {
        self.with_annotation(JoinAnnotation::enabled())
    }

    #[must_use]
    pub fn joinable_with(self, overrides: DescriptorOverrides) -> Self {
        self.with_annotation(JoinAnnotation::with_overrides(overrides))
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: JoinAnnotation) -> Self {
        self.options.joinable = Some(annotation);
        self
    }

    /// Declared options merged over the options inherited from an array
    /// element type. Options declared on the field win per option.
    #[must_use]
    pub fn merged_options(&self) -> FieldOptions {
        match &self.kind {
            FieldKind::List(item) => self.options.clone().or(item.options.clone()),
            _ => self.options.clone(),
        }
    }

    /// True when the field stores zero-or-more values.
    #[must_use]
    pub const fn is_multi_value(&self) -> bool {
        self.kind.is_multi_value()
    }
}

///
/// ItemModel
/// Element type of a multi-value field, with its own declared options.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemModel {
    pub kind: FieldKind,
    pub options: FieldOptions,
}

impl ItemModel {
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            options: FieldOptions::default(),
        }
    }

    #[must_use]
    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.options.reference = Some(reference.into());
        self
    }

    #[must_use]
    pub fn joinable(mut self) -> Self {
        self.options.joinable = Some(JoinAnnotation::enabled());
        self
    }

    #[must_use]
    pub fn joinable_with(mut self, overrides: DescriptorOverrides) -> Self {
        self.options.joinable = Some(JoinAnnotation::with_overrides(overrides));
        self
    }
}

///
/// FieldKind
///
/// Minimal storage-kind surface needed by scanning and casting.
/// This is a lossy projection of host schema types.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    // Scalars
    Bool,
    Float,
    Id,
    Int,
    Reference,
    Text,
    Timestamp,

    // Containers
    Embedded(Box<SchemaModel>),
    List(Box<ItemModel>),

    /// Untyped value; never cast.
    Mixed,
}

impl FieldKind {
    #[must_use]
    pub fn list(item: ItemModel) -> Self {
        Self::List(Box::new(item))
    }

    #[must_use]
    pub fn embedded(schema: SchemaModel) -> Self {
        Self::Embedded(Box::new(schema))
    }

    #[must_use]
    pub const fn is_multi_value(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Embedded schema reachable through this kind (directly or as the
    /// element type of a list).
    #[must_use]
    pub fn embedded_schema(&self) -> Option<&SchemaModel> {
        match self {
            Self::Embedded(schema) => Some(schema),
            Self::List(item) => item.kind.embedded_schema(),
            _ => None,
        }
    }

    /// Stable label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Id => "id",
            Self::Int => "int",
            Self::Reference => "reference",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Embedded(_) => "embedded",
            Self::List(_) => "list",
            Self::Mixed => "mixed",
        }
    }
}

///
/// FieldOptions
/// Options a schema author declares on a field or array element.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldOptions {
    /// Logical name of the referenced entity.
    pub reference: Option<String>,
    /// Join annotation, when the field opts in to joins.
    pub joinable: Option<JoinAnnotation>,
}

impl FieldOptions {
    /// Fill options missing here from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            reference: self.reference.or(fallback.reference),
            joinable: self.joinable.or(fallback.joinable),
        }
    }

    /// Non-empty reference name, if declared.
    #[must_use]
    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref().filter(|name| !name.is_empty())
    }

    /// Enabled join annotation, if declared.
    #[must_use]
    pub fn enabled_annotation(&self) -> Option<&JoinAnnotation> {
        self.joinable.as_ref().filter(|annotation| annotation.enabled)
    }
}
