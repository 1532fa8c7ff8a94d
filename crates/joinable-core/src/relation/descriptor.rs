use serde::{Deserialize, Serialize};

///
/// JoinDescriptor
///
/// Canonical description of how one field's references resolve against
/// another collection. Built once by the normalizer; never mutated in place.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinDescriptor {
    /// Source field holding the reference(s).
    pub path_name: String,
    /// Logical name of the referenced entity.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Physical collection to join against; empty when unresolvable.
    pub from: String,
    pub local_field: String,
    pub foreign_field: String,
    /// Output field for the joined result(s).
    #[serde(rename = "as")]
    pub as_name: String,
    pub is_array: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unwind: Option<UnwindSpec>,

    /// `from` was supplied by the schema author and must not be rebound.
    #[serde(skip)]
    pub(crate) from_explicit: bool,
}

impl JoinDescriptor {
    /// True when the descriptor names a target, either by `ref` or `from`.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        self.reference.as_deref().is_some_and(|name| !name.is_empty()) || !self.from.is_empty()
    }

    /// True when `from` came from an author override.
    #[must_use]
    pub const fn has_explicit_from(&self) -> bool {
        self.from_explicit
    }

    /// True when `name` addresses this descriptor's output or local field.
    #[must_use]
    pub fn is_addressed_by(&self, name: &str) -> bool {
        self.as_name == name || self.local_field == name
    }
}

///
/// UnwindSpec
/// Post-join flattening instructions.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnwindSpec {
    /// Output field prefixed as a pipeline variable (`$father`).
    pub path: String,
    /// Keep documents whose reference is missing or empty.
    pub preserve_null_and_empty_arrays: bool,
}

///
/// DescriptorOverrides
///
/// Author-supplied partial descriptor. Every present field wins over the
/// computed default for that field; absent fields keep the default.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DescriptorOverrides {
    pub from: Option<String>,
    pub local_field: Option<String>,
    pub foreign_field: Option<String>,
    #[serde(rename = "as")]
    pub as_name: Option<String>,
    pub unwind: Option<UnwindOverride>,
}

impl DescriptorOverrides {
    #[must_use]
    pub fn from_collection(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    #[must_use]
    pub fn local_field(mut self, field: impl Into<String>) -> Self {
        self.local_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn foreign_field(mut self, field: impl Into<String>) -> Self {
        self.foreign_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn as_name(mut self, name: impl Into<String>) -> Self {
        self.as_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn unwind(mut self, unwind: UnwindOverride) -> Self {
        self.unwind = Some(unwind);
        self
    }
}

///
/// UnwindOverride
///
/// `true` requests unwind with defaults, `false` suppresses it, and a
/// partial spec requests unwind with the given fields overridden.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum UnwindOverride {
    Flag(bool),
    Spec(UnwindSpecOverride),
}

impl UnwindOverride {
    /// Whether this override asks for an unwind stage.
    #[must_use]
    pub const fn requests_unwind(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Spec(_) => true,
        }
    }

    /// Partial spec fields, when present.
    #[must_use]
    pub const fn spec(&self) -> Option<&UnwindSpecOverride> {
        match self {
            Self::Flag(_) => None,
            Self::Spec(spec) => Some(spec),
        }
    }
}

///
/// UnwindSpecOverride
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UnwindSpecOverride {
    pub path: Option<String>,
    pub preserve_null_and_empty_arrays: Option<bool>,
}
