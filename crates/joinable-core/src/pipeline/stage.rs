use crate::{
    Criteria,
    relation::{JoinDescriptor, UnwindSpec},
};
use serde::Serialize;

///
/// Stage
///
/// One aggregation stage, serialized in the store's operator form
/// (`{"$lookup": {...}}`).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Stage {
    #[serde(rename = "$match")]
    Match(Criteria),

    #[serde(rename = "$lookup")]
    Lookup(LookupStage),

    #[serde(rename = "$unwind")]
    Unwind(UnwindSpec),
}

impl Stage {
    /// Operator name as written in the store's pipeline syntax.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match self {
            Self::Match(_) => "$match",
            Self::Lookup(_) => "$lookup",
            Self::Unwind(_) => "$unwind",
        }
    }
}

///
/// LookupStage
/// Equality join of a local field against a foreign collection field.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupStage {
    pub from: String,
    pub local_field: String,
    pub foreign_field: String,
    #[serde(rename = "as")]
    pub as_name: String,
}

impl From<&JoinDescriptor> for LookupStage {
    fn from(descriptor: &JoinDescriptor) -> Self {
        Self {
            from: descriptor.from.clone(),
            local_field: descriptor.local_field.clone(),
            foreign_field: descriptor.foreign_field.clone(),
            as_name: descriptor.as_name.clone(),
        }
    }
}
