use crate::relation::DescriptorOverrides;
use serde::Deserialize;

///
/// JoinAnnotation
///
/// Raw per-field join annotation as written by the schema author.
/// Deserializes from `true`, `false`, or an override object; an override
/// object always enables the annotation.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(from = "RawJoinAnnotation")]
pub struct JoinAnnotation {
    pub enabled: bool,
    pub overrides: DescriptorOverrides,
}

impl JoinAnnotation {
    /// Enabled annotation without overrides.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            overrides: DescriptorOverrides::default(),
        }
    }

    /// Enabled annotation carrying author overrides.
    #[must_use]
    pub const fn with_overrides(overrides: DescriptorOverrides) -> Self {
        Self {
            enabled: true,
            overrides,
        }
    }
}

// Loose authoring shape accepted on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawJoinAnnotation {
    Flag(bool),
    Overrides(DescriptorOverrides),
}

impl From<RawJoinAnnotation> for JoinAnnotation {
    fn from(raw: RawJoinAnnotation) -> Self {
        match raw {
            RawJoinAnnotation::Flag(enabled) => Self {
                enabled,
                overrides: DescriptorOverrides::default(),
            },
            RawJoinAnnotation::Overrides(overrides) => Self::with_overrides(overrides),
        }
    }
}
