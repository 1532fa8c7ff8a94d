use crate::relation::JoinDescriptor;
use derive_more::{Deref, IntoIterator};
use indexmap::IndexMap;
use serde::Serialize;

///
/// DescriptorTable
///
/// Field name → join descriptor, in schema declaration order.
/// Built once by the scan phase; read-only once attached.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    #[into_iterator(ref)]
    descriptors: IndexMap<String, JoinDescriptor>,
}

impl DescriptorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor keyed by its path name.
    /// A later descriptor for the same path replaces the earlier one in place.
    pub fn insert(&mut self, descriptor: JoinDescriptor) {
        self.descriptors
            .insert(descriptor.path_name.clone(), descriptor);
    }

    /// Copy every descriptor out, in table order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<JoinDescriptor> {
        self.descriptors.values().cloned().collect()
    }
}

impl FromIterator<JoinDescriptor> for DescriptorTable {
    fn from_iter<I: IntoIterator<Item = JoinDescriptor>>(iter: I) -> Self {
        let mut table = Self::new();
        for descriptor in iter {
            table.insert(descriptor);
        }

        table
    }
}
