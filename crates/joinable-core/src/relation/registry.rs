use crate::relation::naming::{InflectionNaming, NamingPolicy};
use std::collections::HashMap;

///
/// TargetRegistry
///
/// Naming service mapping a logical entity name to its physical collection.
/// Unregistered names fall back to the registry's naming convention, so
/// resolution never fails.
///

pub trait TargetRegistry {
    /// Naming convention used for fallbacks and singular output names.
    fn naming(&self) -> &dyn NamingPolicy;

    /// Collection name of a registered entity, if any.
    fn registered_collection(&self, entity_name: &str) -> Option<&str>;

    fn resolve_collection_name(&self, reference: &str) -> String {
        self.registered_collection(reference).map_or_else(
            || self.naming().collection_name(reference),
            ToString::to_string,
        )
    }
}

///
/// NamingRegistry
///
/// Standalone target registry: explicit entity → collection entries over a
/// naming policy. Useful for hosts that keep their own model registry.
///

#[derive(Debug, Default)]
pub struct NamingRegistry<N = InflectionNaming> {
    naming: N,
    collections: HashMap<String, String>,
}

impl NamingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NamingPolicy> NamingRegistry<N> {
    #[must_use]
    pub fn with_naming(naming: N) -> Self {
        Self {
            naming,
            collections: HashMap::new(),
        }
    }

    /// Register (or replace) the collection for an entity name.
    pub fn register(&mut self, entity_name: impl Into<String>, collection: impl Into<String>) {
        self.collections
            .insert(entity_name.into(), collection.into());
    }
}

impl<N: NamingPolicy> TargetRegistry for NamingRegistry<N> {
    fn naming(&self) -> &dyn NamingPolicy {
        &self.naming
    }

    fn registered_collection(&self, entity_name: &str) -> Option<&str> {
        self.collections.get(entity_name).map(String::as_str)
    }
}
