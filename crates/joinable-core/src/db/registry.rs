use crate::{
    Criteria,
    config::AttachConfig,
    db::AttachedModel,
    error::{ErrorClass, InternalError},
    model::SchemaModel,
    obs::trace::CompileTraceSink,
    pipeline::{LookupOptions, Pipeline},
    relation::{InflectionNaming, NamingPolicy, TargetRegistry},
};
use indexmap::IndexMap;
use thiserror::Error as ThisError;

///
/// ModelRegistryError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ModelRegistryError {
    #[error("entity '{0}' already attached")]
    AlreadyAttached(String),

    #[error("entity name is empty")]
    EmptyEntityName,

    #[error("entity '{0}' not attached")]
    NotAttached(String),
}

impl ModelRegistryError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyAttached(_) => ErrorClass::Conflict,
            Self::EmptyEntityName => ErrorClass::InvariantViolation,
            Self::NotAttached(_) => ErrorClass::NotFound,
        }
    }
}

///
/// ModelRegistry
///
/// Caller-owned registry of attached models. Attaching is the single
/// write; lookups only read. The registry doubles as the target registry,
/// so models attached after a source still resolve when it compiles.
///

#[derive(Default)]
pub struct ModelRegistry<N = InflectionNaming> {
    naming: N,
    models: IndexMap<String, AttachedModel>,
    trace: Option<&'static dyn CompileTraceSink>,
}

impl ModelRegistry {
    /// Create an empty registry with English inflection naming.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NamingPolicy> ModelRegistry<N> {
    #[must_use]
    pub fn with_naming(naming: N) -> Self {
        Self {
            naming,
            models: IndexMap::new(),
            trace: None,
        }
    }

    #[must_use]
    pub const fn trace_sink(mut self, sink: &'static dyn CompileTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Scan `schema` once and keep the result.
    pub fn attach(
        &mut self,
        schema: SchemaModel,
        config: AttachConfig,
    ) -> Result<&AttachedModel, InternalError> {
        let entity_name = schema.entity_name.clone();
        if entity_name.is_empty() {
            return Err(ModelRegistryError::EmptyEntityName.into());
        }
        if self.models.contains_key(&entity_name) {
            return Err(ModelRegistryError::AlreadyAttached(entity_name).into());
        }

        let model = AttachedModel::attach(schema, &*self, config, self.trace);

        Ok(self.models.entry(entity_name).or_insert(model))
    }

    #[must_use]
    pub fn get(&self, entity_name: &str) -> Option<&AttachedModel> {
        self.models.get(entity_name)
    }

    pub fn try_get(&self, entity_name: &str) -> Result<&AttachedModel, InternalError> {
        self.get(entity_name)
            .ok_or_else(|| ModelRegistryError::NotAttached(entity_name.to_string()).into())
    }

    /// Iterate attached models in attach order.
    pub fn iter(&self) -> impl Iterator<Item = &AttachedModel> {
        self.models.values()
    }

    /// Compile a lookup pipeline for an attached entity.
    pub fn lookup(
        &self,
        entity_name: &str,
        criteria: Option<&Criteria>,
        options: &LookupOptions,
    ) -> Result<Pipeline, InternalError> {
        self.try_get(entity_name)?.lookup(self, criteria, options)
    }
}

impl<N: NamingPolicy> TargetRegistry for ModelRegistry<N> {
    fn naming(&self) -> &dyn NamingPolicy {
        &self.naming
    }

    fn registered_collection(&self, entity_name: &str) -> Option<&str> {
        self.models.get(entity_name).map(AttachedModel::collection)
    }
}
