//! Shared fixtures for unit tests: the Person schema, an in-memory
//! pipeline executor, and a recording trace sink.

use crate::{
    Criteria, Document,
    model::{FieldKind, FieldModel, ItemModel, SchemaModel},
    obs::trace::{CompileTraceEvent, CompileTraceSink},
    pipeline::{Pipeline, PipelineExecutor, Stage},
    relation::{DescriptorOverrides, UnwindOverride, UnwindSpec},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Person schema with every relation shape the engine supports.
pub(crate) fn person_schema() -> SchemaModel {
    let friend = SchemaModel::new("Friend")
        .field(FieldModel::text("type"))
        .field(FieldModel::reference("person", "Person").joinable());

    SchemaModel::new("Person")
        .field(FieldModel::text("name"))
        .field(FieldModel::reference("father", "Person").joinable())
        .field(FieldModel::reference("mother", "Person").joinable())
        .field(FieldModel::reference("sister", "Person").joinable())
        .field(
            FieldModel::new("brother", FieldKind::Reference)
                .joinable_with(DescriptorOverrides::default().from_collection("people")),
        )
        .field(FieldModel::reference_list("relatives", "Person").joinable_with(
            DescriptorOverrides::default().unwind(UnwindOverride::Flag(true)),
        ))
        .field(FieldModel::new(
            "referees",
            FieldKind::list(
                ItemModel::new(FieldKind::Reference)
                    .with_ref("Person")
                    .joinable(),
            ),
        ))
        .field(FieldModel::new(
            "friends",
            FieldKind::list(ItemModel::new(FieldKind::embedded(friend))),
        ))
}

/// Minimal Person schema used by the end-to-end scenario.
pub(crate) fn family_schema() -> SchemaModel {
    SchemaModel::new("Person")
        .field(FieldModel::text("name"))
        .field(FieldModel::reference("father", "Person").joinable())
        .field(FieldModel::reference_list("friends", "Person").joinable())
}

/// Build a document from a JSON object literal.
pub(crate) fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("document fixture must be an object, got {other}"),
    }
}

/// Build criteria from a JSON object literal.
pub(crate) fn criteria(value: Value) -> Criteria {
    doc(value)
}

///
/// MemoryExecutor
///
/// In-memory executor supporting equality/`$in` matches, equality lookups,
/// and unwinds. Enough of the store to run compiled pipelines in tests.
///

#[derive(Default)]
pub(crate) struct MemoryExecutor {
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryExecutor {
    pub(crate) fn insert(&mut self, collection: &str, document: Document) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    fn collection(&self, name: &str) -> Result<&[Document], String> {
        self.collections
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| format!("ns not found: {name}"))
    }
}

impl PipelineExecutor for MemoryExecutor {
    type Error = String;

    fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<Document>, Self::Error> {
        let mut docs = self.collection(&pipeline.collection)?.to_vec();

        for stage in &pipeline.stages {
            docs = match stage {
                Stage::Match(criteria) => docs
                    .into_iter()
                    .filter(|doc| matches_criteria(doc, criteria))
                    .collect(),
                Stage::Lookup(lookup) => {
                    let foreign = self.collections.get(&lookup.from).cloned().unwrap_or_default();
                    docs.into_iter()
                        .map(|mut doc| {
                            let locals = values_at(&doc, &lookup.local_field);
                            let joined = foreign
                                .iter()
                                .filter(|candidate| {
                                    values_at(candidate, &lookup.foreign_field)
                                        .iter()
                                        .any(|value| locals.contains(value))
                                })
                                .cloned()
                                .map(Value::Object)
                                .collect();
                            doc.insert(lookup.as_name.clone(), Value::Array(joined));
                            doc
                        })
                        .collect()
                }
                Stage::Unwind(spec) => docs.into_iter().flat_map(|doc| unwind(doc, spec)).collect(),
            };
        }

        Ok(docs)
    }
}

// Values at a dotted path; arrays along the way are flattened.
fn values_at(doc: &Document, path: &str) -> Vec<Value> {
    let mut current = vec![Value::Object(doc.clone())];
    for segment in path.split('.') {
        current = current
            .into_iter()
            .flat_map(|value| match value {
                Value::Object(map) => map.get(segment).cloned().into_iter().collect::<Vec<_>>(),
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| item.get(segment).cloned())
                    .collect(),
                _ => Vec::new(),
            })
            .collect();
    }

    current
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items,
            other => vec![other],
        })
        .collect()
}

fn matches_criteria(doc: &Document, criteria: &Criteria) -> bool {
    criteria.iter().all(|(path, condition)| {
        let values = values_at(doc, path);
        match condition.get("$in") {
            Some(Value::Array(options)) => values.iter().any(|value| options.contains(value)),
            _ => values.contains(condition),
        }
    })
}

fn unwind(mut doc: Document, spec: &UnwindSpec) -> Vec<Document> {
    let field = spec.path.trim_start_matches('$');
    match doc.remove(field) {
        Some(Value::Array(items)) if !items.is_empty() => items
            .into_iter()
            .map(|item| {
                let mut out = doc.clone();
                out.insert(field.to_string(), item);
                out
            })
            .collect(),
        Some(Value::Array(_) | Value::Null) | None => {
            if spec.preserve_null_and_empty_arrays {
                vec![doc]
            } else {
                Vec::new()
            }
        }
        Some(other) => {
            doc.insert(field.to_string(), other);
            vec![doc]
        }
    }
}

///
/// RecordingSink
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<CompileTraceEvent>>,
}

impl RecordingSink {
    /// Leak a fresh sink so it satisfies the `'static` sink contract.
    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::new(Self::default()))
    }

    pub(crate) fn events(&self) -> Vec<CompileTraceEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CompileTraceSink for RecordingSink {
    fn on_event(&self, event: CompileTraceEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Seed helper: a person document with an id and a name.
pub(crate) fn person(id: &str, name: &str) -> Document {
    doc(json!({ "_id": id, "name": name }))
}
