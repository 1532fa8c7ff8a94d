//! Runtime schema model.
//!
//! This module contains the minimal reflection surface the relation scanner
//! and the criteria caster need from a host schema: named fields, their
//! storage kinds, and their declared options. Host adapters either build a
//! [`SchemaModel`] directly or implement [`FieldSource`] themselves.
//!
//! In general:
//! - the schema author declares *what relates*
//! - `relation` decides *how it joins*

mod annotation;
mod field;
mod schema;

#[cfg(test)]
mod tests;

pub use annotation::JoinAnnotation;
pub use field::{FieldKind, FieldModel, FieldOptions, ItemModel};
pub use schema::{FieldMeta, FieldSource, SchemaModel};
