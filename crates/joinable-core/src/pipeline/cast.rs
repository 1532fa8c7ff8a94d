//! Criteria casting.
//!
//! Converts loosely-typed match criteria into the value types the store
//! expects for each schema field, before any stage is assembled.

use crate::{
    Criteria,
    model::{FieldKind, SchemaModel},
};
use serde_json::{Map, Number, Value};
use thiserror::Error as ThisError;

///
/// CastError
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CastError {
    #[error("cannot cast {found} to {expected} at '{path}'")]
    InvalidValue {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("logical operator '{operator}' expects an array of criteria")]
    LogicalShape { operator: String },

    #[error("unsupported operator '{operator}' at '{path}'")]
    UnsupportedOperator { path: String, operator: String },
}

///
/// CriteriaCaster
///

pub trait CriteriaCaster {
    fn cast(&self, criteria: &Criteria, schema: &SchemaModel) -> Result<Criteria, CastError>;
}

///
/// SchemaCriteriaCaster
///
/// Casts criteria against the field kinds of a [`SchemaModel`].
/// Unknown paths and mixed fields pass through untouched.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaCriteriaCaster;

impl CriteriaCaster for SchemaCriteriaCaster {
    fn cast(&self, criteria: &Criteria, schema: &SchemaModel) -> Result<Criteria, CastError> {
        cast_criteria(criteria, schema)
    }
}

const LOGICAL_OPERATORS: [&str; 3] = ["$and", "$or", "$nor"];

fn cast_criteria(criteria: &Criteria, schema: &SchemaModel) -> Result<Criteria, CastError> {
    let mut out = Map::with_capacity(criteria.len());

    for (key, value) in criteria {
        let cast = if LOGICAL_OPERATORS.contains(&key.as_str()) {
            cast_logical(key, value, schema)?
        } else {
            match schema.field_kind_at(key) {
                Some(kind) => cast_condition(key, kind, value)?,
                None => value.clone(),
            }
        };
        out.insert(key.clone(), cast);
    }

    Ok(out)
}

fn cast_logical(operator: &str, value: &Value, schema: &SchemaModel) -> Result<Value, CastError> {
    let logical_shape = || CastError::LogicalShape {
        operator: operator.to_string(),
    };
    let Value::Array(branches) = value else {
        return Err(logical_shape());
    };

    branches
        .iter()
        .map(|branch| match branch {
            Value::Object(branch) => cast_criteria(branch, schema).map(Value::Object),
            _ => Err(logical_shape()),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

// Cast one field condition: either an operator object or a direct value.
fn cast_condition(path: &str, kind: &FieldKind, value: &Value) -> Result<Value, CastError> {
    match value {
        Value::Object(map) if map.keys().any(|key| key.starts_with('$')) => {
            let mut out = Map::with_capacity(map.len());
            for (operator, operand) in map {
                out.insert(operator.clone(), cast_operator(path, kind, operator, operand)?);
            }

            Ok(Value::Object(out))
        }
        _ => cast_value(path, kind, value),
    }
}

fn cast_operator(
    path: &str,
    kind: &FieldKind,
    operator: &str,
    operand: &Value,
) -> Result<Value, CastError> {
    match operator {
        "$eq" | "$ne" | "$gt" | "$gte" | "$lt" | "$lte" => cast_value(path, kind, operand),
        "$in" | "$nin" => match operand {
            Value::Array(items) => items
                .iter()
                .map(|item| cast_value(path, kind, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(invalid(path, "array", other)),
        },
        "$exists" => cast_scalar(path, &FieldKind::Bool, operand),
        _ => Err(CastError::UnsupportedOperator {
            path: path.to_string(),
            operator: operator.to_string(),
        }),
    }
}

fn cast_value(path: &str, kind: &FieldKind, value: &Value) -> Result<Value, CastError> {
    match kind {
        // A list matches either one element or a whole array of elements.
        FieldKind::List(item) => match value {
            Value::Array(items) => items
                .iter()
                .map(|item_value| cast_value(path, &item.kind, item_value))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => cast_value(path, &item.kind, other),
        },
        _ => cast_scalar(path, kind, value),
    }
}

fn cast_scalar(path: &str, kind: &FieldKind, value: &Value) -> Result<Value, CastError> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let cast = match (kind, value) {
        (FieldKind::Mixed | FieldKind::Embedded(_) | FieldKind::List(_), value) => {
            Some(value.clone())
        }
        (FieldKind::Id | FieldKind::Reference, Value::String(_))
        | (FieldKind::Text | FieldKind::Timestamp, Value::String(_))
        | (FieldKind::Bool, Value::Bool(_)) => Some(value.clone()),

        (FieldKind::Text, Value::Number(n)) => Some(Value::String(n.to_string())),
        (FieldKind::Text, Value::Bool(b)) => Some(Value::String(b.to_string())),

        (FieldKind::Int | FieldKind::Timestamp, Value::Number(n)) if n.is_i64() || n.is_u64() => {
            Some(value.clone())
        }
        (FieldKind::Int, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),

        (FieldKind::Float, Value::Number(_)) => Some(value.clone()),
        (FieldKind::Float, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),

        (FieldKind::Bool, Value::String(s)) => match s.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        (FieldKind::Bool, Value::Number(n)) => match n.as_u64() {
            Some(0) => Some(Value::Bool(false)),
            Some(1) => Some(Value::Bool(true)),
            _ => None,
        },

        _ => None,
    };

    cast.ok_or_else(|| invalid(path, kind.label(), value))
}

fn invalid(path: &str, expected: &'static str, found: &Value) -> CastError {
    CastError::InvalidValue {
        path: path.to_string(),
        expected,
        found: found.to_string(),
    }
}
