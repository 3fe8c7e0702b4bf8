//! Filter compiler: nested JSON mapping to [`FilterExpr`]
//!
//! # Grammar
//!
//! ```text
//! mapping   := { entry* }
//! entry     := field : scalar                  implicit $eq
//!            | field : { op : operand, ... }   one leaf per operator
//!            | "$and" : [ mapping* ]
//!            | "$or"  : [ mapping* ]
//! op        := "$eq" | "$ne" | "$gt" | "$gte" | "$lt" | "$lte" | "$in" | "$nin"
//! operand   := scalar            (all but $in / $nin)
//!            | [ scalar* ]       ($in / $nin)
//! scalar    := string | number | boolean
//! ```
//!
//! A mapping is the AND of its field leaves, its `$and` group and its `$or`
//! group. A trailing field next to `$or` therefore narrows the OR, it never
//! replaces it.
//!
//! Operators are only valid one level under a field; `{"$gt": 1}` is a
//! compile error at any depth.

use crate::error::{VectorError, VectorResult};
use crate::filter::ast::{Condition, FilterExpr, FilterOp, Operand};
use crate::value::{json_kind, MetadataValue};
use serde_json::{Map, Value as JsonValue};

/// Reserved key for conjunction groups
pub const AND_KEY: &str = "$and";
/// Reserved key for disjunction groups
pub const OR_KEY: &str = "$or";

/// Compile a filter mapping into a predicate
///
/// # Errors
/// [`VectorError::FilterCompile`] when the mapping is malformed: bare
/// operators, unknown operators, wrongly-typed operands, nested metadata
/// paths, or a non-object root.
pub fn compile_filter(filter: &JsonValue) -> VectorResult<FilterExpr> {
    match filter {
        JsonValue::Object(obj) => compile_mapping(obj, "filter"),
        other => Err(VectorError::filter(format!(
            "filter must be an object, got {}",
            json_kind(other)
        ))),
    }
}

/// Compile an optional filter; `None` matches every record
pub fn compile_optional(filter: Option<&JsonValue>) -> VectorResult<FilterExpr> {
    match filter {
        Some(f) => compile_filter(f),
        None => Ok(FilterExpr::always()),
    }
}

impl TryFrom<&JsonValue> for FilterExpr {
    type Error = VectorError;

    fn try_from(value: &JsonValue) -> VectorResult<Self> {
        compile_filter(value)
    }
}

fn compile_mapping(obj: &Map<String, JsonValue>, path: &str) -> VectorResult<FilterExpr> {
    let mut children = Vec::new();
    let mut and_group = None;
    let mut or_group = None;

    for (key, value) in obj {
        match key.as_str() {
            AND_KEY => and_group = Some(compile_group(AND_KEY, value, path)?),
            OR_KEY => or_group = Some(compile_group(OR_KEY, value, path)?),
            op if op.starts_with('$') => {
                return Err(VectorError::filter(format!(
                    "{}: operator '{}' must be nested under a field name",
                    path, op
                )));
            }
            field => children.extend(compile_field(field, value, path)?),
        }
    }

    if let Some(group) = and_group {
        children.push(FilterExpr::and(group));
    }
    if let Some(group) = or_group {
        // An OR group is one child of the enclosing AND; it must not be spliced.
        children.push(FilterExpr::or(group));
    }

    Ok(FilterExpr::and(children))
}

fn compile_group(key: &str, value: &JsonValue, path: &str) -> VectorResult<Vec<FilterExpr>> {
    let JsonValue::Array(items) = value else {
        return Err(VectorError::filter(format!(
            "{}: '{}' expects an array of objects, got {}",
            path,
            key,
            json_kind(value)
        )));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{}.{}[{}]", path, key, i);
            match item {
                JsonValue::Object(obj) => compile_mapping(obj, &item_path),
                other => Err(VectorError::filter(format!(
                    "{}: expected an object, got {}",
                    item_path,
                    json_kind(other)
                ))),
            }
        })
        .collect()
}

fn compile_field(field: &str, value: &JsonValue, path: &str) -> VectorResult<Vec<FilterExpr>> {
    match value {
        JsonValue::Object(ops) => {
            let mut leaves = Vec::with_capacity(ops.len());
            for (name, operand) in ops {
                let Some(op) = FilterOp::parse(name) else {
                    return Err(if name.starts_with('$') {
                        VectorError::filter(format!(
                            "{}: unsupported operator '{}' on field '{}'",
                            path, name, field
                        ))
                    } else {
                        VectorError::filter(format!(
                            "{}: field '{}' maps to an object with key '{}'; nested metadata is not supported",
                            path, field, name
                        ))
                    });
                };
                let operand = compile_operand(field, op, operand, path)?;
                leaves.push(FilterExpr::Leaf(Condition::new(field, op, operand)?));
            }
            Ok(leaves)
        }
        scalar => {
            let value = scalar_value(field, FilterOp::Eq, scalar, path)?;
            Ok(vec![FilterExpr::Leaf(Condition::new(
                field,
                FilterOp::Eq,
                Operand::Scalar(value),
            )?)])
        }
    }
}

fn compile_operand(
    field: &str,
    op: FilterOp,
    operand: &JsonValue,
    path: &str,
) -> VectorResult<Operand> {
    if !op.takes_list() {
        return scalar_value(field, op, operand, path).map(Operand::Scalar);
    }

    let JsonValue::Array(items) = operand else {
        return Err(VectorError::filter(format!(
            "{}: operator '{}' on field '{}' requires an array, got {}",
            path,
            op.name(),
            field,
            json_kind(operand)
        )));
    };

    items
        .iter()
        .map(|item| scalar_value(field, op, item, path))
        .collect::<VectorResult<Vec<_>>>()
        .map(Operand::List)
}

fn scalar_value(
    field: &str,
    op: FilterOp,
    value: &JsonValue,
    path: &str,
) -> VectorResult<MetadataValue> {
    MetadataValue::from_json(value).ok_or_else(|| {
        VectorError::filter(format!(
            "{}: operator '{}' on field '{}' requires a string, number or boolean, got {}",
            path,
            op.name(),
            field,
            json_kind(value)
        ))
    })
}
