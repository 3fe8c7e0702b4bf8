//! Filter evaluation against record metadata
//!
//! Evaluation is pure and total: every well-formed [`FilterExpr`] yields a
//! boolean for every metadata map, so it can run per record during a scan.

use crate::filter::ast::{Condition, FilterExpr, FilterOp, Operand};
use crate::value::{Metadata, MetadataValue};
use std::cmp::Ordering;

impl FilterExpr {
    /// Evaluate the predicate against one record's metadata
    pub fn matches(&self, metadata: &Metadata) -> bool {
        match self {
            FilterExpr::Leaf(cond) => cond.matches(metadata),
            FilterExpr::And(children) => children.iter().all(|c| c.matches(metadata)),
            FilterExpr::Or(children) => children.iter().any(|c| c.matches(metadata)),
        }
    }
}

impl Condition {
    /// Evaluate this comparison against one record's metadata
    ///
    /// A missing field satisfies only `$ne` and `$nin`. Ordering operators on
    /// values that are not mutually ordered evaluate to false.
    pub fn matches(&self, metadata: &Metadata) -> bool {
        let Some(actual) = metadata.get(self.field()) else {
            return self.op().matches_missing();
        };

        match (self.op(), self.operand()) {
            (FilterOp::Eq, Operand::Scalar(expected)) => actual.value_eq(expected),
            (FilterOp::Ne, Operand::Scalar(expected)) => !actual.value_eq(expected),
            (FilterOp::Gt, Operand::Scalar(expected)) => {
                ordered(actual, expected, |o| o == Ordering::Greater)
            }
            (FilterOp::Gte, Operand::Scalar(expected)) => {
                ordered(actual, expected, |o| o != Ordering::Less)
            }
            (FilterOp::Lt, Operand::Scalar(expected)) => {
                ordered(actual, expected, |o| o == Ordering::Less)
            }
            (FilterOp::Lte, Operand::Scalar(expected)) => {
                ordered(actual, expected, |o| o != Ordering::Greater)
            }
            (FilterOp::In, Operand::List(values)) => values.iter().any(|v| actual.value_eq(v)),
            (FilterOp::Nin, Operand::List(values)) => !values.iter().any(|v| actual.value_eq(v)),
            // Condition::new rejects every other pairing
            _ => false,
        }
    }
}

fn ordered(actual: &MetadataValue, expected: &MetadataValue, pred: impl Fn(Ordering) -> bool) -> bool {
    actual.compare(expected).is_some_and(pred)
}
