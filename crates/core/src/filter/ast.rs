//! Filter expression tree
//!
//! A compiled filter is a tree of [`FilterExpr`] nodes: leaves compare one
//! metadata field against an operand, combinators aggregate children with
//! AND / OR. The tree is immutable once built.

use crate::error::{VectorError, VectorResult};
use crate::value::MetadataValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a filter leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    /// Field equals value
    Eq,
    /// Field absent or not equal to value
    Ne,
    /// Field greater than value
    Gt,
    /// Field greater than or equal to value
    Gte,
    /// Field less than value
    Lt,
    /// Field less than or equal to value
    Lte,
    /// Field equals one of the values
    In,
    /// Field absent or equal to none of the values
    Nin,
}

impl FilterOp {
    /// All operators, in declaration order
    pub const ALL: [FilterOp; 8] = [
        FilterOp::Eq,
        FilterOp::Ne,
        FilterOp::Gt,
        FilterOp::Gte,
        FilterOp::Lt,
        FilterOp::Lte,
        FilterOp::In,
        FilterOp::Nin,
    ];

    /// Operator name as written in a filter mapping (e.g. `$gte`)
    pub fn name(&self) -> &'static str {
        match self {
            FilterOp::Eq => "$eq",
            FilterOp::Ne => "$ne",
            FilterOp::Gt => "$gt",
            FilterOp::Gte => "$gte",
            FilterOp::Lt => "$lt",
            FilterOp::Lte => "$lte",
            FilterOp::In => "$in",
            FilterOp::Nin => "$nin",
        }
    }

    /// Parse an operator name (`$eq`, `$in`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        FilterOp::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Whether the operator takes a list of values rather than a scalar
    pub fn takes_list(&self) -> bool {
        matches!(self, FilterOp::In | FilterOp::Nin)
    }

    /// Result of the operator when the field is missing from the metadata
    ///
    /// A missing field is "not equal to anything present", so only the
    /// negative operators hold.
    pub fn matches_missing(&self) -> bool {
        matches!(self, FilterOp::Ne | FilterOp::Nin)
    }

    fn symbol(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::In => "IN",
            FilterOp::Nin => "NOT IN",
        }
    }
}

/// Right-hand side of a filter leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Single scalar (all operators except `$in` / `$nin`)
    Scalar(MetadataValue),
    /// List of scalars (`$in` / `$nin`)
    List(Vec<MetadataValue>),
}

/// A single field-operator-value comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    field: String,
    op: FilterOp,
    operand: Operand,
}

impl Condition {
    /// Create a condition, checking that the operand shape fits the operator
    pub fn new(field: impl Into<String>, op: FilterOp, operand: Operand) -> VectorResult<Self> {
        let field = field.into();
        match (&operand, op.takes_list()) {
            (Operand::List(_), true) | (Operand::Scalar(_), false) => Ok(Condition {
                field,
                op,
                operand,
            }),
            (Operand::Scalar(_), true) => Err(VectorError::filter(format!(
                "operator '{}' on field '{}' requires an array of values",
                op.name(),
                field
            ))),
            (Operand::List(_), false) => Err(VectorError::filter(format!(
                "operator '{}' on field '{}' requires a single scalar value",
                op.name(),
                field
            ))),
        }
    }

    /// Metadata field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Comparison operator
    pub fn op(&self) -> FilterOp {
        self.op
    }

    /// Comparison operand
    pub fn operand(&self) -> &Operand {
        &self.operand
    }
}

/// Compiled boolean predicate over record metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpr {
    /// Field comparison
    Leaf(Condition),
    /// True iff every child is true (empty: true)
    And(Vec<FilterExpr>),
    /// True iff at least one child is true (empty: false)
    Or(Vec<FilterExpr>),
}

impl Default for FilterExpr {
    fn default() -> Self {
        FilterExpr::always()
    }
}

impl FilterExpr {
    /// Predicate that matches every record
    pub fn always() -> Self {
        FilterExpr::And(Vec::new())
    }

    /// Predicate that matches no record
    pub fn never() -> Self {
        FilterExpr::Or(Vec::new())
    }

    /// True if this is the empty AND, i.e. matches everything
    pub fn is_always(&self) -> bool {
        matches!(self, FilterExpr::And(children) if children.is_empty())
    }

    /// Conjunction of `children`
    ///
    /// Child ANDs are spliced into the result; this does not change the
    /// meaning of the predicate.
    pub fn and(children: impl IntoIterator<Item = FilterExpr>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                FilterExpr::And(grandchildren) => flat.extend(grandchildren),
                other => flat.push(other),
            }
        }
        FilterExpr::And(flat)
    }

    /// Disjunction of `children`
    ///
    /// Child ORs are spliced into the result.
    pub fn or(children: impl IntoIterator<Item = FilterExpr>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                FilterExpr::Or(grandchildren) => flat.extend(grandchildren),
                other => flat.push(other),
            }
        }
        FilterExpr::Or(flat)
    }

    fn scalar(field: impl Into<String>, op: FilterOp, value: impl Into<MetadataValue>) -> Self {
        FilterExpr::Leaf(Condition {
            field: field.into(),
            op,
            operand: Operand::Scalar(value.into()),
        })
    }

    fn list<V: Into<MetadataValue>>(
        field: impl Into<String>,
        op: FilterOp,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        FilterExpr::Leaf(Condition {
            field: field.into(),
            op,
            operand: Operand::List(values.into_iter().map(Into::into).collect()),
        })
    }

    /// `field == value`
    pub fn eq(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::scalar(field, FilterOp::Eq, value)
    }

    /// `field != value` (also true when the field is absent)
    pub fn ne(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::scalar(field, FilterOp::Ne, value)
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::scalar(field, FilterOp::Gt, value)
    }

    /// `field >= value`
    pub fn gte(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::scalar(field, FilterOp::Gte, value)
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::scalar(field, FilterOp::Lt, value)
    }

    /// `field <= value`
    pub fn lte(field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::scalar(field, FilterOp::Lte, value)
    }

    /// `field IN values`
    pub fn is_in<V: Into<MetadataValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::list(field, FilterOp::In, values)
    }

    /// `field NOT IN values` (also true when the field is absent)
    pub fn not_in<V: Into<MetadataValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::list(field, FilterOp::Nin, values)
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            FilterExpr::Leaf(_) => 1,
            FilterExpr::And(children) | FilterExpr::Or(children) => {
                children.iter().map(FilterExpr::leaf_count).sum()
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.field, self.op.symbol())?;
        match &self.operand {
            Operand::Scalar(v) => write!(f, "{}", v),
            Operand::List(values) => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, joiner, empty) = match self {
            FilterExpr::Leaf(cond) => return write!(f, "{}", cond),
            FilterExpr::And(children) => (children, " AND ", "TRUE"),
            FilterExpr::Or(children) => (children, " OR ", "FALSE"),
        };
        match children.as_slice() {
            [] => write!(f, "{}", empty),
            [only] => write!(f, "{}", only),
            _ => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", joiner)?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
