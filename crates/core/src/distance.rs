//! Distance functions for vector similarity
//!
//! All metrics return a non-negative distance where 0 means identical and
//! lower means more similar. Arithmetic is carried out in `f64` over `f32`
//! inputs, single-threaded, in element order, so results are reproducible
//! and `distance(a, b) == distance(b, a)` holds bit for bit.
//!
//! No implicit normalization, truncation or padding is applied: vectors of
//! different lengths are rejected.

use crate::error::{VectorError, VectorResult};
use serde::{Deserialize, Serialize};

/// Distance metric, fixed per collection at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Cosine distance: 1 - dot(a,b) / (||a|| * ||b||)
    /// Range: [0, 2]
    #[default]
    Cosine,

    /// Euclidean (L2) distance: ||a - b||
    /// Range: [0, inf)
    L2,
}

impl DistanceMetric {
    /// Human-readable name for display and configuration
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::L2 => "l2",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Some(DistanceMetric::Cosine),
            "l2" | "euclidean" => Some(DistanceMetric::L2),
            _ => None,
        }
    }

    /// Distance between two vectors of equal length
    ///
    /// # Errors
    /// [`VectorError::DimensionMismatch`] if the lengths differ.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> VectorResult<f64> {
        if a.len() != b.len() {
            return Err(VectorError::DimensionMismatch {
                expected: a.len(),
                got: b.len(),
            });
        }
        Ok(self.distance_unchecked(a, b))
    }

    /// Distance between two vectors already known to share a length
    ///
    /// Used on the query hot path after the target has been validated
    /// against the collection dimension.
    pub fn distance_unchecked(&self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "Dimension mismatch in distance computation");

        match self {
            DistanceMetric::Cosine => cosine_distance(a, b),
            DistanceMetric::L2 => l2_distance(a, b),
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cosine distance: 1 - dot(a,b) / (||a|| * ||b||)
///
/// Identical vectors are exactly 0. A zero vector compared with a non-zero
/// vector is treated as orthogonal (distance 1). Rounding noise below zero
/// is clamped.
fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    if a == b {
        return 0.0;
    }

    let dot = dot_product(a, b);
    let norm_sq_a = dot_product(a, a);
    let norm_sq_b = dot_product(b, b);

    if norm_sq_a == 0.0 || norm_sq_b == 0.0 {
        return 1.0;
    }

    let similarity = dot / (norm_sq_a * norm_sq_b).sqrt();
    (1.0 - similarity).max(0.0)
}

/// Euclidean distance (L2 distance)
fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Dot product (inner product) in f64
fn dot_product(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| *x as f64 * *y as f64)
        .sum()
}
