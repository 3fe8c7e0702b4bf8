//! Exact scan-and-rank query evaluation
//!
//! Determinism contract:
//! 1. Rows arrive in insertion-sequence order (store scan order)
//! 2. Filter is applied before ranking, so top-k is taken over matches only
//! 3. Distances are computed single-threaded in `f64`
//! 4. Sort by (distance asc, seq asc)
//! 5. Truncate to k (a `k` larger than the match count returns every match)
//!
//! The same snapshot and query therefore always produce the same results.

use std::cmp::Ordering;
use std::sync::Arc;
use stratavec_core::{CollectionConfig, DistanceMetric, FilterExpr, QueryResult, VectorResult};
use stratavec_storage::StoredRow;

/// Check a query target against the collection config.
///
/// # Errors
/// [`VectorError::DimensionMismatch`] / [`VectorError::InvalidEmbedding`]
/// if the target does not fit the collection.
pub fn validate_query(config: &CollectionConfig, target: &[f32]) -> VectorResult<()> {
    config.check_embedding(target)
}

/// Rank a row snapshot against `target` and return the `k` nearest matches.
///
/// `rows` must all share the target's dimension.
pub fn rank_rows(
    rows: &[Arc<StoredRow>],
    target: &[f32],
    k: usize,
    filter: &FilterExpr,
    metric: DistanceMetric,
) -> Vec<QueryResult> {
    if k == 0 {
        return Vec::new();
    }

    let match_all = filter.is_always();
    let mut scored: Vec<(f64, &StoredRow)> = rows
        .iter()
        .filter(|row| match_all || filter.matches(&row.record.metadata))
        .map(|row| {
            let distance = metric.distance_unchecked(target, &row.record.embedding);
            (distance, row.as_ref())
        })
        .collect();

    scored.sort_by(|(da, a), (db, b)| compare_hits(*da, a.seq, *db, b.seq));
    // No-op when k exceeds the match count.
    scored.truncate(k);

    scored
        .into_iter()
        .map(|(distance, row)| QueryResult {
            id: row.record.id.clone(),
            document: row.record.document.clone(),
            metadata: row.record.metadata.clone(),
            distance,
        })
        .collect()
}

/// Order by distance ascending, then by insertion sequence ascending.
fn compare_hits(da: f64, seq_a: u64, db: f64, seq_b: u64) -> Ordering {
    da.total_cmp(&db).then_with(|| seq_a.cmp(&seq_b))
}
