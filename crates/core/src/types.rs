//! Record, collection and query result types

use crate::distance::DistanceMetric;
use crate::error::{VectorError, VectorResult};
use crate::value::{metadata_from_json, Metadata, MetadataValue};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A stored record
///
/// Records are immutable once inserted; there is no update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id within the collection
    pub id: String,
    /// Free text
    pub document: String,
    /// Embedding vector (collection dimension)
    pub embedding: Vec<f32>,
    /// Scalar metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Record {
    /// Get the embedding dimension
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// A record submitted for insertion
///
/// The id is optional; a random UUID is generated when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Caller-chosen id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Free text
    pub document: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
    /// Scalar metadata (empty by default)
    #[serde(default)]
    pub metadata: Metadata,
}

impl NewRecord {
    /// Create a record without id or metadata
    pub fn new(document: impl Into<String>, embedding: Vec<f32>) -> Self {
        NewRecord {
            id: None,
            document: document.into(),
            embedding,
            metadata: Metadata::new(),
        }
    }

    /// Set the record id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the metadata map
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace the metadata map from a JSON object
    ///
    /// # Errors
    /// [`VectorError::InvalidMetadata`] if the object holds non-scalar values.
    pub fn with_json_metadata(mut self, metadata: &JsonValue) -> VectorResult<Self> {
        self.metadata = metadata_from_json(metadata)?;
        Ok(self)
    }

    /// Add a single metadata field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// Finalize into a stored record using the given id
    pub fn into_record(self, id: String) -> Record {
        Record {
            id,
            document: self.document,
            embedding: self.embedding,
            metadata: self.metadata,
        }
    }
}

/// One hit of a query, ordered by ascending distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Record id
    pub id: String,
    /// Record document
    pub document: String,
    /// Record metadata
    pub metadata: Metadata,
    /// Distance to the query embedding (lower = more similar)
    pub distance: f64,
}

/// Collection configuration - immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Embedding dimension (e.g., 384, 768, 1536)
    pub dimension: usize,
    /// Distance metric used for ranking
    #[serde(default)]
    pub metric: DistanceMetric,
}

impl CollectionConfig {
    /// Create a config with the default (cosine) metric
    ///
    /// # Errors
    /// [`VectorError::InvalidDimension`] if dimension is 0.
    pub fn new(dimension: usize) -> VectorResult<Self> {
        Self::with_metric(dimension, DistanceMetric::default())
    }

    /// Create a config with an explicit metric
    pub fn with_metric(dimension: usize, metric: DistanceMetric) -> VectorResult<Self> {
        if dimension == 0 {
            return Err(VectorError::InvalidDimension {
                dimension,
                max: usize::MAX,
            });
        }
        Ok(CollectionConfig { dimension, metric })
    }

    /// Check an embedding against this config
    ///
    /// # Errors
    /// - [`VectorError::DimensionMismatch`] if the length differs
    /// - [`VectorError::InvalidEmbedding`] if a component is NaN or infinite
    pub fn check_embedding(&self, embedding: &[f32]) -> VectorResult<()> {
        if embedding.len() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                got: embedding.len(),
            });
        }
        if let Some(index) = embedding.iter().position(|x| !x.is_finite()) {
            return Err(VectorError::InvalidEmbedding { index });
        }
        Ok(())
    }
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,
    /// Immutable configuration
    pub config: CollectionConfig,
    /// Current record count
    pub count: usize,
    /// Creation timestamp (microseconds since epoch)
    pub created_at: i64,
}
