//! Collection lifecycle
//!
//! [`VectorDb`] owns the backing store handle and the configuration. It
//! creates, looks up, lists and drops collections; everything else happens
//! through the [`Collection`] handles it returns.
//!
//! There is no global state: the store is passed in explicitly, and two
//! `VectorDb` values over the same store see the same collections.

use crate::collection::Collection;
use crate::config::StratavecConfig;
use std::path::Path;
use std::sync::Arc;
use stratavec_core::{
    validate_collection_name, CollectionConfig, CollectionInfo, DistanceMetric, VectorError,
    VectorResult,
};
use stratavec_storage::{MemoryStore, RecordStore, StorageError};
use tracing::info;

/// Options for [`VectorDb::create_collection`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Drop an existing collection of the same name first
    pub pre_delete: bool,
    /// Distance metric; the configured default when `None`
    pub metric: Option<DistanceMetric>,
}

impl CreateOptions {
    /// Default options: fail if the collection exists, default metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `pre_delete`
    pub fn pre_delete(mut self, pre_delete: bool) -> Self {
        self.pre_delete = pre_delete;
        self
    }

    /// Set the distance metric
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// Entry point: a set of named collections over one record store
///
/// Thread-safe and cheap to clone.
#[derive(Clone)]
pub struct VectorDb {
    store: Arc<dyn RecordStore>,
    config: StratavecConfig,
    default_metric: DistanceMetric,
}

impl std::fmt::Debug for VectorDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorDb")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VectorDb {
    /// Create over an existing store with the default configuration
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        VectorDb {
            store,
            config: StratavecConfig::default(),
            default_metric: DistanceMetric::default(),
        }
    }

    /// Create over a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Create over an existing store with an explicit configuration
    ///
    /// # Errors
    /// [`VectorError::Config`] if the configuration is invalid.
    pub fn with_config(store: Arc<dyn RecordStore>, config: StratavecConfig) -> VectorResult<Self> {
        config.validate()?;
        let default_metric = config.metric()?;
        Ok(VectorDb {
            store,
            config,
            default_metric,
        })
    }

    /// Create over an existing store, loading configuration from a file
    ///
    /// The file is created with default content if it does not exist.
    pub fn with_config_file(store: Arc<dyn RecordStore>, path: &Path) -> VectorResult<Self> {
        StratavecConfig::write_default_if_missing(path)?;
        let config = StratavecConfig::from_file(path)?;
        Self::with_config(store, config)
    }

    /// Active configuration
    pub fn config(&self) -> &StratavecConfig {
        &self.config
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    fn handle(&self, table: stratavec_storage::TableInfo) -> Collection {
        Collection::new(table, Arc::clone(&self.store))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a collection
    ///
    /// # Errors
    /// - [`VectorError::InvalidCollectionName`] for a bad name
    /// - [`VectorError::InvalidDimension`] unless `1 <= dimension <= max_dimension`
    /// - [`VectorError::CollectionAlreadyExists`] if the name is taken and
    ///   `options.pre_delete` is false
    pub fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        options: CreateOptions,
    ) -> VectorResult<Collection> {
        validate_collection_name(name)?;
        if dimension == 0 || dimension > self.config.max_dimension {
            return Err(VectorError::InvalidDimension {
                dimension,
                max: self.config.max_dimension,
            });
        }
        let metric = options.metric.unwrap_or(self.default_metric);
        let config = CollectionConfig::with_metric(dimension, metric)?;

        if options.pre_delete {
            if let Some(existing) = self.store.describe_table(name)? {
                match self.store.drop_table(&existing) {
                    Ok(()) | Err(StorageError::TableNotFound { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
                info!(target: "stratavec::db", collection = name, "Existing collection dropped before create");
            }
        }

        let table = self.store.create_table(name, config)?;
        info!(
            target: "stratavec::db",
            collection = name,
            dimension,
            metric = %metric,
            uid = %table.uid,
            "Collection created"
        );
        Ok(self.handle(table))
    }

    /// Get a handle to an existing collection
    ///
    /// # Errors
    /// [`VectorError::CollectionNotFound`] if no collection has this name,
    /// including names that could never have been created.
    pub fn get_collection(&self, name: &str) -> VectorResult<Collection> {
        self.store
            .describe_table(name)?
            .map(|table| self.handle(table))
            .ok_or_else(|| VectorError::CollectionNotFound {
                name: name.to_string(),
            })
    }

    /// Drop a collection and all its records
    ///
    /// Outstanding handles to it fail with `CollectionNotFound` afterwards.
    ///
    /// # Errors
    /// [`VectorError::CollectionNotFound`] if no collection has this name.
    pub fn drop_collection(&self, name: &str) -> VectorResult<()> {
        self.get_collection(name)?.drop_collection()
    }

    /// Check whether a collection exists
    pub fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        Ok(self.store.describe_table(name)?.is_some())
    }

    /// List all collections, sorted by name
    ///
    /// Collections dropped while listing are skipped.
    pub fn list_collections(&self) -> VectorResult<Vec<CollectionInfo>> {
        let mut infos = Vec::new();
        for table in self.store.list_tables()? {
            let count = match self.store.row_count(&table) {
                Ok(count) => count,
                Err(StorageError::TableNotFound { .. }) => continue,
                Err(e) => return Err(e.into()),
            };
            infos.push(CollectionInfo {
                name: table.name,
                config: table.config,
                count,
                created_at: table.created_at,
            });
        }
        Ok(infos)
    }
}
