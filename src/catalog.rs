//! Dataset catalog ingestion.
//!
//! The provider's catalog supplies an ordered collection of raw dataset
//! records; ingestion assigns each one a document identifier and freezes it.
//! Datasets are read-only afterwards.

use crate::model::Dataset;
use crate::{PolicyError, PolicyResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A raw catalog row as supplied by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetRecord {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// In-memory dataset catalog.
#[derive(Debug, Default, Clone)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    /// Ingest raw records, assigning each dataset a document identifier.
    /// Input order is preserved.
    pub fn ingest<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DatasetRecord>,
    {
        let datasets: Vec<Dataset> = records
            .into_iter()
            .map(|r| Dataset::new(r.id, r.name, r.description))
            .collect();
        info!(count = datasets.len(), "ingested dataset catalog");
        Self { datasets }
    }

    /// Look up a dataset by its provider-assigned id.
    pub fn get(&self, id: u32) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    /// Look up a dataset, failing with [`PolicyError::DatasetNotFound`].
    pub fn require(&self, id: u32) -> PolicyResult<&Dataset> {
        self.get(id).ok_or(PolicyError::DatasetNotFound(id))
    }

    /// Iterate datasets in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
