//! Named dataset registry
//!
//! Explicit owned store for imported datasets, passed to whichever
//! component needs lookup-by-name. Replaces are wholesale: importing under
//! an existing name swaps the entire dataset, never patches it.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::app::models::Dataset;

/// In-memory registry of imported datasets, keyed by dataset name
#[derive(Debug, Default)]
pub struct DatasetRegistry {
    datasets: HashMap<String, Dataset>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset under its name, returning the dataset it replaced
    /// if the name was already registered
    pub fn insert(&mut self, dataset: Dataset) -> Option<Dataset> {
        let replaced = self.datasets.insert(dataset.name.clone(), dataset);
        if replaced.is_some() {
            info!("Replaced existing dataset");
        } else {
            debug!("Registered new dataset ({} total)", self.datasets.len());
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    /// Evict a dataset, returning it if it was present
    pub fn remove(&mut self, name: &str) -> Option<Dataset> {
        self.datasets.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    /// Registered dataset names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.datasets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
