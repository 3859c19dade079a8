//! Asset collection.
//!
//! An [`AssetIndex`] stands in for the host's asset database: it finds the
//! records of one type under a source location. The [`Collector`] merges the
//! results of every location into a name-keyed [`ConfigGroup`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::reflect::ConfigRecord;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("source location {0} does not exist")]
    MissingLocation(PathBuf),

    #[error("failed to scan {location}: {source}")]
    Scan { location: PathBuf, source: io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("duplicate {type_name} record `{name}` in {first} and {second}")]
    DuplicateRecord {
        type_name: String,
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// A loaded record and the file it came from.
#[derive(Clone, Debug)]
pub struct Asset<T> {
    pub path: PathBuf,
    pub record: T,
}

/// Finds every record of type `T` under a location.
pub trait AssetIndex<T>: Send + Sync {
    fn find(&self, location: &Path) -> Result<Vec<Asset<T>>, CollectError>;
}

/// All records of one schema type, keyed and ordered by identity name.
#[derive(Clone, Debug)]
pub struct ConfigGroup<T> {
    records: BTreeMap<String, Asset<T>>,
}

impl<T> Default for ConfigGroup<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<T: ConfigRecord> ConfigGroup<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.records.get(name).map(|asset| &asset.record)
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.records
            .iter()
            .map(|(name, asset)| (name.as_str(), &asset.record))
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset<T>> + '_ {
        self.records.values()
    }

    /// Adds `asset`, rejecting a second record with the same name.
    pub fn insert(&mut self, asset: Asset<T>) -> Result<(), CollectError> {
        match self.records.entry(asset.record.name().to_string()) {
            Entry::Occupied(existing) => Err(CollectError::DuplicateRecord {
                type_name: T::type_info().name().to_string(),
                name: existing.key().clone(),
                first: existing.get().path.clone(),
                second: asset.path,
            }),
            Entry::Vacant(slot) => {
                slot.insert(asset);
                Ok(())
            }
        }
    }
}

/// Gathers a [`ConfigGroup`] from source locations.
pub struct Collector;

impl Collector {
    pub fn collect<T, I>(index: &I, locations: &[PathBuf]) -> Result<ConfigGroup<T>, CollectError>
    where
        T: ConfigRecord,
        I: AssetIndex<T> + ?Sized,
    {
        let mut group = ConfigGroup::default();

        for location in locations {
            if !location.exists() {
                return Err(CollectError::MissingLocation(location.clone()));
            }

            let assets = index.find(location)?;
            tracing::debug!(
                target: "export::collect",
                location = %location.display(),
                found = assets.len(),
                "scanned source location"
            );
            for asset in assets {
                group.insert(asset)?;
            }
        }

        Ok(group)
    }
}
