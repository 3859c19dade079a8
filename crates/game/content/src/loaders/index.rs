//! RON-backed asset index.

use std::io;
use std::marker::PhantomData;
use std::path::Path;

use export_core::{Asset, AssetIndex, CollectError, ConfigRecord};
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use super::load_record;

/// Finds records of type `T` in `.ron` files under a source location.
///
/// Directories are scanned recursively in file-name order. Files holding a
/// record of another type are skipped; unreadable or undecodable files fail
/// the scan.
pub struct RonAssetIndex<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> RonAssetIndex<T> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for RonAssetIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AssetIndex<T> for RonAssetIndex<T>
where
    T: ConfigRecord + DeserializeOwned,
{
    fn find(&self, location: &Path) -> Result<Vec<Asset<T>>, CollectError> {
        let mut assets = Vec::new();

        for entry in WalkDir::new(location).sort_by_file_name() {
            let entry = entry.map_err(|err| CollectError::Scan {
                location: location.to_path_buf(),
                source: err.into(),
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "ron") {
                continue;
            }

            match load_record::<T>(path) {
                Ok(Some(record)) => {
                    tracing::debug!(
                        target: "content::index",
                        record = record.name(),
                        path = %path.display(),
                        "loaded record"
                    );
                    assets.push(Asset {
                        path: path.to_path_buf(),
                        record,
                    });
                }
                Ok(None) => {
                    tracing::trace!(
                        target: "content::index",
                        path = %path.display(),
                        "skipped record of another type"
                    );
                }
                Err(err) => {
                    return Err(match err.downcast::<io::Error>() {
                        Ok(source) => CollectError::Read {
                            path: path.to_path_buf(),
                            source,
                        },
                        Err(err) => CollectError::Decode {
                            path: path.to_path_buf(),
                            message: format!("{err:#}"),
                        },
                    });
                }
            }
        }

        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, Pet};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, file: &str, content: &str) {
        let path = dir.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_is_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Sword.ron", "Item(rank: SR)");
        write(dir.path(), "Axe.ron", "Item(rank: R)");
        write(dir.path(), "Mochi.ron", "Pet(rank: N)");
        write(dir.path(), "notes.txt", "not a record");
        write(dir.path(), "nested/Bow.ron", "Item()");

        let index = RonAssetIndex::<Item>::new();
        let names: Vec<_> = index
            .find(dir.path())
            .unwrap()
            .into_iter()
            .map(|asset| asset.record.name)
            .collect();
        assert_eq!(names, ["Axe", "Sword", "Bow"]);

        let pets = RonAssetIndex::<Pet>::new().find(dir.path()).unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].path, dir.path().join("Mochi.ron"));
    }

    #[test]
    fn test_decode_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Broken.ron", "Item(rank: ");
        let err = RonAssetIndex::<Item>::new().find(dir.path()).unwrap_err();
        match err {
            CollectError::Decode { path, .. } => assert_eq!(path, dir.path().join("Broken.ron")),
            other => panic!("unexpected {other}"),
        }
    }
}
