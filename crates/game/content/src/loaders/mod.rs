//! Content loaders for reading config records from RON files.
//!
//! One record per file. The document starts with the schema type name, and
//! the file stem is the record's identity name:
//!
//! ```text
//! items/Sword.ron
//! Item(
//!     kind: Weapon,
//!     rank: SR,
//!     tags: ["weapon", "melee"],
//! )
//! ```

mod index;

pub use index::RonAssetIndex;

use std::path::Path;

use anyhow::Context;
use export_core::ConfigRecord;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Loads the record in `path`.
///
/// Returns `Ok(None)` when the file holds a record of another type.
pub fn load_record<T>(path: &Path) -> LoadResult<Option<T>>
where
    T: ConfigRecord + DeserializeOwned,
{
    let content = read_file(path)?;
    let info = T::type_info();

    match leading_type_name(&content) {
        Some(found) if found == info.name() => {}
        Some(_) => return Ok(None),
        None => anyhow::bail!(
            "{} does not start with a record type name",
            path.display()
        ),
    }

    let mut record: T = ron::from_str(&content)
        .with_context(|| format!("Failed to parse {} RON", info.name()))?;

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .with_context(|| format!("{} has no usable file stem", path.display()))?;
    record.set_name(name.to_string());

    Ok(Some(record))
}

/// First identifier of a RON document, skipping whitespace, comments and
/// `#![enable(..)]` extension attributes.
pub fn leading_type_name(content: &str) -> Option<&str> {
    let mut rest = content;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("#!") {
            rest = after.split_once(']').map_or("", |(_, tail)| tail);
        } else {
            break;
        }
    }

    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let ident = &rest[..end];
    ident
        .starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        .then_some(ident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, ItemKind, Rank};
    use tempfile::TempDir;

    #[test]
    fn test_leading_type_name() {
        assert_eq!(leading_type_name("Item(rank: SR)"), Some("Item"));
        assert_eq!(
            leading_type_name("// sword\n/* block */\n#![enable(implicit_some)]\n  Pet ( )"),
            Some("Pet")
        );
        assert_eq!(leading_type_name("(rank: SR)"), None);
        assert_eq!(leading_type_name(""), None);
    }

    #[test]
    fn test_load_record_names_from_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Sword.ron");
        std::fs::write(
            &path,
            "Item(\n    kind: Weapon,\n    rank: SR,\n    tags: [\"weapon\", \"melee\"],\n)\n",
        )
        .unwrap();

        let item: Item = load_record(&path).unwrap().unwrap();
        assert_eq!(item.name, "Sword");
        assert_eq!(item.kind, ItemKind::Weapon);
        assert_eq!(item.rank, Rank::SR);
        assert_eq!(item.tags, ["weapon", "melee"]);
        assert_eq!(item.stack_limit, 0);
    }

    #[test]
    fn test_other_record_type_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Mochi.ron");
        std::fs::write(&path, "Pet(rank: R)").unwrap();
        assert!(load_record::<Item>(&path).unwrap().is_none());
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Broken.ron");
        std::fs::write(&path, "Item(rank: Legendary)").unwrap();
        let err = load_record::<Item>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse Item RON"));
    }
}
