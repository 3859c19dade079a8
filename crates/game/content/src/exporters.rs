//! One exporter per record schema.

use std::path::Path;

use export_core::{
    ConfigRecord, DispatchError, Exporter, ExporterRegistry, Pipeline, PipelineError,
    RecordExporter,
};
use serde::de::DeserializeOwned;

use crate::loaders::RonAssetIndex;
use crate::schema::{Item, Pet, Reward, ShopEntry, Skill};

/// Source directory of each schema, relative to the content root.
pub const SOURCE_DIRS: [(&str, &str); 5] = [
    ("Item", "items"),
    ("Pet", "pets"),
    ("Skill", "skills"),
    ("Reward", "rewards"),
    ("ShopEntry", "shop"),
];

fn source_dir(schema: &str) -> &'static str {
    SOURCE_DIRS
        .iter()
        .find(|(name, _)| *name == schema)
        .map_or("", |(_, dir)| *dir)
}

fn ron_exporter<T>(content_root: &Path) -> Box<dyn Exporter>
where
    T: ConfigRecord + DeserializeOwned,
{
    let dir = source_dir(T::type_info().name());
    Box::new(RecordExporter::new(
        RonAssetIndex::<T>::new(),
        vec![content_root.join(dir)],
    ))
}

/// Every exporter of the project, reading RON assets under `content_root`.
pub fn exporters(content_root: &Path) -> Vec<Box<dyn Exporter>> {
    vec![
        ron_exporter::<Item>(content_root),
        ron_exporter::<Pet>(content_root),
        ron_exporter::<Skill>(content_root),
        ron_exporter::<Reward>(content_root),
        ron_exporter::<ShopEntry>(content_root),
    ]
}

pub fn registry(content_root: &Path) -> Result<ExporterRegistry, DispatchError> {
    ExporterRegistry::new(exporters(content_root))
}

/// Pipeline with the built-in converters and a plan for every registered
/// schema.
pub fn pipeline(registry: &ExporterRegistry) -> Result<Pipeline, PipelineError> {
    Pipeline::builder()
        .with_builtin_converters()
        .schemas(registry.target_types())
        .build()
}
