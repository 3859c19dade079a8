//! Per-schema exporters.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::collect::{AssetIndex, CollectError, Collector};
use crate::convert::RegistryError;
use crate::pipeline::Pipeline;
use crate::reflect::{ConfigRecord, Reflect, TypeInfo};
use crate::render::render;
use crate::walker::{Walker, Warning};
use crate::writer::{FileTemplate, WriteError, WriteMode, WriteOutcome, write_file};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("schema `{0}` was not registered with the pipeline")]
    NotPlanned(String),
}

/// Shared inputs of one export run.
#[derive(Clone, Copy)]
pub struct ExportContext<'a> {
    pub output_root: &'a Path,
    pub pipeline: &'a Pipeline,
    pub mode: WriteMode,
}

/// Outcome of exporting one schema.
#[derive(Debug)]
pub struct ExportReport {
    pub schema: String,
    pub records: usize,
    pub warnings: Vec<Warning>,
    pub output: PathBuf,
    pub outcome: WriteOutcome,
}

/// Collect, walk, render and write for one schema type.
pub trait Exporter: Send + Sync {
    /// Unique exporter name, used to select it from the control surface.
    fn name(&self) -> &str;

    fn target_type(&self) -> TypeInfo;

    fn source_locations(&self) -> &[PathBuf];

    /// Output file name relative to the output root.
    fn output_file(&self) -> String {
        format!("{}.lua", table_name(&self.target_type()))
    }

    fn export(&self, ctx: &ExportContext<'_>) -> Result<ExportReport, ExportError>;
}

/// Name of the Lua table holding every record of `schema`.
pub fn table_name(schema: &TypeInfo) -> String {
    format!("{}Config", schema.name())
}

/// Exporter for any config record type, backed by an [`AssetIndex`].
pub struct RecordExporter<T, I> {
    name: String,
    index: I,
    locations: Vec<PathBuf>,
    _record: PhantomData<fn() -> T>,
}

impl<T, I> RecordExporter<T, I>
where
    T: ConfigRecord,
    I: AssetIndex<T>,
{
    /// Exporter named after the record type.
    pub fn new(index: I, locations: Vec<PathBuf>) -> Self {
        Self {
            name: T::type_info().name().to_string(),
            index,
            locations,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T, I> Exporter for RecordExporter<T, I>
where
    T: ConfigRecord,
    I: AssetIndex<T>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn target_type(&self) -> TypeInfo {
        T::type_info()
    }

    fn source_locations(&self) -> &[PathBuf] {
        &self.locations
    }

    fn export(&self, ctx: &ExportContext<'_>) -> Result<ExportReport, ExportError> {
        let schema = T::type_info();
        let plan = ctx
            .pipeline
            .plan(&schema)
            .ok_or_else(|| ExportError::NotPlanned(schema.name().to_string()))?;

        let group = Collector::collect(&self.index, &self.locations)?;
        let walked = Walker::walk_group(
            plan,
            group
                .iter()
                .map(|(name, record)| (name, record as &dyn Reflect)),
        );

        let table = table_name(&schema);
        let template = FileTemplate {
            header: vec![
                format!("{table}: {} records.", schema.name()),
                "Generated by content-export. Edits inside the generated block are overwritten."
                    .to_string(),
            ],
            annotations: ctx.pipeline.annotate(&schema)?,
            class_name: schema.name().to_string(),
            table_name: table,
        };

        let output = ctx.output_root.join(self.output_file());
        let body = render(&walked.value, 0);
        let outcome = write_file(&output, &template, &body, ctx.mode)?;

        info!(
            target: "export::exporter",
            schema = %schema.name(),
            records = group.len(),
            warnings = walked.warnings.len(),
            outcome = outcome.label(),
            path = %output.display(),
            "exported"
        );

        Ok(ExportReport {
            schema: self.name.clone(),
            records: group.len(),
            warnings: walked.warnings,
            output,
            outcome,
        })
    }
}
