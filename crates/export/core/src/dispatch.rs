//! Explicit exporter registry.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, error};

use crate::exporter::{ExportContext, ExportError, ExportReport, Exporter};
use crate::reflect::TypeInfo;
use crate::writer::WriteOutcome;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown exporter `{0}`")]
    UnknownExporter(String),

    #[error("exporter `{0}` registered twice")]
    DuplicateExporter(String),

    #[error("exporter `{schema}` failed: {source}")]
    Export {
        schema: String,
        #[source]
        source: ExportError,
    },
}

/// An exporter that failed during [`ExporterRegistry::export_all`].
#[derive(Debug)]
pub struct ExportFailure {
    pub schema: String,
    pub error: ExportError,
}

/// Aggregate of one export run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ExportReport>,
    pub failures: Vec<ExportFailure>,
}

impl RunSummary {
    pub fn schemas_exported(&self) -> usize {
        self.reports.len()
    }

    pub fn total_records(&self) -> usize {
        self.reports.iter().map(|r| r.records).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.reports.iter().map(|r| r.warnings.len()).sum()
    }

    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.reports.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Every exporter of the project, fixed at startup.
pub struct ExporterRegistry {
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Rejects two exporters sharing a name.
    pub fn new(exporters: Vec<Box<dyn Exporter>>) -> Result<Self, DispatchError> {
        let mut seen = HashSet::new();
        for exporter in &exporters {
            if !seen.insert(exporter.name().to_string()) {
                return Err(DispatchError::DuplicateExporter(exporter.name().to_string()));
            }
        }
        Ok(Self { exporters })
    }

    pub fn len(&self) -> usize {
        self.exporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.exporters.iter().map(|e| e.name())
    }

    pub fn exporters(&self) -> impl Iterator<Item = &dyn Exporter> + '_ {
        self.exporters.iter().map(|e| e.as_ref())
    }

    /// Record types handled by the registered exporters, for pipeline setup.
    pub fn target_types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.exporters.iter().map(|e| e.target_type())
    }

    pub fn find(&self, name: &str) -> Option<&dyn Exporter> {
        self.exporters
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.as_ref())
    }

    pub fn export_one(
        &self,
        name: &str,
        ctx: &ExportContext<'_>,
    ) -> Result<ExportReport, DispatchError> {
        let exporter = self
            .find(name)
            .ok_or_else(|| DispatchError::UnknownExporter(name.to_string()))?;
        exporter.export(ctx).map_err(|source| DispatchError::Export {
            schema: name.to_string(),
            source,
        })
    }

    /// Runs every exporter in registration order. A failing exporter is
    /// logged and recorded; the others still run.
    pub fn export_all(&self, ctx: &ExportContext<'_>) -> RunSummary {
        let mut summary = RunSummary::default();

        for exporter in &self.exporters {
            debug!(target: "export::dispatch", exporter = exporter.name(), "running exporter");
            match exporter.export(ctx) {
                Ok(report) => summary.reports.push(report),
                Err(err) => {
                    error!(
                        target: "export::dispatch",
                        exporter = exporter.name(),
                        error = %err,
                        "exporter failed, continuing"
                    );
                    summary.failures.push(ExportFailure {
                        schema: exporter.name().to_string(),
                        error: err,
                    });
                }
            }
        }

        summary
    }
}
