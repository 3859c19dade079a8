//! Export commands

use anyhow::Result;
use clap::Parser;
use console::style;
use export_core::{DispatchError, ExportContext, ExportFailure, RunSummary};

use super::{Workspace, finish, write_mode};

/// Export selected schemas
#[derive(Parser, Debug)]
pub struct Export {
    /// Exporter names (see `list`)
    #[arg(required = true)]
    pub schemas: Vec<String>,

    /// Report stale files without writing
    #[arg(long)]
    pub check: bool,
}

impl Export {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        let registry = workspace.registry()?;
        for name in &self.schemas {
            if registry.find(name).is_none() {
                let known: Vec<_> = registry.names().collect();
                anyhow::bail!("Unknown exporter `{name}` (known: {})", known.join(", "));
            }
        }

        let pipeline = workspace.pipeline(&registry)?;
        let output_root = workspace.output_root()?;
        let mode = write_mode(self.check);
        let ctx = ExportContext {
            output_root: &output_root,
            pipeline: &pipeline,
            mode,
        };

        println!(
            "{} {}",
            style("Exporting to").bold(),
            style(output_root.display()).cyan()
        );

        let mut summary = RunSummary::default();
        for name in &self.schemas {
            match registry.export_one(name, &ctx) {
                Ok(report) => summary.reports.push(report),
                Err(DispatchError::Export { schema, source }) => {
                    summary.failures.push(ExportFailure { schema, error: source })
                }
                Err(err) => return Err(err.into()),
            }
        }

        finish(&summary, mode)
    }
}

/// Export every registered schema
#[derive(Parser, Debug)]
pub struct ExportAll {
    /// Report stale files without writing
    #[arg(long)]
    pub check: bool,
}

impl ExportAll {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        let registry = workspace.registry()?;
        let pipeline = workspace.pipeline(&registry)?;
        let output_root = workspace.output_root()?;
        let mode = write_mode(self.check);
        let ctx = ExportContext {
            output_root: &output_root,
            pipeline: &pipeline,
            mode,
        };

        println!(
            "{} {} schemas to {}",
            style("Exporting").bold(),
            registry.len(),
            style(output_root.display()).cyan()
        );

        let summary = registry.export_all(&ctx);
        finish(&summary, mode)
    }
}
