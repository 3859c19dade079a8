//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod config;
mod export;
mod list;

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use export_core::{ExportReport, ExporterRegistry, Pipeline, RunSummary, WriteMode, WriteOutcome};

use crate::prefs::PreferenceStore;

pub use config::{ConfigGet, ConfigPath, ConfigSet};
pub use export::{Export, ExportAll};
pub use list::List;

/// Paths shared by every command.
pub struct Workspace {
    pub content_root: PathBuf,
    pub output_override: Option<PathBuf>,
    pub prefs_path: PathBuf,
}

impl Workspace {
    pub fn preferences(&self) -> Result<PreferenceStore> {
        PreferenceStore::open(&self.prefs_path)
    }

    /// `--output` wins over the stored preference.
    pub fn output_root(&self) -> Result<PathBuf> {
        match &self.output_override {
            Some(path) => Ok(path.clone()),
            None => Ok(self.preferences()?.output_root()),
        }
    }

    pub fn registry(&self) -> Result<ExporterRegistry> {
        game_content::registry(&self.content_root).context("Failed to build exporter registry")
    }

    pub fn pipeline(&self, registry: &ExporterRegistry) -> Result<Pipeline> {
        game_content::pipeline(registry).context("Failed to build export pipeline")
    }
}

pub(crate) fn write_mode(check: bool) -> WriteMode {
    if check { WriteMode::Check } else { WriteMode::Write }
}

pub(crate) fn print_report(report: &ExportReport) {
    let marker = match report.outcome {
        WriteOutcome::Written => style("✓").green().bold(),
        WriteOutcome::Unchanged => style("=").dim(),
        WriteOutcome::WouldWrite => style("!").yellow().bold(),
    };
    println!(
        "  {} {} {} ({} records, {})",
        marker,
        style(&report.schema).bold(),
        style(report.output.display()).cyan(),
        report.records,
        report.outcome.label()
    );
    for warning in &report.warnings {
        println!("      {} {}", style("warning:").yellow(), warning);
    }
}

/// Prints the run and fails when an exporter failed or, in check mode, when
/// a file is stale.
pub(crate) fn finish(summary: &RunSummary, mode: WriteMode) -> Result<()> {
    for report in &summary.reports {
        print_report(report);
    }
    for failure in &summary.failures {
        println!(
            "  {} {} {}",
            style("✗").red().bold(),
            style(&failure.schema).bold(),
            style(&failure.error).red()
        );
    }

    println!();
    println!(
        "{} schemas, {} records, {} warnings",
        style(summary.schemas_exported()).bold(),
        style(summary.total_records()).bold(),
        style(summary.warning_count()).bold()
    );

    if !summary.is_success() {
        anyhow::bail!("{} exporter(s) failed", summary.failures.len());
    }
    let stale = summary.count(WriteOutcome::WouldWrite);
    if mode == WriteMode::Check && stale > 0 {
        anyhow::bail!("{stale} generated file(s) are out of date");
    }
    Ok(())
}
