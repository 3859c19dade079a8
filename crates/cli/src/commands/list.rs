//! List registered exporters

use anyhow::Result;
use clap::Parser;
use console::style;

use super::Workspace;

/// List registered exporters
#[derive(Parser, Debug)]
pub struct List {}

impl List {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        let registry = workspace.registry()?;
        let output_root = workspace.output_root()?;

        println!("{}", style("Registered exporters").bold());
        for exporter in registry.exporters() {
            let sources: Vec<_> = exporter
                .source_locations()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            println!(
                "  {} {:<12} {} -> {}",
                style("→").cyan(),
                style(exporter.name()).bold(),
                sources.join(", "),
                style(output_root.join(exporter.output_file()).display()).dim()
            );
        }
        Ok(())
    }
}
