//! Preference commands

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;

use super::Workspace;
use crate::prefs::PrefKey;

/// Print a preference value
#[derive(Parser, Debug)]
pub struct ConfigGet {
    #[arg(value_enum)]
    pub key: PrefKey,
}

impl ConfigGet {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        let store = workspace.preferences()?;
        println!("{}", store.get(self.key));
        Ok(())
    }
}

/// Store a preference value
#[derive(Parser, Debug)]
pub struct ConfigSet {
    #[arg(value_enum)]
    pub key: PrefKey,

    pub value: String,
}

impl ConfigSet {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        let mut store = workspace.preferences()?;
        store.set(self.key, &self.value)?;
        store.save()?;

        let key = self
            .key
            .to_possible_value()
            .map_or_else(String::new, |v| v.get_name().to_string());
        println!(
            "{} {} = {}",
            style("✓").green().bold(),
            style(key).bold(),
            style(store.get(self.key)).cyan()
        );
        Ok(())
    }
}

/// Print the preference file location
#[derive(Parser, Debug)]
pub struct ConfigPath {}

impl ConfigPath {
    pub fn execute(self, workspace: &Workspace) -> Result<()> {
        let store = workspace.preferences()?;
        println!("{}", store.path().display());
        Ok(())
    }
}
