//! Content export tool
//!
//! Renders authored config records into Lua table files for the game runtime.
//! Run with: `content-export <command>`

mod commands;
mod dirs;
mod logging;
mod prefs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{ConfigGet, ConfigPath, ConfigSet, Export, ExportAll, List, Workspace};

/// Content export tool
#[derive(Parser)]
#[command(name = "content-export")]
#[command(about = "Export config records to Lua tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Content root holding one directory per record schema
    #[arg(long, global = true, default_value = "content")]
    content: PathBuf,

    /// Output root for generated files (overrides the stored preference)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Preference file (defaults to the platform config directory)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Do not write the log file
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Export selected schemas
    Export(Export),

    /// Export every registered schema
    ExportAll(ExportAll),

    /// List registered exporters
    List(List),

    /// Read or change stored preferences
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
enum ConfigCommand {
    /// Print a preference value
    Get(ConfigGet),

    /// Store a preference value
    Set(ConfigSet),

    /// Print the preference file location
    Path(ConfigPath),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_dir = (!cli.no_log_file).then(dirs::log_dir);
    let _guard = logging::init(cli.verbose, log_dir.as_deref())?;

    let workspace = Workspace {
        content_root: cli.content,
        output_override: cli.output,
        prefs_path: cli.prefs.unwrap_or_else(prefs::PreferenceStore::default_path),
    };

    match cli.command {
        Command::Export(cmd) => cmd.execute(&workspace),
        Command::ExportAll(cmd) => cmd.execute(&workspace),
        Command::List(cmd) => cmd.execute(&workspace),
        Command::Config(config_cmd) => match config_cmd {
            ConfigCommand::Get(cmd) => cmd.execute(&workspace),
            ConfigCommand::Set(cmd) => cmd.execute(&workspace),
            ConfigCommand::Path(cmd) => cmd.execute(&workspace),
        },
    }
}
