//! Portal configuration CLI
//!
//! Entry point for the `portalcfg` command-line tool.

use clap::{Parser, Subcommand};
use portal_config::{load_config, merge_file, ConfigError};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portalcfg")]
#[command(about = "Template/system portal configuration merge tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a double-configuration file and print the merged document
    Merge {
        /// Path to the double-configuration file
        #[arg(long, short = 'c', default_value = "configurationFile.json")]
        config: PathBuf,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Run the full load path and report a summary
    Verify {
        /// Path to the double-configuration file
        #[arg(long, short = 'c', default_value = "configurationFile.json")]
        config: PathBuf,
    },

    /// Print the group of a device by key
    Group {
        /// Path to the double-configuration file
        #[arg(long, short = 'c', default_value = "configurationFile.json")]
        config: PathBuf,

        /// Device key (matched case-insensitively)
        key: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no group found for device key '{0}'")]
    GroupNotFound(String),

    #[error("failed to render merged document: {0}")]
    Render(#[from] serde_json::Error),
}

fn exit_code(err: &CliError) -> i32 {
    match err {
        CliError::Config(ConfigError::FileNotFound(_)) | CliError::Config(ConfigError::Io(_)) => 66,
        CliError::Config(_) => 65,
        CliError::GroupNotFound(_) => 1,
        CliError::Render(_) => 70,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Merge { config, compact } => run_merge(&config, compact),
        Commands::Verify { config } => run_verify(&config),
        Commands::Group { config, key } => run_group(&config, &key),
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        process::exit(exit_code(&err));
    }
}

fn run_merge(path: &Path, compact: bool) -> Result<(), CliError> {
    let merged = merge_file(path)?;
    let rendered = if compact {
        serde_json::to_string(&merged)?
    } else {
        serde_json::to_string_pretty(&merged)?
    };
    println!("{rendered}");
    Ok(())
}

fn run_verify(path: &Path) -> Result<(), CliError> {
    let loaded = load_config(path)?;
    let config = &loaded.config;

    println!("configuration OK");
    println!("  source:       {}", loaded.source.path);
    println!("  digest:       {}", loaded.source.digest);
    if let Some(name) = config.info.as_ref().and_then(|info| info.name.as_deref()) {
        println!("  system:       {name}");
    }
    println!("  devices:      {}", config.devices.len());
    println!("  rooms:        {}", config.rooms.len());
    println!("  source lists: {}", config.source_lists.len());
    println!("  tie lines:    {}", config.tie_lines.len());
    Ok(())
}

fn run_group(path: &Path, key: &str) -> Result<(), CliError> {
    let loaded = load_config(path)?;
    match loaded.config.group_for_device_key(key) {
        Some(group) => {
            println!("{group}");
            Ok(())
        }
        None => Err(CliError::GroupNotFound(key.to_string())),
    }
}
