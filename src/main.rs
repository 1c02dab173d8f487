//! File Manager Entry Point
//!
//! This is the main entry point for the sandboxed file manager. It
//! initializes logging, loads configuration, prepares the workspace
//! directory, and runs the interactive shell.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use filebox::cli;
use filebox::core::Config;
use filebox::domains::fs::FileManager;

/// An interactive file manager confined to a workspace directory.
#[derive(Debug, Parser)]
#[command(name = "filebox", version, about)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, default_value = "filebox.toml")]
    config: PathBuf,

    /// Override the workspace directory for this session.
    #[arg(long)]
    workspace: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (written with defaults on first run). This runs
    // before logging is initialized, so first-run creation is reported on
    // stdout here rather than logged inside the loader.
    let first_run = !args.config.exists();
    let mut config = Config::load(&args.config)?;
    if first_run {
        println!("Created default configuration at {}", args.config.display());
    }
    if let Some(workspace) = args.workspace {
        config.workspace.directory = workspace;
    }

    init_logging(&config.logging.level);

    info!("Starting filebox v{}", env!("CARGO_PKG_VERSION"));

    // Create the workspace if absent and make it the process working
    // directory
    let root = config.workspace.prepare()?;
    std::env::set_current_dir(&root)?;

    let mut manager = FileManager::new(&root)?;

    println!(
        "File manager sandboxed to {}. Type 'help' for a list of commands.",
        root.display()
    );

    cli::run(&mut manager)?;

    info!("Session ended");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never interleave with shell output on stdout.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
