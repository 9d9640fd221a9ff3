use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use headstat_git::{report, Repository};
use headstat_logging::{init_tracing, LogFormat};

mod config;
mod render;

use config::{Overrides, ProjectConfig, Settings};
use render::{render, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "headstat",
    about = "Report branch, changed files, message and tags of a git HEAD",
    version
)]
struct Cli {
    /// Repository directory (default: current directory)
    path: Option<PathBuf>,

    /// Search parent directories for the repository
    #[arg(long)]
    discover: bool,

    /// Report output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormatChoice>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = match cli.path.clone() {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = ProjectConfig::load(&path)?;
    let overrides = Overrides {
        format: cli.format,
        discover: cli.discover,
        log_level: cli.log_level.as_deref(),
        log_format: cli.log_format.map(Into::into),
    };
    let settings = Settings::resolve(overrides, config.as_ref())?;

    init_tracing(&settings.log_level, settings.log_format);

    info!(
        path = %path.display(),
        discover = settings.discover,
        config = config.is_some(),
        "Reading HEAD status"
    );

    let repo = if settings.discover {
        Repository::discover(&path)
    } else {
        Repository::open(&path)
    }
    .with_context(|| format!("Failed to open repository at {}", path.display()))?;

    let status = report(&repo).context("Failed to read HEAD status")?;

    println!("{}", render(&status, settings.format)?);

    Ok(())
}
