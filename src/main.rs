// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;

use bergamot_session::assets::AssetLoader;
use bergamot_session::language_utils::{LanguagePair, get_language_name, split_pair_key};
use bergamot_session::registry::ModelRegistry;

/// CLI wrapper for the log level
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the language pairs available in a model registry
    Pairs {
        /// Registry JSON location (URL or local path)
        #[arg(short, long)]
        registry: String,
    },

    /// Download and prepare one pair's assets without constructing a model
    Fetch {
        /// Registry JSON location (URL or local path)
        #[arg(short, long)]
        registry: String,

        /// Source language code (e.g., 'en', 'es', 'fr')
        #[arg(short, long)]
        from: String,

        /// Target language code (e.g., 'en', 'es', 'fr')
        #[arg(short, long)]
        to: String,

        /// Verify downloads against the registry checksums
        #[arg(long)]
        verify: bool,
    },
}

/// bergamot-session - registry and asset utility
///
/// Inspects Bergamot model registries and pre-fetches model assets into
/// alignment-constrained buffers. Translation itself needs an engine runtime
/// and is exposed through the library API, not this tool.
#[derive(Parser, Debug)]
#[command(name = "bergamot-session")]
#[command(version = "0.1.0")]
#[command(about = "Bergamot model registry and asset utility")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger { level });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{color}{} {}\x1B[0m", now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();

    let level = cli.log_level.map(LevelFilter::from).unwrap_or(LevelFilter::Info);
    CustomLogger::init(level)?;

    match cli.command {
        Commands::Pairs { registry } => run_pairs(&registry).await,
        Commands::Fetch {
            registry,
            from,
            to,
            verify,
        } => run_fetch(&registry, &from, &to, verify).await,
    }
}

async fn run_pairs(registry_location: &str) -> Result<()> {
    let registry = read_registry(registry_location).await?;

    for key in registry.pair_keys() {
        match split_pair_key(key) {
            Some((source, target)) => println!(
                "{key}  {} -> {}",
                get_language_name(&source),
                get_language_name(&target)
            ),
            None => println!("{key}"),
        }
    }
    info!("{} pair(s) registered", registry.len());
    Ok(())
}

async fn run_fetch(registry_location: &str, from: &str, to: &str, verify: bool) -> Result<()> {
    let registry = read_registry(registry_location).await?;
    let pair = LanguagePair::new(from, to);
    let assets = registry
        .get(&pair)
        .ok_or_else(|| anyhow!("Language pair '{pair}' not found in registry"))?;

    let loader = AssetLoader::new();
    for descriptor in assets.descriptors(verify) {
        let buffer = loader
            .load(&descriptor)
            .await
            .with_context(|| format!("Failed to fetch {} asset", descriptor.kind))?;
        println!(
            "{}: {} bytes, alignment {}",
            descriptor.kind,
            buffer.len(),
            buffer.alignment()
        );
    }
    info!("All assets for '{pair}' fetched");
    Ok(())
}

async fn read_registry(location: &str) -> Result<ModelRegistry> {
    let json = if location.starts_with("http://") || location.starts_with("https://") {
        reqwest::get(location)
            .await
            .with_context(|| format!("Failed to fetch registry from {location}"))?
            .text()
            .await
            .with_context(|| format!("Failed to read registry body from {location}"))?
    } else {
        tokio::fs::read_to_string(location)
            .await
            .with_context(|| format!("Failed to read registry file {location}"))?
    };
    ModelRegistry::from_json(&json)
}
