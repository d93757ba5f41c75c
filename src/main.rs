// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use vocabacov::app_config::{
    self, BotConfig, ENV_CHANNELS, ENV_DB_PATH, ENV_DEBUG, ENV_TIMEOUT, ENV_TOKEN, RawSettings,
};
use vocabacov::bot::Session;
use vocabacov::bot::telegram::{self, TelegramSink, TelegramSource};
use vocabacov::bulk;
use vocabacov::database::{DatabaseConnection, Repository};
use vocabacov::formats::BulkFormat;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for BulkFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliBulkFormat {
    Internal,
    Anki,
}

impl From<CliBulkFormat> for BulkFormat {
    fn from(cli_format: CliBulkFormat) -> Self {
        match cli_format {
            CliBulkFormat::Internal => BulkFormat::Internal,
            CliBulkFormat::Anki => BulkFormat::Anki,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the bot (default command)
    Run(RunArgs),

    /// Write every stored phrase to a file
    Export {
        /// Output file (anki: base name of the per-language files)
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "internal")]
        format: CliBulkFormat,
    },

    /// Load phrases from a file as active phrases
    Import {
        /// Input file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Input format
        #[arg(short, long, value_enum, default_value = "internal")]
        format: CliBulkFormat,

        /// Language of the phrases (required for anki files)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Generate shell completions for vocabacov
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Bot API token
    #[arg(long, env = ENV_TOKEN, hide_env_values = true)]
    token: Option<String>,

    /// Comma-separated chat identifiers the bot answers
    #[arg(long, env = ENV_CHANNELS)]
    channels: Option<String>,

    /// Debug logging, including transport requests (`--debug` or `--debug=false`)
    #[arg(
        long,
        env = ENV_DEBUG,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = debug_flag
    )]
    debug: bool,

    /// Long-poll timeout in seconds (0 uses the default)
    // Kept as text: the top-level copy is read even when a subcommand runs
    #[arg(long, env = ENV_TIMEOUT, value_name = "SECONDS")]
    timeout: Option<String>,
}

fn debug_flag(value: &str) -> Result<bool, String> {
    Ok(app_config::parse_debug_flag(value))
}

/// vocabacov - vocabulary collection bot
///
/// Collects phrases and translations sent in chat and exports them as flashcards.
#[derive(Parser, Debug)]
#[command(name = "vocabacov")]
#[command(version)]
#[command(about = "Vocabulary collection chat bot")]
#[command(long_about = "vocabacov stores phrases sent to a Telegram bot and exports them as Anki flashcards.

CHAT PROTOCOL:
    /en                   # three lines: language,
    cruel                 # phrase,
    жестокий              # translation
    /export en            # send active English phrases as a file and archive them
    /reset en             # make every English phrase active again

EXAMPLES:
    vocabacov --token 123:abc --channels 42,-100
    vocabacov export dump.json
    vocabacov export cards --format anki       # writes cards_<lang>.txt per language
    vocabacov import cards_en.txt --format anki --lang en
    vocabacov completions bash > vocabacov.bash

ENVIRONMENT:
    VOCABACOV_TOKEN, VOCABACOV_CHANNELS, VOCABACOV_DEBUG, VOCABACOV_TIMEOUT and
    VOCABACOV_DB_PATH stand in for the matching flags.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// SQLite database file
    #[arg(long, global = true, env = ENV_DB_PATH)]
    db_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // the logger passes everything; log::set_max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let (color, tag) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn apply_log_level(level: Option<CliLogLevel>) {
    if let Some(level) = level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.into());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vocabacov", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Export { path, format }) => {
            apply_log_level(cli.log_level);
            run_export(cli.db_path, &path, format.into()).await
        }
        Some(Commands::Import { path, format, lang }) => {
            apply_log_level(cli.log_level);
            run_import(cli.db_path, &path, format.into(), lang.as_deref()).await
        }
        Some(Commands::Run(args)) => run_bot(args, cli.db_path, cli.log_level).await,
        None => run_bot(cli.run, cli.db_path, cli.log_level).await,
    }
}

async fn open_repository(db_path: Option<PathBuf>) -> Result<Repository> {
    let db_path = app_config::resolve_db_path(db_path)?;
    let db = DatabaseConnection::new(&db_path)?;
    match db.stats().await {
        Ok(stats) => info!("Database {:?}: {}", db.path(), stats),
        Err(e) => warn!("Could not read database stats: {:#}", e),
    }
    Ok(Repository::new(db))
}

async fn run_bot(args: RunArgs, db_path: Option<PathBuf>, log_level: Option<CliLogLevel>) -> Result<()> {
    let config = BotConfig::resolve(RawSettings {
        token: args.token,
        channels: args.channels,
        debug: args.debug,
        timeout: args.timeout,
        db_path,
        log_level: log_level.map(Into::into),
    })
    .context("Configuration validation failed")?;

    log::set_max_level(config.log_level.into());
    info!(
        "Serving {} channel(s), long-poll timeout {}s",
        config.channels.len(),
        config.poll_timeout_secs
    );

    let repository = open_repository(Some(config.db_path.clone())).await?;

    let bot = telegram::connect(&config.token, config.poll_timeout_secs)
        .await
        .context("Failed to connect to Telegram")?;
    let mut source = TelegramSource::new(bot.clone(), config.poll_timeout_secs);
    let session = Session::new(config.channels, repository, TelegramSink::new(bot));

    tokio::select! {
        processed = session.run(&mut source) => {
            warn!("Polling stopped after {} messages", processed);
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown requested");
        }
    }

    Ok(())
}

async fn run_export(db_path: Option<PathBuf>, path: &Path, format: BulkFormat) -> Result<()> {
    let repository = open_repository(db_path).await?;
    let files = bulk::export_book(&repository, format, path)
        .await
        .with_context(|| format!("Failed to export phrases to {:?}", path))?;

    let total: usize = files
        .iter()
        .flat_map(|f| f.counts.iter().map(|(_, count)| count))
        .sum();
    info!("Export finished: {} phrases in {} file(s)", total, files.len());
    Ok(())
}

async fn run_import(
    db_path: Option<PathBuf>,
    path: &Path,
    format: BulkFormat,
    lang: Option<&str>,
) -> Result<()> {
    let repository = open_repository(db_path).await?;
    let stored = bulk::import_book(&repository, format, path, lang)
        .await
        .with_context(|| format!("Failed to import phrases from {:?}", path))?;

    info!("Import finished: {} phrases stored", stored);
    Ok(())
}
