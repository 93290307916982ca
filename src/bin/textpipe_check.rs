use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};

use textpipe::app_config::{Config, LogLevel};
use textpipe::{Locale, ProcessingEngine};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Run stdin through a processing pipeline, one sentence per line
#[derive(Parser, Debug)]
#[command(name = "textpipe-check", version)]
struct Args {
    /// Host configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pipeline descriptor, overriding the one in the configuration
    #[arg(short, long)]
    pipeline: Option<PathBuf>,

    /// Source language tag, e.g. zh-CN
    #[arg(short, long)]
    source: String,

    /// Target language tag, e.g. en
    #[arg(short, long)]
    target: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Stderr logger with timestamps and coloured levels
struct CheckLogger {
    level: LevelFilter,
}

impl CheckLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CheckLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn colour_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CheckLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::colour_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(pipeline) = args.pipeline {
        config.pipeline_file = Some(pipeline);
    }
    if let Some(level) = args.log_level {
        config.log_level = level.into();
    }

    CheckLogger::init(config.log_level.into())?;

    let source = Locale::parse(&args.source).context("Invalid source language")?;
    let target = Locale::parse(&args.target).context("Invalid target language")?;

    let started = Instant::now();
    let engine = ProcessingEngine::new(&config)?;
    let pipeline = engine.pipeline(&source, &target)?;
    info!(
        "Pipeline ready in {} ms: [{}]",
        started.elapsed().as_millis(),
        pipeline.stage_names().join(", ")
    );

    let started = Instant::now();
    let mut sentences = 0usize;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in io::stdin().lock().lines() {
        let line = line?;
        writeln!(out, "{}", pipeline.process_text(&line)?)?;
        sentences += 1;
    }

    let elapsed = started.elapsed().as_secs_f64() * 1000.0;
    if sentences > 0 {
        info!(
            "Processed {} sentences in {:.1} ms ({:.3} ms/sentence)",
            sentences,
            elapsed,
            elapsed / sentences as f64
        );
    }

    Ok(())
}
