//! Command-line interface for pytally.

use anyhow::{anyhow, Context};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analyze::Runner;
use crate::config::{self, Config};
use crate::discover::{collect_files, DiscoverError};
use crate::parser;
use crate::report::{self, Report};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Extension of the source files pytally analyzes.
pub const SOURCE_EXTENSION: &str = ".py";

/// Structural statistics for Python source trees.
///
/// Walks a directory, parses every `.py` file, counts lines, functions,
/// classes and imports, prints a report and saves it as JSON.
#[derive(Parser)]
#[command(name = "pytally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to analyze (default: config `root` or the built-in path)
    pub root: Option<PathBuf>,

    /// Where to write the JSON report (default: analysis_result.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter for stderr diagnostics, e.g. "debug" (RUST_LOG wins)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// How an analysis run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The root is not a directory; nothing was written.
    MissingRoot,
    /// No candidate files were found; nothing was written.
    NoFiles,
    /// The report was printed and saved.
    Written(Report),
}

/// Load the explicit config, or a discovered one, or the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::parse_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    match config::discover_config(Path::new(".")) {
        Some(path) => Config::parse_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Send tracing output to stderr so stdout carries only the report.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

/// Run the command.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(config.log_level(cli.log_level.as_deref()))?;

    let root = config.root(cli.root.as_deref());
    let output = config.output(cli.output.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_analysis(&root, &output, &mut out)?;

    Ok(EXIT_SUCCESS)
}

/// Discover, analyze, aggregate and report on everything under `root`.
///
/// The textual report goes to `out`; the JSON report is written to `output`
/// only when at least one candidate file was found.
pub fn run_analysis<W: Write>(root: &Path, output: &Path, out: &mut W) -> anyhow::Result<Outcome> {
    parser::init();
    let parser = parser::for_extension(SOURCE_EXTENSION)
        .ok_or_else(|| anyhow!("no parser registered for {}", SOURCE_EXTENSION))?;
    tracing::debug!(language = parser.language(), root = %root.display(), "starting analysis");

    let abs_root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    report::write_header(out, &abs_root)?;

    let files = match collect_files(root, parser.extension()) {
        Ok(files) => files,
        Err(DiscoverError::MissingRoot(path)) => {
            report::write_missing_root(out, &path)?;
            return Ok(Outcome::MissingRoot);
        }
    };

    report::write_discovered(out, files.len(), parser.extension())?;

    if files.is_empty() {
        report::write_no_files(out, parser.extension())?;
        return Ok(Outcome::NoFiles);
    }

    let mut progress_err = None;
    let records = Runner::new(parser.as_ref()).run(&files, |path| {
        if progress_err.is_none() {
            progress_err = report::write_progress(&mut *out, path).err();
        }
    });
    if let Some(e) = progress_err {
        return Err(e.into());
    }

    let report = Report::new(records);
    report::write_summary(out, &report.summary)?;
    report::write_details(out, &report.files)?;

    report::write_json(output, &report)?;
    report::write_saved(out, output)?;

    Ok(Outcome::Written(report))
}
