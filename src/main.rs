use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use plagscan::{Locale, PlagscanConfig};
use tracing_subscriber::EnvFilter;

/// Compare a target document against a source document and print a JSON report.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document under review (UTF-8 text)
    target: PathBuf,

    /// Document to compare against (UTF-8 text)
    source: PathBuf,

    /// Label echoed as `sourceDocument`; defaults to the source file name
    #[arg(short, long)]
    label: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report language (en or id); overrides the config file
    #[arg(long)]
    locale: Option<Locale>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = match &cli.config {
        Some(path) => PlagscanConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlagscanConfig::default(),
    };
    if let Some(locale) = cli.locale {
        config.detector.locale = locale;
    }
    let detector = config.build_detector()?;

    let target = fs::read(&cli.target)
        .with_context(|| format!("reading {}", cli.target.display()))?;
    let source = fs::read(&cli.source)
        .with_context(|| format!("reading {}", cli.source.display()))?;
    let label = cli.label.unwrap_or_else(|| {
        cli.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| cli.source.display().to_string())
    });

    let report = detector.detect_bytes(&target, &source, &label)?;
    let json = if cli.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{json}");
    Ok(())
}
