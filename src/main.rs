use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use doclens::config::{DEFAULT_CHUNK_SIZE, DEFAULT_EXPORT_BASE, DEFAULT_TOP_WORDS};
use doclens::{provider, AnalysisConfig, Handler, HttpDocumentSource, Report, Request, Response};

#[derive(Parser)]
#[command(
    name = "doclens",
    about = "Word frequency, readability and sentiment for a shared document",
    version
)]
struct Cli {
    /// Sharing link of the document (…/document/d/<id>/…)
    #[arg(conflicts_with = "files")]
    link: Option<String>,

    /// Local text files to analyze instead (reads stdin if neither is given)
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Words per sentiment chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Entries kept in the frequency table
    #[arg(long, default_value_t = DEFAULT_TOP_WORDS)]
    top_words: usize,

    /// Scheme and host the export URL is built on
    #[arg(long, default_value = DEFAULT_EXPORT_BASE)]
    export_base: String,

    /// Write frequency.png and sentiment.png here
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Leave the base64 images out of the JSON
    #[arg(long)]
    no_images: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_images(report: &Report, dir: &Path, suffix: &str) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let charts = [
        ("frequency", report.frequency_chart.as_deref()),
        ("sentiment", report.sentiment_chart.as_deref()),
    ];
    for (name, encoded) in charts {
        let Some(encoded) = encoded else { continue };
        let path = dir.join(format!("{name}{suffix}.png"));
        let bytes = STANDARD.decode(encoded).context("decoding chart")?;
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "chart written");
    }
    Ok(())
}

fn emit(cli: &Cli, report: Report, suffix: &str) -> Result<()> {
    for (metric, value) in report.readability.entries() {
        tracing::info!(metric, %value, "readability");
    }
    if let Some(dir) = &cli.out_dir {
        write_images(&report, dir, suffix)?;
    }
    let report = if cli.no_images { report.without_images() } else { report };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = AnalysisConfig::default()
        .with_chunk_size(cli.chunk_size)
        .with_top_words(cli.top_words)
        .with_export_base(&cli.export_base);
    let metrics = provider::init();

    if let Some(link) = &cli.link {
        let source = HttpDocumentSource::new(config.export_base.clone());
        let handler = Handler::new(source, metrics, config);
        return match handler.handle(Request::Submit { link: link.clone() }) {
            Response::Results(report) => {
                emit(cli, *report, "")?;
                Ok(ExitCode::SUCCESS)
            }
            Response::InputForm { notice } => {
                eprintln!("{}", notice.unwrap_or_default());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let mut inputs: Vec<(String, String)> = Vec::new();
    if cli.files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        inputs.push((String::new(), text));
    } else {
        for (i, path) in cli.files.iter().enumerate() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let suffix = if cli.files.len() > 1 {
                format!("-{}", i + 1)
            } else {
                String::new()
            };
            inputs.push((suffix, text));
        }
    }

    for (suffix, text) in inputs {
        let report = doclens::analyze_text(metrics, &text, &config)?;
        emit(cli, report, &suffix)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
