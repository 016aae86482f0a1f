use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use moodmap::colors::DefaultTheme;
use moodmap::dataset::Dataset;
use moodmap::filter::{FilterSelection, SelectionState};
use moodmap::model::SentimentBucket;
use moodmap::output::{self, OutputFormat};
use moodmap::pipeline::{Pipeline, DEFAULT_COLOR_STEPS};

#[derive(Parser)]
#[command(
    name = "moodmap",
    about = "Aggregate review sentiment into chart-ready view models"
)]
struct Cli {
    /// JSON array of comments: {comment_id, score, sentiment, gender}.
    #[arg(long)]
    comments: PathBuf,

    /// JSON array of province summaries.
    #[arg(long)]
    provinces: Option<PathBuf>,

    /// Sentiment bucket to filter on, by index (0-4) or label. Omit for the general view.
    #[arg(long)]
    bucket: Option<String>,

    /// Output format: pretty, text, or json.
    #[arg(long, default_value = "pretty")]
    format: String,

    /// Number of samples in the color bar.
    #[arg(long, default_value_t = DEFAULT_COLOR_STEPS)]
    color_steps: usize,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "pretty" => Ok(OutputFormat::Pretty),
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected pretty, text, or json)"),
    }
}

fn parse_bucket(s: &str) -> Result<SentimentBucket> {
    if let Ok(index) = s.parse::<usize>() {
        return SentimentBucket::from_index(index)
            .with_context(|| format!("bucket index {index} out of range (expected 0-4)"));
    }
    SentimentBucket::from_label(s).with_context(|| format!("unknown sentiment bucket: {s}"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fmt = parse_format(&cli.format)?;
    let state = match cli.bucket.as_deref() {
        Some(b) => SelectionState::new().select(parse_bucket(b)?),
        None => SelectionState::new(),
    };
    let selection: FilterSelection = state.selection();

    let dataset = Dataset::load(&cli.comments, cli.provinces.as_deref())
        .with_context(|| format!("failed to load {}", cli.comments.display()))?;
    debug!(selection = %selection, "rendering");

    let pipeline = Pipeline::new(Box::new(DefaultTheme), cli.color_steps);
    let dashboard = pipeline
        .run(dataset.comments(), dataset.provinces(), selection)
        .context("data integrity issue")?;

    let rendered = match fmt {
        OutputFormat::Json => output::format_json(&dashboard)?,
        OutputFormat::Text => output::format_text(&dashboard),
        OutputFormat::Pretty => output::format_pretty(&dashboard),
    };
    println!("{rendered}");

    info!(
        comments = dataset.comments().len(),
        provinces = dataset.provinces().len(),
        "done"
    );
    Ok(())
}
